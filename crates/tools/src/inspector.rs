use counter_common::Command;
use counter_kernel::{BigInt, Counter, CounterEvent};

/// Read-only queries against a running counter for debugging and the
/// desktop side panel.
pub struct CounterInspector;

impl CounterInspector {
    /// Produce a summary of the counter and its pending event log.
    pub fn summary(counter: &Counter) -> CounterSummary {
        let tally = counter.tally();
        CounterSummary {
            count: counter.count().clone(),
            dispatched: counter.dispatched(),
            pending_events: counter.events().len(),
            increments: tally.increments,
            decrements: tally.decrements,
            resets: tally.resets,
        }
    }

    /// The most recent `n` commands, oldest first.
    pub fn recent_commands(counter: &Counter, n: usize) -> Vec<Command> {
        let events = counter.events();
        let start = events.len().saturating_sub(n);
        events[start..]
            .iter()
            .map(|CounterEvent::Applied { command, .. }| *command)
            .collect()
    }
}

/// Summary of counter state for the inspector.
///
/// Per-command tallies cover the counter's whole lifetime, including events
/// that have since been drained or trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterSummary {
    pub count: BigInt,
    pub dispatched: u64,
    pub pending_events: usize,
    pub increments: u64,
    pub decrements: u64,
    pub resets: u64,
}

impl std::fmt::Display for CounterSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Counter: count={} dispatched={} pending_events={} (+{} -{} reset {})",
            self.count,
            self.dispatched,
            self.pending_events,
            self.increments,
            self.decrements,
            self.resets
        )
    }
}
