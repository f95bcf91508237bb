use crate::state::{CounterState, apply, initialize};
use counter_common::Command;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

/// Record of one dispatched command.
///
/// Carries both sides of the transition so the log can be inspected without
/// re-running `apply`, and so replay can verify it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CounterEvent {
    Applied {
        command: Command,
        before: CounterState,
        after: CounterState,
    },
}

/// Errors from replaying an event log.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    /// An event's `before` does not match the state left by the previous event.
    #[error("event {index}: starts at {recorded} but the log left the count at {current}")]
    BrokenChain {
        index: usize,
        recorded: BigInt,
        current: BigInt,
    },
    /// Re-applying an event's command does not reproduce its `after`.
    #[error("event {index}: {command} recorded {recorded} but replay produced {replayed}")]
    Diverged {
        index: usize,
        command: Command,
        recorded: BigInt,
        replayed: BigInt,
    },
}

/// Lifetime count of each command kind. Unaffected by draining the log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandTally {
    pub increments: u64,
    pub decrements: u64,
    pub resets: u64,
}

impl CommandTally {
    fn record(&mut self, command: Command) {
        match command {
            Command::Increment => self.increments += 1,
            Command::Decrement => self.decrements += 1,
            Command::Reset => self.resets += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.increments + self.decrements + self.resets
    }
}

/// Owner of the counter state inside an application run loop.
///
/// Commands are applied one at a time, synchronously, and every transition
/// is appended to the event log.
#[derive(Debug, Clone, Default)]
pub struct Counter {
    state: CounterState,
    tally: CommandTally,
    event_log: Vec<CounterEvent>,
}

impl Counter {
    /// Start from `initialize()`.
    pub fn new() -> Self {
        Self::from_state(initialize())
    }

    /// Start from an arbitrary state.
    pub fn from_state(state: CounterState) -> Self {
        Self {
            state,
            tally: CommandTally::default(),
            event_log: Vec::new(),
        }
    }

    pub fn state(&self) -> &CounterState {
        &self.state
    }

    pub fn count(&self) -> &BigInt {
        &self.state.count
    }

    /// Total commands applied since construction (not reset by draining).
    pub fn dispatched(&self) -> u64 {
        self.tally.total()
    }

    pub fn tally(&self) -> CommandTally {
        self.tally
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[CounterEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<CounterEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Drop all but the newest `keep` events. Returns how many were dropped.
    pub fn trim_events(&mut self, keep: usize) -> usize {
        let excess = self.event_log.len().saturating_sub(keep);
        self.event_log.drain(..excess);
        excess
    }

    /// Apply one command and return the new state.
    pub fn dispatch(&mut self, command: Command) -> &CounterState {
        let after = apply(&self.state, command);
        let before = std::mem::replace(&mut self.state, after.clone());
        tracing::debug!(%command, before = %before.count, after = %after.count, "dispatched");
        self.tally.record(command);
        self.event_log.push(CounterEvent::Applied {
            command,
            before,
            after,
        });
        &self.state
    }

    /// Apply a sequence of commands in order.
    pub fn dispatch_all(&mut self, commands: impl IntoIterator<Item = Command>) -> &CounterState {
        for command in commands {
            self.dispatch(command);
        }
        &self.state
    }

    /// Reconstruct a counter from an event log.
    ///
    /// Starts from the first event's `before` state (or `initialize()` for an
    /// empty log) and re-applies each command, checking that every event
    /// continues from the previous one and reproduces its recorded `after`.
    pub fn replay(events: &[CounterEvent]) -> Result<Self, ReplayError> {
        let start = match events.first() {
            Some(CounterEvent::Applied { before, .. }) => before.clone(),
            None => initialize(),
        };
        let mut counter = Self::from_state(start);
        for (index, event) in events.iter().enumerate() {
            let CounterEvent::Applied {
                command,
                before,
                after,
            } = event;
            if *before != counter.state {
                return Err(ReplayError::BrokenChain {
                    index,
                    recorded: before.count.clone(),
                    current: counter.state.count.clone(),
                });
            }
            let replayed = counter.dispatch(*command);
            if replayed != after {
                return Err(ReplayError::Diverged {
                    index,
                    command: *command,
                    recorded: after.count.clone(),
                    replayed: replayed.count.clone(),
                });
            }
        }
        Ok(counter)
    }
}
