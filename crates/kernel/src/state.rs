use counter_common::Command;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

/// The whole application model: a single signed count.
///
/// There is no range constraint; `count` grows without bound in either
/// direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CounterState {
    pub count: BigInt,
}

impl CounterState {
    pub fn new(count: impl Into<BigInt>) -> Self {
        Self {
            count: count.into(),
        }
    }
}

/// Initial state at application start.
pub fn initialize() -> CounterState {
    CounterState::new(0)
}

/// Pure update: current state and a command to the next state.
pub fn apply(state: &CounterState, command: Command) -> CounterState {
    let count = match command {
        Command::Increment => &state.count + 1u32,
        Command::Decrement => &state.count - 1u32,
        Command::Reset => BigInt::default(),
    };
    CounterState { count }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(start: i64, commands: &[Command]) -> CounterState {
        commands
            .iter()
            .fold(CounterState::new(start), |s, &c| apply(&s, c))
    }

    #[test]
    fn initialize_is_zero() {
        assert_eq!(initialize(), CounterState::new(0));
        assert_eq!(initialize(), CounterState::default());
    }

    #[test]
    fn single_steps_for_many_values() {
        for n in [-1_000i64, -7, -1, 0, 1, 42, 1_000_000] {
            let s = CounterState::new(n);
            assert_eq!(apply(&s, Command::Increment), CounterState::new(n + 1));
            assert_eq!(apply(&s, Command::Decrement), CounterState::new(n - 1));
            assert_eq!(apply(&s, Command::Reset), CounterState::new(0));
        }
    }

    #[test]
    fn reset_is_idempotent() {
        let s = CounterState::new(17);
        let once = apply(&s, Command::Reset);
        let twice = apply(&once, Command::Reset);
        assert_eq!(once, twice);
        assert_eq!(twice, CounterState::new(0));
    }

    #[test]
    fn increment_and_decrement_are_inverse() {
        for n in [-3, 0, 9] {
            let s = CounterState::new(n);
            assert_eq!(run(n, &[Command::Increment, Command::Decrement]), s);
            assert_eq!(run(n, &[Command::Decrement, Command::Increment]), s);
        }
    }

    #[test]
    fn scenario_three_increments_from_zero() {
        assert_eq!(run(0, &[Command::Increment; 3]), CounterState::new(3));
    }

    #[test]
    fn scenario_decrement_then_reset_from_five() {
        let s = apply(&CounterState::new(5), Command::Decrement);
        assert_eq!(s, CounterState::new(4));
        let s = apply(&s, Command::Reset);
        assert_eq!(s, CounterState::new(0));
    }

    #[test]
    fn scenario_two_increments_from_negative_two() {
        let s = run(-2, &[Command::Increment, Command::Increment]);
        assert_eq!(s, CounterState::new(0));
    }

    #[test]
    fn apply_does_not_touch_input() {
        let s = CounterState::new(10);
        let _ = apply(&s, Command::Reset);
        assert_eq!(s, CounterState::new(10));
    }

    #[test]
    fn steps_past_i64_limits_are_exact() {
        let up = apply(&CounterState::new(i64::MAX), Command::Increment);
        assert_eq!(up.count, BigInt::from(i64::MAX) + 1u32);
        assert!(up.count > BigInt::from(i64::MAX));
        assert_eq!(up.count.to_string(), "9223372036854775808");

        let down = apply(&CounterState::new(i64::MIN), Command::Decrement);
        assert_eq!(down.count, BigInt::from(i64::MIN) - 1u32);
        assert!(down.count < BigInt::from(i64::MIN));
        assert_eq!(down.count.to_string(), "-9223372036854775809");

        let back = apply(&up, Command::Decrement);
        assert_eq!(back, CounterState::new(i64::MAX));
    }
}
