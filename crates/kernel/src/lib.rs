//! Counter Kernel: authoritative counter state, the pure update function,
//! and the run-loop owner with its event log.
//!
//! # Invariants
//! - `apply` is pure and total: every command is valid for every state.
//! - The count is an arbitrary-precision integer; no command overflows.
//! - All state mutations flow through `Counter::dispatch`.

pub mod counter;
pub mod state;

pub use counter::{CommandTally, Counter, CounterEvent, ReplayError};
pub use num_bigint::BigInt;
pub use state::{CounterState, apply, initialize};

pub fn crate_info() -> &'static str {
    "counter-kernel v0.1.0"
}
