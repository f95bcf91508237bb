//! Developer Tooling: counter inspector.
//!
//! # Invariants
//! - Tools only read counter state; they never dispatch.

pub mod inspector;

pub use inspector::{CounterInspector, CounterSummary};

pub fn crate_info() -> &'static str {
    "counter-tools v0.1.0"
}
