//! Shared types for the counter workspace.
//!
//! # Invariants
//! - The command set is closed: every crate matches on the same three variants.

pub mod command;

pub use command::{Command, ParseCommandError};

pub fn crate_info() -> &'static str {
    "counter-common v0.1.0"
}
