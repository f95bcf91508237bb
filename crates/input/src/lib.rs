//! Input mapping: key characters and textual scripts mapped to counter commands.
//!
//! # Invariants
//! - The kernel consumes commands, never raw input.
//! - Every embodiment (window, terminal, script) shares the same command set.

pub mod bindings;
pub mod script;

pub use bindings::InputMap;
pub use script::{ScriptError, parse_script};

pub fn crate_info() -> &'static str {
    "counter-input v0.1.0"
}
