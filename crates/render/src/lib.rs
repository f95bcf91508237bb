//! Rendering Adapter: state to page description, renderer-agnostic.
//!
//! # Invariants
//! - Renderers cannot mutate counter state.
//! - The page derives from state alone; `render` is pure.

mod page;
mod renderer;

pub use page::{Control, FOOTER, HEADING, Page, render};
pub use renderer::{DebugTextRenderer, Renderer};

pub fn crate_info() -> &'static str {
    "counter-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
