use crate::page::Page;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads a page description and produces output. It never sees
/// or mutates counter state; state is kernel-owned.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one page.
    fn render(&self, page: &Page) -> Self::Output;
}

/// Plain-text renderer for the CLI, logging, and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// Print the key hint under each control label.
    pub show_keys: bool,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key_hints() -> Self {
        Self { show_keys: true }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, page: &Page) -> String {
        let mut out = String::new();
        out.push_str(&format!("=== {} ===\n", page.heading));
        out.push_str(&format!("{}\n", page.count_text));

        let buttons: Vec<String> = page
            .controls
            .iter()
            .map(|c| format!("[ {} ]", c.label))
            .collect();
        out.push_str(&buttons.join(" "));
        out.push('\n');

        if self.show_keys {
            let hints: Vec<String> = page
                .controls
                .iter()
                .map(|c| format!("{}={}", c.label, c.command))
                .collect();
            out.push_str(&format!("({})\n", hints.join(", ")));
        }

        out.push_str(&page.footer);
        out.push('\n');
        out
    }
}
