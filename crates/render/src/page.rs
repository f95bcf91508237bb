use counter_common::Command;
use counter_kernel::CounterState;
use serde::{Deserialize, Serialize};

/// Heading shown at the top of the page.
pub const HEADING: &str = "Elm Counter App";

/// Descriptive line shown below the controls.
pub const FOOTER: &str =
    "A simple counter: the model is one number, and every button sends a message that updates it.";

/// An interactive control bound to a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Control {
    pub label: String,
    pub command: Command,
}

impl Control {
    fn for_command(command: Command) -> Self {
        let label = match command {
            Command::Decrement => "-",
            Command::Reset => "Reset",
            Command::Increment => "+",
        };
        Self {
            label: label.to_string(),
            command,
        }
    }
}

/// Description of one rendered page.
///
/// Embodiments (egui window, terminal) lay this out; they do not compute any
/// of its text themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub heading: String,
    /// The count in base 10.
    pub count_text: String,
    /// Left to right: `-`, `Reset`, `+`.
    pub controls: Vec<Control>,
    pub footer: String,
}

/// Pure mapping from state to page.
pub fn render(state: &CounterState) -> Page {
    Page {
        heading: HEADING.to_string(),
        count_text: state.count.to_string(),
        controls: Command::ALL.into_iter().map(Control::for_command).collect(),
        footer: FOOTER.to_string(),
    }
}
