use anyhow::Context;
use clap::{Parser, Subcommand};
use counter_input::{InputMap, parse_script};
use counter_kernel::{BigInt, Counter, CounterState};
use counter_render::{DebugTextRenderer, Renderer, render};
use counter_tools::CounterInspector;
use std::io::{BufRead, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "counter-cli", about = "Headless counter application")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Apply a command script and render the resulting page
    Run {
        /// Commands separated by spaces or commas, e.g. "inc inc dec reset"
        #[arg(short, long)]
        script: String,
        /// Starting count (any size)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        start: BigInt,
        /// Print the page as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Apply a script, replay its event log, and compare
    Replay {
        #[arg(short, long)]
        script: String,
    },
    /// Read one command per line from stdin, re-rendering after each
    Interactive,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("counter-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", counter_common::crate_info());
            println!("kernel: {}", counter_kernel::crate_info());
            println!("input: {}", counter_input::crate_info());
            println!("render: {}", counter_render::crate_info());
            println!("tools: {}", counter_tools::crate_info());
        }
        Commands::Run {
            script,
            start,
            json,
        } => {
            let commands = parse_script(&script).context("invalid script")?;
            let mut counter = Counter::from_state(CounterState::new(start));
            counter.dispatch_all(commands);
            tracing::info!("{}", CounterInspector::summary(&counter));

            let page = render(counter.state());
            if json {
                println!("{}", serde_json::to_string_pretty(&page)?);
            } else {
                print!("{}", DebugTextRenderer::new().render(&page));
            }
        }
        Commands::Replay { script } => {
            let commands = parse_script(&script).context("invalid script")?;
            let mut original = Counter::new();
            original.dispatch_all(commands);

            let replayed = Counter::replay(original.events()).context("replay failed")?;
            println!(
                "Run:    count={}, dispatched={}",
                original.count(),
                original.dispatched()
            );
            println!(
                "Replay: count={}, dispatched={}",
                replayed.count(),
                replayed.dispatched()
            );
            println!(
                "Match: {}",
                if original.state() == replayed.state() {
                    "OK"
                } else {
                    "MISMATCH"
                }
            );
        }
        Commands::Interactive => {
            let counter = run_interactive(std::io::stdin().lock(), std::io::stdout().lock())?;
            tracing::info!("{}", CounterInspector::summary(&counter));
        }
    }

    Ok(())
}

/// Terminal run loop: one line in, one command applied, one page out.
///
/// A line is either a single bound key (`+`, `-`, `r`, ...) or a command
/// name. Blank lines and unknown tokens leave the count untouched.
/// `q`/`quit` or end of input stops the loop.
fn run_interactive(input: impl BufRead, mut out: impl Write) -> anyhow::Result<Counter> {
    let keys = InputMap::default();
    let renderer = DebugTextRenderer::with_key_hints();
    let mut counter = Counter::new();

    write!(out, "{}", renderer.render(&render(counter.state())))?;
    out.flush()?;

    for line in input.lines() {
        let line = line.context("failed to read input")?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "q" || input == "quit" {
            break;
        }

        let command = match keys.resolve_text(input) {
            Some(command) => command,
            None => match input.parse() {
                Ok(command) => command,
                Err(e) => {
                    tracing::warn!("{e}");
                    continue;
                }
            },
        };

        let state = counter.dispatch(command);
        write!(out, "{}", renderer.render(&render(state)))?;
        out.flush()?;
    }

    Ok(counter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use counter_render::HEADING;
    use std::io::Cursor;

    /// Count line of every page printed, in order.
    fn count_lines(output: &str) -> Vec<String> {
        let heading = format!("=== {HEADING} ===");
        let lines: Vec<&str> = output.lines().collect();
        lines
            .windows(2)
            .filter(|w| w[0] == heading)
            .map(|w| w[1].to_string())
            .collect()
    }

    fn interact(script: &str) -> (Counter, String) {
        let mut out = Vec::new();
        let counter = run_interactive(Cursor::new(script), &mut out).unwrap();
        (counter, String::from_utf8(out).unwrap())
    }

    #[test]
    fn interactive_renders_once_per_applied_command() {
        let (counter, out) = interact("+\n+\njump\nr\n-\nq\ninc\n");
        assert_eq!(count_lines(&out), vec!["0", "1", "2", "0", "-1"]);
        assert_eq!(counter.dispatched(), 4);
        assert_eq!(counter.count(), &BigInt::from(-1));
    }

    #[test]
    fn interactive_accepts_names_and_skips_blank_lines() {
        let (counter, out) = interact("\n  inc  \n\ndecrement\nINC\nreset\n");
        assert_eq!(count_lines(&out), vec!["0", "1", "0", "1", "0"]);
        assert_eq!(counter.dispatched(), 4);
    }

    #[test]
    fn interactive_stops_at_quit_or_eof() {
        let (counter, out) = interact("+\nquit\n+\n");
        assert_eq!(count_lines(&out), vec!["0", "1"]);
        assert_eq!(counter.dispatched(), 1);

        let (counter, out) = interact("");
        assert_eq!(count_lines(&out), vec!["0"]);
        assert_eq!(counter.dispatched(), 0);
    }

    #[test]
    fn interactive_unknown_token_changes_nothing() {
        let (counter, out) = interact("jump\n++\n");
        assert_eq!(count_lines(&out), vec!["0"]);
        assert!(counter.events().is_empty());
    }

    #[test]
    fn run_accepts_negative_and_huge_start() {
        let cli = Cli::parse_from(["counter-cli", "run", "--script", "inc inc", "--start", "-2"]);
        match cli.command {
            Commands::Run { script, start, json } => {
                assert_eq!(script, "inc inc");
                assert_eq!(start, BigInt::from(-2));
                assert!(!json);
            }
            _ => panic!("expected run subcommand"),
        }

        let cli = Cli::parse_from([
            "counter-cli",
            "run",
            "--script",
            "inc",
            "--start",
            "9223372036854775807",
        ]);
        let Commands::Run { start, .. } = cli.command else {
            panic!("expected run subcommand");
        };
        let mut counter = Counter::from_state(CounterState::new(start));
        counter.dispatch(counter_common::Command::Increment);
        let page = render(counter.state());
        assert_eq!(page.count_text, "9223372036854775808");
    }

    #[test]
    fn run_script_end_to_end() {
        let commands = parse_script("inc inc").unwrap();
        let mut counter = Counter::from_state(CounterState::new(-2));
        counter.dispatch_all(commands);
        let out = DebugTextRenderer::new().render(&render(counter.state()));
        assert_eq!(out.lines().nth(1), Some("0"));
    }
}
