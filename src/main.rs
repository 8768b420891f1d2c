//! wall - relationship state-engine CLI
//!
//! Usage:
//!   wall init --output state.json --warmth 1
//!   wall apply --state state.json --event eager_push
//!   wall apply --state state.json --event retraction_seen --content "我喜欢…"
//!   wall query --state state.json
//!   wall style --state state.json
//!   wall events

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use invisible_wall::core::{response_style, temperature_display, StateStore, TransitionTable};
use invisible_wall::types::{EmotionalState, EventKind, WallError};
use invisible_wall::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "wall",
    version = VERSION,
    about = "Invisible Wall - hidden relationship state engine",
    long_about = "Maintains the hidden emotional state of a simulated chat partner\n\
                  and applies named relationship events to it.\n\n\
                  Dimensions:\n  \
                  warmth          -5..=5   cold ↔ warm\n  \
                  tension          0..=10  romantic/ambiguous tension\n  \
                  trust            0..=10  accumulated trust\n  \
                  disappointment   0..=10  accumulated letdown\n  \
                  need             0..=10  felt-needed score\n  \
                  rhythm           0..=10  conversational rhythm match"
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new state file
    Init {
        /// Where to write the state
        #[arg(short, long, default_value = "state.json")]
        output: PathBuf,
        /// Initial warmth
        #[arg(long, default_value_t = 0)]
        warmth: i64,
        /// Initial tension
        #[arg(long, default_value_t = 0)]
        tension: i64,
    },
    /// Apply a named event to a state file
    Apply {
        /// State file to read and update
        #[arg(short, long)]
        state: PathBuf,
        /// Event name (see `wall events`)
        #[arg(short, long)]
        event: String,
        /// Optional content for context (e.g. retracted text)
        #[arg(short, long)]
        content: Option<String>,
    },
    /// Print the current state
    Query {
        #[arg(short, long)]
        state: PathBuf,
    },
    /// Print response style hints for the current state
    Style {
        #[arg(short, long)]
        state: PathBuf,
    },
    /// List all registered events with their deltas
    Events,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Errors are printed as structured objects, never panics
            println!("{}", json_or_display(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), WallError> {
    match command {
        Command::Init {
            output,
            warmth,
            tension,
        } => {
            let mut state = EmotionalState {
                warmth,
                tension,
                ..Default::default()
            };
            state.clamp();
            let store = StateStore::with_state(state);
            store.save(&output)?;
            print_json(&store.state().to_value());
            Ok(())
        }

        Command::Apply {
            state,
            event,
            content,
        } => {
            let mut store = StateStore::load(&state)?;
            let old = store.state().to_value();

            let table = TransitionTable::new();
            let outcome = table.apply_event(store.state_mut(), &event, content.as_deref())?;

            // Only a successfully applied event is persisted
            store.save(&state)?;

            print_json(&serde_json::json!({
                "old": old,
                "new": store.state().to_value(),
                "changes": outcome.changes,
                "special_states": outcome.special_states,
            }));
            Ok(())
        }

        Command::Query { state } => {
            let store = StateStore::load(&state)?;
            print_json(&store.state().to_value());
            Ok(())
        }

        Command::Style { state } => {
            let store = StateStore::load(&state)?;
            let style = response_style(store.state());
            let (icon, label) = temperature_display(store.state());
            print_json(&serde_json::json!({
                "style": style,
                "temperature": { "icon": icon, "label": label },
            }));
            Ok(())
        }

        Command::Events => {
            println!("{}", "Registered events:".bold());
            for event in EventKind::all() {
                let effects: Vec<String> = event
                    .deltas()
                    .iter()
                    .map(|(dim, delta)| format!("{}:{:+}", dim, delta))
                    .collect();
                println!(
                    "  {:<20} {}",
                    event.name().cyan(),
                    effects.join(", ").dimmed()
                );
            }
            Ok(())
        }
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(err) => eprintln!("output serialization failed: {}", err),
    }
}

fn json_or_display(err: &WallError) -> String {
    serde_json::to_string_pretty(err).unwrap_or_else(|_| err.to_string())
}
