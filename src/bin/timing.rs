//! wall-timing - presence timing simulator
//!
//! Draws a full timing plan (typing delay, read delay, per-character pace,
//! abort/withhold decisions) for a given emotional state and incoming
//! message category, without touching any state file.
//!
//! Usage:
//!   wall-timing --warmth 2 --tension 1 --event normal
//!   wall-timing --warmth -4 --event confession --json
//!   wall-timing --warmth 0 --tension 8 --event question --seed 7

use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use invisible_wall::core::{temperature_display, TimingModel};
use invisible_wall::types::{EmotionalState, EventCategory};
use invisible_wall::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "wall-timing",
    version = VERSION,
    about = "Simulate reply timing for a given emotional state"
)]
struct Args {
    /// Warmth (-5..=5), clamped if out of range
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    warmth: i64,

    /// Tension (0..=10), clamped if out of range
    #[arg(long, default_value_t = 0)]
    tension: i64,

    /// Incoming message category
    #[arg(
        long,
        default_value = "normal",
        value_parser = ["normal", "ambiguous", "confession", "retraction", "question", "silence"]
    )]
    event: String,

    /// Fixed seed for reproducible draws
    #[arg(long)]
    seed: Option<u64>,

    /// Emit the plan as JSON instead of human-readable text
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut state = EmotionalState {
        warmth: args.warmth,
        tension: args.tension,
        ..Default::default()
    };
    state.clamp();

    let category = match args.event.as_str() {
        "ambiguous" => EventCategory::Ambiguous,
        "confession" => EventCategory::Confession,
        "retraction" => EventCategory::Retraction,
        "question" => EventCategory::Question,
        "silence" => EventCategory::Silence,
        _ => EventCategory::Normal,
    };

    let mut model = match args.seed {
        Some(seed) => TimingModel::with_seed(seed),
        None => TimingModel::new(),
    };
    let plan = model.calculate(&state, category);

    if args.json {
        match serde_json::to_string_pretty(&plan) {
            Ok(json) => println!("{}", json),
            Err(err) => {
                eprintln!("output serialization failed: {}", err);
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    let (icon, label) = temperature_display(&state);
    let mood = if label.is_empty() {
        String::new()
    } else {
        format!("  {} {}", icon, label)
    };

    println!(
        "{} warmth={} tension={}{}",
        "state".bold(),
        state.warmth,
        state.tension,
        mood.dimmed()
    );
    println!("{} {}", "event".bold(), category);

    if !plan.should_reply {
        println!("{}", "no reply (message withheld)".red());
        return ExitCode::SUCCESS;
    }

    println!(
        "  read after      {}",
        format!("{:>6} ms", plan.read_delay_ms).cyan()
    );
    println!(
        "  typing starts   {}",
        format!("{:>6} ms", plan.typing_delay_ms).cyan()
    );
    println!(
        "  pace            {} ({} ms/char)",
        plan.pace.name().cyan(),
        plan.pace_ms_per_char
    );
    if plan.may_abort {
        println!("  {}", "may abort mid-typing".yellow());
    }

    ExitCode::SUCCESS
}
