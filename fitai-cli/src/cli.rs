// src/cli.rs
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "FitAI Coach - your scripted AI fitness coach", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print tables as CSV instead (plan, today, stats)
    #[arg(long, global = true)]
    pub export_csv: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show today's workout and its exercises
    Today,
    /// Show this week's training schedule
    Plan,
    /// Show this week's calories, minutes and workouts
    Stats,
    /// List milestones and whether they are unlocked
    Milestones,
    /// List subscription plans
    Plans,
    /// Ask the coach something (exact scripted prompts get tailored answers)
    Chat {
        /// Message for the coach, e.g. "What about nutrition?"
        text: String,
        /// Answer immediately instead of simulating thinking time
        #[arg(long)]
        no_delay: bool,
    },
    /// Answer the onboarding questions interactively
    Onboard,
    /// Run a workout interactively
    Workout {
        /// Planned workout id (defaults to today's workout)
        #[arg(short, long)]
        id: Option<String>,
    },
    /// Show current settings
    Settings,
    /// Turn a notification on or off
    SetNotification {
        /// workout-reminders, progress-updates, ai-tips or marketing
        kind: String,
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
    /// Turn dark mode on or off
    SetDarkMode {
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },
    /// Set the table header color (e.g. Green, DarkBlue)
    SetHeaderColor { color: String },
    /// Set the simulated coach thinking time
    SetChatDelay {
        /// Minimum delay in milliseconds
        min_ms: u64,
        /// Random extra delay of up to this many milliseconds
        jitter_ms: u64,
    },
    /// Show the path to the config file
    ConfigPath,
    /// Generate shell completion scripts
    GenerateCompletion {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Function to parse arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

/// Command structure for completion generation
pub fn build_cli_command() -> clap::Command {
    Cli::command()
}
