use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod models;
mod report;
mod roster;
mod session;
mod stats;
mod view;

use config::LeaderboardConfig;
use roster::StudentRoster;
use view::{ActiveView, ViewController};

#[derive(Parser)]
#[command(name = "leaderboard")]
#[command(about = "Student rankings, profiles and achievements", long_about = None)]
struct Cli {
    /// Path to a leaderboard.toml config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Roster file (.json or .csv), overrides the config
    #[arg(long, global = true)]
    roster: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the ranking list
    Rankings,
    /// Show one student's profile
    Profile {
        #[arg(long)]
        id: u32,
    },
    /// Show top achievers and summary statistics
    Achievements,
    /// Print summary statistics
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Write a markdown report of every view
    Report {
        #[arg(long, default_value = "leaderboard.md")]
        out: PathBuf,
    },
    /// Start an interactive session reading commands from stdin
    Session,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("leaderboard=info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = LeaderboardConfig::load(cli.config.as_deref())?;
    if let Some(path) = cli.roster {
        config.roster = Some(path);
    }

    let roster = match config.roster.as_deref() {
        Some(path) => StudentRoster::load(path)?,
        None => StudentRoster::embedded()?,
    };
    let mut controller = ViewController::new(&roster);

    match cli.command {
        Commands::Rankings => {
            controller.set_active_view(ActiveView::Rankings);
            print!("{}", report::render_view(&controller, &config));
        }
        Commands::Profile { id } => {
            controller.open_profile(id)?;
            print!("{}", report::render_view(&controller, &config));
        }
        Commands::Achievements => {
            controller.set_active_view(ActiveView::Achievements);
            print!("{}", report::render_view(&controller, &config));
        }
        Commands::Stats { json } => {
            if json {
                let summary = stats::summarize(&roster, config.activity_percent);
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", report::render_stats(&roster, &config));
            }
        }
        Commands::Report { out } => {
            let report = report::build_report(&roster, &config, chrono::Utc::now());
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Session => {
            let stdin = io::stdin();
            session::run(&mut controller, &config, stdin.lock(), io::stdout().lock())?;
        }
    }

    Ok(())
}
