use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use taskdeck::board::{self, StatusFilter};
use taskdeck::config::{self, Config, StatsSource};
use taskdeck::store::{DashboardStats, Fixtures};
use taskdeck::tui;

#[derive(Parser)]
#[command(
    name = "taskdeck",
    version = env!("TASKDECK_VERSION"),
    about = "Terminal dashboard for an assistant's tasks, projects and sessions"
)]
struct Cli {
    /// Load data from a fixture JSON file instead of the built-in sample
    #[arg(long, global = true)]
    fixtures: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the TUI dashboard (default)
    Dashboard,
    /// Create ~/.taskdeck/ and a default config.toml
    Init,
    /// Print tasks in board order
    Tasks {
        /// all, todo, in-progress, completed or blocked
        #[arg(short, long, default_value = "all")]
        status: StatusFilter,
        /// Show at most this many tasks
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Print the dashboard stats
    Stats {
        /// Count from the loaded lists instead of the shipped snapshot
        #[arg(long)]
        live: bool,
    },
    /// Print the loaded data as JSON, usable as a fixture file
    Dump,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Dashboard);
    let config = config::load()?;

    match command {
        Commands::Dashboard => {
            init_tracing(true, &config.log_level)?;
            let fixtures = load_fixtures(cli.fixtures, &config)?;
            tui::run(fixtures, &config)
        }
        Commands::Init => {
            init_tracing(false, "warn")?;
            config::ensure_dirs()?;
            let path = config::config_path()?;
            if config::write_default(&path)? {
                println!("taskdeck initialized at {}", path.display());
            } else {
                println!("{} already exists, leaving it untouched", path.display());
            }
            Ok(())
        }
        Commands::Tasks { status, limit } => {
            init_tracing(false, "warn")?;
            let fixtures = load_fixtures(cli.fixtures, &config)?;
            let shown = board::display_tasks(&fixtures.tasks, status, limit);
            if shown.is_empty() {
                println!("No tasks found.");
            }
            for t in shown {
                let project = t.project.as_deref().unwrap_or("-");
                println!(
                    "  {} {:<8} {} [{}] ({})",
                    t.status.symbol(),
                    t.priority.as_str().to_uppercase(),
                    t.title,
                    t.status.as_str(),
                    project,
                );
            }
            Ok(())
        }
        Commands::Stats { live } => {
            init_tracing(false, "warn")?;
            let fixtures = load_fixtures(cli.fixtures, &config)?;
            let live = live || config.dashboard.stats_source == StatsSource::Live;
            let stats = if live {
                DashboardStats::derive(
                    &fixtures.tasks,
                    &fixtures.projects,
                    &fixtures.sessions,
                    &fixtures.capabilities,
                    Utc::now(),
                )
            } else {
                fixtures.stats
            };
            println!("Stats ({}):", if live { "live" } else { "snapshot" });
            println!("  Total tasks:       {}", stats.total_tasks);
            println!("  Active tasks:      {}", stats.active_tasks);
            println!("  Completed tasks:   {}", stats.completed_tasks);
            println!("  Total projects:    {}", stats.total_projects);
            println!("  Active projects:   {}", stats.active_projects);
            println!("  Total sessions:    {}", stats.total_sessions);
            println!("  Recent sessions:   {}", stats.recent_sessions);
            println!("  Capabilities:      {}", stats.capabilities_available);
            Ok(())
        }
        Commands::Dump => {
            init_tracing(false, "warn")?;
            let fixtures = load_fixtures(cli.fixtures, &config)?;
            println!("{}", serde_json::to_string_pretty(&fixtures)?);
            Ok(())
        }
    }
}

/// `--fixtures` wins over the config file; with neither, use the sample set.
fn load_fixtures(flag: Option<PathBuf>, config: &Config) -> Result<Fixtures> {
    match flag.or_else(|| config.fixtures.clone()) {
        Some(path) => Fixtures::load(&path),
        None => Ok(Fixtures::sample(Utc::now())),
    }
}

/// The dashboard owns the terminal, so it logs to ~/.taskdeck/taskdeck.log.
/// Everything else logs to stderr.
fn init_tracing(to_file: bool, default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_env("TASKDECK_LOG")
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if to_file {
        config::ensure_dirs()?;
        let path = config::log_path()?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}
