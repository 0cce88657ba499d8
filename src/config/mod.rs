use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::tui::theme::ThemeConfig;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Fixture file to load instead of the built-in sample data.
    #[serde(default)]
    pub fixtures: Option<PathBuf>,

    /// Default log filter when `TASKDECK_LOG` is unset. Default: "info"
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            fixtures: None,
            log_level: default_log_level(),
            dashboard: DashboardConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

/// Where the stats grid gets its numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsSource {
    /// The counts supplied with the fixture data, as-is.
    #[default]
    Snapshot,
    /// Counts computed from the loaded lists.
    Live,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    /// Tasks shown on the dashboard board. Default: 5
    #[serde(default = "default_task_limit")]
    pub task_limit: usize,

    /// Projects shown on the dashboard. Default: 3
    #[serde(default = "default_project_limit")]
    pub project_limit: usize,

    /// Activity items shown on the dashboard. Default: 5
    #[serde(default = "default_activity_limit")]
    pub activity_limit: usize,

    /// Sessions shown on the dashboard. Default: 4
    #[serde(default = "default_session_limit")]
    pub session_limit: usize,

    /// Event poll timeout in milliseconds. Default: 250
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// How long a toast stays on screen. Default: 3
    #[serde(default = "default_toast_secs")]
    pub toast_secs: u64,

    #[serde(default)]
    pub stats_source: StatsSource,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            task_limit: default_task_limit(),
            project_limit: default_project_limit(),
            activity_limit: default_activity_limit(),
            session_limit: default_session_limit(),
            tick_rate_ms: default_tick_rate_ms(),
            toast_secs: default_toast_secs(),
            stats_source: StatsSource::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_task_limit() -> usize {
    5
}

fn default_project_limit() -> usize {
    3
}

fn default_activity_limit() -> usize {
    5
}

fn default_session_limit() -> usize {
    4
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_toast_secs() -> u64 {
    3
}

/// Written by `taskdeck init` when no config exists yet.
pub const DEFAULT_CONFIG: &str = r#"# taskdeck configuration

# Load dashboard data from a JSON file (see `taskdeck dump` for the format).
# fixtures = "/path/to/fixtures.json"

# Log filter used when TASKDECK_LOG is unset.
log_level = "info"

[dashboard]
task_limit = 5
project_limit = 3
activity_limit = 5
session_limit = 4
tick_rate_ms = 250
toast_secs = 3
# "snapshot" shows the counts shipped with the data, "live" recounts the lists.
stats_source = "snapshot"

[theme]
# Named colours ("cyan", "dark_gray", ...) or "rgb(R,G,B)".
# border_focused = "cyan"
"#;

/// Returns the base taskdeck directory: ~/.taskdeck/
pub fn base_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("could not determine home directory")?;
    Ok(home.join(".taskdeck"))
}

/// Returns the path to config.toml
pub fn config_path() -> Result<PathBuf> {
    Ok(base_dir()?.join("config.toml"))
}

/// Returns the path to the dashboard log file
pub fn log_path() -> Result<PathBuf> {
    Ok(base_dir()?.join("taskdeck.log"))
}

/// Ensure ~/.taskdeck/ exists
pub fn ensure_dirs() -> Result<()> {
    let base = base_dir()?;
    fs::create_dir_all(&base).context("failed to create ~/.taskdeck/")?;
    Ok(())
}

/// Load config from ~/.taskdeck/config.toml (or return defaults if it doesn't exist)
pub fn load() -> Result<Config> {
    load_from(&config_path()?)
}

pub fn load_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(config)
}

/// Write [`DEFAULT_CONFIG`] to `path` unless a file is already there.
/// Returns whether a file was written.
pub fn write_default(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(true)
}
