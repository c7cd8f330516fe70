use crate::config::toml_config::TomlConfig;
use crate::config::AppConfig;
use crate::domain::model::SnapshotFormat;
use crate::parse::weekday::weekday_from_index;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "menicka")]
#[command(about = "Scrapes today's lunch menus into a JSON snapshot")]
pub struct CliConfig {
    /// TOML file with sources, fallback menus and fetch settings
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory the snapshot is written to
    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(long)]
    pub snapshot_file: Option<String>,

    /// Write the older `{generatedAt, sources}` layout
    #[arg(long)]
    pub legacy: bool,

    /// Treat this day as today (0 = Sunday .. 6 = Saturday)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=6))]
    pub weekday: Option<u8>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long)]
    pub retries: Option<u32>,

    #[arg(long)]
    pub retry_delay_ms: Option<u64>,

    #[arg(long)]
    pub user_agent: Option<String>,

    /// Fetch and parse, print the result, but do not touch the snapshot
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    /// Loads the configuration file, if any, and applies command-line overrides.
    pub fn into_app_config(self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?.into_app_config(),
            None => AppConfig::default(),
        };

        if let Some(path) = self.output_path {
            config.output_path = path;
        }
        if let Some(file) = self.snapshot_file {
            config.snapshot_file = file;
        }
        if self.legacy {
            config.snapshot_format = SnapshotFormat::Legacy;
        }
        if let Some(timeout) = self.timeout_seconds {
            config.fetch.timeout_seconds = timeout;
        }
        if let Some(retries) = self.retries {
            config.fetch.retries = retries;
        }
        if let Some(delay) = self.retry_delay_ms {
            config.fetch.retry_delay_ms = delay;
        }
        if let Some(user_agent) = self.user_agent {
            config.fetch.user_agent = user_agent;
        }
        config.weekday = self.weekday.and_then(weekday_from_index);

        Ok(config)
    }
}
