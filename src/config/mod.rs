#[cfg(feature = "cli")]
pub mod cli;
pub mod defaults;
pub mod toml_config;

use crate::core::fallback::FallbackMenus;
use crate::domain::model::{SnapshotFormat, Source};
use crate::domain::ports::{ConfigProvider, FetchSettings};
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, validate_sources, Validate};
use chrono::Weekday;

pub const DEFAULT_OUTPUT_PATH: &str = "./public/data";
pub const DEFAULT_SNAPSHOT_FILE: &str = "menus.json";

/// Fully resolved settings for one pipeline run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub sources: Vec<Source>,
    pub fallback_menus: FallbackMenus,
    pub fetch: FetchSettings,
    pub output_path: String,
    pub snapshot_file: String,
    pub snapshot_format: SnapshotFormat,
    pub weekday: Option<Weekday>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sources: defaults::default_sources(),
            fallback_menus: defaults::default_fallback_menus(),
            fetch: FetchSettings::default(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            snapshot_file: DEFAULT_SNAPSHOT_FILE.to_string(),
            snapshot_format: SnapshotFormat::default(),
            weekday: None,
        }
    }
}

impl ConfigProvider for AppConfig {
    fn sources(&self) -> &[Source] {
        &self.sources
    }

    fn fallback_menus(&self) -> &FallbackMenus {
        &self.fallback_menus
    }

    fn fetch_settings(&self) -> &FetchSettings {
        &self.fetch
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn snapshot_file(&self) -> &str {
        &self.snapshot_file
    }

    fn snapshot_format(&self) -> SnapshotFormat {
        self.snapshot_format
    }

    fn weekday_override(&self) -> Option<Weekday> {
        self.weekday
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_sources(&self.sources)?;
        validate_range("fetch.timeout_seconds", self.fetch.timeout_seconds, 1, 120)?;
        validate_range("fetch.retries", self.fetch.retries, 0, 10)?;
        validate_range("fetch.retry_delay_ms", self.fetch.retry_delay_ms, 0, 60_000)?;
        validate_path("output.path", &self.output_path)?;
        validate_path("output.snapshot_file", &self.snapshot_file)?;
        Ok(())
    }
}
