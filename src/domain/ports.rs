use crate::core::fallback::FallbackMenus;
use crate::domain::model::{FetchedPage, MenuResult, SnapshotFormat, Source, WriteOutcome};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::Weekday;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Downloads the HTML of one page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    pub timeout_seconds: u64,
    pub retries: u32,
    pub retry_delay_ms: u64,
    pub user_agent: String,
}

impl FetchSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: 12,
            retries: 2,
            retry_delay_ms: 500,
            user_agent: "Mozilla/5.0 MenickaBot/1.0".to_string(),
        }
    }
}

pub trait ConfigProvider: Send + Sync {
    fn sources(&self) -> &[Source];
    fn fallback_menus(&self) -> &FallbackMenus;
    fn fetch_settings(&self) -> &FetchSettings;
    fn output_path(&self) -> &str;
    fn snapshot_file(&self) -> &str;
    fn snapshot_format(&self) -> SnapshotFormat;
    /// Pretend it is this day instead of reading the clock.
    fn weekday_override(&self) -> Option<Weekday>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<FetchedPage>>;
    async fn transform(&self, pages: Vec<FetchedPage>) -> Result<Vec<MenuResult>>;
    async fn load(&self, menus: Vec<MenuResult>) -> Result<WriteOutcome>;
}
