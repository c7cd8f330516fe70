use crate::adapters::http::HttpFetcher;
use crate::core::aggregator::{fetch_all, resolve_menu};
use crate::core::snapshot::SnapshotWriter;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{FetchedPage, MenuResult, WriteOutcome};
use crate::parse::weekday::current_weekday;
use crate::utils::error::Result;
use chrono::{Utc, Weekday};

/// Fetches every configured restaurant, parses today's menu and stores the
/// snapshot.
pub struct MenuPipeline<S: Storage, C: ConfigProvider> {
    config: C,
    fetcher: HttpFetcher,
    writer: SnapshotWriter<S>,
    today: Weekday,
}

impl<S: Storage, C: ConfigProvider> MenuPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let fetcher = HttpFetcher::new(config.fetch_settings().clone())?;
        let writer = SnapshotWriter::new(storage, config.snapshot_file(), config.snapshot_format());
        let today = config.weekday_override().unwrap_or_else(current_weekday);

        Ok(Self {
            config,
            fetcher,
            writer,
            today,
        })
    }

    pub fn today(&self) -> Weekday {
        self.today
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for MenuPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<FetchedPage>> {
        let sources = self.config.sources();
        tracing::info!(
            "🚀 Fetching {} menu pages (timeout {}s, {} retries)",
            sources.len(),
            self.fetcher.settings().timeout_seconds,
            self.fetcher.settings().retries
        );
        Ok(fetch_all(&self.fetcher, sources).await)
    }

    async fn transform(&self, pages: Vec<FetchedPage>) -> Result<Vec<MenuResult>> {
        tracing::debug!("Parsing {} pages for {:?}", pages.len(), self.today);
        let fallbacks = self.config.fallback_menus();
        Ok(pages
            .into_iter()
            .map(|page| resolve_menu(page, self.today, fallbacks))
            .collect())
    }

    async fn load(&self, menus: Vec<MenuResult>) -> Result<WriteOutcome> {
        self.writer.write(&menus, self.today, Utc::now()).await
    }
}
