use crate::core::Pipeline;
use crate::domain::model::{MenuOrigin, MenuResult, MenuStatus, WriteOutcome};
use crate::utils::error::Result;

/// Per-run counts logged after the transform stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub live: usize,
    pub fallback: usize,
    pub no_menu: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn from_menus(menus: &[MenuResult]) -> Self {
        let mut summary = Self {
            total: menus.len(),
            ..Self::default()
        };
        for menu in menus {
            match (menu.source, menu.status) {
                (MenuOrigin::Fallback, _) => summary.fallback += 1,
                (MenuOrigin::Live, MenuStatus::Ok) => summary.live += 1,
                (MenuOrigin::Live, MenuStatus::NoMenuForToday) => summary.no_menu += 1,
                (MenuOrigin::Live, MenuStatus::Error) => summary.failed += 1,
            }
        }
        summary
    }
}

pub struct MenuEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> MenuEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs extract and transform only.
    pub async fn collect(&self) -> Result<Vec<MenuResult>> {
        tracing::info!("📥 Extracting menu pages...");
        let pages = self.pipeline.extract().await?;
        let reachable = pages.iter().filter(|page| page.body.is_ok()).count();
        tracing::info!("Fetched {}/{} pages", reachable, pages.len());

        tracing::info!("🔄 Parsing menus...");
        let menus = self.pipeline.transform(pages).await?;
        let summary = RunSummary::from_menus(&menus);
        tracing::info!(
            "Parsed {} menus: {} live, {} fallback, {} without today's menu, {} failed",
            summary.total,
            summary.live,
            summary.fallback,
            summary.no_menu,
            summary.failed
        );

        for menu in &menus {
            tracing::debug!(
                "{} -> {:?}/{:?} ({} items): {}",
                menu.id,
                menu.status,
                menu.source,
                menu.items.len(),
                menu.message
            );
        }

        Ok(menus)
    }

    pub async fn run(&self) -> Result<WriteOutcome> {
        let menus = self.collect().await?;

        tracing::info!("💾 Writing snapshot...");
        let outcome = self.pipeline.load(menus).await?;
        match &outcome {
            WriteOutcome::Written { path, generated_at } => {
                tracing::info!("Snapshot {} updated at {}", path, generated_at)
            }
            WriteOutcome::Unchanged { path } => {
                tracing::info!("Snapshot {} unchanged, skipping write", path)
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{FetchedPage, ItemType, MenuItem, Source, StrategyKind};
    use crate::utils::error::MenuError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn source(id: &str) -> Source {
        Source {
            id: id.to_string(),
            name: id.to_string(),
            url: format!("https://example.com/{}", id),
            strategy: StrategyKind::SingleDay,
            prefer_today_section: false,
            prefer_czech: false,
        }
    }

    struct StubPipeline {
        loads: AtomicUsize,
        fail_extract: bool,
    }

    #[async_trait::async_trait]
    impl Pipeline for StubPipeline {
        async fn extract(&self) -> Result<Vec<FetchedPage>> {
            if self.fail_extract {
                return Err(MenuError::Config {
                    message: "no sources".to_string(),
                });
            }
            Ok(vec![
                FetchedPage {
                    source: source("a"),
                    body: Ok(String::new()),
                },
                FetchedPage {
                    source: source("b"),
                    body: Err(MenuError::HttpStatus {
                        url: "https://example.com/b".to_string(),
                        status: 500,
                    }),
                },
            ])
        }

        async fn transform(&self, pages: Vec<FetchedPage>) -> Result<Vec<MenuResult>> {
            Ok(pages
                .iter()
                .map(|page| match &page.body {
                    Ok(_) => MenuResult::live(
                        &page.source,
                        MenuStatus::Ok,
                        "Načteno.".to_string(),
                        vec![MenuItem::new(ItemType::Main, "Guláš", 120)],
                    ),
                    Err(_) => MenuResult::fallback(&page.source, "ukázka".to_string(), vec![]),
                })
                .collect())
        }

        async fn load(&self, _menus: Vec<MenuResult>) -> Result<WriteOutcome> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok(WriteOutcome::Unchanged {
                path: "menus.json".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_run_goes_through_all_stages() {
        let engine = MenuEngine::new(StubPipeline {
            loads: AtomicUsize::new(0),
            fail_extract: false,
        });

        let outcome = engine.run().await.unwrap();
        assert_eq!(outcome.path(), "menus.json");
        assert_eq!(engine.pipeline.loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_collect_does_not_load() {
        let engine = MenuEngine::new(StubPipeline {
            loads: AtomicUsize::new(0),
            fail_extract: false,
        });

        let menus = engine.collect().await.unwrap();
        assert_eq!(menus.len(), 2);
        assert_eq!(engine.pipeline.loads.load(Ordering::SeqCst), 0);

        let summary = RunSummary::from_menus(&menus);
        assert_eq!(summary.live, 1);
        assert_eq!(summary.fallback, 1);
        assert_eq!(summary.failed, 0);
    }

    #[tokio::test]
    async fn test_extract_error_stops_the_run() {
        let engine = MenuEngine::new(StubPipeline {
            loads: AtomicUsize::new(0),
            fail_extract: true,
        });

        assert!(engine.run().await.is_err());
        assert_eq!(engine.pipeline.loads.load(Ordering::SeqCst), 0);
    }
}
