use crate::core::fallback::FallbackMenus;
use crate::domain::model::{FetchedPage, MenuResult, MenuStatus, Source};
use crate::domain::ports::PageFetcher;
use crate::parse::strategy::ParsingStrategy;
use chrono::Weekday;
use futures::future::join_all;

pub const MSG_FALLBACK_OFFLINE: &str = "Zobrazeno ukázkové menu (online zdroj je dočasně nedostupný).";
const MSG_FALLBACK_DEFAULT_REASON: &str = "menu na webu nešlo spolehlivě načíst";

/// Downloads every source concurrently. Results keep the order of `sources`.
pub async fn fetch_all<F: PageFetcher + ?Sized>(fetcher: &F, sources: &[Source]) -> Vec<FetchedPage> {
    join_all(sources.iter().map(|source| async move {
        tracing::debug!("📡 Fetching {} from {}", source.id, source.url);
        let body = fetcher.fetch(&source.url).await;
        if let Err(e) = &body {
            tracing::warn!("⚠️ {}: fetch failed: {}", source.id, e);
        }
        FetchedPage {
            source: source.clone(),
            body,
        }
    }))
    .await
}

/// Turns one fetched page into the result shown on the restaurant's card.
///
/// Any failure, whether the page could not be downloaded or nothing could be
/// read from it, is answered with the curated fallback menu when one exists
/// for a weekday. Otherwise the failure is reported on the card.
pub fn resolve_menu(page: FetchedPage, today: Weekday, fallbacks: &FallbackMenus) -> MenuResult {
    let source = &page.source;
    let fallback = fallbacks.for_day(&source.id, today);

    let html = match page.body {
        Ok(html) => html,
        Err(e) => {
            return match fallback {
                Some(items) => {
                    tracing::info!("🔁 {}: using fallback menu ({})", source.id, e);
                    MenuResult::fallback(source, MSG_FALLBACK_OFFLINE.to_string(), items.to_vec())
                }
                None => MenuResult::live(
                    source,
                    MenuStatus::Error,
                    e.user_friendly_message(),
                    Vec::new(),
                ),
            };
        }
    };

    match ParsingStrategy::for_source(source).parse_html(&html, today) {
        Ok(parsed) => {
            tracing::info!("✅ {}: {} items", source.id, parsed.items.len());
            MenuResult::live(source, MenuStatus::Ok, parsed.message, parsed.items)
        }
        Err(e) => {
            let reason = e.to_string();
            match fallback {
                Some(items) => {
                    tracing::info!("🔁 {}: using fallback menu ({})", source.id, reason);
                    let reason = if reason.is_empty() {
                        MSG_FALLBACK_DEFAULT_REASON
                    } else {
                        reason.as_str()
                    };
                    MenuResult::fallback(
                        source,
                        format!("Zobrazeno ukázkové menu ({}).", reason),
                        items.to_vec(),
                    )
                }
                None => {
                    tracing::warn!("⚠️ {}: {}", source.id, reason);
                    MenuResult::live(source, MenuStatus::from(&e), reason, Vec::new())
                }
            }
        }
    }
}

/// Fetches and parses all sources. One source failing never affects another.
pub async fn aggregate<F: PageFetcher + ?Sized>(
    fetcher: &F,
    sources: &[Source],
    today: Weekday,
    fallbacks: &FallbackMenus,
) -> Vec<MenuResult> {
    fetch_all(fetcher, sources)
        .await
        .into_iter()
        .map(|page| resolve_menu(page, today, fallbacks))
        .collect()
}
