//! What the menu page does with a snapshot before showing it.
//!
//! The page never trusts the file blindly: items are validated again, empty
//! menus get the curated fallback and the reader's favorite dishes are
//! highlighted. Keeping those rules here lets `show-menus` and the tests
//! exercise them without a browser.

pub mod cards;
pub mod favorites;

pub use cards::{CardItem, DisplayContext, MenuCard, SortOrder};
pub use favorites::{Favorites, JsonFileStore, KeyValueStore, MemoryStore, FAVORITES_KEY};

use crate::core::aggregator::MSG_FALLBACK_OFFLINE;
use crate::core::fallback::FallbackMenus;
use crate::domain::model::{
    ItemType, LegacySnapshot, LegacySource, MenuItem, MenuOrigin, MenuResult, MenuStatus, Snapshot,
};
use crate::parse::items::{classify, dedupe_items, is_meaningful_name, is_valid_price, normalize_item_name};
use crate::parse::weekday::weekday_from_index;
use crate::utils::error::Result;
use chrono::Weekday;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::sync::OnceLock;

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotDocument {
    Current(Snapshot),
    Legacy(LegacySnapshot),
}

/// A snapshot as the page sees it, whichever layout it was written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotView {
    pub generated_at: Option<String>,
    /// Only the current layout records the day it was generated for. An
    /// unchanged run leaves the file alone, so this can be an earlier day than
    /// today; use the clock when deciding on fallbacks.
    pub weekday: Option<Weekday>,
    pub menus: Vec<MenuResult>,
}

impl SnapshotView {
    pub fn from_json(content: &str) -> Result<Self> {
        let document: SnapshotDocument = serde_json::from_str(content)?;
        Ok(match document {
            SnapshotDocument::Current(snapshot) => Self {
                generated_at: Some(snapshot.generated_at).filter(|at| !at.is_empty()),
                weekday: weekday_from_index(snapshot.weekday),
                menus: snapshot.menus,
            },
            SnapshotDocument::Legacy(snapshot) => Self {
                generated_at: Some(snapshot.generated_at).filter(|at| !at.is_empty()),
                weekday: None,
                menus: snapshot.sources.iter().map(menu_from_legacy).collect(),
            },
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

fn legacy_price_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{1,4}").expect("regex should be valid"))
}

fn menu_from_legacy(source: &LegacySource) -> MenuResult {
    let items = source
        .items
        .iter()
        .map(|item| {
            let name = match &item.note {
                Some(note) if !note.is_empty() => format!("{} ({})", item.title, note),
                _ => item.title.clone(),
            };
            // Unparseable prices become 0 and are dropped on revalidation.
            let price = item
                .price
                .as_deref()
                .and_then(|price| legacy_price_re().find(price))
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(0);
            MenuItem::new(classify(&name), name, price)
        })
        .collect();

    let (status, message) = match &source.error {
        Some(error) => (MenuStatus::Error, error.clone()),
        None => (MenuStatus::Ok, String::new()),
    };

    MenuResult {
        id: source.id.clone(),
        name: source.name.clone(),
        url: source.url.clone(),
        status,
        source: MenuOrigin::Live,
        message,
        items,
    }
}

/// Applies the item rules again: normalized names, meaningful names, price
/// range, soup detection, dedupe and the item cap.
///
/// Running it on its own output changes nothing.
pub fn revalidate_items(items: &[MenuItem]) -> Vec<MenuItem> {
    let cleaned = items
        .iter()
        .filter_map(|item| {
            let name = normalize_item_name(&item.name);
            if !is_meaningful_name(&name) || !is_valid_price(item.price) {
                return None;
            }
            // Curated soups without a telltale keyword stay soups.
            let item_type = match item.item_type {
                ItemType::Soup => ItemType::Soup,
                ItemType::Main => classify(&name),
            };
            Some(MenuItem::new(item_type, name, item.price))
        })
        .collect();

    dedupe_items(cleaned)
}

/// Fills a menu that ended up with no items from the curated fallbacks, using
/// the same weekday rule as the pipeline.
pub fn with_fallback(menu: MenuResult, fallbacks: &FallbackMenus, today: Weekday) -> MenuResult {
    if !menu.items.is_empty() {
        return menu;
    }

    match fallbacks.for_day(&menu.id, today) {
        Some(items) => MenuResult {
            status: MenuStatus::Ok,
            source: MenuOrigin::Fallback,
            message: MSG_FALLBACK_OFFLINE.to_string(),
            items: items.to_vec(),
            ..menu
        },
        None => menu,
    }
}
