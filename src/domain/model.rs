use crate::utils::error::MenuError;
use serde::{Deserialize, Serialize};

/// How a restaurant lays out its menu page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// One page with today's menu, possibly with a few weekday headings.
    #[default]
    SingleDay,
    /// A whole week, each day introduced by its weekday name.
    Weekly,
}

/// One restaurant page to scrape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub strategy: StrategyKind,
    /// Only accept lines from today's section when the page has day headings.
    #[serde(default)]
    pub prefer_today_section: bool,
    /// Favor Czech dish names over English translations printed next to them.
    #[serde(default)]
    pub prefer_czech: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Soup,
    Main,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub name: String,
    pub price: u32,
}

impl MenuItem {
    pub fn new(item_type: ItemType, name: impl Into<String>, price: u32) -> Self {
        Self {
            item_type,
            name: name.into(),
            price,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MenuStatus {
    Ok,
    NoMenuForToday,
    Error,
}

impl From<&MenuError> for MenuStatus {
    fn from(error: &MenuError) -> Self {
        match error {
            MenuError::NoMenuForToday { .. } => MenuStatus::NoMenuForToday,
            _ => MenuStatus::Error,
        }
    }
}

/// Where the items of a result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuOrigin {
    Live,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuResult {
    pub id: String,
    pub name: String,
    pub url: String,
    pub status: MenuStatus,
    pub source: MenuOrigin,
    pub message: String,
    pub items: Vec<MenuItem>,
}

impl MenuResult {
    pub fn live(source: &Source, status: MenuStatus, message: String, items: Vec<MenuItem>) -> Self {
        Self {
            id: source.id.clone(),
            name: source.name.clone(),
            url: source.url.clone(),
            status,
            source: MenuOrigin::Live,
            message,
            items,
        }
    }

    pub fn fallback(source: &Source, message: String, items: Vec<MenuItem>) -> Self {
        Self {
            id: source.id.clone(),
            name: source.name.clone(),
            url: source.url.clone(),
            status: MenuStatus::Ok,
            source: MenuOrigin::Fallback,
            message,
            items,
        }
    }
}

/// Items extracted from a page together with the status message to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMenu {
    pub items: Vec<MenuItem>,
    pub message: String,
}

/// Raw page body (or the reason it could not be fetched) for one source.
#[derive(Debug)]
pub struct FetchedPage {
    pub source: Source,
    pub body: Result<String, MenuError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub generated_at: String,
    pub weekday: u8,
    pub menus: Vec<MenuResult>,
}

/// Older snapshot layout, still understood by deployed pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacySnapshot {
    pub generated_at: String,
    pub sources: Vec<LegacySource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacySource {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub items: Vec<LegacyItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyItem {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<&MenuResult> for LegacySource {
    fn from(menu: &MenuResult) -> Self {
        let error = match menu.status {
            MenuStatus::Ok => None,
            _ => Some(menu.message.clone()),
        };

        Self {
            id: menu.id.clone(),
            name: menu.name.clone(),
            url: menu.url.clone(),
            error,
            items: menu
                .items
                .iter()
                .map(|item| LegacyItem {
                    title: item.name.clone(),
                    price: Some(format!("{} Kč", item.price)),
                    note: None,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMeta {
    pub generated_at: String,
    pub source_count: usize,
}

/// Which payload layout the snapshot writer emits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotFormat {
    #[default]
    Menus,
    Legacy,
}

impl SnapshotFormat {
    /// Top-level key holding the per-restaurant list.
    pub fn list_key(&self) -> &'static str {
        match self {
            SnapshotFormat::Menus => "menus",
            SnapshotFormat::Legacy => "sources",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written { path: String, generated_at: String },
    Unchanged { path: String },
}

impl WriteOutcome {
    pub fn path(&self) -> &str {
        match self {
            WriteOutcome::Written { path, .. } | WriteOutcome::Unchanged { path } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_result_serializes_with_wire_names() {
        let source = Source {
            id: "smichovna".to_string(),
            name: "Smíchovna".to_string(),
            url: "https://www.smichovna.cz/tydenni-nabidka".to_string(),
            strategy: StrategyKind::Weekly,
            prefer_today_section: false,
            prefer_czech: false,
        };
        let result = MenuResult::live(
            &source,
            MenuStatus::NoMenuForToday,
            "Týdenní menu pro dnešní den není dostupné.".to_string(),
            vec![],
        );

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["status"], "no-menu-for-today");
        assert_eq!(value["source"], "live");
        assert_eq!(value["id"], "smichovna");
    }

    #[test]
    fn test_menu_item_type_field() {
        let item = MenuItem::new(ItemType::Soup, "Hovězí vývar", 45);
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"type":"soup","name":"Hovězí vývar","price":45}"#);
    }

    #[test]
    fn test_legacy_source_carries_error_message() {
        let source = Source {
            id: "x".to_string(),
            name: "X".to_string(),
            url: "https://x.example".to_string(),
            strategy: StrategyKind::SingleDay,
            prefer_today_section: false,
            prefer_czech: false,
        };
        let menu = MenuResult::live(&source, MenuStatus::Error, "HTTP 500".to_string(), vec![]);
        let legacy = LegacySource::from(&menu);
        assert_eq!(legacy.error.as_deref(), Some("HTTP 500"));

        let json = serde_json::to_value(&legacy).unwrap();
        assert_eq!(json["items"], serde_json::json!([]));
    }

    #[test]
    fn test_strategy_kind_parses_kebab_case() {
        let source: Source = serde_json::from_value(serde_json::json!({
            "id": "a",
            "name": "A",
            "url": "https://a.example",
            "strategy": "weekly"
        }))
        .unwrap();
        assert_eq!(source.strategy, StrategyKind::Weekly);
        assert!(!source.prefer_today_section);
    }
}
