use crate::display::favorites::Favorites;
use crate::display::revalidate_items;
use crate::domain::model::{ItemType, MenuOrigin, MenuResult, MenuStatus};
use crate::utils::error::MenuError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// As the items appeared on the restaurant's page.
    #[default]
    Document,
    Name,
    Price,
}

impl FromStr for SortOrder {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "document" | "page" => Ok(SortOrder::Document),
            "name" => Ok(SortOrder::Name),
            "price" => Ok(SortOrder::Price),
            _ => Err(MenuError::InvalidConfigValue {
                field: "sort".to_string(),
                value: s.to_string(),
                reason: "expected one of: document, name, price".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardItem {
    pub item_type: ItemType,
    pub name: String,
    pub price: u32,
    pub favorite: bool,
}

impl CardItem {
    pub fn type_label(&self) -> &'static str {
        match self.item_type {
            ItemType::Soup => "Polévka",
            ItemType::Main => "Jídlo",
        }
    }
}

/// One restaurant, ready to be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuCard {
    pub id: String,
    pub name: String,
    pub url: String,
    pub status: MenuStatus,
    pub origin: MenuOrigin,
    pub message: String,
    pub items: Vec<CardItem>,
}

impl MenuCard {
    pub fn status_line(&self) -> String {
        match (self.status, self.origin) {
            (MenuStatus::Error, _) => format!("Nepodařilo se načíst menu ({})", self.message),
            (MenuStatus::NoMenuForToday, _) => self.message.clone(),
            (MenuStatus::Ok, MenuOrigin::Fallback) => self.message.clone(),
            (MenuStatus::Ok, MenuOrigin::Live) => "Nabídka".to_string(),
        }
    }

    pub fn has_favorite(&self) -> bool {
        self.items.iter().any(|item| item.favorite)
    }
}

impl fmt::Display for MenuCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} <{}>", self.name, self.url)?;
        writeln!(f, "  {}", self.status_line())?;

        if self.items.is_empty() {
            return writeln!(f, "  {:<8} Menu není dostupné.", "Info");
        }

        for item in &self.items {
            let marker = if item.favorite { "★ " } else { "" };
            writeln!(
                f,
                "  {:<8} {}{} ... {} Kč",
                item.type_label(),
                marker,
                item.name,
                item.price
            )?;
        }
        Ok(())
    }
}

/// Rendering state: the reader's favorites, the restaurant filter and the
/// item order.
#[derive(Debug, Clone, Default)]
pub struct DisplayContext {
    pub favorites: Favorites,
    pub filter: Option<String>,
    pub sort: SortOrder,
}

impl DisplayContext {
    pub fn new(favorites: Favorites) -> Self {
        Self {
            favorites,
            ..Self::default()
        }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        let filter = filter.into().trim().to_lowercase();
        self.filter = (!filter.is_empty()).then_some(filter);
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Restaurants whose name contains the filter (case-insensitive).
    pub fn is_visible(&self, menu: &MenuResult) -> bool {
        match &self.filter {
            Some(term) => menu.name.to_lowercase().contains(term.as_str()),
            None => true,
        }
    }

    pub fn cards(&self, menus: &[MenuResult]) -> Vec<MenuCard> {
        menus
            .iter()
            .filter(|menu| self.is_visible(menu))
            .map(|menu| self.card(menu))
            .collect()
    }

    pub fn card(&self, menu: &MenuResult) -> MenuCard {
        let mut items: Vec<CardItem> = revalidate_items(&menu.items)
            .into_iter()
            .map(|item| CardItem {
                favorite: self.favorites.matches(&item.name),
                item_type: item.item_type,
                name: item.name,
                price: item.price,
            })
            .collect();

        match self.sort {
            SortOrder::Document => {}
            SortOrder::Name => items.sort_by_key(|item| item.name.to_lowercase()),
            SortOrder::Price => items.sort_by_key(|item| item.price),
        }

        MenuCard {
            id: menu.id.clone(),
            name: menu.name.clone(),
            url: menu.url.clone(),
            status: menu.status,
            origin: menu.source,
            message: menu.message.clone(),
            items,
        }
    }
}
