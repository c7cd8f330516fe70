use crate::domain::model::MenuItem;
use crate::parse::weekday::is_weekend;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Hand-curated menus shown when a restaurant's page cannot be read.
///
/// They describe a typical weekday lunch, so they are never offered on
/// Saturday or Sunday.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FallbackMenus {
    menus: HashMap<String, Vec<MenuItem>>,
}

impl FallbackMenus {
    pub fn new(menus: HashMap<String, Vec<MenuItem>>) -> Self {
        Self { menus }
    }

    pub fn insert(&mut self, source_id: impl Into<String>, items: Vec<MenuItem>) {
        self.menus.insert(source_id.into(), items);
    }

    pub fn for_day(&self, source_id: &str, today: Weekday) -> Option<&[MenuItem]> {
        if is_weekend(today) {
            return None;
        }
        self.menus
            .get(source_id)
            .map(Vec::as_slice)
            .filter(|items| !items.is_empty())
    }

    pub fn len(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }
}
