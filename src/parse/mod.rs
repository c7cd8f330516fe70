// Turning raw restaurant HTML into menu items.

pub mod items;
pub mod strategy;
pub mod text;
pub mod weekday;
