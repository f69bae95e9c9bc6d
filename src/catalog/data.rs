use serde::{Deserialize, Serialize};

/// A single menu item offered by a restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub id: String,
    pub name: String,
    pub description: String,
    pub restaurant: String,
    /// Lowercase slug in the bundled catalog, but compared case-insensitively.
    pub category: String,
    #[serde(default)]
    pub price_cents: u32,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub prep_minutes: u16,
    #[serde(default, alias = "isPopular")]
    pub is_popular: bool,
}

impl Dish {
    /// Formats the price as dollars, e.g. `$12.99`.
    pub fn price_label(&self) -> String {
        format_cents(self.price_cents)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub name: String,
    pub cuisine: String,
    #[serde(default)]
    pub rating: f32,
    pub delivery_time: String,
    pub open_until: String,
    #[serde(default)]
    pub late_night: bool,
}

/// On-disk shape of a catalog file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub dishes: Vec<Dish>,
    #[serde(default)]
    pub restaurants: Vec<Restaurant>,
}

pub fn format_cents(cents: u32) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}
