//! Static dish catalog.
//!
//! The catalog is loaded once at startup, validated, and never mutated
//! afterwards. Dishes are held behind `Arc` so derived result sets can be
//! cloned and cached without copying records.

pub mod data;
pub mod error;

#[cfg(test)]
mod tests;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

pub use data::{Category, CatalogFile, Dish, Restaurant, format_cents};
pub use error::CatalogError;

/// Catalog compiled into the binary, used when no catalog path is configured.
const BUILTIN_CATALOG: &str = include_str!("../../assets/catalog.json");

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    dishes: Vec<Arc<Dish>>,
    categories: Vec<Category>,
    restaurants: Vec<Restaurant>,
}

impl Catalog {
    /// Build a catalog from dishes alone. No validation is performed.
    pub fn new(dishes: Vec<Dish>) -> Self {
        Self {
            dishes: dishes.into_iter().map(Arc::new).collect(),
            categories: Vec::new(),
            restaurants: Vec::new(),
        }
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let s = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&s)?;
        info!(path=%path.display(), dishes = catalog.dishes.len(), "loaded catalog file");
        Ok(catalog)
    }

    pub fn from_json(s: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(s)?;
        Self::from_file(file)
    }

    /// Validate and wrap a parsed catalog file.
    pub fn from_file(file: CatalogFile) -> Result<Self, CatalogError> {
        for dish in &file.dishes {
            validate_dish(dish)?;
        }
        debug!(
            dishes = file.dishes.len(),
            categories = file.categories.len(),
            restaurants = file.restaurants.len(),
            "catalog validated"
        );
        Ok(Self {
            dishes: file.dishes.into_iter().map(Arc::new).collect(),
            categories: file.categories,
            restaurants: file.restaurants,
        })
    }

    pub fn dishes(&self) -> &[Arc<Dish>] {
        &self.dishes
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    /// First dish with the given id. Duplicate ids are allowed in the catalog.
    pub fn find(&self, id: &str) -> Option<&Arc<Dish>> {
        self.dishes.iter().find(|d| d.id == id)
    }

    /// Restaurants flagged as open late, in catalog order.
    pub fn late_night_restaurants(&self) -> impl Iterator<Item = &Restaurant> {
        self.restaurants.iter().filter(|r| r.late_night)
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }
}

fn validate_dish(dish: &Dish) -> Result<(), CatalogError> {
    let fields: [(&'static str, &str); 5] = [
        ("id", &dish.id),
        ("name", &dish.name),
        ("description", &dish.description),
        ("restaurant", &dish.restaurant),
        ("category", &dish.category),
    ];
    for (field, value) in fields {
        if value.trim().is_empty() {
            return Err(CatalogError::MissingField {
                id: dish.id.clone(),
                field,
            });
        }
    }
    Ok(())
}
