//! Storefront composition root.
//!
//! Owns the catalog, the filter state and its resolver, and the injected
//! authentication and cart capabilities. Both front-ends drive the store only
//! through this type and render only what [`Storefront::view`] returns.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::auth::{AuthError, AuthProvider, User};
use crate::cart::{CartError, CartProvider};
use crate::catalog::{Catalog, Restaurant};
use crate::resolver::{FilterState, Resolution, Resolver, TermPolicy, same_category};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StorefrontError {
    #[error("Unknown dish: {0}")]
    UnknownDish(String),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

pub struct Storefront {
    catalog: Arc<Catalog>,
    filter: FilterState,
    resolver: Resolver,
    auth: Box<dyn AuthProvider>,
    cart: Box<dyn CartProvider>,
}

impl Storefront {
    pub fn new(
        catalog: Arc<Catalog>,
        policy: TermPolicy,
        auth: Box<dyn AuthProvider>,
        cart: Box<dyn CartProvider>,
    ) -> Self {
        Self {
            resolver: Resolver::new(catalog.clone(), policy),
            catalog,
            filter: FilterState::default(),
            auth,
            cart,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn view(&mut self) -> &Resolution {
        self.resolver.resolve(&self.filter)
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.filter.search_term = term.into();
        debug!(term = %self.filter.search_term, "search term changed");
    }

    pub fn clear_search(&mut self) {
        self.set_search_term(String::new());
    }

    pub fn select_category(&mut self, category: Option<&str>) {
        self.filter.category = category.map(str::to_string);
        debug!(category = ?self.filter.category, "category changed");
    }

    /// Selects `slug`, or clears the selection if `slug` is already selected.
    /// Returns whether a category is selected afterwards.
    pub fn toggle_category(&mut self, slug: &str) -> bool {
        let already = self
            .filter
            .active_category()
            .is_some_and(|c| same_category(c, slug));
        if already {
            self.select_category(None);
        } else {
            self.select_category(Some(slug));
        }
        !already
    }

    pub fn clear_filters(&mut self) {
        self.filter = FilterState::default();
    }

    pub fn late_night_restaurants(&self) -> Vec<&Restaurant> {
        self.catalog.late_night_restaurants().collect()
    }

    pub fn cart(&self) -> &dyn CartProvider {
        self.cart.as_ref()
    }

    pub fn auth(&self) -> &dyn AuthProvider {
        self.auth.as_ref()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.auth.current_user()
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<&User, StorefrontError> {
        Ok(self.auth.login(email, password)?)
    }

    pub fn logout(&mut self) -> Option<User> {
        self.auth.logout()
    }

    /// Adds one unit of the dish and returns its new quantity.
    pub fn add_to_cart(&mut self, dish_id: &str) -> Result<u32, StorefrontError> {
        let dish = self
            .catalog
            .find(dish_id)
            .ok_or_else(|| StorefrontError::UnknownDish(dish_id.to_string()))?;
        Ok(self.cart.add(dish)?)
    }

    /// Removes one unit of the dish and returns what is left.
    pub fn decrement_in_cart(&mut self, dish_id: &str) -> Result<u32, StorefrontError> {
        let quantity = self.cart.quantity_of(dish_id);
        if quantity == 0 {
            return Err(CartError::NotInCart(dish_id.to_string()).into());
        }
        self.cart.update_quantity(dish_id, quantity - 1)?;
        Ok(quantity - 1)
    }

    pub fn set_cart_quantity(&mut self, dish_id: &str, quantity: u32) -> Result<(), StorefrontError> {
        Ok(self.cart.update_quantity(dish_id, quantity)?)
    }

    pub fn remove_from_cart(&mut self, dish_id: &str) -> Result<(), StorefrontError> {
        self.cart.remove(dish_id)?;
        Ok(())
    }
}
