//! Cart capability.
//!
//! Dishes enter the cart by identity. Each dish id owns at most one line, and
//! lines stay in the order they were first added.

pub mod error;

use tracing::debug;

use crate::catalog::Dish;

pub use error::CartError;

pub const MAX_QUANTITY: u32 = 99;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub dish_id: String,
    /// Snapshot taken when the dish was first added.
    pub name: String,
    pub unit_price_cents: u32,
    pub quantity: u32,
}

impl CartLine {
    pub fn total_cents(&self) -> u32 {
        self.unit_price_cents.saturating_mul(self.quantity)
    }
}

pub trait CartProvider {
    fn items(&self) -> &[CartLine];
    /// Adds one unit of `dish`, returning the new quantity of its line.
    fn add(&mut self, dish: &Dish) -> Result<u32, CartError>;
    fn remove(&mut self, dish_id: &str) -> Result<CartLine, CartError>;
    /// Sets the quantity of an existing line. Zero removes the line.
    fn update_quantity(&mut self, dish_id: &str, quantity: u32) -> Result<(), CartError>;
    fn clear(&mut self);

    fn quantity_of(&self, dish_id: &str) -> u32 {
        self.items()
            .iter()
            .find(|l| l.dish_id == dish_id)
            .map(|l| l.quantity)
            .unwrap_or(0)
    }

    fn item_count(&self) -> u32 {
        self.items().iter().map(|l| l.quantity).sum()
    }

    fn subtotal_cents(&self) -> u32 {
        self.items()
            .iter()
            .fold(0u32, |acc, l| acc.saturating_add(l.total_cents()))
    }

    fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

#[derive(Debug, Default)]
pub struct InMemoryCart {
    lines: Vec<CartLine>,
}

impl InMemoryCart {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, dish_id: &str) -> Result<usize, CartError> {
        self.lines
            .iter()
            .position(|l| l.dish_id == dish_id)
            .ok_or_else(|| CartError::NotInCart(dish_id.to_string()))
    }
}

impl CartProvider for InMemoryCart {
    fn items(&self) -> &[CartLine] {
        &self.lines
    }

    fn add(&mut self, dish: &Dish) -> Result<u32, CartError> {
        if let Some(line) = self.lines.iter_mut().find(|l| l.dish_id == dish.id) {
            let requested = line.quantity + 1;
            if requested > MAX_QUANTITY {
                return Err(CartError::QuantityLimit {
                    requested,
                    max: MAX_QUANTITY,
                });
            }
            line.quantity = requested;
            debug!(dish = %dish.id, quantity = requested, "cart line incremented");
            return Ok(requested);
        }
        self.lines.push(CartLine {
            dish_id: dish.id.clone(),
            name: dish.name.clone(),
            unit_price_cents: dish.price_cents,
            quantity: 1,
        });
        debug!(dish = %dish.id, "cart line added");
        Ok(1)
    }

    fn remove(&mut self, dish_id: &str) -> Result<CartLine, CartError> {
        let idx = self.position(dish_id)?;
        debug!(dish = %dish_id, "cart line removed");
        Ok(self.lines.remove(idx))
    }

    fn update_quantity(&mut self, dish_id: &str, quantity: u32) -> Result<(), CartError> {
        let idx = self.position(dish_id)?;
        if quantity == 0 {
            self.lines.remove(idx);
            return Ok(());
        }
        if quantity > MAX_QUANTITY {
            return Err(CartError::QuantityLimit {
                requested: quantity,
                max: MAX_QUANTITY,
            });
        }
        self.lines[idx].quantity = quantity;
        Ok(())
    }

    fn clear(&mut self) {
        self.lines.clear();
    }
}
