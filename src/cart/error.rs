use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CartError {
    #[error("Dish {0} is not in the cart")]
    NotInCart(String),

    #[error("Quantity {requested} exceeds the limit of {max}")]
    QuantityLimit { requested: u32, max: u32 },
}
