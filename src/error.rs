use thiserror::Error;

/// Rejections raised before any state is touched. A failed validation
/// discards the attempted mutation entirely.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("required field `{0}` is empty")]
    MissingField(&'static str),
    #[error("`{0}` must be greater than zero")]
    NonPositivePrice(&'static str),
    #[error("stock quantity cannot be negative")]
    NegativeStock,
    #[error("an order needs at least one line item")]
    EmptyOrder,
    #[error("line quantity for product `{0}` must be at least 1")]
    NonPositiveQuantity(String),
}

#[derive(Debug, Error)]
pub enum WarehouseError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("product not found: {0}")]
    ProductNotFound(String),
    #[error("order not found: {0}")]
    OrderNotFound(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
