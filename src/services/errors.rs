#[derive(Debug, PartialEq)]
pub enum CartServiceError {
    InvalidQuantity,
    StorageUnavailable,
}

impl std::error::Error for CartServiceError {}

impl std::fmt::Display for CartServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartServiceError::InvalidQuantity => write!(f, "Quantity must be at least 1"),
            CartServiceError::StorageUnavailable => write!(f, "Cart storage unavailable"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum OrderServiceError {
    Unauthenticated,
    Validation(String),
    OrderNotFound,
    InvalidStatusTransition,
    OrderCreationFailed,
    DatabaseError,
}

impl std::error::Error for OrderServiceError {}

impl std::fmt::Display for OrderServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderServiceError::Unauthenticated => {
                write!(f, "You must be signed in to place an order")
            }
            OrderServiceError::Validation(reason) => write!(f, "Invalid order details: {reason}"),
            OrderServiceError::OrderNotFound => write!(f, "Order not found"),
            OrderServiceError::InvalidStatusTransition => write!(f, "Invalid status transition"),
            OrderServiceError::OrderCreationFailed => write!(f, "Order creation failed"),
            OrderServiceError::DatabaseError => write!(f, "Database error"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum FavoriteServiceError {
    StorageUnavailable,
}

impl std::error::Error for FavoriteServiceError {}

impl std::fmt::Display for FavoriteServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FavoriteServiceError::StorageUnavailable => write!(f, "Wishlist storage unavailable"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum ProductServiceError {
    ProductNotFound,
    DatabaseError,
}

impl std::error::Error for ProductServiceError {}

impl std::fmt::Display for ProductServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProductServiceError::ProductNotFound => write!(f, "Product not found"),
            ProductServiceError::DatabaseError => write!(f, "Database error"),
        }
    }
}
