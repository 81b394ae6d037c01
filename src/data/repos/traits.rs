pub mod cart_repository;
pub mod catalog_store;
pub mod favorite_repository;
pub mod inventory_store;
pub mod order_store;

/// Backend-neutral failure for store operations. Both the remote
/// database repos and the local JSON fallback map their transport
/// errors into this, so callers can branch on "the store was not
/// reachable" without seeing raw driver errors.
#[derive(Debug)]
pub enum StoreError {
    Unavailable(String),
}

impl std::error::Error for StoreError {}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Unavailable(reason) => write!(f, "Store unavailable: {reason}"),
        }
    }
}

impl From<diesel::result::Error> for StoreError {
    fn from(e: diesel::result::Error) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

impl From<diesel_async::pooled_connection::deadpool::PoolError> for StoreError {
    fn from(e: diesel_async::pooled_connection::deadpool::PoolError) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}
