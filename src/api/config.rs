use std::path::PathBuf;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use dotenvy::dotenv;
use once_cell::sync::Lazy;

#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    /// Flat fee added to delivery orders; pickup orders never pay it.
    pub delivery_fee: BigDecimal,
    /// Directory for the local fallback store (guest carts, wishlist
    /// mirrors).
    pub local_store_dir: PathBuf,
    pub bind_addr: String,
}

impl Config {
    pub fn new() -> Self {
        CONFIG.clone()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok();

    let jwt_secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");

    let delivery_fee = std::env::var("DELIVERY_FEE")
        .unwrap_or_else(|_| "30".to_string());
    let delivery_fee =
        BigDecimal::from_str(&delivery_fee).expect("DELIVERY_FEE must be a valid decimal");

    let local_store_dir = std::env::var("LOCAL_STORE_DIR")
        .unwrap_or_else(|_| "./muchshop_data".to_string())
        .into();

    let bind_addr =
        std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());

    tracing::info!("Config loaded");

    Config {
        jwt_secret,
        delivery_fee,
        local_store_dir,
        bind_addr,
    }
});
