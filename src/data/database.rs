use diesel_async::AsyncMysqlConnection;
use diesel_async::pooled_connection::deadpool::{Object, Pool};
use diesel_async::pooled_connection::{AsyncDieselConnectionManager, deadpool};
use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;

pub struct Database {
    pool: Pool<AsyncMysqlConnection>,
}

impl Database {
    pub async fn new() -> Self {
        Database {
            pool: DB_POOL.clone(),
        }
    }

    pub async fn get_connection(
        &self,
    ) -> Result<Object<AsyncMysqlConnection>, deadpool::PoolError> {
        self.pool.get().await
    }
}

/// Lazily initialized global connection pool for the shop database
static DB_POOL: Lazy<Pool<AsyncMysqlConnection>> = Lazy::new(|| {
    dotenv().ok();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let max_size: usize = env::var("DB_POOL_MAX_SIZE")
        .unwrap_or_else(|_| "8".to_string())
        .parse()
        .expect("DB_POOL_MAX_SIZE must be a valid usize");

    let config = AsyncDieselConnectionManager::<AsyncMysqlConnection>::new(database_url);
    let pool = Pool::builder(config)
        .max_size(max_size)
        .build()
        .expect("Failed to create database connection pool");

    tracing::info!("DB connection pool created");

    pool
});
