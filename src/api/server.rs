use std::sync::Arc;

use crate::api::config::Config;
use crate::api::routes::{
    admin_order_routes, cart_routes, favorite_routes, order_routes, product_routes,
};
use crate::data::local_store::{LocalCartRepo, LocalFavoriteRepo};
use crate::data::repos::implementors::cart_repo::RemoteCartRepo;
use crate::data::repos::implementors::favorite_repo::RemoteFavoriteRepo;
use crate::data::repos::implementors::order_repo::OrderRepo;
use crate::data::repos::implementors::product_repo::ProductRepo;
use crate::services::cart_service::CartService;
use crate::services::favorite_service::FavoriteService;
use crate::services::order_service::OrderService;
use crate::services::product_service::ProductService;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

/// Long-lived services shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<ProductService>,
    pub cart: Arc<CartService>,
    pub favorites: Arc<FavoriteService>,
    pub orders: Arc<OrderService>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let product_repo = Arc::new(ProductRepo::new());

        let cart = CartService::new(
            Arc::new(RemoteCartRepo::new()),
            Arc::new(LocalCartRepo::new(&config.local_store_dir)),
        );

        let favorites = FavoriteService::new(
            Arc::new(RemoteFavoriteRepo::new()),
            Arc::new(LocalFavoriteRepo::new(&config.local_store_dir)),
        );

        let orders = OrderService::new(
            Arc::new(OrderRepo::new()),
            Arc::clone(&product_repo) as _,
            config.delivery_fee.clone(),
        );

        AppState {
            products: Arc::new(ProductService::new(product_repo)),
            cart: Arc::new(cart),
            favorites: Arc::new(favorites),
            orders: Arc::new(orders),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors_layer = CorsLayer::new().allow_origin(Any);

    Router::new()
        .route("/api", get(|| async { "Much Shop API is running!" }))
        .nest("/api/v1/products", product_routes::routes())
        .nest("/api/v1/cart", cart_routes::routes())
        .nest("/api/v1/favorites", favorite_routes::routes())
        .nest("/api/v1/orders", order_routes::routes())
        .nest("/api/v1/admin/orders", admin_order_routes::routes())
        .layer(cors_layer)
        .with_state(state)
}

pub async fn start() {
    let config = Config::new();
    let state = AppState::new(&config);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server running on http://{}", config.bind_addr);

    axum::serve(listener, router(state))
        .await
        .expect("Failed to start the server");
}
