use crate::api::controllers::product_controller;
use crate::api::server::AppState;
use axum::routing::get;
use axum::Router;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(product_controller::list_products))
        .route("/{id}", get(product_controller::get_product))
}
