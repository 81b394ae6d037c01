use crate::api::controllers::cart_controller;
use crate::api::server::AppState;
use axum::routing::{delete, get, post, put};
use axum::Router;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart_controller::get_cart))
        .route("/", delete(cart_controller::clear_cart))
        .route("/items", post(cart_controller::add_item))
        .route("/items/{product_id}", put(cart_controller::set_quantity))
        .route("/items/{product_id}", delete(cart_controller::remove_item))
}
