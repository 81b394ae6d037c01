use crate::api::controllers::order_controller;
use crate::api::server::AppState;
use axum::routing::{get, post};
use axum::Router;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(order_controller::place_order))
        .route("/", get(order_controller::get_my_orders))
        .route("/{id}", get(order_controller::get_order_by_id))
}
