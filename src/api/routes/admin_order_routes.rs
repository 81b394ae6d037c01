use crate::api::controllers::order_controller;
use crate::api::server::AppState;
use axum::routing::{get, put};
use axum::Router;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(order_controller::get_all_orders))
        .route("/stream", get(order_controller::stream_orders))
        .route("/status/{status}", get(order_controller::get_orders_by_status))
        .route("/{id}/status", put(order_controller::update_order_status))
        .route("/{id}/notes", put(order_controller::update_order_notes))
}
