use crate::api::controllers::favorite_controller;
use crate::api::server::AppState;
use axum::routing::{get, post};
use axum::Router;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(favorite_controller::list_favorites))
        .route("/{product_id}", post(favorite_controller::toggle_favorite))
}
