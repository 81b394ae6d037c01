use crate::api::controllers::dto::favorite_dto::{FavoriteToggleResponse, FavoritesResponse};
use crate::api::extractors::ShopSession;
use crate::api::server::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

/// Wishlist for the session
pub async fn list_favorites(
    ShopSession(session): ShopSession,
    State(state): State<AppState>,
) -> impl IntoResponse {
    match state.favorites.list(&session).await {
        Ok(product_ids) => {
            (StatusCode::OK, Json(FavoritesResponse { product_ids })).into_response()
        }
        Err(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Wishlist storage unavailable").into_response()
        }
    }
}

/// Toggle a product on or off the wishlist
pub async fn toggle_favorite(
    ShopSession(session): ShopSession,
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> impl IntoResponse {
    match state.favorites.toggle(&session, product_id).await {
        Ok(toggle) => {
            (StatusCode::OK, Json(FavoriteToggleResponse::from(toggle))).into_response()
        }
        Err(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Wishlist storage unavailable").into_response()
        }
    }
}
