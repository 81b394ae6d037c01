use crate::api::controllers::dto::cart_dto::{
    AddCartItemRequest, CartResponse, SetQuantityRequest,
};
use crate::api::extractors::ShopSession;
use crate::api::server::AppState;
use crate::services::errors::{CartServiceError, ProductServiceError};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

/// Current cart for the session
pub async fn get_cart(
    ShopSession(session): ShopSession,
    State(state): State<AppState>,
) -> impl IntoResponse {
    match state.cart.get_cart(&session).await {
        Ok(view) => (StatusCode::OK, Json(CartResponse::from(view))).into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Cart storage unavailable").into_response(),
    }
}

/// Add a product to the cart
pub async fn add_item(
    ShopSession(session): ShopSession,
    State(state): State<AppState>,
    Json(payload): Json<AddCartItemRequest>,
) -> impl IntoResponse {
    let product = match state.products.get_product(payload.product_id).await {
        Ok(entry) => entry.product,
        Err(ProductServiceError::ProductNotFound) => {
            return (StatusCode::NOT_FOUND, "Product not found").into_response();
        }
        Err(_) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response();
        }
    };

    match state
        .cart
        .add_item(&session, &product, payload.quantity)
        .await
    {
        Ok(view) => (StatusCode::OK, Json(CartResponse::from(view))).into_response(),
        Err(CartServiceError::InvalidQuantity) => {
            (StatusCode::BAD_REQUEST, "Quantity must be at least 1").into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Cart storage unavailable").into_response(),
    }
}

/// Replace a line's quantity; zero removes the line
pub async fn set_quantity(
    ShopSession(session): ShopSession,
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
    Json(payload): Json<SetQuantityRequest>,
) -> impl IntoResponse {
    match state
        .cart
        .set_quantity(&session, product_id, payload.quantity)
        .await
    {
        Ok(view) => (StatusCode::OK, Json(CartResponse::from(view))).into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Cart storage unavailable").into_response(),
    }
}

/// Remove a line
pub async fn remove_item(
    ShopSession(session): ShopSession,
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> impl IntoResponse {
    match state.cart.remove_item(&session, product_id).await {
        Ok(view) => (StatusCode::OK, Json(CartResponse::from(view))).into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Cart storage unavailable").into_response(),
    }
}

/// Empty the cart
pub async fn clear_cart(
    ShopSession(session): ShopSession,
    State(state): State<AppState>,
) -> impl IntoResponse {
    match state.cart.clear(&session).await {
        Ok(view) => (StatusCode::OK, Json(CartResponse::from(view))).into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Cart storage unavailable").into_response(),
    }
}
