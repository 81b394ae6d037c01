use crate::api::controllers::dto::product_dto::ProductResponse;
use crate::api::server::AppState;
use crate::services::errors::ProductServiceError;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

/// Storefront product listing
pub async fn list_products(State(state): State<AppState>) -> impl IntoResponse {
    match state.products.list_products().await {
        Ok(products) => {
            let response: Vec<ProductResponse> =
                products.into_iter().map(ProductResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Single product with pricing and offer badges
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> impl IntoResponse {
    match state.products.get_product(product_id).await {
        Ok(product) => (StatusCode::OK, Json(ProductResponse::from(product))).into_response(),
        Err(ProductServiceError::ProductNotFound) => {
            (StatusCode::NOT_FOUND, "Product not found").into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}
