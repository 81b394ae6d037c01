use std::convert::Infallible;

use crate::api::controllers::dto::order_dto::{
    OrderDetailResponse, OrderResponse, PlaceOrderRequest, PlaceOrderResponse,
    UpdateOrderNotesRequest, UpdateOrderStatusRequest,
};
use crate::api::errors::APIErrors;
use crate::api::extractors::ShopSession;
use crate::api::server::AppState;
use crate::security::jwt::AccessClaims;
use crate::services::errors::OrderServiceError;
use crate::services::order_service::{CustomerDetails, OrderStatus, OrderType};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::IntoResponse;
use axum::Json;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};

/// Place an order from the session's current cart. The cart is
/// cleared only after the order commit succeeds.
pub async fn place_order(
    ShopSession(session): ShopSession,
    State(state): State<AppState>,
    Json(payload): Json<PlaceOrderRequest>,
) -> impl IntoResponse {
    let Ok(order_type) = payload.order_type.parse::<OrderType>() else {
        return (StatusCode::BAD_REQUEST, "Unknown order type").into_response();
    };

    let cart = match state.cart.get_cart(&session).await {
        Ok(view) => view,
        Err(_) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "Cart storage unavailable")
                .into_response();
        }
    };

    let details = CustomerDetails {
        name: payload.customer_name,
        phone: payload.customer_phone,
        pickup_datetime: payload.pickup_datetime,
        delivery_address: payload.delivery_address,
        notes: payload.notes,
    };

    match state
        .orders
        .place_order(&session, order_type, &cart.lines, &details)
        .await
    {
        Ok(placed) => {
            if let Err(e) = state.cart.clear(&session).await {
                tracing::warn!(order_id = placed.order_id, error = %e, "Cart clear after order failed");
            }
            (StatusCode::CREATED, Json(PlaceOrderResponse::from(placed))).into_response()
        }
        Err(OrderServiceError::Unauthenticated) => {
            (StatusCode::UNAUTHORIZED, OrderServiceError::Unauthenticated.to_string())
                .into_response()
        }
        Err(e @ OrderServiceError::Validation(_)) => {
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Order creation failed").into_response(),
    }
}

/// The signed-in user's orders, newest first
pub async fn get_my_orders(
    ShopSession(session): ShopSession,
    State(state): State<AppState>,
) -> impl IntoResponse {
    match state.orders.get_user_orders(&session).await {
        Ok(orders) => {
            let response: Vec<OrderResponse> =
                orders.into_iter().map(OrderResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(OrderServiceError::Unauthenticated) => {
            (StatusCode::UNAUTHORIZED, "You must be signed in").into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// One order with its lines; owners and admins only
pub async fn get_order_by_id(
    ShopSession(session): ShopSession,
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
) -> impl IntoResponse {
    match state.orders.get_order(order_id).await {
        Ok(detail) => {
            if detail.order.user_id != session.uid && !session.admin {
                return (StatusCode::FORBIDDEN, "Permission denied").into_response();
            }
            (StatusCode::OK, Json(OrderDetailResponse::from(detail))).into_response()
        }
        Err(OrderServiceError::OrderNotFound) => {
            (StatusCode::NOT_FOUND, "Order not found").into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Admin: all orders
pub async fn get_all_orders(
    claims: AccessClaims,
    State(state): State<AppState>,
) -> impl IntoResponse {
    if !claims.admin {
        return (StatusCode::FORBIDDEN, "Permission denied").into_response();
    }

    match state.orders.get_all_orders().await {
        Ok(orders) => {
            let response: Vec<OrderResponse> =
                orders.into_iter().map(OrderResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Admin: orders in one status
pub async fn get_orders_by_status(
    claims: AccessClaims,
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> impl IntoResponse {
    if !claims.admin {
        return (StatusCode::FORBIDDEN, "Permission denied").into_response();
    }

    let Ok(status) = status.parse::<OrderStatus>() else {
        return (StatusCode::BAD_REQUEST, "Unknown order status").into_response();
    };

    match state.orders.get_orders_by_status(status).await {
        Ok(orders) => {
            let response: Vec<OrderResponse> =
                orders.into_iter().map(OrderResponse::from).collect();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Admin: move an order to the next status
pub async fn update_order_status(
    claims: AccessClaims,
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> impl IntoResponse {
    if !claims.admin {
        return (StatusCode::FORBIDDEN, "Permission denied").into_response();
    }

    let Ok(new_status) = payload.status.parse::<OrderStatus>() else {
        return (StatusCode::BAD_REQUEST, "Unknown order status").into_response();
    };

    match state.orders.apply_status_change(order_id, new_status).await {
        Ok(()) => (StatusCode::OK, "Status updated").into_response(),
        Err(OrderServiceError::OrderNotFound) => {
            (StatusCode::NOT_FOUND, "Order not found").into_response()
        }
        Err(OrderServiceError::InvalidStatusTransition) => {
            (StatusCode::CONFLICT, "Invalid status transition").into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Admin: replace an order's notes
pub async fn update_order_notes(
    claims: AccessClaims,
    State(state): State<AppState>,
    Path(order_id): Path<i32>,
    Json(payload): Json<UpdateOrderNotesRequest>,
) -> impl IntoResponse {
    if !claims.admin {
        return (StatusCode::FORBIDDEN, "Permission denied").into_response();
    }

    match state.orders.update_notes(order_id, &payload.notes).await {
        Ok(()) => (StatusCode::OK, "Notes updated").into_response(),
        Err(OrderServiceError::OrderNotFound) => {
            (StatusCode::NOT_FOUND, "Order not found").into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response(),
    }
}

/// Admin: live feed of full order snapshots. Each event carries the
/// whole current order, so dashboards replace their row wholesale.
/// The subscription is released when the client disconnects.
pub async fn stream_orders(
    claims: AccessClaims,
    State(state): State<AppState>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, APIErrors> {
    if !claims.admin {
        return Err(APIErrors::Forbidden);
    }

    let receiver = state.orders.subscribe();

    let stream = BroadcastStream::new(receiver).filter_map(|message| match message {
        Ok(snapshot) => Event::default()
            .json_data(&OrderDetailResponse::from(snapshot))
            .ok()
            .map(Ok),
        // Lagged receivers miss snapshots; the next change resyncs them.
        Err(_) => None,
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
