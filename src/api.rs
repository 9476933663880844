//! REST transport over one shared [`Book`].
//!
//! Used by the binary and by integration tests. Create with [`create_router`].
//! State is passed through `Extension` so the router is `Router<()>` and works
//! with `into_make_service()`.

use axum::{
    extract::{rejection::JsonRejection, Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
    Json, Router,
};
use log::warn;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::{Book, BookError, Order, OrderId, Side};

/// Shared app state: one book per process.
#[derive(Clone)]
pub struct AppState {
    pub(crate) book: Arc<Book>,
}

/// Builds the router around a new book tagged `tag`.
pub fn create_router(tag: &str) -> Router<()> {
    router_for(Arc::new(Book::new(tag)))
}

/// Builds the router around an existing book.
pub fn router_for(book: Arc<Book>) -> Router<()> {
    let state = AppState { book };
    Router::new()
        .route("/health", get(health))
        .route("/orders/place", post(place_order))
        .route("/orders/cancel", delete(cancel_order))
        .route("/orders/modify", patch(modify_order))
        .route("/orders/process", post(process_order))
        .route("/orderbook/best-bid", get(best_bid))
        .route("/orderbook/best-ask", get(best_ask))
        .route("/orderbook/snapshot", get(snapshot))
        .layer(Extension(state))
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let message = message.into();
    warn!("request rejected status={} error={}", status.as_u16(), message);
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

fn book_error_response(err: BookError) -> Response {
    let status = match err {
        BookError::NoOrders(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_REQUEST,
    };
    error_response(status, err.to_string())
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Incoming order; `id` is generated when omitted.
#[derive(serde::Deserialize)]
struct OrderRequest {
    #[serde(default)]
    id: Option<String>,
    price: Decimal,
    amount: Decimal,
    side: Side,
}

impl OrderRequest {
    fn into_order(self) -> Order {
        let id = match self.id {
            Some(id) if !id.is_empty() => OrderId(id),
            _ => OrderId::generate(),
        };
        Order {
            id,
            price: self.price,
            amount: self.amount,
            side: self.side,
        }
    }
}

/// Any undecodable body is a 400, whatever axum's rejection status would be.
fn decode(payload: Result<Json<OrderRequest>, JsonRejection>) -> Result<Order, Response> {
    match payload {
        Ok(Json(body)) => Ok(body.into_order()),
        Err(rejection) => Err(error_response(
            StatusCode::BAD_REQUEST,
            format!("invalid request body: {}", rejection.body_text()),
        )),
    }
}

async fn place_order(
    Extension(state): Extension<AppState>,
    payload: Result<Json<OrderRequest>, JsonRejection>,
) -> Response {
    let order = match decode(payload) {
        Ok(order) => order,
        Err(resp) => return resp,
    };
    match state.book.place(order.clone()) {
        Ok(()) => (StatusCode::CREATED, Json(order)).into_response(),
        Err(e) => book_error_response(e),
    }
}

async fn process_order(
    Extension(state): Extension<AppState>,
    payload: Result<Json<OrderRequest>, JsonRejection>,
) -> Response {
    let order = match decode(payload) {
        Ok(order) => order,
        Err(resp) => return resp,
    };
    match state.book.process(order) {
        Ok(outcome) => (StatusCode::OK, Json(outcome.trades)).into_response(),
        Err(e) => book_error_response(e),
    }
}

#[derive(serde::Deserialize)]
struct CancelParams {
    id: Option<String>,
}

async fn cancel_order(
    Extension(state): Extension<AppState>,
    Query(params): Query<CancelParams>,
) -> Response {
    let Some(id) = params.id.filter(|s| !s.is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "order id is required");
    };
    match state.book.cancel(&OrderId(id)) {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(e) => book_error_response(e),
    }
}

#[derive(serde::Deserialize)]
struct ModifyParams {
    id: Option<String>,
    price: Option<String>,
    amount: Option<String>,
}

fn parse_decimal(raw: Option<&str>, name: &str) -> Result<Decimal, Response> {
    raw.and_then(|s| s.trim().parse().ok())
        .ok_or_else(|| error_response(StatusCode::BAD_REQUEST, format!("{} is not a number", name)))
}

async fn modify_order(
    Extension(state): Extension<AppState>,
    Query(params): Query<ModifyParams>,
) -> Response {
    let Some(id) = params.id.filter(|s| !s.is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "order id is required");
    };
    let price = match parse_decimal(params.price.as_deref(), "price") {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let amount = match parse_decimal(params.amount.as_deref(), "amount") {
        Ok(a) => a,
        Err(resp) => return resp,
    };
    match state.book.modify(&OrderId(id), price, amount) {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => book_error_response(e),
    }
}

async fn best_bid(Extension(state): Extension<AppState>) -> Response {
    match state.book.best_bid() {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(e) => book_error_response(e),
    }
}

async fn best_ask(Extension(state): Extension<AppState>) -> Response {
    match state.book.best_ask() {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(e) => book_error_response(e),
    }
}

async fn snapshot(Extension(state): Extension<AppState>) -> Response {
    (StatusCode::OK, Json(state.book.snapshot())).into_response()
}
