use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::OrderService;
use crate::domain::order::{Order, OrderItem, OrderStatus};
use crate::errors::{AppError, ErrorBody};

// ── Request / response DTOs ──────────────────────────────────────────────────

/// Fields are optional here so that missing values surface as validation
/// errors with a descriptive message instead of a generic JSON error.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    #[schema(example = "12345678901")]
    pub customer_id: Option<String>,
    #[schema(value_type = Vec<OrderItem>)]
    pub items: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderResponse {
    pub message: String,
    #[serde(rename = "insertedId")]
    pub inserted_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    #[schema(value_type = Option<OrderStatus>, example = "In preparation")]
    pub status: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub customer_id: String,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            customer_id: o.customer_id,
            items: o.items,
            status: o.status,
            created_at: o.created_at,
            updated_at: o.updated_at,
        }
    }
}

fn to_responses(orders: Vec<Order>) -> Vec<OrderResponse> {
    orders.into_iter().map(OrderResponse::from).collect()
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Registers a new order in the kitchen queue. The order always starts as
/// `Received`; any status or timestamps in the body are ignored.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order received by the kitchen", body = CreateOrderResponse),
        (status = 400, description = "Missing customer_id or items", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody),
    ),
    tag = "orders"
)]
pub async fn create_order(
    service: web::Data<OrderService>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let CreateOrderRequest { customer_id, items } = body.into_inner();

    let id = web::block(move || service.create_order(customer_id, items))
        .await?
        .map_err(AppError::context("Failed to create the order"))?;

    log::info!("order {} received", id);

    Ok(HttpResponse::Created().json(CreateOrderResponse {
        message: "Order received by the kitchen.".to_string(),
        inserted_id: id,
    }))
}

/// GET /orders/queue
///
/// Returns every order that is not `Finished`.
#[utoipa::path(
    get,
    path = "/orders/queue",
    responses(
        (status = 200, description = "Orders still in the kitchen queue", body = Vec<OrderResponse>),
        (status = 500, description = "Internal server error", body = ErrorBody),
    ),
    tag = "orders"
)]
pub async fn list_queue(service: web::Data<OrderService>) -> Result<HttpResponse, AppError> {
    let orders = web::block(move || service.list_queue())
        .await?
        .map_err(AppError::context("Failed to fetch the order queue"))?;

    Ok(HttpResponse::Ok().json(to_responses(orders)))
}

/// GET /orders/all
///
/// Returns the full order history regardless of status.
#[utoipa::path(
    get,
    path = "/orders/all",
    responses(
        (status = 200, description = "All recorded orders", body = Vec<OrderResponse>),
        (status = 500, description = "Internal server error", body = ErrorBody),
    ),
    tag = "orders"
)]
pub async fn list_all(service: web::Data<OrderService>) -> Result<HttpResponse, AppError> {
    let orders = web::block(move || service.list_all())
        .await?
        .map_err(AppError::context("Failed to fetch orders"))?;

    Ok(HttpResponse::Ok().json(to_responses(orders)))
}

/// GET /orders/{id}
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = String, Path, description = "Order id (UUID)"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 400, description = "Malformed order id", body = ErrorBody),
        (status = 404, description = "Order not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody),
    ),
    tag = "orders"
)]
pub async fn get_order(
    service: web::Data<OrderService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let order = web::block(move || service.get_order(&id))
        .await?
        .map_err(AppError::context("Failed to fetch the order"))?;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// PUT /orders/{id}/status
///
/// Sets the order's status and stamps `updated_at`. Any of the four statuses
/// may be set regardless of the current one.
#[utoipa::path(
    put,
    path = "/orders/{id}/status",
    params(
        ("id" = String, Path, description = "Order id (UUID)"),
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated order", body = OrderResponse),
        (status = 400, description = "Malformed order id or unknown status", body = ErrorBody),
        (status = 404, description = "Order not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody),
    ),
    tag = "orders"
)]
pub async fn update_status(
    service: web::Data<OrderService>,
    path: web::Path<String>,
    body: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let status = body.into_inner().status;

    let order = web::block(move || service.update_status(&id, status.as_deref()))
        .await?
        .map_err(AppError::context("Failed to update the order status"))?;

    log::info!("order {} moved to '{}'", order.id, order.status);

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}
