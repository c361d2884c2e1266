//! OpenAPI document for the HTTP surface.
//!
//! - Swagger UI: `/doc/`
//! - OpenAPI JSON: `/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::domain::order::{OrderItem, OrderStatus};
use crate::errors::ErrorBody;
use crate::handlers::orders::{
    CreateOrderRequest, CreateOrderResponse, OrderResponse, UpdateStatusRequest,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Kitchen Production Service API",
        version = "0.1.0",
        description = "Tracks kitchen production orders from Received to Finished."
    ),
    paths(
        crate::handlers::health::index,
        crate::handlers::orders::create_order,
        crate::handlers::orders::list_queue,
        crate::handlers::orders::list_all,
        crate::handlers::orders::get_order,
        crate::handlers::orders::update_status,
    ),
    components(schemas(
        CreateOrderRequest,
        CreateOrderResponse,
        UpdateStatusRequest,
        OrderResponse,
        OrderItem,
        OrderStatus,
        ErrorBody,
    )),
    tags(
        (name = "orders", description = "Kitchen production orders"),
        (name = "health", description = "Liveness"),
    )
)]
pub struct ApiDoc;
