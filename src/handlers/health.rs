use actix_web::HttpResponse;

pub const LIVENESS_MESSAGE: &str =
    "Kitchen production service is up and connected to its store. See /doc for the API documentation.";

/// GET /
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is alive", body = String, content_type = "text/plain"),
    ),
    tag = "health"
)]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(LIVENESS_MESSAGE)
}
