use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use tracing::error;

/// Respond with `value` as pretty-printed JSON.
pub fn indented_json<T: Serialize>(status: StatusCode, value: &T) -> HttpResponse {
    match serde_json::to_string_pretty(value) {
        Ok(body) => HttpResponse::build(status)
            .content_type(ContentType::json())
            .body(body),
        Err(e) => {
            error!("failed to serialize response: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}
