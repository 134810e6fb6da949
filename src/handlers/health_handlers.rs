use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde_json::json;

use crate::utils::json_utils::indented_json;

pub async fn health() -> HttpResponse {
    indented_json(StatusCode::OK, &json!({ "status": "ok" }))
}
