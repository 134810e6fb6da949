use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use tracing::info;

use crate::error::ApiError;
use crate::handlers::{paged, run};
use crate::models::medicine_models::Medicine;
use crate::models::pagination_models::PageQuery;
use crate::state::AppState;
use crate::utils::json_utils::indented_json;

pub async fn list_medicines(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    paged(
        &state,
        query.requested_page(),
        |store| store.count_medicines(None),
        |store, window| store.list_medicines(None, window),
    )
    .await
}

/// Matches `q` against the medicine name.
pub async fn search_medicines(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    let term = query.term().to_owned();
    let count_term = term.clone();
    paged(
        &state,
        query.requested_page(),
        move |store| store.count_medicines(Some(&count_term)),
        move |store, window| store.list_medicines(Some(&term), window),
    )
    .await
}

/// Only `formulation.id` is read from the payload's formulation; the echoed
/// body keeps whatever else the client sent.
pub async fn create_medicine(
    state: web::Data<AppState>,
    payload: web::Json<Medicine>,
) -> Result<HttpResponse, ApiError> {
    let mut medicine = payload.into_inner();
    let new_medicine = medicine.clone();
    medicine.id = run(&state, move |store| store.insert_medicine(&new_medicine)).await?;
    info!(id = medicine.id, formulation_id = medicine.formulation.id, "medicine created");
    Ok(indented_json(StatusCode::CREATED, &medicine))
}
