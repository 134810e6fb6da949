use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use tracing::info;

use crate::error::ApiError;
use crate::handlers::{paged, run};
use crate::models::pagination_models::PageQuery;
use crate::models::record_models::Record;
use crate::state::AppState;
use crate::utils::json_utils::indented_json;

pub async fn list_records(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    paged(
        &state,
        query.requested_page(),
        |store| store.count_records(None),
        |store, window| store.list_records(None, window),
    )
    .await
}

/// Records whose patient's first or last name matches `q`, newest first.
pub async fn search_records(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    let term = query.term().to_owned();
    let count_term = term.clone();
    paged(
        &state,
        query.requested_page(),
        move |store| store.count_records(Some(&count_term)),
        move |store, window| store.list_records(Some(&term), window),
    )
    .await
}

pub async fn get_record(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    match run(&state, move |store| store.full_record(id)).await? {
        Some(full) => Ok(indented_json(StatusCode::OK, &full)),
        None => Err(ApiError::NotFound("no such medical record".to_string())),
    }
}

pub async fn create_record(
    state: web::Data<AppState>,
    payload: web::Json<Record>,
) -> Result<HttpResponse, ApiError> {
    let mut record = payload.into_inner();
    let new_record = record.clone();
    record.id = run(&state, move |store| store.insert_record(&new_record)).await?;
    info!(id = record.id, patient_id = record.patient.id, "record created");
    Ok(indented_json(StatusCode::CREATED, &record))
}
