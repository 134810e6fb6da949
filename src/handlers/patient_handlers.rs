use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use tracing::info;

use crate::error::ApiError;
use crate::handlers::{paged, run};
use crate::models::pagination_models::PageQuery;
use crate::models::patient_models::Patient;
use crate::state::AppState;
use crate::utils::json_utils::indented_json;

pub async fn list_patients(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    paged(
        &state,
        query.requested_page(),
        |store| store.count_patients(None),
        |store, window| store.list_patients(None, window),
    )
    .await
}

/// Matches `q` against first or last name.
pub async fn search_patients(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    let term = query.term().to_owned();
    let count_term = term.clone();
    paged(
        &state,
        query.requested_page(),
        move |store| store.count_patients(Some(&count_term)),
        move |store, window| store.list_patients(Some(&term), window),
    )
    .await
}

pub async fn get_patient(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    match run(&state, move |store| store.get_patient(id)).await? {
        Some(patient) => Ok(indented_json(StatusCode::OK, &patient)),
        None => Err(ApiError::NotFound("no such patient".to_string())),
    }
}

pub async fn create_patient(
    state: web::Data<AppState>,
    payload: web::Json<Patient>,
) -> Result<HttpResponse, ApiError> {
    let mut patient = payload.into_inner();
    let new_patient = patient.clone();
    patient.id = run(&state, move |store| store.insert_patient(&new_patient)).await?;
    info!(id = patient.id, "patient created");
    Ok(indented_json(StatusCode::CREATED, &patient))
}
