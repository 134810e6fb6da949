use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use tracing::info;

use crate::error::ApiError;
use crate::handlers::{paged, run};
use crate::models::symptom_models::Symptom;
use crate::models::pagination_models::PageQuery;
use crate::state::AppState;
use crate::utils::json_utils::indented_json;

pub async fn list_symptoms(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    paged(
        &state,
        query.requested_page(),
        |store| store.count_symptoms(None),
        |store, window| store.list_symptoms(None, window),
    )
    .await
}

pub async fn search_symptoms(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    let term = query.term().to_owned();
    let count_term = term.clone();
    paged(
        &state,
        query.requested_page(),
        move |store| store.count_symptoms(Some(&count_term)),
        move |store, window| store.list_symptoms(Some(&term), window),
    )
    .await
}

pub async fn create_symptom(
    state: web::Data<AppState>,
    payload: web::Json<Symptom>,
) -> Result<HttpResponse, ApiError> {
    let mut symptom = payload.into_inner();
    let new_symptom = symptom.clone();
    symptom.id = run(&state, move |store| store.insert_symptom(&new_symptom)).await?;
    info!(id = symptom.id, "symptom created");
    Ok(indented_json(StatusCode::CREATED, &symptom))
}
