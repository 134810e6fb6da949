use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use tracing::info;

use crate::error::ApiError;
use crate::handlers::{paged, run};
use crate::models::disease_models::Disease;
use crate::models::pagination_models::PageQuery;
use crate::state::AppState;
use crate::utils::json_utils::indented_json;

pub async fn list_diseases(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    paged(
        &state,
        query.requested_page(),
        |store| store.count_diseases(None),
        |store, window| store.list_diseases(None, window),
    )
    .await
}

pub async fn search_diseases(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    let term = query.term().to_owned();
    let count_term = term.clone();
    paged(
        &state,
        query.requested_page(),
        move |store| store.count_diseases(Some(&count_term)),
        move |store, window| store.list_diseases(Some(&term), window),
    )
    .await
}

pub async fn create_disease(
    state: web::Data<AppState>,
    payload: web::Json<Disease>,
) -> Result<HttpResponse, ApiError> {
    let mut disease = payload.into_inner();
    let new_disease = disease.clone();
    disease.id = run(&state, move |store| store.insert_disease(&new_disease)).await?;
    info!(id = disease.id, "disease created");
    Ok(indented_json(StatusCode::CREATED, &disease))
}
