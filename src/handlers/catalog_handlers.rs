//! Reference tables that are small enough to return whole.

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};

use crate::error::ApiError;
use crate::handlers::run;
use crate::state::AppState;
use crate::utils::json_utils::indented_json;

pub async fn list_exams(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let exams = run(&state, |store| store.list_exams()).await?;
    Ok(indented_json(StatusCode::OK, &exams))
}

pub async fn list_formulations(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let formulations = run(&state, |store| store.list_formulations()).await?;
    Ok(indented_json(StatusCode::OK, &formulations))
}

pub async fn list_vital_signs(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let vital_signs = run(&state, |store| store.list_vital_signs()).await?;
    Ok(indented_json(StatusCode::OK, &vital_signs))
}
