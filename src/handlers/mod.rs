pub mod catalog_handlers;
pub mod disease_handlers;
pub mod health_handlers;
pub mod medicine_handlers;
pub mod patient_handlers;
pub mod record_handlers;
pub mod symptom_handlers;

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::models::pagination_models::{Paginated, Window};
use crate::state::AppState;
use crate::store::{MedicalStore, StoreResult};
use crate::utils::json_utils::indented_json;
use crate::utils::pagination_utils::compute_page;

/// Run a store call on the blocking pool.
pub(crate) async fn run<R, F>(state: &AppState, f: F) -> Result<R, ApiError>
where
    R: Send + 'static,
    F: FnOnce(&dyn MedicalStore) -> StoreResult<R> + Send + 'static,
{
    let store = state.store.clone();
    let result = web::block(move || f(&*store)).await?;
    Ok(result?)
}

/// Count, clamp the requested page, then load only that page's rows.
///
/// An empty table never reaches `load`: the envelope comes back with empty
/// `data` and `last_page == -1`.
pub(crate) async fn paged<T, C, L>(
    state: &AppState,
    requested_page: i64,
    count: C,
    load: L,
) -> Result<HttpResponse, ApiError>
where
    T: Serialize + Send + 'static,
    C: FnOnce(&dyn MedicalStore) -> StoreResult<i64> + Send + 'static,
    L: FnOnce(&dyn MedicalStore, Window) -> StoreResult<Vec<T>> + Send + 'static,
{
    let store = state.store.clone();
    let page_size = state.page_size;
    let body = web::block(move || -> Result<Paginated<T>, ApiError> {
        let total = count(&*store)?;
        let page = compute_page(requested_page, total, page_size)?;
        debug!(requested_page, page = page.page, total, "page resolved");
        let data = match page.window(page_size) {
            Some(window) => load(&*store, window)?,
            None => Vec::new(),
        };
        Ok(page.with_data(data))
    })
    .await??;
    Ok(indented_json(StatusCode::OK, &body))
}
