//! REST API over a relational medical-records schema.
//!
//! Every list and search endpoint is paginated through
//! [`utils::pagination_utils::compute_page`]; data access goes through the
//! [`store::MedicalStore`] trait so the HTTP layer never touches a connection.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod schema;
pub mod state;
pub mod store;
pub mod utils;

use actix_web::web;

pub use config::Config;
pub use error::ApiError;
pub use state::AppState;

/// Malformed JSON bodies answer 417 with the usual `{"message": ...}` body.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| ApiError::Payload(err.to_string()).into())
}

/// Ids that do not parse answer 404 with the usual `{"message": ...}` body.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| ApiError::NotFound(err.to_string()).into())
}

/// Register state, extractor config and every route.
pub fn configure_app(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(state))
            .app_data(json_config())
            .app_data(path_config())
            .configure(routes::configure);
    }
}
