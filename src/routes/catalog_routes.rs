use actix_web::web;

use crate::handlers::catalog_handlers::{list_exams, list_formulations, list_vital_signs};
use crate::handlers::health_handlers::health;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/exams", web::get().to(list_exams))
        .route("/formulations", web::get().to(list_formulations))
        .route("/vital-signs", web::get().to(list_vital_signs))
        .route("/health", web::get().to(health));
}
