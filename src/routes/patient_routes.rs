use actix_web::web;

use crate::handlers::patient_handlers::{create_patient, get_patient, list_patients, search_patients};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/patients")
            .route("", web::get().to(list_patients))
            .route("", web::post().to(create_patient))
            .route("/search", web::get().to(search_patients))
            .route("/{id}", web::get().to(get_patient)),
    );
}
