use actix_web::web;

use crate::handlers::symptom_handlers::{create_symptom, list_symptoms, search_symptoms};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/symptoms")
            .route("", web::get().to(list_symptoms))
            .route("", web::post().to(create_symptom))
            .route("/search", web::get().to(search_symptoms)),
    );
}
