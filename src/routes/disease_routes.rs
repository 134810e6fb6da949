use actix_web::web;

use crate::handlers::disease_handlers::{create_disease, list_diseases, search_diseases};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/diseases")
            .route("", web::get().to(list_diseases))
            .route("", web::post().to(create_disease))
            .route("/search", web::get().to(search_diseases)),
    );
}
