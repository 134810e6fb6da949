use actix_web::web;

use crate::handlers::record_handlers::{create_record, get_record, list_records, search_records};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/records")
            .route("", web::get().to(list_records))
            .route("", web::post().to(create_record))
            .route("/search", web::get().to(search_records))
            .route("/{id}", web::get().to(get_record)),
    );
}
