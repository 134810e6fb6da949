use actix_web::web;

use crate::handlers::medicine_handlers::{create_medicine, list_medicines, search_medicines};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/medicines")
            .route("", web::get().to(list_medicines))
            .route("", web::post().to(create_medicine))
            .route("/search", web::get().to(search_medicines)),
    );
}
