pub mod catalog_routes;
pub mod disease_routes;
pub mod medicine_routes;
pub mod patient_routes;
pub mod record_routes;
pub mod symptom_routes;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    catalog_routes::configure(cfg);
    disease_routes::configure(cfg);
    medicine_routes::configure(cfg);
    patient_routes::configure(cfg);
    record_routes::configure(cfg);
    symptom_routes::configure(cfg);
}
