pub mod disease_models;
pub mod exam_models;
pub mod medicine_models;
pub mod pagination_models;
pub mod patient_models;
pub mod record_models;
pub mod symptom_models;
pub mod vital_sign_models;
