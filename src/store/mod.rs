//! Data access for the medical-records schema.
//!
//! Handlers only see [`MedicalStore`]; the composition root decides which
//! implementation backs it and hands out a single shared instance.

pub mod memory_store;
pub mod mysql_store;

use thiserror::Error;

use crate::models::disease_models::Disease;
use crate::models::exam_models::Exam;
use crate::models::medicine_models::{Formulation, Medicine};
use crate::models::pagination_models::Window;
use crate::models::patient_models::Patient;
use crate::models::record_models::{FullRecord, Record};
use crate::models::symptom_models::Symptom;
use crate::models::vital_sign_models::VitalSign;

pub use memory_store::MemoryStore;
pub use mysql_store::MysqlStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database connection error: {0}")]
    Pool(String),
    #[error("{0}")]
    Query(String),
    /// The database refused the write, e.g. an unknown foreign key.
    #[error("{0}")]
    Constraint(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// One method per query shape.
///
/// `search` is matched as a case-insensitive `%term%` pattern; `None` and
/// `Some("")` both match every row. Listing methods return rows in a stable
/// order: patients by last name, diseases and symptoms by description,
/// medicines by name, records newest first.
pub trait MedicalStore: Send + Sync {
    fn count_patients(&self, search: Option<&str>) -> StoreResult<i64>;
    fn list_patients(&self, search: Option<&str>, window: Window) -> StoreResult<Vec<Patient>>;
    fn get_patient(&self, id: i64) -> StoreResult<Option<Patient>>;
    fn insert_patient(&self, patient: &Patient) -> StoreResult<i64>;

    fn count_diseases(&self, search: Option<&str>) -> StoreResult<i64>;
    fn list_diseases(&self, search: Option<&str>, window: Window) -> StoreResult<Vec<Disease>>;
    fn insert_disease(&self, disease: &Disease) -> StoreResult<i64>;

    fn count_symptoms(&self, search: Option<&str>) -> StoreResult<i64>;
    fn list_symptoms(&self, search: Option<&str>, window: Window) -> StoreResult<Vec<Symptom>>;
    fn insert_symptom(&self, symptom: &Symptom) -> StoreResult<i64>;

    fn count_medicines(&self, search: Option<&str>) -> StoreResult<i64>;
    fn list_medicines(&self, search: Option<&str>, window: Window) -> StoreResult<Vec<Medicine>>;
    fn insert_medicine(&self, medicine: &Medicine) -> StoreResult<i64>;

    /// `search` matches the patient's name or last name.
    fn count_records(&self, search: Option<&str>) -> StoreResult<i64>;
    fn list_records(&self, search: Option<&str>, window: Window) -> StoreResult<Vec<Record>>;
    fn full_record(&self, id: i64) -> StoreResult<Option<FullRecord>>;
    fn insert_record(&self, record: &Record) -> StoreResult<i64>;

    fn list_exams(&self) -> StoreResult<Vec<Exam>>;
    fn list_formulations(&self) -> StoreResult<Vec<Formulation>>;
    fn list_vital_signs(&self) -> StoreResult<Vec<VitalSign>>;
}

/// `LIKE` pattern for a search term.
pub(crate) fn like_pattern(term: &str) -> String {
    format!("%{}%", term)
}
