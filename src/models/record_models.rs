use chrono::NaiveDate;
use diesel::prelude::{Insertable, QueryableByName};
use diesel::sql_types::{BigInt, Bool, Date, Double, Text};
use serde::{Deserialize, Serialize};

use crate::models::disease_models::Disease;
use crate::models::exam_models::Exam;
use crate::models::patient_models::Patient;
use crate::models::symptom_models::Symptom;

/// A consultation. On POST only `patient.id` is read from the patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub patient: Patient,
    pub rdate: NaiveDate,
    #[serde(default)]
    pub age: i64,
    #[serde(default)]
    pub weight: i64,
    #[serde(default)]
    pub height: i64,
    #[serde(default)]
    pub duration: i64,
}

#[derive(QueryableByName)]
pub struct RecordRow {
    #[diesel(sql_type = BigInt)]
    pub id: i64,
    #[diesel(sql_type = BigInt)]
    pub patient_id: i64,
    #[diesel(sql_type = Text)]
    pub patient_name: String,
    #[diesel(sql_type = Text)]
    pub patient_last_name: String,
    #[diesel(sql_type = Bool)]
    pub patient_gender: bool,
    #[diesel(sql_type = Date)]
    pub rdate: NaiveDate,
    #[diesel(sql_type = BigInt)]
    pub age: i64,
    #[diesel(sql_type = BigInt)]
    pub weight: i64,
    #[diesel(sql_type = BigInt)]
    pub height: i64,
    #[diesel(sql_type = BigInt)]
    pub duration: i64,
}

impl From<RecordRow> for Record {
    fn from(r: RecordRow) -> Self {
        Record {
            id: r.id,
            patient: Patient {
                id: r.patient_id,
                name: r.patient_name,
                last_name: r.patient_last_name,
                gender: r.patient_gender,
            },
            rdate: r.rdate,
            age: r.age,
            weight: r.weight,
            height: r.height,
            duration: r.duration,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::record)]
pub struct NewRecord {
    pub patient_id: i64,
    pub rdate: NaiveDate,
    pub age: i64,
    pub weight: i64,
    pub height: i64,
    pub duration: i64,
}

impl From<&Record> for NewRecord {
    fn from(r: &Record) -> Self {
        NewRecord {
            patient_id: r.patient.id,
            rdate: r.rdate,
            age: r.age,
            weight: r.weight,
            height: r.height,
            duration: r.duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, QueryableByName, Serialize, Deserialize)]
pub struct DiseaseHistory {
    #[diesel(sql_type = BigInt)]
    pub id: i64,
    #[diesel(sql_type = BigInt)]
    pub record_id: i64,
    #[diesel(sql_type = BigInt)]
    pub disease_id: i64,
    #[diesel(sql_type = Text)]
    pub disease_desc: String,
    #[diesel(sql_type = Text)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, QueryableByName, Serialize, Deserialize)]
pub struct RecordVitalSign {
    #[diesel(sql_type = BigInt)]
    pub id: i64,
    #[diesel(sql_type = BigInt)]
    pub record_id: i64,
    #[diesel(sql_type = BigInt)]
    pub vital_sign_id: i64,
    #[diesel(sql_type = Text)]
    pub vital_sign_desc: String,
    #[diesel(sql_type = BigInt)]
    pub unit_id: i64,
    #[diesel(sql_type = Text)]
    pub unit_symbol: String,
    #[diesel(sql_type = Double)]
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, QueryableByName, Serialize, Deserialize)]
pub struct Treatment {
    #[diesel(sql_type = BigInt)]
    pub id: i64,
    #[diesel(sql_type = BigInt)]
    pub record_id: i64,
    #[diesel(sql_type = BigInt)]
    pub medicine_id: i64,
    #[diesel(sql_type = Text)]
    pub medicine_name: String,
    #[diesel(sql_type = BigInt)]
    pub medicine_dose: i64,
    #[diesel(sql_type = BigInt)]
    pub formulation_id: i64,
    #[diesel(sql_type = BigInt)]
    pub shape_id: i64,
    #[diesel(sql_type = Text)]
    pub shape_description: String,
    #[diesel(sql_type = BigInt)]
    pub unit_id: i64,
    #[diesel(sql_type = Text)]
    pub unit_symbol: String,
    #[diesel(sql_type = BigInt)]
    pub quantity: i64,
    #[diesel(sql_type = Double)]
    pub dosage: f64,
    #[diesel(sql_type = BigInt)]
    pub frequency: i64,
    #[diesel(sql_type = Text)]
    pub instructions: String,
}

/// A record with everything attached to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullRecord {
    pub record: Record,
    pub diseases_history: Vec<DiseaseHistory>,
    pub symptoms: Vec<Symptom>,
    pub vital_signs: Vec<RecordVitalSign>,
    /// Diagnosed diseases.
    #[serde(rename = "idx")]
    pub diseases: Vec<Disease>,
    pub exams: Vec<Exam>,
    pub treatments: Vec<Treatment>,
}
