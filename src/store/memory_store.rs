use std::cmp::Ordering;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;

use crate::models::disease_models::Disease;
use crate::models::exam_models::Exam;
use crate::models::medicine_models::{Formulation, Medicine, Shape};
use crate::models::pagination_models::Window;
use crate::models::patient_models::Patient;
use crate::models::record_models::{DiseaseHistory, FullRecord, Record, RecordVitalSign, Treatment};
use crate::models::symptom_models::Symptom;
use crate::models::vital_sign_models::{Unit, VitalSign};
use crate::store::{MedicalStore, StoreError, StoreResult};

struct FormulationRow {
    id: i64,
    shape_id: i64,
    unit_id: i64,
}

struct MedicineRow {
    id: i64,
    formulation_id: i64,
    name: String,
    dose: i64,
}

struct VitalSignRow {
    id: i64,
    unit_id: i64,
    description: String,
}

struct RecordRow {
    id: i64,
    patient_id: i64,
    rdate: NaiveDate,
    age: i64,
    weight: i64,
    height: i64,
    duration: i64,
}

struct HistoryRow {
    id: i64,
    record_id: i64,
    disease_id: i64,
    description: String,
}

struct RecordVitalSignRow {
    id: i64,
    record_id: i64,
    vital_sign_id: i64,
    value: f64,
}

struct TreatmentRow {
    id: i64,
    record_id: i64,
    medicine_id: i64,
    quantity: i64,
    dosage: f64,
    frequency: i64,
    instructions: String,
}

#[derive(Default)]
struct Tables {
    next_id: i64,
    patients: Vec<Patient>,
    diseases: Vec<Disease>,
    symptoms: Vec<Symptom>,
    exams: Vec<Exam>,
    units: Vec<Unit>,
    shapes: Vec<Shape>,
    formulations: Vec<FormulationRow>,
    medicines: Vec<MedicineRow>,
    vital_signs: Vec<VitalSignRow>,
    records: Vec<RecordRow>,
    histories: Vec<HistoryRow>,
    record_symptoms: Vec<(i64, i64)>,
    record_diseases: Vec<(i64, i64)>,
    record_exams: Vec<(i64, i64)>,
    record_vital_signs: Vec<RecordVitalSignRow>,
    treatments: Vec<TreatmentRow>,
}

impl Tables {
    /// Ids are shared across tables so a stray id never resolves by accident.
    fn assign_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn patient(&self, id: i64) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    fn unit(&self, id: i64) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    fn shape(&self, id: i64) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    fn formulation(&self, id: i64) -> Option<Formulation> {
        let row = self.formulations.iter().find(|f| f.id == id)?;
        Some(Formulation {
            id: row.id,
            shape: self.shape(row.shape_id)?.clone(),
            unit: self.unit(row.unit_id)?.clone(),
        })
    }

    fn medicine(&self, row: &MedicineRow) -> Option<Medicine> {
        Some(Medicine {
            id: row.id,
            formulation: self.formulation(row.formulation_id)?,
            name: row.name.clone(),
            dose: row.dose,
        })
    }

    fn record(&self, row: &RecordRow) -> Option<Record> {
        Some(Record {
            id: row.id,
            patient: self.patient(row.patient_id)?.clone(),
            rdate: row.rdate,
            age: row.age,
            weight: row.weight,
            height: row.height,
            duration: row.duration,
        })
    }

    fn matching_patients(&self, search: Option<&str>) -> Vec<Patient> {
        let mut rows: Vec<Patient> = self
            .patients
            .iter()
            .filter(|p| contains_term(search, &p.name) || contains_term(search, &p.last_name))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.last_name.to_lowercase().cmp(&b.last_name.to_lowercase()).then(a.id.cmp(&b.id)));
        rows
    }

    fn matching_medicines(&self, search: Option<&str>) -> Vec<Medicine> {
        let mut rows: Vec<Medicine> = self
            .medicines
            .iter()
            .filter(|m| contains_term(search, &m.name))
            .filter_map(|m| self.medicine(m))
            .collect();
        rows.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()).then(a.id.cmp(&b.id)));
        rows
    }

    fn matching_records(&self, search: Option<&str>) -> Vec<Record> {
        let mut rows: Vec<Record> = self
            .records
            .iter()
            .filter_map(|r| self.record(r))
            .filter(|r| contains_term(search, &r.patient.name) || contains_term(search, &r.patient.last_name))
            .collect();
        rows.sort_by(|a, b| b.rdate.cmp(&a.rdate).then(b.id.cmp(&a.id)));
        rows
    }
}

/// Case-insensitive substring match, the in-memory take on `LIKE '%term%'`.
fn contains_term(search: Option<&str>, value: &str) -> bool {
    match search {
        Some(term) => value.to_lowercase().contains(&term.to_lowercase()),
        None => true,
    }
}

fn by_description(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn window<T>(rows: Vec<T>, window: Window) -> Vec<T> {
    rows.into_iter()
        .skip(window.offset.max(0) as usize)
        .take(window.limit.max(0) as usize)
        .collect()
}

fn count(n: usize) -> i64 {
    n as i64
}

/// [`MedicalStore`] held entirely in memory.
///
/// Backs the test-suite and `--in-memory` runs. Joins behave like the SQL
/// inner joins: rows whose references do not resolve are left out, and
/// inserts referencing unknown rows are refused as constraint violations.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| StoreError::Pool("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| StoreError::Pool("memory store lock poisoned".to_string()))
    }

    pub fn add_exam(&self, description: &str) -> StoreResult<i64> {
        let mut t = self.write()?;
        let id = t.assign_id();
        t.exams.push(Exam {
            id,
            description: description.to_string(),
        });
        Ok(id)
    }

    pub fn add_unit(&self, symbol: &str, description: &str) -> StoreResult<i64> {
        let mut t = self.write()?;
        let id = t.assign_id();
        t.units.push(Unit {
            id,
            symbol: symbol.to_string(),
            description: description.to_string(),
        });
        Ok(id)
    }

    pub fn add_shape(&self, description: &str) -> StoreResult<i64> {
        let mut t = self.write()?;
        let id = t.assign_id();
        t.shapes.push(Shape {
            id,
            description: description.to_string(),
        });
        Ok(id)
    }

    pub fn add_formulation(&self, shape_id: i64, unit_id: i64) -> StoreResult<i64> {
        let mut t = self.write()?;
        if t.shape(shape_id).is_none() || t.unit(unit_id).is_none() {
            return Err(StoreError::Constraint(format!(
                "unknown shape {} or unit {}",
                shape_id, unit_id
            )));
        }
        let id = t.assign_id();
        t.formulations.push(FormulationRow { id, shape_id, unit_id });
        Ok(id)
    }

    pub fn add_vital_sign(&self, unit_id: i64, description: &str) -> StoreResult<i64> {
        let mut t = self.write()?;
        if t.unit(unit_id).is_none() {
            return Err(StoreError::Constraint(format!("unknown unit {}", unit_id)));
        }
        let id = t.assign_id();
        t.vital_signs.push(VitalSignRow {
            id,
            unit_id,
            description: description.to_string(),
        });
        Ok(id)
    }

    pub fn add_disease_history(
        &self,
        record_id: i64,
        disease_id: i64,
        description: &str,
    ) -> StoreResult<i64> {
        let mut t = self.write()?;
        let id = t.assign_id();
        t.histories.push(HistoryRow {
            id,
            record_id,
            disease_id,
            description: description.to_string(),
        });
        Ok(id)
    }

    pub fn link_symptom(&self, record_id: i64, symptom_id: i64) -> StoreResult<()> {
        self.write()?.record_symptoms.push((record_id, symptom_id));
        Ok(())
    }

    pub fn diagnose(&self, record_id: i64, disease_id: i64) -> StoreResult<()> {
        self.write()?.record_diseases.push((record_id, disease_id));
        Ok(())
    }

    pub fn link_exam(&self, record_id: i64, exam_id: i64) -> StoreResult<()> {
        self.write()?.record_exams.push((record_id, exam_id));
        Ok(())
    }

    pub fn add_record_vital_sign(
        &self,
        record_id: i64,
        vital_sign_id: i64,
        value: f64,
    ) -> StoreResult<i64> {
        let mut t = self.write()?;
        let id = t.assign_id();
        t.record_vital_signs.push(RecordVitalSignRow {
            id,
            record_id,
            vital_sign_id,
            value,
        });
        Ok(id)
    }

    pub fn add_treatment(
        &self,
        record_id: i64,
        medicine_id: i64,
        quantity: i64,
        dosage: f64,
        frequency: i64,
        instructions: &str,
    ) -> StoreResult<i64> {
        let mut t = self.write()?;
        let id = t.assign_id();
        t.treatments.push(TreatmentRow {
            id,
            record_id,
            medicine_id,
            quantity,
            dosage,
            frequency,
            instructions: instructions.to_string(),
        });
        Ok(id)
    }

    /// A store holding the reference catalogs the API cannot create:
    /// units, shapes, formulations, vital signs and exams.
    pub fn with_catalog() -> StoreResult<Self> {
        let store = Self::new();
        let mg = store.add_unit("mg", "milligram")?;
        let ml = store.add_unit("ml", "millilitre")?;
        let bpm = store.add_unit("bpm", "beats per minute")?;
        let mmhg = store.add_unit("mmHg", "millimetres of mercury")?;
        let celsius = store.add_unit("°C", "degree Celsius")?;
        let kg = store.add_unit("kg", "kilogram")?;

        let tablet = store.add_shape("Tablet")?;
        let capsule = store.add_shape("Capsule")?;
        let syrup = store.add_shape("Syrup")?;
        let injection = store.add_shape("Injection")?;
        store.add_formulation(tablet, mg)?;
        store.add_formulation(capsule, mg)?;
        store.add_formulation(syrup, ml)?;
        store.add_formulation(injection, ml)?;

        store.add_vital_sign(bpm, "Heart rate")?;
        store.add_vital_sign(mmhg, "Blood pressure")?;
        store.add_vital_sign(celsius, "Temperature")?;
        store.add_vital_sign(kg, "Weight")?;

        for exam in ["Complete blood count", "Urinalysis", "Chest X-ray", "Electrocardiogram"] {
            store.add_exam(exam)?;
        }
        Ok(store)
    }
}

impl MedicalStore for MemoryStore {
    fn count_patients(&self, search: Option<&str>) -> StoreResult<i64> {
        Ok(count(self.read()?.matching_patients(search).len()))
    }

    fn list_patients(&self, search: Option<&str>, w: Window) -> StoreResult<Vec<Patient>> {
        Ok(window(self.read()?.matching_patients(search), w))
    }

    fn get_patient(&self, id: i64) -> StoreResult<Option<Patient>> {
        Ok(self.read()?.patient(id).cloned())
    }

    fn insert_patient(&self, patient: &Patient) -> StoreResult<i64> {
        let mut t = self.write()?;
        let id = t.assign_id();
        t.patients.push(Patient {
            id,
            ..patient.clone()
        });
        Ok(id)
    }

    fn count_diseases(&self, search: Option<&str>) -> StoreResult<i64> {
        let t = self.read()?;
        Ok(count(t.diseases.iter().filter(|d| contains_term(search, &d.description)).count()))
    }

    fn list_diseases(&self, search: Option<&str>, w: Window) -> StoreResult<Vec<Disease>> {
        let t = self.read()?;
        let mut rows: Vec<Disease> = t
            .diseases
            .iter()
            .filter(|d| contains_term(search, &d.description))
            .cloned()
            .collect();
        rows.sort_by(|a, b| by_description(&a.description, &b.description).then(a.id.cmp(&b.id)));
        Ok(window(rows, w))
    }

    fn insert_disease(&self, disease: &Disease) -> StoreResult<i64> {
        let mut t = self.write()?;
        let id = t.assign_id();
        t.diseases.push(Disease {
            id,
            description: disease.description.clone(),
        });
        Ok(id)
    }

    fn count_symptoms(&self, search: Option<&str>) -> StoreResult<i64> {
        let t = self.read()?;
        Ok(count(t.symptoms.iter().filter(|s| contains_term(search, &s.description)).count()))
    }

    fn list_symptoms(&self, search: Option<&str>, w: Window) -> StoreResult<Vec<Symptom>> {
        let t = self.read()?;
        let mut rows: Vec<Symptom> = t
            .symptoms
            .iter()
            .filter(|s| contains_term(search, &s.description))
            .cloned()
            .collect();
        rows.sort_by(|a, b| by_description(&a.description, &b.description).then(a.id.cmp(&b.id)));
        Ok(window(rows, w))
    }

    fn insert_symptom(&self, symptom: &Symptom) -> StoreResult<i64> {
        let mut t = self.write()?;
        let id = t.assign_id();
        t.symptoms.push(Symptom {
            id,
            description: symptom.description.clone(),
        });
        Ok(id)
    }

    fn count_medicines(&self, search: Option<&str>) -> StoreResult<i64> {
        let t = self.read()?;
        Ok(count(t.medicines.iter().filter(|m| contains_term(search, &m.name)).count()))
    }

    fn list_medicines(&self, search: Option<&str>, w: Window) -> StoreResult<Vec<Medicine>> {
        Ok(window(self.read()?.matching_medicines(search), w))
    }

    fn insert_medicine(&self, medicine: &Medicine) -> StoreResult<i64> {
        let mut t = self.write()?;
        let formulation_id = medicine.formulation.id;
        if !t.formulations.iter().any(|f| f.id == formulation_id) {
            return Err(StoreError::Constraint(format!(
                "unknown formulation {}",
                formulation_id
            )));
        }
        let id = t.assign_id();
        t.medicines.push(MedicineRow {
            id,
            formulation_id,
            name: medicine.name.clone(),
            dose: medicine.dose,
        });
        Ok(id)
    }

    fn count_records(&self, search: Option<&str>) -> StoreResult<i64> {
        Ok(count(self.read()?.matching_records(search).len()))
    }

    fn list_records(&self, search: Option<&str>, w: Window) -> StoreResult<Vec<Record>> {
        Ok(window(self.read()?.matching_records(search), w))
    }

    fn full_record(&self, id: i64) -> StoreResult<Option<FullRecord>> {
        let t = self.read()?;
        let record = match t.records.iter().find(|r| r.id == id).and_then(|r| t.record(r)) {
            Some(r) => r,
            None => return Ok(None),
        };

        let diseases_history = t
            .histories
            .iter()
            .filter(|h| h.record_id == id)
            .filter_map(|h| {
                let disease = t.diseases.iter().find(|d| d.id == h.disease_id)?;
                Some(DiseaseHistory {
                    id: h.id,
                    record_id: h.record_id,
                    disease_id: disease.id,
                    disease_desc: disease.description.clone(),
                    description: h.description.clone(),
                })
            })
            .collect();

        let mut symptoms: Vec<Symptom> = t
            .symptoms
            .iter()
            .filter(|s| t.record_symptoms.contains(&(id, s.id)))
            .cloned()
            .collect();
        symptoms.sort_by(|a, b| by_description(&a.description, &b.description));

        let mut diseases: Vec<Disease> = t
            .diseases
            .iter()
            .filter(|d| t.record_diseases.contains(&(id, d.id)))
            .cloned()
            .collect();
        diseases.sort_by(|a, b| by_description(&a.description, &b.description));

        let mut exams: Vec<Exam> = t
            .exams
            .iter()
            .filter(|e| t.record_exams.contains(&(id, e.id)))
            .cloned()
            .collect();
        exams.sort_by(|a, b| by_description(&a.description, &b.description));

        let vital_signs = t
            .record_vital_signs
            .iter()
            .filter(|v| v.record_id == id)
            .filter_map(|v| {
                let sign = t.vital_signs.iter().find(|s| s.id == v.vital_sign_id)?;
                let unit = t.unit(sign.unit_id)?;
                Some(RecordVitalSign {
                    id: v.id,
                    record_id: v.record_id,
                    vital_sign_id: sign.id,
                    vital_sign_desc: sign.description.clone(),
                    unit_id: unit.id,
                    unit_symbol: unit.symbol.clone(),
                    value: v.value,
                })
            })
            .collect();

        let treatments = t
            .treatments
            .iter()
            .filter(|tr| tr.record_id == id)
            .filter_map(|tr| {
                let row = t.medicines.iter().find(|m| m.id == tr.medicine_id)?;
                let medicine = t.medicine(row)?;
                let f = medicine.formulation;
                Some(Treatment {
                    id: tr.id,
                    record_id: tr.record_id,
                    medicine_id: medicine.id,
                    medicine_name: medicine.name,
                    medicine_dose: medicine.dose,
                    formulation_id: f.id,
                    shape_id: f.shape.id,
                    shape_description: f.shape.description,
                    unit_id: f.unit.id,
                    unit_symbol: f.unit.symbol,
                    quantity: tr.quantity,
                    dosage: tr.dosage,
                    frequency: tr.frequency,
                    instructions: tr.instructions.clone(),
                })
            })
            .collect();

        Ok(Some(FullRecord {
            record,
            diseases_history,
            symptoms,
            vital_signs,
            diseases,
            exams,
            treatments,
        }))
    }

    fn insert_record(&self, record: &Record) -> StoreResult<i64> {
        let mut t = self.write()?;
        let patient_id = record.patient.id;
        if t.patient(patient_id).is_none() {
            return Err(StoreError::Constraint(format!("unknown patient {}", patient_id)));
        }
        let id = t.assign_id();
        t.records.push(RecordRow {
            id,
            patient_id,
            rdate: record.rdate,
            age: record.age,
            weight: record.weight,
            height: record.height,
            duration: record.duration,
        });
        Ok(id)
    }

    fn list_exams(&self) -> StoreResult<Vec<Exam>> {
        let mut rows = self.read()?.exams.clone();
        rows.sort_by_key(|e| e.id);
        Ok(rows)
    }

    fn list_formulations(&self) -> StoreResult<Vec<Formulation>> {
        let t = self.read()?;
        let mut rows: Vec<Formulation> = t.formulations.iter().filter_map(|f| t.formulation(f.id)).collect();
        rows.sort_by(|a, b| by_description(&a.shape.description, &b.shape.description).then(a.id.cmp(&b.id)));
        Ok(rows)
    }

    fn list_vital_signs(&self) -> StoreResult<Vec<VitalSign>> {
        let t = self.read()?;
        let mut rows: Vec<VitalSign> = t
            .vital_signs
            .iter()
            .filter_map(|v| {
                Some(VitalSign {
                    id: v.id,
                    unit: t.unit(v.unit_id)?.clone(),
                    description: v.description.clone(),
                })
            })
            .collect();
        rows.sort_by(|a, b| by_description(&a.description, &b.description));
        Ok(rows)
    }
}
