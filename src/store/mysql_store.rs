use diesel::mysql::Mysql;
use diesel::prelude::*;
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::{BigInt, Text, Unsigned};
use tracing::{debug, error};

use crate::db::{get_conn, DbPool};
use crate::models::disease_models::{Disease, NewDisease};
use crate::models::exam_models::Exam;
use crate::models::medicine_models::{Formulation, FormulationRow, Medicine, MedicineRow, NewMedicine};
use crate::models::pagination_models::Window;
use crate::models::patient_models::{NewPatient, Patient};
use crate::models::record_models::{
    DiseaseHistory, FullRecord, NewRecord, Record, RecordRow, RecordVitalSign, Treatment,
};
use crate::models::symptom_models::{NewSymptom, Symptom};
use crate::models::vital_sign_models::{VitalSign, VitalSignRow};
use crate::schema;
use crate::store::{like_pattern, MedicalStore, StoreError, StoreResult};

const RECORD_COLUMNS: &str = r#"
    SELECT
        r.id,
        p.id AS patient_id,
        p.name AS patient_name,
        p.last_name AS patient_last_name,
        p.gender AS patient_gender,
        r.rdate,
        r.age,
        r.weight,
        r.height,
        r.duration
    FROM record AS r
    INNER JOIN patient AS p ON r.patient_id = p.id
"#;

const MEDICINE_COLUMNS: &str = r#"
    SELECT
        m.id,
        f.id AS formulation_id,
        s.id AS shape_id,
        s.description AS shape_description,
        u.id AS unit_id,
        u.symbol AS unit_symbol,
        u.description AS unit_description,
        m.name,
        m.dose
    FROM medicine AS m
    INNER JOIN formulation AS f ON m.formulation_id = f.id
    INNER JOIN shape AS s ON f.shape_id = s.id
    INNER JOIN unit AS u ON f.unit_id = u.id
"#;

// Every paged sort ends on a unique column so LIMIT/OFFSET windows never overlap.
const PATIENT_ORDER: &str = "last_name ASC, id ASC";
const DESCRIPTION_ORDER: &str = "description ASC, id ASC";
const MEDICINE_ORDER: &str = "m.name ASC, m.id ASC";
const RECORD_ORDER: &str = "r.rdate DESC, r.id DESC";

/// A bound query parameter.
enum Arg {
    Text(String),
    BigInt(i64),
}

#[derive(QueryableByName)]
struct Count {
    #[diesel(sql_type = BigInt)]
    total: i64,
}

#[derive(QueryableByName)]
struct LastInsertId {
    #[diesel(sql_type = Unsigned<BigInt>)]
    id: u64,
}

/// Run `sql` with `args` bound in order and map every row into `T`.
fn query_rows<T>(conn: &mut MysqlConnection, sql: &str, args: Vec<Arg>) -> QueryResult<Vec<T>>
where
    T: QueryableByName<Mysql> + 'static,
{
    debug!(sql = sql.trim(), binds = args.len(), "query");
    let mut query: BoxedSqlQuery<'static, Mysql, SqlQuery> =
        diesel::sql_query(sql.to_owned()).into_boxed();
    for arg in args {
        query = match arg {
            Arg::Text(v) => query.bind::<Text, _>(v),
            Arg::BigInt(v) => query.bind::<BigInt, _>(v),
        };
    }
    query.load::<T>(conn)
}

fn count_rows(conn: &mut MysqlConnection, sql: &str, args: Vec<Arg>) -> QueryResult<i64> {
    Ok(query_rows::<Count>(conn, sql, args)?
        .first()
        .map(|c| c.total)
        .unwrap_or(0))
}

fn last_insert_id(conn: &mut MysqlConnection) -> QueryResult<i64> {
    let row = diesel::sql_query("SELECT LAST_INSERT_ID() AS id").get_result::<LastInsertId>(conn)?;
    Ok(row.id as i64)
}

/// `WHERE` clause matching `search` against any of `columns`.
fn search_clause(search: Option<&str>, columns: &[&str]) -> (String, Vec<Arg>) {
    match search {
        Some(term) => {
            let pattern = like_pattern(term);
            let clause = columns
                .iter()
                .map(|c| format!("{} LIKE ?", c))
                .collect::<Vec<_>>()
                .join(" OR ");
            let args = columns.iter().map(|_| Arg::Text(pattern.clone())).collect();
            (format!("WHERE {}", clause), args)
        }
        None => (String::new(), Vec::new()),
    }
}

/// `select` narrowed by `filter`, sorted by `order_by`, cut to one window.
fn windowed_sql(select: &str, filter: &str, order_by: &str) -> String {
    format!(
        "{} {} ORDER BY {} LIMIT ? OFFSET ?",
        select.trim_end(),
        filter,
        order_by
    )
}

fn with_window(mut args: Vec<Arg>, window: Window) -> Vec<Arg> {
    args.push(Arg::BigInt(window.limit));
    args.push(Arg::BigInt(window.offset));
    args
}

impl From<DieselError> for StoreError {
    fn from(e: DieselError) -> Self {
        match e {
            DieselError::DatabaseError(
                DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::CheckViolation,
                info,
            ) => StoreError::Constraint(info.message().to_string()),
            other => StoreError::Query(other.to_string()),
        }
    }
}

/// [`MedicalStore`] backed by MySQL through a diesel r2d2 pool.
pub struct MysqlStore {
    pool: DbPool,
}

impl MysqlStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn with_conn<T>(
        &self,
        what: &str,
        f: impl FnOnce(&mut MysqlConnection) -> QueryResult<T>,
    ) -> StoreResult<T> {
        let mut conn = get_conn(&self.pool)?;
        f(&mut *conn).map_err(|e| {
            error!(operation = what, "query failed: {}", e);
            StoreError::from(e)
        })
    }
}

impl MedicalStore for MysqlStore {
    fn count_patients(&self, search: Option<&str>) -> StoreResult<i64> {
        let (filter, args) = search_clause(search, &["name", "last_name"]);
        let sql = format!("SELECT COUNT(id) AS total FROM patient {}", filter);
        self.with_conn("count_patients", |conn| count_rows(conn, &sql, args))
    }

    fn list_patients(&self, search: Option<&str>, window: Window) -> StoreResult<Vec<Patient>> {
        let (filter, args) = search_clause(search, &["name", "last_name"]);
        let sql = windowed_sql(
            "SELECT id, name, last_name, gender FROM patient",
            &filter,
            PATIENT_ORDER,
        );
        self.with_conn("list_patients", |conn| {
            query_rows(conn, &sql, with_window(args, window))
        })
    }

    fn get_patient(&self, id: i64) -> StoreResult<Option<Patient>> {
        self.with_conn("get_patient", |conn| {
            let mut rows: Vec<Patient> = query_rows(
                conn,
                "SELECT id, name, last_name, gender FROM patient WHERE id = ?",
                vec![Arg::BigInt(id)],
            )?;
            Ok(rows.pop())
        })
    }

    fn insert_patient(&self, patient: &Patient) -> StoreResult<i64> {
        self.with_conn("insert_patient", |conn| {
            diesel::insert_into(schema::patient::table)
                .values(NewPatient::from(patient))
                .execute(conn)?;
            last_insert_id(conn)
        })
    }

    fn count_diseases(&self, search: Option<&str>) -> StoreResult<i64> {
        let (filter, args) = search_clause(search, &["description"]);
        let sql = format!("SELECT COUNT(id) AS total FROM disease {}", filter);
        self.with_conn("count_diseases", |conn| count_rows(conn, &sql, args))
    }

    fn list_diseases(&self, search: Option<&str>, window: Window) -> StoreResult<Vec<Disease>> {
        let (filter, args) = search_clause(search, &["description"]);
        let sql = windowed_sql("SELECT id, description FROM disease", &filter, DESCRIPTION_ORDER);
        self.with_conn("list_diseases", |conn| {
            query_rows(conn, &sql, with_window(args, window))
        })
    }

    fn insert_disease(&self, disease: &Disease) -> StoreResult<i64> {
        self.with_conn("insert_disease", |conn| {
            diesel::insert_into(schema::disease::table)
                .values(NewDisease {
                    description: &disease.description,
                })
                .execute(conn)?;
            last_insert_id(conn)
        })
    }

    fn count_symptoms(&self, search: Option<&str>) -> StoreResult<i64> {
        let (filter, args) = search_clause(search, &["description"]);
        let sql = format!("SELECT COUNT(id) AS total FROM symptom {}", filter);
        self.with_conn("count_symptoms", |conn| count_rows(conn, &sql, args))
    }

    fn list_symptoms(&self, search: Option<&str>, window: Window) -> StoreResult<Vec<Symptom>> {
        let (filter, args) = search_clause(search, &["description"]);
        let sql = windowed_sql("SELECT id, description FROM symptom", &filter, DESCRIPTION_ORDER);
        self.with_conn("list_symptoms", |conn| {
            query_rows(conn, &sql, with_window(args, window))
        })
    }

    fn insert_symptom(&self, symptom: &Symptom) -> StoreResult<i64> {
        self.with_conn("insert_symptom", |conn| {
            diesel::insert_into(schema::symptom::table)
                .values(NewSymptom {
                    description: &symptom.description,
                })
                .execute(conn)?;
            last_insert_id(conn)
        })
    }

    fn count_medicines(&self, search: Option<&str>) -> StoreResult<i64> {
        let (filter, args) = search_clause(search, &["m.name"]);
        let sql = format!("SELECT COUNT(m.id) AS total FROM medicine AS m {}", filter);
        self.with_conn("count_medicines", |conn| count_rows(conn, &sql, args))
    }

    fn list_medicines(&self, search: Option<&str>, window: Window) -> StoreResult<Vec<Medicine>> {
        let (filter, args) = search_clause(search, &["m.name"]);
        let sql = windowed_sql(MEDICINE_COLUMNS, &filter, MEDICINE_ORDER);
        self.with_conn("list_medicines", |conn| {
            let rows: Vec<MedicineRow> = query_rows(conn, &sql, with_window(args, window))?;
            Ok(rows.into_iter().map(Medicine::from).collect())
        })
    }

    fn insert_medicine(&self, medicine: &Medicine) -> StoreResult<i64> {
        self.with_conn("insert_medicine", |conn| {
            diesel::insert_into(schema::medicine::table)
                .values(NewMedicine::from(medicine))
                .execute(conn)?;
            last_insert_id(conn)
        })
    }

    fn count_records(&self, search: Option<&str>) -> StoreResult<i64> {
        let (filter, args) = search_clause(search, &["p.name", "p.last_name"]);
        let sql = format!(
            "SELECT COUNT(r.id) AS total FROM record AS r INNER JOIN patient AS p ON r.patient_id = p.id {}",
            filter
        );
        self.with_conn("count_records", |conn| count_rows(conn, &sql, args))
    }

    fn list_records(&self, search: Option<&str>, window: Window) -> StoreResult<Vec<Record>> {
        let (filter, args) = search_clause(search, &["p.name", "p.last_name"]);
        let sql = windowed_sql(RECORD_COLUMNS, &filter, RECORD_ORDER);
        self.with_conn("list_records", |conn| {
            let rows: Vec<RecordRow> = query_rows(conn, &sql, with_window(args, window))?;
            Ok(rows.into_iter().map(Record::from).collect())
        })
    }

    fn full_record(&self, id: i64) -> StoreResult<Option<FullRecord>> {
        let sql = format!("{} WHERE r.id = ?", RECORD_COLUMNS);
        self.with_conn("full_record", |conn| {
            let mut rows: Vec<RecordRow> = query_rows(conn, &sql, vec![Arg::BigInt(id)])?;
            let record = match rows.pop() {
                Some(row) => Record::from(row),
                None => return Ok(None),
            };

            let diseases_history: Vec<DiseaseHistory> = query_rows(
                conn,
                r#"SELECT dh.id, dh.record_id, d.id AS disease_id, d.description AS disease_desc, dh.description
                FROM disease_history AS dh
                INNER JOIN disease AS d ON dh.disease_id = d.id
                WHERE dh.record_id = ?
                ORDER BY dh.id ASC"#,
                vec![Arg::BigInt(id)],
            )?;

            let symptoms: Vec<Symptom> = query_rows(
                conn,
                r#"SELECT id, description FROM symptom
                WHERE id IN (SELECT symptom_id FROM record_symptom WHERE record_id = ?)
                ORDER BY description ASC"#,
                vec![Arg::BigInt(id)],
            )?;

            let diseases: Vec<Disease> = query_rows(
                conn,
                r#"SELECT id, description FROM disease
                WHERE id IN (SELECT disease_id FROM idx WHERE record_id = ?)
                ORDER BY description ASC"#,
                vec![Arg::BigInt(id)],
            )?;

            let exams: Vec<Exam> = query_rows(
                conn,
                r#"SELECT id, description FROM exam
                WHERE id IN (SELECT exam_id FROM record_exam WHERE record_id = ?)
                ORDER BY description ASC"#,
                vec![Arg::BigInt(id)],
            )?;

            let vital_signs: Vec<RecordVitalSign> = query_rows(
                conn,
                r#"SELECT rvs.id, rvs.record_id, vs.id AS vital_sign_id, vs.description AS vital_sign_desc,
                    u.id AS unit_id, u.symbol AS unit_symbol, rvs.value
                FROM record_vital_sign AS rvs
                INNER JOIN vital_sign AS vs ON rvs.vital_sign_id = vs.id
                INNER JOIN unit AS u ON vs.unit_id = u.id
                WHERE rvs.record_id = ?
                ORDER BY rvs.id ASC"#,
                vec![Arg::BigInt(id)],
            )?;

            let treatments: Vec<Treatment> = query_rows(
                conn,
                r#"SELECT t.id, t.record_id, m.id AS medicine_id, m.name AS medicine_name,
                    m.dose AS medicine_dose, f.id AS formulation_id, s.id AS shape_id,
                    s.description AS shape_description, u.id AS unit_id, u.symbol AS unit_symbol,
                    t.quantity, t.dosage, t.frequency, t.instructions
                FROM treatment AS t
                INNER JOIN medicine AS m ON t.medicine_id = m.id
                INNER JOIN formulation AS f ON m.formulation_id = f.id
                INNER JOIN shape AS s ON f.shape_id = s.id
                INNER JOIN unit AS u ON f.unit_id = u.id
                WHERE t.record_id = ?
                ORDER BY t.id ASC"#,
                vec![Arg::BigInt(id)],
            )?;

            Ok(Some(FullRecord {
                record,
                diseases_history,
                symptoms,
                vital_signs,
                diseases,
                exams,
                treatments,
            }))
        })
    }

    fn insert_record(&self, record: &Record) -> StoreResult<i64> {
        self.with_conn("insert_record", |conn| {
            diesel::insert_into(schema::record::table)
                .values(NewRecord::from(record))
                .execute(conn)?;
            last_insert_id(conn)
        })
    }

    fn list_exams(&self) -> StoreResult<Vec<Exam>> {
        self.with_conn("list_exams", |conn| {
            query_rows(conn, "SELECT id, description FROM exam ORDER BY id ASC", Vec::new())
        })
    }

    fn list_formulations(&self) -> StoreResult<Vec<Formulation>> {
        self.with_conn("list_formulations", |conn| {
            let rows: Vec<FormulationRow> = query_rows(
                conn,
                r#"SELECT f.id, s.id AS shape_id, s.description AS shape_description,
                    u.id AS unit_id, u.symbol AS unit_symbol, u.description AS unit_description
                FROM formulation AS f
                INNER JOIN shape AS s ON f.shape_id = s.id
                INNER JOIN unit AS u ON f.unit_id = u.id
                ORDER BY s.description ASC, f.id ASC"#,
                Vec::new(),
            )?;
            Ok(rows.into_iter().map(Formulation::from).collect())
        })
    }

    fn list_vital_signs(&self) -> StoreResult<Vec<VitalSign>> {
        self.with_conn("list_vital_signs", |conn| {
            let rows: Vec<VitalSignRow> = query_rows(
                conn,
                r#"SELECT vs.id, u.id AS unit_id, u.symbol AS unit_symbol,
                    u.description AS unit_description, vs.description
                FROM vital_sign AS vs
                INNER JOIN unit AS u ON vs.unit_id = u.id
                ORDER BY vs.description ASC"#,
                Vec::new(),
            )?;
            Ok(rows.into_iter().map(VitalSign::from).collect())
        })
    }
}
