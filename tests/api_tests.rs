use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, App};
use chrono::NaiveDate;
use serde_json::{json, Value};

use medical_records_api::models::disease_models::Disease;
use medical_records_api::models::medicine_models::Medicine;
use medical_records_api::models::patient_models::Patient;
use medical_records_api::models::record_models::Record;
use medical_records_api::models::symptom_models::Symptom;
use medical_records_api::store::{MedicalStore, MemoryStore};
use medical_records_api::{configure_app, AppState};

async fn app_with(
    store: Arc<MemoryStore>,
    page_size: i64,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let state = AppState::new(store, page_size);
    test::init_service(App::new().configure(configure_app(state))).await
}

async fn get(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    uri: &str,
) -> (StatusCode, Value) {
    let resp = test::call_service(app, test::TestRequest::get().uri(uri).to_request()).await;
    let status = resp.status();
    (status, test::read_body_json(resp).await)
}

async fn post(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    uri: &str,
    body: Value,
) -> (StatusCode, Value) {
    let req = test::TestRequest::post().uri(uri).set_json(body).to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    (status, test::read_body_json(resp).await)
}

fn patient(name: &str, last_name: &str) -> Patient {
    Patient {
        id: 0,
        name: name.to_string(),
        last_name: last_name.to_string(),
        gender: true,
    }
}

fn record_for(patient_id: i64, date: (i32, u32, u32)) -> Record {
    Record {
        id: 0,
        patient: Patient {
            id: patient_id,
            ..Patient::default()
        },
        rdate: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        age: 41,
        weight: 70,
        height: 172,
        duration: 30,
    }
}

fn seed_diseases(store: &MemoryStore, n: usize) {
    for i in 0..n {
        store
            .insert_disease(&Disease {
                id: 0,
                description: format!("Disease {:02}", i),
            })
            .unwrap();
    }
}

fn page_fields(body: &Value) -> (i64, i64, i64, i64, i64) {
    (
        body["page"].as_i64().unwrap(),
        body["prev_page"].as_i64().unwrap(),
        body["next_page"].as_i64().unwrap(),
        body["last_page"].as_i64().unwrap(),
        body["total"].as_i64().unwrap(),
    )
}

#[actix_web::test]
async fn empty_table_returns_empty_page() {
    let app = app_with(Arc::new(MemoryStore::new()), 10).await;
    let (status, body) = get(&app, "/patients").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(page_fields(&body), (0, -1, -1, -1, 0));
}

#[actix_web::test]
async fn pages_through_diseases() {
    let store = Arc::new(MemoryStore::new());
    seed_diseases(&store, 25);
    let app = app_with(store, 10).await;

    let (_, first) = get(&app, "/diseases").await;
    assert_eq!(page_fields(&first), (0, -1, 1, 2, 25));
    let data = first["data"].as_array().unwrap();
    assert_eq!(data.len(), 10);
    assert_eq!(data[0]["description"], "Disease 00");

    let (_, last) = get(&app, "/diseases?page=2").await;
    assert_eq!(page_fields(&last), (2, 1, -1, 2, 25));
    assert_eq!(last["data"].as_array().unwrap().len(), 5);
    assert_eq!(last["data"][4]["description"], "Disease 24");

    let (_, past_end) = get(&app, "/diseases?page=5").await;
    assert_eq!(past_end, last);

    let (_, negative) = get(&app, "/diseases?page=-3").await;
    assert_eq!(negative, first);

    let (_, garbage) = get(&app, "/diseases?page=abc").await;
    assert_eq!(garbage, first);
}

#[actix_web::test]
async fn page_size_comes_from_state() {
    let store = Arc::new(MemoryStore::new());
    seed_diseases(&store, 7);
    let app = app_with(store, 3).await;

    let (_, body) = get(&app, "/diseases?page=1").await;
    assert_eq!(page_fields(&body), (1, 0, 2, 2, 7));
    assert_eq!(body["data"][0]["description"], "Disease 03");
}

#[actix_web::test]
async fn single_full_page_has_no_neighbours() {
    let store = Arc::new(MemoryStore::new());
    seed_diseases(&store, 10);
    let app = app_with(store, 10).await;

    let (_, body) = get(&app, "/diseases").await;
    assert_eq!(page_fields(&body), (0, -1, -1, 0, 10));
}

#[actix_web::test]
async fn search_patients_matches_either_name() {
    let store = Arc::new(MemoryStore::new());
    store.insert_patient(&patient("Ana", "Zapata")).unwrap();
    store.insert_patient(&patient("Luis", "Mariano")).unwrap();
    store.insert_patient(&patient("Pedro", "Quispe")).unwrap();
    let app = app_with(store, 10).await;

    let (status, body) = get(&app, "/patients/search?q=an").await;
    assert_eq!(status, StatusCode::OK);
    let last_names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["last_name"].as_str().unwrap())
        .collect();
    assert_eq!(last_names, ["Mariano", "Zapata"]);
    assert_eq!(body["total"], 2);

    let (_, everyone) = get(&app, "/patients/search").await;
    assert_eq!(everyone["total"], 3);

    let (_, nobody) = get(&app, "/patients/search?q=xyz").await;
    assert_eq!(page_fields(&nobody), (0, -1, -1, -1, 0));
    assert_eq!(nobody["data"], json!([]));
}

#[actix_web::test]
async fn patient_by_id() {
    let store = Arc::new(MemoryStore::new());
    let id = store.insert_patient(&patient("Ana", "Zapata")).unwrap();
    let app = app_with(store, 10).await;

    let (status, body) = get(&app, &format!("/patients/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "id": id, "name": "Ana", "last_name": "Zapata", "gender": true })
    );

    let (status, body) = get(&app, "/patients/9999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "no such patient");
}

#[actix_web::test]
async fn create_patient_assigns_id() {
    let store = Arc::new(MemoryStore::new());
    let app = app_with(store.clone(), 10).await;

    let (status, body) = post(
        &app,
        "/patients",
        json!({ "name": "Rosa", "last_name": "Huaman", "gender": false }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();
    assert!(id > 0);
    assert_eq!(body["last_name"], "Huaman");

    assert_eq!(store.get_patient(id).unwrap().unwrap().name, "Rosa");
}

#[actix_web::test]
async fn malformed_body_is_expectation_failed() {
    let app = app_with(Arc::new(MemoryStore::new()), 10).await;
    let req = test::TestRequest::post()
        .uri("/diseases")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::EXPECTATION_FAILED);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["message"].is_string());
}

#[actix_web::test]
async fn create_disease_and_symptom() {
    let store = Arc::new(MemoryStore::new());
    let app = app_with(store.clone(), 10).await;

    let (status, disease) = post(&app, "/diseases", json!({ "description": "Asthma" })).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, symptom) = post(&app, "/symptoms", json!({ "description": "Wheezing" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(disease["id"], symptom["id"]);

    let (_, found) = get(&app, "/symptoms/search?q=whee").await;
    assert_eq!(found["data"][0]["description"], "Wheezing");
    let (_, found) = get(&app, "/diseases/search?q=ASTH").await;
    assert_eq!(found["total"], 1);
}

#[actix_web::test]
async fn medicines_nest_formulation() {
    let store = Arc::new(MemoryStore::new());
    let tablet = store.add_shape("Tablet").unwrap();
    let mg = store.add_unit("mg", "milligram").unwrap();
    let formulation = store.add_formulation(tablet, mg).unwrap();
    let app = app_with(store, 10).await;

    let (status, created) = post(
        &app,
        "/medicines",
        json!({ "formulation": { "id": formulation }, "name": "Ibuprofen", "dose": 400 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created["id"].as_i64().unwrap() > 0);

    let (_, body) = get(&app, "/medicines/search?q=ibu").await;
    let medicine = &body["data"][0];
    assert_eq!(medicine["name"], "Ibuprofen");
    assert_eq!(medicine["dose"], 400);
    assert_eq!(medicine["formulation"]["shape"]["description"], "Tablet");
    assert_eq!(medicine["formulation"]["unit"]["symbol"], "mg");

    let (status, body) = post(
        &app,
        "/medicines",
        json!({ "formulation": { "id": 424242 }, "name": "Ghost", "dose": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::EXPECTATION_FAILED);
    assert!(body["message"].as_str().unwrap().contains("formulation"));
}

#[actix_web::test]
async fn catalogs_are_plain_arrays() {
    let store = Arc::new(MemoryStore::new());
    store.add_exam("Blood count").unwrap();
    store.add_exam("X-ray").unwrap();
    let capsule = store.add_shape("Capsule").unwrap();
    let syrup = store.add_shape("Syrup").unwrap();
    let mg = store.add_unit("mg", "milligram").unwrap();
    let ml = store.add_unit("ml", "millilitre").unwrap();
    store.add_formulation(syrup, ml).unwrap();
    store.add_formulation(capsule, mg).unwrap();
    let bpm = store.add_unit("bpm", "beats per minute").unwrap();
    store.add_vital_sign(bpm, "Heart rate").unwrap();
    let app = app_with(store, 10).await;

    let (status, exams) = get(&app, "/exams").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(exams.as_array().unwrap().len(), 2);

    let (_, formulations) = get(&app, "/formulations").await;
    assert_eq!(formulations[0]["shape"]["description"], "Capsule");
    assert_eq!(formulations[1]["unit"]["symbol"], "ml");

    let (_, signs) = get(&app, "/vital-signs").await;
    assert_eq!(signs[0]["description"], "Heart rate");
    assert_eq!(signs[0]["unit"]["symbol"], "bpm");
}

#[actix_web::test]
async fn records_list_newest_first_and_search_by_patient() {
    let store = Arc::new(MemoryStore::new());
    let ana = store.insert_patient(&patient("Ana", "Zapata")).unwrap();
    let luis = store.insert_patient(&patient("Luis", "Quispe")).unwrap();
    store.insert_record(&record_for(ana, (2023, 5, 1))).unwrap();
    store.insert_record(&record_for(luis, (2024, 1, 10))).unwrap();
    store.insert_record(&record_for(ana, (2024, 6, 2))).unwrap();
    let app = app_with(store, 10).await;

    let (_, all) = get(&app, "/records").await;
    let dates: Vec<&str> = all["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["rdate"].as_str().unwrap())
        .collect();
    assert_eq!(dates, ["2024-06-02", "2024-01-10", "2023-05-01"]);
    assert_eq!(all["data"][0]["patient"]["name"], "Ana");

    let (_, found) = get(&app, "/records/search?q=zapata").await;
    assert_eq!(found["total"], 2);
}

#[actix_web::test]
async fn full_record_with_attachments() {
    let store = Arc::new(MemoryStore::new());
    let pid = store.insert_patient(&patient("Ana", "Zapata")).unwrap();
    let rid = store.insert_record(&record_for(pid, (2024, 2, 14))).unwrap();
    let asthma = store
        .insert_disease(&Disease {
            id: 0,
            description: "Asthma".to_string(),
        })
        .unwrap();
    let fever = store
        .insert_symptom(&Symptom {
            id: 0,
            description: "Fever".to_string(),
        })
        .unwrap();
    let xray = store.add_exam("X-ray").unwrap();
    let celsius = store.add_unit("C", "degree Celsius").unwrap();
    let temperature = store.add_vital_sign(celsius, "Temperature").unwrap();
    let tablet = store.add_shape("Tablet").unwrap();
    let mg = store.add_unit("mg", "milligram").unwrap();
    let formulation = store.add_formulation(tablet, mg).unwrap();
    let mut medicine = Medicine {
        name: "Salbutamol".to_string(),
        dose: 4,
        ..Medicine::default()
    };
    medicine.formulation.id = formulation;
    let mid = store.insert_medicine(&medicine).unwrap();

    store.add_disease_history(rid, asthma, "since childhood").unwrap();
    store.link_symptom(rid, fever).unwrap();
    store.diagnose(rid, asthma).unwrap();
    store.link_exam(rid, xray).unwrap();
    store.add_record_vital_sign(rid, temperature, 38.2).unwrap();
    store
        .add_treatment(rid, mid, 30, 1.5, 8, "after meals")
        .unwrap();
    let app = app_with(store, 10).await;

    let (status, body) = get(&app, &format!("/records/{}", rid)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["record"]["id"], rid);
    assert_eq!(body["record"]["rdate"], "2024-02-14");
    assert_eq!(body["record"]["patient"]["last_name"], "Zapata");
    assert_eq!(body["diseases_history"][0]["disease_desc"], "Asthma");
    assert_eq!(body["diseases_history"][0]["description"], "since childhood");
    assert_eq!(body["symptoms"][0]["description"], "Fever");
    assert_eq!(body["idx"][0]["description"], "Asthma");
    assert_eq!(body["exams"][0]["description"], "X-ray");
    assert_eq!(body["vital_signs"][0]["vital_sign_desc"], "Temperature");
    assert_eq!(body["vital_signs"][0]["unit_symbol"], "C");
    assert_eq!(body["vital_signs"][0]["value"], 38.2);
    let treatment = &body["treatments"][0];
    assert_eq!(treatment["medicine_name"], "Salbutamol");
    assert_eq!(treatment["shape_description"], "Tablet");
    assert_eq!(treatment["unit_symbol"], "mg");
    assert_eq!(treatment["dosage"], 1.5);
    assert_eq!(treatment["instructions"], "after meals");

    let (status, body) = get(&app, "/records/9999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "no such medical record");
}

#[actix_web::test]
async fn create_record_for_known_patient_only() {
    let store = Arc::new(MemoryStore::new());
    let pid = store.insert_patient(&patient("Ana", "Zapata")).unwrap();
    let app = app_with(store, 10).await;

    let (status, body) = post(
        &app,
        "/records",
        json!({
            "patient": { "id": pid },
            "rdate": "2024-03-05",
            "age": 41,
            "weight": 70,
            "height": 172,
            "duration": 25
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].as_i64().unwrap() > 0);
    assert_eq!(body["patient"]["id"], pid);

    let (status, _) = post(
        &app,
        "/records",
        json!({ "patient": { "id": 777777 }, "rdate": "2024-03-05" }),
    )
    .await;
    assert_eq!(status, StatusCode::EXPECTATION_FAILED);

    let (status, _) = post(&app, "/records", json!({ "patient": { "id": pid } })).await;
    assert_eq!(status, StatusCode::EXPECTATION_FAILED);
}

#[actix_web::test]
async fn health_check() {
    let app = app_with(Arc::new(MemoryStore::new()), 10).await;
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let req = test::TestRequest::get().uri("/health").to_request();
    let raw = test::call_and_read_body(&app, req).await;
    assert_eq!(&raw[..], b"{\n  \"status\": \"ok\"\n}");
}

#[actix_web::test]
async fn unparseable_id_is_json_not_found() {
    let store = Arc::new(MemoryStore::new());
    store.insert_patient(&patient("Ana", "Zapata")).unwrap();
    let app = app_with(store, 10).await;

    for uri in ["/patients/abc", "/records/abc", "/patients/1.5"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "application/json",
            "{}",
            uri
        );
        let body: Value = test::read_body_json(resp).await;
        assert!(body["message"].is_string(), "{}", uri);
    }
}
