//! Seed provider integration tests.

use std::io::Write;

use inpatient_core::models::{SortDirective, SortKey};
use inpatient_core::query::{LoadError, QueryEngine};
use inpatient_core::seed::{DemoSeed, JsonFileSeed, SeedError, SeedProvider};
use inpatient_core::RegistryConfig;

fn write_seed(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_json_seed_loads_into_engine() {
    let records = DemoSeed::records();
    let file = write_seed(&serde_json::to_string_pretty(&records).unwrap());

    let mut engine = QueryEngine::new(&RegistryConfig::default());
    let count = engine.load(&JsonFileSeed::new(file.path())).await.unwrap();
    assert_eq!(count, 8);
    assert_eq!(engine.patients(), records.as_slice());

    engine.set_sort_directive(Some(SortDirective::descending(SortKey::Room)));
    assert_eq!(engine.view()[0].room, "Melati 2");
}

#[tokio::test]
async fn test_json_seed_keeps_old_dates() {
    // Seed data is pre-existing; admission dates years back are fine.
    let json = r#"[
        {"id":"old","name":"Lama Sekali","nationalId":"9999000011112222","diagnosis":"Tuberkulosis Paru",
         "admissionDate":"2019-01-02","doctor":"dr. Ahmad Rahman, Sp.P","room":"Melati 3"}
    ]"#;
    let file = write_seed(json);

    let patients = JsonFileSeed::new(file.path()).fetch().await.unwrap();
    assert_eq!(patients.len(), 1);
    assert_eq!(patients[0].admission_date, "2019-01-02");
}

#[tokio::test]
async fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let seed = JsonFileSeed::new(dir.path().join("missing.json"));
    assert!(matches!(seed.fetch().await, Err(SeedError::Io(_))));

    let mut engine = QueryEngine::new(&RegistryConfig::default());
    let err = engine.load(&seed).await.unwrap_err();
    assert!(matches!(err, LoadError::Seed(ref e) if matches!(**e, SeedError::Io(_))));
    assert!(!engine.is_loading());
}

#[tokio::test]
async fn test_duplicate_ids_rejected() {
    let mut records = DemoSeed::records();
    records[3].id = "2".into();
    let file = write_seed(&serde_json::to_string(&records).unwrap());

    let result = JsonFileSeed::new(file.path()).fetch().await;
    assert!(matches!(result, Err(SeedError::DuplicateId(id)) if id == "2"));
}

fn record_json(name: &str, national_id: &str, diagnosis: &str, admission_date: &str) -> String {
    serde_json::json!([{
        "id": "x1",
        "name": name,
        "nationalId": national_id,
        "diagnosis": diagnosis,
        "admissionDate": admission_date,
        "doctor": "dr. Lisa Andini, Sp.PD",
        "room": "Anggrek 1",
    }])
    .to_string()
}

fn assert_invalid(json: &str, expected: &str) {
    match JsonFileSeed::parse(json) {
        Err(SeedError::InvalidRecord { id, reason }) => {
            assert_eq!(id, "x1");
            assert!(reason.contains(expected), "unexpected reason: {reason}");
        }
        other => panic!("expected InvalidRecord, got {other:?}"),
    }
}

#[test]
fn test_blank_name_rejected() {
    assert_invalid(
        &record_json("   ", "1234567890123456", "Demam Tifoid", "2025-06-30"),
        "name",
    );
}

#[test]
fn test_bad_national_id_rejected() {
    assert_invalid(
        &record_json("Rina", "abc", "Demam Tifoid", "2025-06-30"),
        "national ID",
    );
    assert_invalid(
        &record_json("Rina", "123456789012345", "Demam Tifoid", "2025-06-30"),
        "national ID",
    );
}

#[test]
fn test_blank_diagnosis_rejected() {
    assert_invalid(
        &record_json("Rina", "1234567890123456", "", "2025-06-30"),
        "diagnosis",
    );
}

#[test]
fn test_malformed_admission_date_rejected() {
    assert_invalid(
        &record_json("Rina", "1234567890123456", "Demam Tifoid", "30/06/2025"),
        "admission date",
    );
}

#[tokio::test]
async fn test_invalid_record_fails_load_and_keeps_data() {
    let file = write_seed(&record_json("", "abc", "", "30/06/2025"));

    let mut engine = QueryEngine::new(&RegistryConfig::default());
    engine.add(DemoSeed::records().remove(0));
    let err = engine.load(&JsonFileSeed::new(file.path())).await.unwrap_err();
    assert!(matches!(err, LoadError::Seed(ref e) if matches!(**e, SeedError::InvalidRecord { .. })));
    assert_eq!(engine.patients().len(), 1);
}
