use chrono::{TimeZone, Utc};
use diseasedx_api::{load_dataset, ApiConfig, DatasetSource};
use diseasedx_core::db::open_db;
use diseasedx_core::{
    save_document, Dataset, DiseaseProvider, DiseaseRecord, DiseaseRepository, NewDisease,
    SqliteDiseaseRepository,
};

fn dataset(names: &[&str]) -> Dataset {
    let built_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let records = names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            DiseaseRecord::new(
                index as u32 + 1,
                NewDisease {
                    name: name.to_string(),
                    disease_code: format!("D{index}"),
                    symptoms_text: "Fever".to_string(),
                    treatments_text: "Rest".to_string(),
                    ..NewDisease::default()
                },
                built_at,
            )
        })
        .collect();
    Dataset::new(records).unwrap()
}

#[test]
fn database_is_preferred_when_present() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("diseases.sqlite3");
    let data_path = dir.path().join("diseases.json");

    let conn = open_db(&db_path).unwrap();
    SqliteDiseaseRepository::new(&conn)
        .replace_all(dataset(&["Measles", "Mumps"]).records())
        .unwrap();
    drop(conn);
    save_document(&dataset(&["Rubella"]), &data_path).unwrap();

    let config = ApiConfig {
        db_path: Some(db_path.clone()),
        data_path,
        ..ApiConfig::default()
    };
    let loaded = load_dataset(&config).unwrap();

    assert_eq!(loaded.source, DatasetSource::Database(db_path));
    assert_eq!(loaded.dataset.len(), 2);
}

#[test]
fn missing_database_falls_back_to_document() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("absent.sqlite3");
    let data_path = dir.path().join("diseases.json");
    save_document(&dataset(&["Rubella"]), &data_path).unwrap();

    let config = ApiConfig {
        db_path: Some(db_path.clone()),
        data_path: data_path.clone(),
        ..ApiConfig::default()
    };
    let loaded = load_dataset(&config).unwrap();

    assert_eq!(loaded.source, DatasetSource::Document(data_path));
    assert_eq!(loaded.dataset.records()[0].name, "Rubella");
    assert!(!db_path.exists());
}

#[test]
fn failure_of_both_sources_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("missing.json");

    let config = ApiConfig {
        db_path: Some(dir.path().join("missing.sqlite3")),
        data_path: data_path.clone(),
        ..ApiConfig::default()
    };
    let err = load_dataset(&config).err().unwrap();

    assert_eq!(err.path, data_path);
    assert!(err.to_string().contains("missing.json"));
}
