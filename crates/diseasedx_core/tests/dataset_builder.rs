use chrono::{TimeZone, Utc};
use diseasedx_core::{
    build_from_csv_path, build_from_csv_reader, DatasetBuilder, DatasetError, DiseaseProvider,
    RowOutcome, SkipReason, SourceRow,
};
use std::io::Write;

const SAMPLE_CSV: &str = "\
Name,Symptoms,Treatments,Disease_Code,Contagious,Chronic
Influenza,\"Fever, Cough, Muscle aches\",\"Rest, Fluids\",J11,True,False
,\"Headache\",,X00,False,False
Asthma,\"Wheezing, Shortness of breath\",Inhaler,J45,no,YES
Mystery,\"Rash\",,,1,1
Common Cold,\"Sneezing, Cough\",,J00,yes,0
";

fn built_at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("fixed timestamp should be valid")
}

#[test]
fn build_keeps_complete_rows_and_assigns_dense_ids() {
    let build = build_from_csv_reader(SAMPLE_CSV.as_bytes(), built_at()).expect("csv should build");
    let records = build.dataset.records();

    assert_eq!(records.len(), 3);
    let ids = records.iter().map(|record| record.id).collect::<Vec<_>>();
    assert_eq!(ids, vec![1, 2, 3]);
    let names = records.iter().map(|record| record.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["Influenza", "Asthma", "Common Cold"]);
}

#[test]
fn build_reports_skipped_rows_with_reasons() {
    let build = build_from_csv_reader(SAMPLE_CSV.as_bytes(), built_at()).expect("csv should build");

    assert_eq!(build.report.kept, 3);
    assert_eq!(build.report.skipped_count(), 2);
    assert_eq!(build.report.rows_seen(), 5);
    assert_eq!(build.report.skipped[0].record, 2);
    assert_eq!(build.report.skipped[0].reason, SkipReason::MissingName);
    assert_eq!(build.report.skipped[1].record, 4);
    assert_eq!(build.report.skipped[1].reason, SkipReason::MissingCode);
}

#[test]
fn skipped_rows_are_numbered_by_record_not_file_line() {
    let csv = "\
Name,Symptoms,Treatments,Disease_Code,Contagious,Chronic
Influenza,\"Fever,
Cough\",Rest,J11,True,False
,Headache,,X00,False,False
";
    let build = build_from_csv_reader(csv.as_bytes(), built_at()).expect("csv should build");

    assert_eq!(build.report.skipped[0].record, 2);
    let flu = build.dataset.find(1).expect("record 1 should exist");
    assert_eq!(flu.symptoms, vec!["Fever", "Cough"]);
}

#[test]
fn build_derives_flags_lists_and_timestamps() {
    let build = build_from_csv_reader(SAMPLE_CSV.as_bytes(), built_at()).expect("csv should build");
    let flu = build.dataset.find(1).expect("record 1 should exist");
    let asthma = build.dataset.find(2).expect("record 2 should exist");

    assert!(flu.contagious);
    assert!(!flu.chronic);
    assert!(!asthma.contagious);
    assert!(asthma.chronic);
    assert_eq!(flu.symptoms, vec!["Fever", "Cough", "Muscle aches"]);
    assert_eq!(flu.treatments, vec!["Rest", "Fluids"]);
    assert_eq!(flu.symptoms_text, "Fever, Cough, Muscle aches");
    assert_eq!(flu.created_at, built_at());
    assert_eq!(flu.updated_at, built_at());

    let cold = build.dataset.find(3).expect("record 3 should exist");
    assert!(cold.treatments.is_empty());
    assert!(cold.treatments_text.is_empty());
}

#[test]
fn build_statistics_match_records() {
    let build = build_from_csv_reader(SAMPLE_CSV.as_bytes(), built_at()).expect("csv should build");
    let stats = build.dataset.statistics();

    assert_eq!(stats.total_diseases, 3);
    assert_eq!(stats.contagious_diseases, 2);
    assert_eq!(stats.chronic_diseases, 1);
    assert_eq!(stats.non_contagious_diseases, 1);
    assert_eq!(stats.non_chronic_diseases, 2);
}

#[test]
fn missing_optional_columns_read_as_empty() {
    let csv = "Name,Disease_Code\nScurvy,E54\n";
    let build = build_from_csv_reader(csv.as_bytes(), built_at()).expect("csv should build");
    let scurvy = build.dataset.find(1).expect("record 1 should exist");

    assert!(scurvy.symptoms.is_empty());
    assert!(!scurvy.contagious);
    assert!(!scurvy.chronic);
}

#[test]
fn builder_accepts_rows_incrementally() {
    let mut builder = DatasetBuilder::new(built_at());
    let kept = builder.push_row(&SourceRow {
        name: Some("  Measles ".to_string()),
        disease_code: Some("B05".to_string()),
        symptoms: Some("Rash, Fever".to_string()),
        ..SourceRow::default()
    });
    let skipped = builder.push_row(&SourceRow {
        name: Some("   ".to_string()),
        disease_code: Some("Z99".to_string()),
        ..SourceRow::default()
    });

    assert_eq!(kept, RowOutcome::Kept(1));
    assert_eq!(skipped, RowOutcome::Skipped(SkipReason::MissingName));

    let build = builder.finish().expect("builder should finish");
    assert_eq!(build.dataset.find(1).expect("record 1 should exist").name, "Measles");
}

#[test]
fn build_from_path_reads_file_and_reports_missing_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file should be created");
    file.write_all(SAMPLE_CSV.as_bytes()).expect("temp csv should be written");
    let build = build_from_csv_path(file.path(), built_at()).expect("csv file should build");
    assert_eq!(build.dataset.len(), 3);

    let dir = tempfile::tempdir().expect("temp dir should be created");
    let err = build_from_csv_path(dir.path().join("missing.csv"), built_at()).expect_err("missing csv should fail");
    assert!(matches!(err, DatasetError::Io(_)));
}
