use chrono::{TimeZone, Utc};
use diseasedx_core::{
    Dataset, DiseaseFilter, DiseaseListQuery, DiseaseRecord, DiseaseService, NewDisease,
    QueryError, ServiceConfig,
};
use std::sync::Arc;

fn disease(id: u32, name: &str, symptoms: &str, contagious: bool, chronic: bool) -> DiseaseRecord {
    DiseaseRecord::new(
        id,
        NewDisease {
            name: name.to_string(),
            disease_code: format!("C{id:03}"),
            symptoms_text: symptoms.to_string(),
            treatments_text: "Rest".to_string(),
            contagious,
            chronic,
        },
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .expect("fixed timestamp should be valid"),
    )
}

fn fixture() -> Arc<Dataset> {
    Arc::new(
        Dataset::new(vec![
            disease(1, "Influenza", "Fever, Cough", true, false),
            disease(2, "Asthma", "Wheezing, Cough", false, true),
            disease(3, "Hepatitis B", "Jaundice, Fatigue", true, true),
            disease(4, "Diabetes", "Thirst, Fatigue", false, true),
            disease(5, "Tuberculosis", "Cough, Night sweats", true, true),
        ])
        .expect("fixture records should be valid"),
    )
}

fn numbered_dataset(count: u32) -> Arc<Dataset> {
    let records = (1..=count)
        .map(|id| disease(id, &format!("Disease {id}"), "Fever", id % 2 == 0, false))
        .collect();
    Arc::new(Dataset::new(records).expect("fixture records should be valid"))
}

fn query(filter: DiseaseFilter, page: Option<usize>) -> DiseaseListQuery {
    DiseaseListQuery { filter, page }
}

#[test]
fn empty_filter_lists_whole_collection_in_id_order() {
    let service = DiseaseService::new(fixture());
    let page = service.list(&DiseaseListQuery::default());

    assert_eq!(page.count, 5);
    assert_eq!(page.page, 1);
    assert!(!page.has_next);
    assert!(!page.has_previous);
    let ids = page.results.iter().map(|item| item.id).collect::<Vec<_>>();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[test]
fn summaries_carry_symptom_count() {
    let dataset = Arc::new(
        Dataset::new(vec![disease(1, "Measles", "Rash, Fever, Cough", true, false)]).expect("fixture records should be valid"),
    );
    let service = DiseaseService::new(dataset);
    let page = service.list(&DiseaseListQuery::default());

    assert_eq!(page.results[0].symptoms_count, 3);
    assert_eq!(page.results[0].disease_code, "C001");
}

#[test]
fn flag_filters_compose_conjunctively() {
    let service = DiseaseService::new(fixture());
    let filter = DiseaseFilter {
        contagious: Some(true),
        chronic: Some(true),
        ..DiseaseFilter::default()
    };
    let page = service.list(&query(filter, None));

    assert_eq!(page.count, 2);
    assert!(page.results.iter().all(|item| item.contagious && item.chronic));
}

#[test]
fn search_matches_name_or_symptom_text_case_insensitively() {
    let service = DiseaseService::new(fixture());
    let by_symptom = service.list(&query(
        DiseaseFilter {
            search: Some("COUGH".to_string()),
            ..DiseaseFilter::default()
        },
        None,
    ));
    let ids = by_symptom.results.iter().map(|item| item.id).collect::<Vec<_>>();
    assert_eq!(ids, vec![1, 2, 5]);

    let by_name = service.list(&query(
        DiseaseFilter {
            search: Some("hepat".to_string()),
            ..DiseaseFilter::default()
        },
        None,
    ));
    assert_eq!(by_name.count, 1);
    assert_eq!(by_name.results[0].name, "Hepatitis B");
}

#[test]
fn search_and_flags_combine() {
    let service = DiseaseService::new(fixture());
    let page = service.list(&query(
        DiseaseFilter {
            search: Some("fatigue".to_string()),
            contagious: Some(false),
            chronic: None,
        },
        None,
    ));

    assert_eq!(page.count, 1);
    assert_eq!(page.results[0].name, "Diabetes");
}

#[test]
fn pagination_bounds_page_length_and_keeps_total_count() {
    let service = DiseaseService::with_config(numbered_dataset(45), ServiceConfig::with_page_size(20));

    let first = service.list(&query(DiseaseFilter::default(), Some(1)));
    assert_eq!(first.count, 45);
    assert_eq!(first.results.len(), 20);
    assert!(first.has_next);
    assert!(!first.has_previous);

    let last = service.list(&query(DiseaseFilter::default(), Some(3)));
    assert_eq!(last.count, 45);
    assert_eq!(last.results.len(), 5);
    assert_eq!(last.results[0].id, 41);
    assert!(!last.has_next);
    assert!(last.has_previous);
    assert_eq!(last.total_pages(), 3);
}

#[test]
fn page_count_is_independent_of_filtered_pagination() {
    let service = DiseaseService::with_config(numbered_dataset(45), ServiceConfig::with_page_size(10));
    let filter = DiseaseFilter {
        contagious: Some(true),
        ..DiseaseFilter::default()
    };

    for page in 1..=3 {
        let result = service.list(&query(filter.clone(), Some(page)));
        assert_eq!(result.count, 22);
        assert!(result.results.len() <= 10);
        assert!(result.results.iter().all(|item| item.contagious));
    }
}

#[test]
fn page_beyond_end_is_empty_without_links() {
    let service = DiseaseService::with_config(numbered_dataset(5), ServiceConfig::with_page_size(2));
    let page = service.list(&query(DiseaseFilter::default(), Some(9)));

    assert_eq!(page.count, 5);
    assert!(page.results.is_empty());
    assert!(!page.has_next);
    assert!(!page.has_previous);
}

#[test]
fn page_zero_is_treated_as_first_page() {
    let service = DiseaseService::new(fixture());
    let page = service.list(&query(DiseaseFilter::default(), Some(0)));
    assert_eq!(page.page, 1);
    assert_eq!(page.results.len(), 5);
}

#[test]
fn page_size_config_is_normalized() {
    assert_eq!(ServiceConfig::with_page_size(0).page_size, 20);
    assert_eq!(ServiceConfig::with_page_size(1_000).page_size, 100);
    assert_eq!(ServiceConfig::with_page_size(7).page_size, 7);
}

#[test]
fn get_by_id_returns_record_field_for_field() {
    let dataset = fixture();
    let expected = disease(3, "Hepatitis B", "Jaundice, Fatigue", true, true);
    let service = DiseaseService::new(dataset);

    assert_eq!(service.get_by_id(3).expect("record 3 should exist"), expected);
}

#[test]
fn get_by_id_reports_not_found() {
    let service = DiseaseService::new(fixture());
    assert_eq!(service.get_by_id(99).expect_err("unknown id should be rejected"), QueryError::NotFound(99));
    assert_eq!(service.get_by_id(0).expect_err("unknown id should be rejected"), QueryError::NotFound(0));
}

#[test]
fn statistics_identities_hold() {
    let service = DiseaseService::new(fixture());
    let stats = service.statistics();

    assert_eq!(stats.total_diseases, 5);
    assert_eq!(stats.contagious_diseases, 3);
    assert_eq!(stats.chronic_diseases, 3);
    assert_eq!(
        stats.total_diseases,
        stats.contagious_diseases + stats.non_contagious_diseases
    );
    assert_eq!(stats.total_diseases, stats.chronic_diseases + stats.non_chronic_diseases);
}

#[test]
fn dataset_rejects_duplicate_ids() {
    let result = Dataset::new(vec![
        disease(1, "A", "", false, false),
        disease(1, "B", "", false, false),
    ]);
    assert!(result.is_err());
}
