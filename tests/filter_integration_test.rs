/// Integration tests for search and category filtering over catalogs
mod common;

use common::CatalogBuilder;
use symptom_insight::filters::{CategoryFilter, FilterEngine, filter_symptoms};
use symptom_insight::{Catalog, MemoryStore, Session, SymptomId};

fn names(records: &[&symptom_insight::SymptomRecord]) -> Vec<String> {
    records.iter().map(|s| s.name.clone()).collect()
}

#[test]
fn test_search_is_case_insensitive_substring() {
    let catalog = Catalog::builtin().unwrap();
    let matches = filter_symptoms(catalog.symptoms(), "PAIN", &CategoryFilter::All);
    assert_eq!(names(&matches), vec!["Abdominal Pain", "Chest Pain", "Back Pain", "Joint Pain"]);
}

#[test]
fn test_search_and_category_combine() {
    let catalog = Catalog::builtin().unwrap();
    let only = CategoryFilter::Only("Musculoskeletal".to_string());
    let matches = filter_symptoms(catalog.symptoms(), "pain", &only);
    assert_eq!(names(&matches), vec!["Back Pain", "Joint Pain"]);
}

#[test]
fn test_blank_search_with_all_returns_catalog_order() {
    let catalog = Catalog::builtin().unwrap();
    let matches = filter_symptoms(catalog.symptoms(), "   ", &"all".parse().unwrap());
    assert_eq!(matches.len(), catalog.len());
    assert_eq!(matches[0].id, SymptomId(1));
    assert_eq!(matches[19].id, SymptomId(20));
}

#[test]
fn test_unknown_category_yields_empty_view() {
    let catalog = Catalog::builtin().unwrap();
    let matches =
        filter_symptoms(catalog.symptoms(), "", &CategoryFilter::Only("Dental".to_string()));
    assert!(matches.is_empty());
}

#[test]
fn test_category_filter_parse() {
    assert_eq!("".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
    assert_eq!("ALL".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
    assert_eq!(
        "Skin".parse::<CategoryFilter>().unwrap(),
        CategoryFilter::Only("Skin".to_string())
    );
}

#[test]
fn test_engine_memoizes_until_inputs_change() {
    let catalog = Catalog::builtin().unwrap();
    let mut engine = FilterEngine::new();

    let first = engine.view(&catalog, "ache", &CategoryFilter::All).to_vec();
    engine.view(&catalog, "ache", &CategoryFilter::All);
    assert_eq!(engine.recomputations(), 1);
    assert_eq!(first, vec![SymptomId(1)]);

    engine.view(&catalog, "ache", &CategoryFilter::Only("General".to_string()));
    assert_eq!(engine.recomputations(), 2);
}

#[test]
fn test_session_category_change_recomputes_view() {
    let catalog = CatalogBuilder::new()
        .symptom(1, "Sneezing", "Respiratory")
        .symptom(2, "Sniffles", "Respiratory")
        .symptom(3, "Snoring", "Sleep")
        .build();
    let mut session = Session::new(catalog, MemoryStore::new());

    session.set_search("sn");
    assert_eq!(session.visible_symptoms().len(), 3);

    session.set_category(CategoryFilter::Only("Sleep".to_string()));
    let visible: Vec<SymptomId> = session.visible_symptoms().iter().map(|s| s.id).collect();
    assert_eq!(visible, vec![SymptomId(3)]);
}

#[test]
fn test_set_search_cancels_pending_input() {
    let mut session = Session::new(Catalog::builtin().unwrap(), MemoryStore::new());
    let now = std::time::Instant::now();

    session.input_search("cough", now);
    assert!(session.search_pending());
    assert!(session.set_search("rash"));
    assert!(!session.search_pending());

    // The cancelled edit never fires
    assert!(!session.tick(now + std::time::Duration::from_secs(5)));
    assert_eq!(session.search_term(), "rash");
}
