//! Filter engine tests against the typed sample collection.

mod common;

use card_dashboard::queries::CollectionQuery;
use card_dashboard::{filter, DateRange, FilterCriteria, GroupField};
use common::date;

// ---------------------------------------------------------------------------
// Identity and ordering
// ---------------------------------------------------------------------------

#[test]
fn empty_criteria_returns_whole_dataset() {
    let records = common::sample_records();

    let view = filter(&records, &FilterCriteria::new());
    assert_eq!(view.rows(), records.as_slice());
}

#[test]
fn result_is_an_ordered_subsequence() {
    let records = common::sample_records();
    let criteria = FilterCriteria::new().with_languages(["English"]);

    let view = filter(&records, &criteria);
    assert_eq!(common::names(&view), vec!["Pikachu", "Mew ex", "Eevee"]);

    // Each kept record appears in the dataset after the previous one
    let mut cursor = 0;
    for kept in view.iter() {
        let pos = records[cursor..].iter().position(|r| r == kept).unwrap();
        cursor += pos + 1;
    }
}

// ---------------------------------------------------------------------------
// Clauses
// ---------------------------------------------------------------------------

#[test]
fn set_clause_is_or_within() {
    let records = common::sample_records();
    let criteria = FilterCriteria::new().with_set_names(["151", "Obsidian Flames"]);

    let view = filter(&records, &criteria);
    assert_eq!(common::names(&view), vec!["Charizard ex", "Mew ex", "Eevee"]);
}

#[test]
fn clauses_are_and_combined() {
    let records = common::sample_records();
    let criteria = FilterCriteria::new()
        .with_set_names(["Scarlet & Violet"])
        .with_languages(["German", "Japanese"]);

    let view = filter(&records, &criteria);
    assert_eq!(common::names(&view), vec!["Gardevoir ex"]);
}

#[test]
fn unknown_set_matches_nothing() {
    let records = common::sample_records();
    let criteria = FilterCriteria::new().with_set_names(["Base Set"]);

    assert!(filter(&records, &criteria).is_empty());
}

#[test]
fn date_window_is_inclusive() {
    let records = common::sample_records();
    let criteria = FilterCriteria::new()
        .with_date_range(DateRange::between(date(2024, 1, 2), date(2024, 1, 4)));

    let view = filter(&records, &criteria);
    assert_eq!(view.len(), 3);
    assert_eq!(common::names(&view), vec!["Charizard ex", "Mew ex", "Gardevoir ex"]);
}

#[test]
fn single_day_window() {
    let records = common::sample_records();
    let criteria = FilterCriteria::new()
        .with_date_range(DateRange::between(date(2024, 1, 5), date(2024, 1, 5)));

    assert_eq!(common::names(&filter(&records, &criteria)), vec!["Eevee"]);
}

#[test]
fn half_open_date_range_is_ignored() {
    let records = common::sample_records();

    let start_only = FilterCriteria::new()
        .with_date_range(DateRange::new(Some(date(2024, 1, 4)), None));
    let end_only = FilterCriteria::new()
        .with_date_range(DateRange::new(None, Some(date(2024, 1, 1))));

    assert!(start_only.is_empty());
    assert_eq!(filter(&records, &start_only).len(), 5);
    assert_eq!(filter(&records, &end_only).len(), 5);
}

#[test]
fn inverted_date_range_yields_empty_view() {
    let records = common::sample_records();
    let criteria = FilterCriteria::new()
        .with_date_range(DateRange::between(date(2024, 1, 4), date(2024, 1, 2)));

    assert!(filter(&records, &criteria).is_empty());
}

#[test]
fn empty_dataset_filters_to_empty() {
    let criteria = FilterCriteria::new().with_languages(["English"]);
    assert!(filter(&[], &criteria).is_empty());
}

// ---------------------------------------------------------------------------
// CollectionQuery
// ---------------------------------------------------------------------------

#[test]
fn collection_query_chains_filter_and_aggregates() {
    let dataset = common::sample_dataset();
    let query = CollectionQuery::new(&dataset);
    let criteria = FilterCriteria::new().with_set_names(["151"]);

    assert_eq!(query.filter(&criteria).len(), 2);
    let by_language = query.group_by(&criteria, GroupField::Language);
    assert_eq!(by_language.get("English"), Some(&2));
    assert_eq!(query.summarize(&criteria).count, 2);
}

#[test]
fn criteria_deserialize_with_defaults() {
    let criteria: FilterCriteria =
        serde_json::from_str(r#"{"languages": ["German"], "dateRange": {"start": "2024-01-02"}}"#)
            .unwrap();

    assert!(criteria.set_names.is_empty());
    assert!(criteria.languages.contains("German"));
    assert_eq!(criteria.date_range.start, Some(date(2024, 1, 2)));
    assert_eq!(criteria.date_range.bounds(), None);
}
