//! Connection integration tests: CSV registration, introspection, queries.

mod common;

use card_dashboard::{Connection, LoadError};

fn registered_sample() -> (Connection, tempfile::TempDir) {
    let (path, tmp) = common::write_source("cards.csv", common::SAMPLE_CSV);
    let conn = Connection::new().unwrap();
    conn.register_csv("collection", &path).unwrap();
    (conn, tmp)
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[test]
fn register_csv_creates_view() {
    let (conn, _tmp) = registered_sample();

    assert!(conn.has_view("collection"));
    assert!(!conn.has_view("other"));
    assert_eq!(conn.views(), vec!["collection".to_string()]);
}

#[test]
fn columns_lists_header_in_order() {
    let (conn, _tmp) = registered_sample();

    let cols = conn.columns("collection").unwrap();
    assert_eq!(
        cols,
        vec![
            "Card Name",
            "Set Name",
            "Set Code",
            "Card Number",
            "Language",
            "Date Bought",
            "Price Bought",
            "AVG"
        ]
    );
}

#[test]
fn columns_of_unregistered_view_is_an_error() {
    let conn = Connection::new().unwrap();
    assert!(matches!(
        conn.columns("collection"),
        Err(LoadError::InvalidArgument(_))
    ));
}

// ---------------------------------------------------------------------------
// execute
// ---------------------------------------------------------------------------

#[test]
fn execute_reads_every_cell_as_text() {
    let (conn, _tmp) = registered_sample();

    let rows = conn
        .execute("SELECT \"Card Number\" AS n, \"AVG\" AS avg FROM collection", &[])
        .unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0]["n"], "025");
    assert_eq!(rows[0]["avg"], "5.00");
}

#[test]
fn execute_with_params() {
    let (conn, _tmp) = registered_sample();

    let rows = conn
        .execute(
            "SELECT * FROM collection WHERE \"Language\" = ?",
            &["English".to_string()],
        )
        .unwrap();
    assert_eq!(rows.len(), 3);
}

#[test]
fn empty_cells_come_back_as_null() {
    let csv = "\
Card Name,Set Name,Set Code,Card Number,Language,Date Bought,Price Bought,AVG
Pikachu,,SV1,025,English,2024-01-01,2.50,5.00
";
    let (path, _tmp) = common::write_source("cards.csv", csv);
    let conn = Connection::new().unwrap();
    conn.register_csv("collection", &path).unwrap();

    let rows = conn
        .execute("SELECT \"Set Name\" AS set_name FROM collection", &[])
        .unwrap();
    assert_eq!(rows[0]["set_name"], serde_json::Value::Null);
}

#[test]
fn execute_into_deserializes_rows() {
    #[derive(serde::Deserialize)]
    struct Row {
        name: String,
        language: Option<String>,
    }

    let (conn, _tmp) = registered_sample();

    let rows: Vec<Row> = conn
        .execute_into(
            "SELECT \"Card Name\" AS name, \"Language\" AS language FROM collection",
            &[],
        )
        .unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[1].name, "Charizard ex");
    assert_eq!(rows[1].language.as_deref(), Some("Japanese"));
}

#[test]
fn bad_sql_is_a_duckdb_error() {
    let (conn, _tmp) = registered_sample();

    let err = conn.execute("SELECT * FROM no_such_table", &[]).unwrap_err();
    assert!(matches!(err, LoadError::DuckDb(_)));
}
