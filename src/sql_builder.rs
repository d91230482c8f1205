//! SQL builder used to project the source spreadsheet into loader rows.
//!
//! Values go through DuckDB's parameter binding (`?` placeholders). Column
//! names come from the spreadsheet header, so they are always passed through
//! [`quote_ident`] before being spliced into SQL.
//!
//! # Example
//!
//! ```rust
//! use card_dashboard::sql_builder::{quote_ident, SqlBuilder};
//! let (sql, params) = SqlBuilder::new("collection")
//!     .select(&[&format!("{} AS card_name", quote_ident("Card Name"))])
//!     .build();
//! assert_eq!(sql, "SELECT \"Card Name\" AS card_name\nFROM collection");
//! assert!(params.is_empty());
//! ```

/// Builds parameterized SELECT statements. Methods return `&mut Self` for
/// chaining.
pub struct SqlBuilder {
    select_cols: Vec<String>,
    from_table: String,
    where_clauses: Vec<String>,
    params: Vec<String>,
}

impl SqlBuilder {
    /// Create a builder targeting the given table or view.
    pub fn new(table: &str) -> Self {
        Self {
            select_cols: vec!["*".to_string()],
            from_table: table.to_string(),
            where_clauses: Vec::new(),
            params: Vec::new(),
        }
    }

    /// Set the columns to select (replaces the default `*`).
    pub fn select(&mut self, cols: &[&str]) -> &mut Self {
        self.select_cols = cols.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Add a WHERE condition with `?` placeholders for each param.
    ///
    /// Conditions are AND-combined; parameters are appended in order.
    pub fn where_clause(&mut self, condition: &str, params: &[&str]) -> &mut Self {
        self.where_clauses.push(condition.to_string());
        self.params.extend(params.iter().map(|p| p.to_string()));
        self
    }

    /// Build the final SQL string and parameter list.
    pub fn build(&self) -> (String, Vec<String>) {
        let mut parts = vec![
            format!("SELECT {}", self.select_cols.join(", ")),
            format!("FROM {}", self.from_table),
        ];

        if !self.where_clauses.is_empty() {
            parts.push(format!("WHERE {}", self.where_clauses.join(" AND ")));
        }

        (parts.join("\n"), self.params.clone())
    }
}

/// Quote an identifier for DuckDB, doubling embedded quotes.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Quote a string literal for DuckDB, doubling embedded single quotes.
///
/// Only used where DuckDB does not accept a bound parameter, such as the
/// file path argument of a table function inside `CREATE VIEW`.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
