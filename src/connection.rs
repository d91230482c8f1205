//! DuckDB connection wrapper that exposes a delimited text file as a view.
//!
//! The connection is in-memory and only lives for the duration of a load:
//! the source file is registered as a view, introspected with `DESCRIBE`,
//! projected into rows, and then the connection is dropped. Workbooks are
//! read by [`crate::workbook`] instead.

use crate::error::{LoadError, Result};
use crate::sql_builder::{quote_ident, quote_literal};
use duckdb::{types::ValueRef, Connection as DuckDbConnection};
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Wraps an in-memory DuckDB connection and the views registered on it.
pub struct Connection {
    conn: DuckDbConnection,
    registered_views: RefCell<HashSet<String>>,
}

impl Connection {
    /// Open an in-memory DuckDB database.
    pub fn new() -> Result<Self> {
        let conn = DuckDbConnection::open_in_memory()?;
        Ok(Self {
            conn,
            registered_views: RefCell::new(HashSet::new()),
        })
    }

    /// Register a delimited text file (`.csv`, `.tsv`, `.txt`) as a view.
    ///
    /// The delimiter is sniffed. Every column is read as text
    /// (`all_varchar`) so values such as card number `025` survive
    /// untouched; typing happens in the loader.
    pub fn register_csv(&self, view_name: &str, path: &Path) -> Result<()> {
        // Use forward slashes for DuckDB compatibility
        let path_str = path.to_string_lossy().replace('\\', "/");
        let reader = format!(
            "read_csv({}, header = true, all_varchar = true)",
            quote_literal(&path_str)
        );

        self.conn.execute_batch(&format!(
            "CREATE OR REPLACE VIEW {} AS SELECT * FROM {}",
            quote_ident(view_name),
            reader
        ))?;
        self.registered_views.borrow_mut().insert(view_name.to_string());
        eprintln!("Registered view: {} -> {}", view_name, path_str);

        Ok(())
    }

    /// Return the column names of a view, in declaration order.
    pub fn columns(&self, view_name: &str) -> Result<Vec<String>> {
        if !self.has_view(view_name) {
            return Err(LoadError::InvalidArgument(format!(
                "view '{}' is not registered",
                view_name
            )));
        }

        let mut stmt = self.conn.prepare(&format!(
            "SELECT column_name FROM (DESCRIBE SELECT * FROM {})",
            quote_ident(view_name)
        ))?;

        let mut rows = stmt.query([])?;
        let mut cols = Vec::new();
        while let Some(row) = rows.next()? {
            let name: String = row.get(0)?;
            cols.push(name);
        }
        Ok(cols)
    }

    /// Execute SQL and return results as a `Vec` of `HashMap`s.
    ///
    /// Each row is represented as a `HashMap<String, serde_json::Value>`.
    pub fn execute(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        let mut stmt = self.conn.prepare(sql)?;

        let param_values: Vec<&dyn duckdb::ToSql> = params
            .iter()
            .map(|p| p as &dyn duckdb::ToSql)
            .collect();

        let mut rows_result = stmt.query(param_values.as_slice())?;

        // Column metadata is only available once the query has run
        let column_names: Vec<String> = {
            let executed = rows_result.as_ref().ok_or_else(|| {
                LoadError::InvalidArgument("query returned no statement".into())
            })?;
            executed
                .column_names()
                .into_iter()
                .map(|s| s.to_string())
                .collect()
        };

        let mut out: Vec<HashMap<String, serde_json::Value>> = Vec::new();

        while let Some(row) = rows_result.next()? {
            let mut map = HashMap::with_capacity(column_names.len());
            for (i, col_name) in column_names.iter().enumerate() {
                map.insert(col_name.clone(), convert_value_ref(row.get_ref(i)?));
            }
            out.push(map);
        }

        Ok(out)
    }

    /// Execute SQL and deserialize each row into type `T`.
    pub fn execute_into<T: DeserializeOwned>(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Vec<T>> {
        let rows = self.execute(sql, params)?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let value = serde_json::Value::Object(
                row.into_iter().collect::<serde_json::Map<String, serde_json::Value>>(),
            );
            results.push(serde_json::from_value(value)?);
        }
        Ok(results)
    }

    /// Check whether a view has been registered.
    pub fn has_view(&self, name: &str) -> bool {
        self.registered_views.borrow().contains(name)
    }

    /// Return a list of all registered view names.
    pub fn views(&self) -> Vec<String> {
        self.registered_views.borrow().iter().cloned().collect()
    }
}

/// Convert a DuckDB `ValueRef` to a `serde_json::Value`.
///
/// Sources are registered with `all_varchar`, so every projected cell is
/// either text or NULL.
fn convert_value_ref(val: ValueRef<'_>) -> serde_json::Value {
    match val {
        ValueRef::Text(bytes) => serde_json::Value::String(String::from_utf8_lossy(bytes).into_owned()),
        _ => serde_json::Value::Null,
    }
}
