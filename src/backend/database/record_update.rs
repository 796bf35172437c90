use serde_json::Value;

use super::query_builder::{build_set_clause, SqlClause};
use super::value::SqlValue;
use crate::error::AppResult;
use crate::models::Record;

/// Shared business logic for record UPDATE operations
pub struct RecordUpdateProcessor;

impl RecordUpdateProcessor {
    /// Build the SET clause for a partial update, failing before any
    /// transaction is opened when nothing is settable
    pub fn prepare_patch<T: Record>(patch: &Value) -> AppResult<SqlClause> {
        build_set_clause::<T>(patch)
    }

    /// `UPDATE <table> SET <set> WHERE id = ?`
    pub fn update_by_id_sql<T: Record>(set: &SqlClause) -> String {
        format!(
            "UPDATE {} SET {} WHERE {} = ?",
            T::TABLE,
            set.text,
            T::IDENTITY
        )
    }

    /// Full replacement writes every column
    pub fn replace_by_id_sql<T: Record>() -> String {
        let assignments = T::COLUMNS
            .iter()
            .map(|column| format!("{} = ?", column))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "UPDATE {} SET {} WHERE {} = ?",
            T::TABLE,
            assignments,
            T::IDENTITY
        )
    }

    /// Set values followed by the row identity
    pub fn bind_values(set: &SqlClause, id: i64) -> Vec<SqlValue> {
        let mut values = set.values.clone();
        values.push(SqlValue::Integer(id));
        values
    }
}
