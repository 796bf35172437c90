use super::query_builder::SqlClause;
use crate::models::Record;

/// Shared SQL text for record DELETE operations
pub struct RecordDeleteProcessor;

impl RecordDeleteProcessor {
    pub fn delete_by_id_sql<T: Record>() -> String {
        format!("DELETE FROM {} WHERE {} = ?", T::TABLE, T::IDENTITY)
    }

    /// A filter is mandatory; see `build_filter_clause`
    pub fn delete_filtered_sql<T: Record>(filter: &SqlClause) -> String {
        format!("DELETE FROM {}{}", T::TABLE, filter.text)
    }
}
