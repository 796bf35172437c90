use super::query_builder::SqlClause;
use crate::error::AppError;
use crate::models::Record;

/// Shared SQL text for record reads
pub struct RecordReadProcessor;

impl RecordReadProcessor {
    /// `id, <columns...>` in the order rows are mapped back into `T`
    pub fn select_columns<T: Record>() -> String {
        std::iter::once(T::IDENTITY)
            .chain(T::COLUMNS.iter().copied())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Select every row matching `filter`, ordered by `order`
    pub fn select_filtered_sql<T: Record>(filter: &SqlClause, order: &str) -> String {
        format!(
            "SELECT {} FROM {}{}{}",
            Self::select_columns::<T>(),
            T::TABLE,
            filter.text,
            order
        )
    }

    pub fn select_by_id_sql<T: Record>() -> String {
        format!(
            "SELECT {} FROM {} WHERE {} = ?",
            Self::select_columns::<T>(),
            T::TABLE,
            T::IDENTITY
        )
    }

    pub fn not_found<T: Record>() -> AppError {
        AppError::NotFound(format!("{} not found", T::NAME))
    }
}
