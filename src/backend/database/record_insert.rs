use crate::error::{AppError, AppResult};
use crate::models::Record;

/// Shared business logic for record INSERT operations
pub struct RecordInsertProcessor;

impl RecordInsertProcessor {
    /// Reject an empty batch before a transaction is opened
    pub fn check_batch<T: Record>(records: &[T]) -> AppResult<()> {
        if records.is_empty() {
            return Err(AppError::EmptyInput);
        }
        Ok(())
    }

    /// Validate one record's required fields.
    ///
    /// Any client-supplied identity is discarded; the store assigns it.
    pub fn prepare_record<T: Record>(record: &T) -> AppResult<()> {
        let missing = record.missing_fields();
        if !missing.is_empty() {
            return Err(AppError::InvalidPayload(format!(
                "{} is missing required fields: {}",
                T::NAME,
                missing.join(", ")
            )));
        }
        Ok(())
    }

    pub fn insert_sql<T: Record>() -> String {
        let placeholders = vec!["?"; T::COLUMNS.len()].join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            T::TABLE,
            T::COLUMNS.join(", "),
            placeholders
        )
    }
}
