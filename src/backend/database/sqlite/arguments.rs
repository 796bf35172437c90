use sqlx::sqlite::SqliteArguments;
use sqlx::Arguments;

use crate::backend::database::value::SqlValue;
use crate::error::{AppError, AppResult};

/// Bind values to positional `?` placeholders, in order
pub fn to_arguments<'q>(values: &[SqlValue]) -> AppResult<SqliteArguments<'q>> {
    let mut args = SqliteArguments::default();
    for value in values {
        let bound = match value {
            SqlValue::Integer(v) => args.add(*v),
            SqlValue::Text(v) => args.add(v.clone()),
        };
        bound.map_err(|e| AppError::Internal(format!("Failed to bind argument: {}", e)))?;
    }
    Ok(args)
}
