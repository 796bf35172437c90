//! Translates request input into parameterized SQL fragments.
//!
//! Column names are taken from a record's [`FieldMap`](crate::models::FieldMap)
//! and are the only text interpolated into the clause. Every request-supplied
//! value is returned separately and bound to a `?` placeholder.

use serde_json::Value;

use super::value::SqlValue;
use crate::error::{AppError, AppResult};
use crate::models::FieldMetadata;
use crate::parser::{QueryParams, SortSpec};

/// Query parameter carrying `field:direction` sort entries
pub const SORT_PARAM: &str = "sort_by";

/// SQL text plus the values bound to its placeholders, in order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlClause {
    pub text: String,
    pub values: Vec<SqlValue>,
}

impl SqlClause {
    pub fn placeholder_count(&self) -> usize {
        self.text.matches('?').count()
    }
}

fn parse_identity(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

/// Build a `WHERE ... AND ...` clause from the filterable query parameters.
///
/// Identity values are parsed as positive integers and combined with `IN`;
/// unparsable identities are dropped. Other fields use their first value with
/// `=`. Fails with [`AppError::NoValidFilters`] when nothing was accepted, so a
/// mutating statement can never run unconstrained.
pub fn build_filter_clause<M: FieldMetadata>(params: &QueryParams) -> AppResult<SqlClause> {
    let fields = M::filterable_fields();
    let mut conditions: Vec<String> = Vec::new();
    let mut values: Vec<SqlValue> = Vec::new();

    for (key, key_values) in params.iter() {
        let Some(column) = fields.get(key) else {
            continue;
        };

        if key == M::IDENTITY {
            let ids: Vec<i64> = key_values
                .iter()
                .filter_map(|v| parse_identity(v))
                .collect();
            if ids.is_empty() {
                continue;
            }
            let placeholders = vec!["?"; ids.len()].join(", ");
            conditions.push(format!("{} IN ({})", column, placeholders));
            values.extend(ids.into_iter().map(SqlValue::Integer));
        } else if let Some(first) = key_values.first() {
            conditions.push(format!("{} = ?", column));
            values.push(SqlValue::Text(first.clone()));
        }
    }

    if conditions.is_empty() {
        return Err(AppError::NoValidFilters);
    }

    Ok(SqlClause {
        text: format!(" WHERE {}", conditions.join(" AND ")),
        values,
    })
}

/// Build an ` ORDER BY` clause from the repeated `sort_by` parameter.
///
/// Malformed entries, unknown fields and unknown directions are skipped.
/// Returns an empty string when no entry is accepted.
pub fn build_order_clause<M: FieldMetadata>(params: &QueryParams) -> String {
    let fields = M::sortable_fields();

    let terms: Vec<String> = SortSpec::from_params(params.get_all(SORT_PARAM))
        .into_iter()
        .filter_map(|spec| {
            fields
                .get(&spec.attribute)
                .map(|column| format!("{} {}", column, spec.order.as_sql()))
        })
        .collect();

    if terms.is_empty() {
        String::new()
    } else {
        format!(" ORDER BY {}", terms.join(", "))
    }
}

/// Build the assignment list of an `UPDATE ... SET` from a JSON patch.
///
/// Keys outside the filterable fields are dropped, as is the identity field.
/// Every accepted value must match its column's kind; a null, a compound
/// value or a mistyped scalar fails with [`AppError::InvalidPayload`]. Fails
/// with [`AppError::NoValidFields`] when no assignment remains.
pub fn build_set_clause<M: FieldMetadata>(patch: &Value) -> AppResult<SqlClause> {
    let object = patch
        .as_object()
        .ok_or_else(|| AppError::InvalidPayload("expected a JSON object".to_string()))?;
    let fields = M::filterable_fields();
    let mut assignments: Vec<String> = Vec::new();
    let mut values: Vec<SqlValue> = Vec::new();

    for (key, value) in object {
        if key == M::IDENTITY {
            continue;
        }
        let Some((column, kind)) = fields.column(key) else {
            continue;
        };
        let value = SqlValue::from_json(value, kind).ok_or_else(|| {
            AppError::InvalidPayload(format!("field '{}' must be {}", key, kind.describe()))
        })?;
        assignments.push(format!("{} = ?", column));
        values.push(value);
    }

    if assignments.is_empty() {
        return Err(AppError::NoValidFields);
    }

    Ok(SqlClause {
        text: assignments.join(", "),
        values,
    })
}
