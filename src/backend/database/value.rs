use serde_json::Value;

/// Storage class of a NOT NULL attribute column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Text,
}

impl ColumnKind {
    pub fn describe(self) -> &'static str {
        match self {
            ColumnKind::Integer => "an integer",
            ColumnKind::Text => "a string",
        }
    }
}

/// A value bound to a `?` placeholder. Request data only ever reaches SQL
/// through this type.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Integer(i64),
    Text(String),
}

impl SqlValue {
    /// Convert a JSON value destined for a column of `kind`.
    ///
    /// Returns `None` for nulls, compound values and scalars of the wrong
    /// type. Numbers must be whole and fit in an `i64`.
    pub fn from_json(value: &Value, kind: ColumnKind) -> Option<SqlValue> {
        match (kind, value) {
            (ColumnKind::Integer, Value::Number(n)) => n.as_i64().map(SqlValue::Integer),
            (ColumnKind::Text, Value::String(s)) => Some(SqlValue::Text(s.clone())),
            _ => None,
        }
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}
