//! Record types served by the API and their field metadata.
//!
//! The field maps are the only source of column names that may be
//! interpolated into SQL text. Request-facing names that are not listed here
//! never reach a query.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sqlx::FromRow;

use crate::backend::database::value::{ColumnKind, SqlValue};

use crate::backend::database::value::ColumnKind::{Integer, Text};

type FieldEntry = (&'static str, &'static str, ColumnKind);

/// Static mapping from request-facing field name to storage column and the
/// column's storage class
#[derive(Debug, Clone, Copy)]
pub struct FieldMap(&'static [FieldEntry]);

impl FieldMap {
    pub const fn new(fields: &'static [FieldEntry]) -> Self {
        FieldMap(fields)
    }

    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.column(field).map(|(column, _)| column)
    }

    pub fn column(&self, field: &str) -> Option<(&'static str, ColumnKind)> {
        self.0
            .iter()
            .find(|(name, _, _)| *name == field)
            .map(|(_, column, kind)| (*column, *kind))
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.0.iter().map(|(name, column, _)| (*name, *column))
    }
}

/// Capability the query builder is written against
pub trait FieldMetadata {
    /// Request-facing name of the identity field
    const IDENTITY: &'static str = "id";

    fn sortable_fields() -> FieldMap;
    fn filterable_fields() -> FieldMap;
}

/// A stored entity with a generated integer identity
pub trait Record: FieldMetadata + Serialize + DeserializeOwned + Send + Sync + 'static {
    const TABLE: &'static str;
    /// Capitalized singular name used in messages, e.g. "Student"
    const NAME: &'static str;
    /// Attribute columns in insert order, identity excluded
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> Option<i64>;
    fn set_id(&mut self, id: i64);

    /// Required attributes that are empty or zero
    fn missing_fields(&self) -> Vec<&'static str>;

    /// Attribute values in `COLUMNS` order
    fn values(&self) -> Vec<SqlValue>;
}

fn require_text(value: &str, field: &'static str, missing: &mut Vec<&'static str>) {
    if value.trim().is_empty() {
        missing.push(field);
    }
}

fn require_id(value: i64, field: &'static str, missing: &mut Vec<&'static str>) {
    if value == 0 {
        missing.push(field);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Teacher {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub classroom_id: i64,
    #[serde(default)]
    pub subject_id: i64,
}

const TEACHER_FIELDS: FieldMap = FieldMap::new(&[
    ("id", "id", Integer),
    ("first_name", "first_name", Text),
    ("last_name", "last_name", Text),
    ("email", "email", Text),
    ("classroom_id", "classroom_id", Integer),
    ("subject_id", "subject_id", Integer),
]);

impl FieldMetadata for Teacher {
    fn sortable_fields() -> FieldMap {
        TEACHER_FIELDS
    }

    fn filterable_fields() -> FieldMap {
        TEACHER_FIELDS
    }
}

impl Record for Teacher {
    const TABLE: &'static str = "teachers";
    const NAME: &'static str = "Teacher";
    const COLUMNS: &'static [&'static str] =
        &["first_name", "last_name", "email", "classroom_id", "subject_id"];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        require_text(&self.first_name, "first_name", &mut missing);
        require_text(&self.last_name, "last_name", &mut missing);
        require_text(&self.email, "email", &mut missing);
        require_id(self.classroom_id, "classroom_id", &mut missing);
        require_id(self.subject_id, "subject_id", &mut missing);
        missing
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.first_name.clone().into(),
            self.last_name.clone().into(),
            self.email.clone().into(),
            self.classroom_id.into(),
            self.subject_id.into(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Student {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub classroom_id: i64,
}

const STUDENT_FIELDS: FieldMap = FieldMap::new(&[
    ("id", "id", Integer),
    ("first_name", "first_name", Text),
    ("last_name", "last_name", Text),
    ("email", "email", Text),
    ("classroom_id", "classroom_id", Integer),
]);

impl FieldMetadata for Student {
    fn sortable_fields() -> FieldMap {
        STUDENT_FIELDS
    }

    fn filterable_fields() -> FieldMap {
        STUDENT_FIELDS
    }
}

impl Record for Student {
    const TABLE: &'static str = "students";
    const NAME: &'static str = "Student";
    const COLUMNS: &'static [&'static str] = &["first_name", "last_name", "email", "classroom_id"];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        require_text(&self.first_name, "first_name", &mut missing);
        require_text(&self.last_name, "last_name", &mut missing);
        require_text(&self.email, "email", &mut missing);
        require_id(self.classroom_id, "classroom_id", &mut missing);
        missing
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.first_name.clone().into(),
            self.last_name.clone().into(),
            self.email.clone().into(),
            self.classroom_id.into(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Classroom {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub room_number: String,
    #[serde(default)]
    pub building: String,
    #[serde(default)]
    pub capacity: i64,
}

const CLASSROOM_FIELDS: FieldMap = FieldMap::new(&[
    ("id", "id", Integer),
    ("room_number", "room_number", Text),
    ("building", "building", Text),
    ("capacity", "capacity", Integer),
]);

impl FieldMetadata for Classroom {
    fn sortable_fields() -> FieldMap {
        CLASSROOM_FIELDS
    }

    fn filterable_fields() -> FieldMap {
        CLASSROOM_FIELDS
    }
}

impl Record for Classroom {
    const TABLE: &'static str = "classrooms";
    const NAME: &'static str = "Classroom";
    const COLUMNS: &'static [&'static str] = &["room_number", "building", "capacity"];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        require_text(&self.room_number, "room_number", &mut missing);
        require_text(&self.building, "building", &mut missing);
        require_id(self.capacity, "capacity", &mut missing);
        missing
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.room_number.clone().into(),
            self.building.clone().into(),
            self.capacity.into(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Subject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub total_hours: i64,
}

const SUBJECT_FIELDS: FieldMap = FieldMap::new(&[
    ("id", "id", Integer),
    ("name", "name", Text),
    ("description", "description", Text),
    ("total_hours", "total_hours", Integer),
]);

impl FieldMetadata for Subject {
    fn sortable_fields() -> FieldMap {
        SUBJECT_FIELDS
    }

    fn filterable_fields() -> FieldMap {
        SUBJECT_FIELDS
    }
}

impl Record for Subject {
    const TABLE: &'static str = "subjects";
    const NAME: &'static str = "Subject";
    const COLUMNS: &'static [&'static str] = &["name", "description", "total_hours"];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        require_text(&self.name, "name", &mut missing);
        require_text(&self.description, "description", &mut missing);
        require_id(self.total_hours, "total_hours", &mut missing);
        missing
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.name.clone().into(),
            self.description.clone().into(),
            self.total_hours.into(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Executive {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub role: String,
}

const EXECUTIVE_FIELDS: FieldMap = FieldMap::new(&[
    ("id", "id", Integer),
    ("first_name", "first_name", Text),
    ("last_name", "last_name", Text),
    ("email", "email", Text),
    ("username", "username", Text),
    ("role", "role", Text),
]);

impl FieldMetadata for Executive {
    fn sortable_fields() -> FieldMap {
        EXECUTIVE_FIELDS
    }

    fn filterable_fields() -> FieldMap {
        EXECUTIVE_FIELDS
    }
}

impl Record for Executive {
    const TABLE: &'static str = "executives";
    const NAME: &'static str = "Executive";
    const COLUMNS: &'static [&'static str] =
        &["first_name", "last_name", "email", "username", "role"];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        require_text(&self.first_name, "first_name", &mut missing);
        require_text(&self.last_name, "last_name", &mut missing);
        require_text(&self.email, "email", &mut missing);
        require_text(&self.username, "username", &mut missing);
        require_text(&self.role, "role", &mut missing);
        missing
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.first_name.clone().into(),
            self.last_name.clone().into(),
            self.email.clone().into(),
            self.username.clone().into(),
            self.role.clone().into(),
        ]
    }
}
