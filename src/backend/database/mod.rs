//! SQL storage for the record types.
//!
//! ```text
//! query_builder.rs, record_*.rs   shared clause and statement text
//!     ↓
//! sqlite/                         execution against a SqlitePool
//! ```

pub mod config;
pub mod query_builder;
pub mod record_delete;
pub mod record_insert;
pub mod record_read;
pub mod record_update;
pub mod sqlite;
pub mod value;

pub use config::DatabaseBackendConfig;
pub use query_builder::{build_filter_clause, build_order_clause, build_set_clause, SqlClause};
pub use record_delete::RecordDeleteProcessor;
pub use record_insert::RecordInsertProcessor;
pub use record_read::RecordReadProcessor;
pub use record_update::RecordUpdateProcessor;
pub use sqlite::SqliteBackend;
pub use value::{ColumnKind, SqlValue};
