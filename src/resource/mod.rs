use std::sync::Arc;

use crate::backend::database::SqliteBackend;

pub mod record;
pub mod root;

/// Shared handler state
pub type AppState = Arc<SqliteBackend>;
