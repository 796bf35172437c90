pub mod arguments;
pub mod backend_impl;
pub mod schema;

pub use backend_impl::{SqliteBackend, SqliteRecord};
