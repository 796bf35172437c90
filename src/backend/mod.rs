use crate::backend::database::DatabaseBackendConfig;
use crate::error::AppResult;
use crate::models::Record;
use crate::parser::QueryParams;
use async_trait::async_trait;
use serde_json::Value;

pub mod database;

/// Storage lifecycle shared by every backend
#[async_trait]
pub trait Backend: Send + Sync {
    /// Connect and initialize the storage backend
    async fn connect(config: &DatabaseBackendConfig) -> AppResult<Self>
    where
        Self: Sized;

    /// Check if the storage backend is healthy and accessible
    async fn health_check(&self) -> AppResult<()>;

    /// Create the entity tables if they do not exist yet
    async fn init_schema(&self) -> AppResult<()>;

    /// Clean up resources when storage is no longer needed
    async fn cleanup(&self) -> AppResult<()> {
        Ok(())
    }
}

/// CRUD operations for one record type.
///
/// Every multi-statement operation runs inside a single transaction; an error
/// or a dropped future leaves the store unchanged.
#[async_trait]
pub trait RecordBackend<T: Record>: Backend {
    /// Records matching the filterable query parameters, ordered by `sort_by`
    async fn list(&self, params: &QueryParams) -> AppResult<Vec<T>>;

    async fn get(&self, id: i64) -> AppResult<T>;

    /// Insert every record or none of them
    async fn create_many(&self, records: Vec<T>) -> AppResult<Vec<T>>;

    /// Overwrite every attribute of an existing record
    async fn replace_one(&self, id: i64, record: T) -> AppResult<T>;

    async fn patch_one(&self, id: i64, patch: &Value) -> AppResult<T>;

    /// Apply `patch` to every record matching the filter
    async fn patch_many(&self, params: &QueryParams, patch: &Value) -> AppResult<Vec<T>>;

    async fn delete_one(&self, id: i64) -> AppResult<()>;

    /// Delete every record matching the filter, returning the count
    async fn delete_many(&self, params: &QueryParams) -> AppResult<u64>;
}
