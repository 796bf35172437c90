use async_trait::async_trait;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{FromRow, SqliteConnection, SqlitePool};
use std::str::FromStr;

use super::arguments::to_arguments;
use super::schema;
use crate::backend::database::config::DatabaseBackendConfig;
use crate::backend::database::query_builder::{build_filter_clause, build_order_clause};
use crate::backend::database::value::SqlValue;
use crate::backend::database::{
    RecordDeleteProcessor, RecordInsertProcessor, RecordReadProcessor, RecordUpdateProcessor,
};
use crate::backend::{Backend, RecordBackend};
use crate::error::{AppError, AppResult};
use crate::models::Record;
use crate::parser::QueryParams;

/// A record type that can be decoded from a SQLite row
pub trait SqliteRecord: Record + for<'r> FromRow<'r, SqliteRow> + Send + Unpin {}

impl<T> SqliteRecord for T where T: Record + for<'r> FromRow<'r, SqliteRow> + Send + Unpin {}

/// SQLite database backend implementation
pub struct SqliteBackend {
    pool: SqlitePool,
}

impl SqliteBackend {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the connection pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn fetch_by_id<T: SqliteRecord>(
        conn: &mut SqliteConnection,
        id: i64,
    ) -> AppResult<Option<T>> {
        let sql = RecordReadProcessor::select_by_id_sql::<T>();
        let record = sqlx::query_as_with::<_, T, _>(&sql, to_arguments(&[SqlValue::Integer(id)])?)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(record)
    }

    async fn require_by_id<T: SqliteRecord>(conn: &mut SqliteConnection, id: i64) -> AppResult<T> {
        Self::fetch_by_id::<T>(conn, id)
            .await?
            .ok_or_else(RecordReadProcessor::not_found::<T>)
    }
}

#[async_trait]
impl Backend for SqliteBackend {
    async fn connect(config: &DatabaseBackendConfig) -> AppResult<Self> {
        config
            .validate()
            .map_err(|e| AppError::Configuration(format!("Invalid backend config: {}", e)))?;

        let options = SqliteConnectOptions::from_str(&config.connection_url)
            .map_err(|e| AppError::Configuration(format!("Invalid SQLite URL: {}", e)))?
            .create_if_missing(true);

        let mut pool_options = SqlitePoolOptions::new().acquire_timeout(config.acquire_timeout());
        pool_options = if config.is_memory_database() {
            pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options.max_connections(config.max_connections)
        };

        let pool = pool_options.connect_with(options).await?;
        tracing::info!(url = %config.connection_url, "connected to SQLite");

        Ok(Self::new(pool))
    }

    async fn health_check(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn init_schema(&self) -> AppResult<()> {
        schema::init_schema(&self.pool).await
    }

    async fn cleanup(&self) -> AppResult<()> {
        self.pool.close().await;
        Ok(())
    }
}

#[async_trait]
impl<T: SqliteRecord> RecordBackend<T> for SqliteBackend {
    async fn list(&self, params: &QueryParams) -> AppResult<Vec<T>> {
        let filter = build_filter_clause::<T>(params)?;
        let order = build_order_clause::<T>(params);
        let sql = RecordReadProcessor::select_filtered_sql::<T>(&filter, &order);
        tracing::debug!(table = T::TABLE, %sql, "list");

        let records = sqlx::query_as_with::<_, T, _>(&sql, to_arguments(&filter.values)?)
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    async fn get(&self, id: i64) -> AppResult<T> {
        let mut conn = self.pool.acquire().await?;
        Self::require_by_id::<T>(&mut conn, id).await
    }

    async fn create_many(&self, records: Vec<T>) -> AppResult<Vec<T>> {
        RecordInsertProcessor::check_batch(&records)?;
        let sql = RecordInsertProcessor::insert_sql::<T>();

        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(records.len());
        for mut record in records {
            RecordInsertProcessor::prepare_record(&record)?;
            let result = sqlx::query_with(&sql, to_arguments(&record.values())?)
                .execute(&mut *tx)
                .await?;
            record.set_id(result.last_insert_rowid());
            created.push(record);
        }
        tx.commit().await?;

        tracing::info!(table = T::TABLE, count = created.len(), "records created");
        Ok(created)
    }

    async fn replace_one(&self, id: i64, record: T) -> AppResult<T> {
        RecordInsertProcessor::prepare_record(&record)?;
        let sql = RecordUpdateProcessor::replace_by_id_sql::<T>();
        let mut values = record.values();
        values.push(SqlValue::Integer(id));

        let mut tx = self.pool.begin().await?;
        Self::require_by_id::<T>(&mut tx, id).await?;
        sqlx::query_with(&sql, to_arguments(&values)?)
            .execute(&mut *tx)
            .await?;
        let updated = Self::require_by_id::<T>(&mut tx, id).await?;
        tx.commit().await?;

        Ok(updated)
    }

    async fn patch_one(&self, id: i64, patch: &Value) -> AppResult<T> {
        let set = RecordUpdateProcessor::prepare_patch::<T>(patch)?;
        let sql = RecordUpdateProcessor::update_by_id_sql::<T>(&set);
        let values = RecordUpdateProcessor::bind_values(&set, id);

        let mut tx = self.pool.begin().await?;
        Self::require_by_id::<T>(&mut tx, id).await?;
        sqlx::query_with(&sql, to_arguments(&values)?)
            .execute(&mut *tx)
            .await?;
        let updated = Self::require_by_id::<T>(&mut tx, id).await?;
        tx.commit().await?;

        Ok(updated)
    }

    async fn patch_many(&self, params: &QueryParams, patch: &Value) -> AppResult<Vec<T>> {
        let set = RecordUpdateProcessor::prepare_patch::<T>(patch)?;
        let filter = build_filter_clause::<T>(params)?;
        let select_sql = RecordReadProcessor::select_filtered_sql::<T>(&filter, "");
        let update_sql = RecordUpdateProcessor::update_by_id_sql::<T>(&set);

        let mut tx = self.pool.begin().await?;
        let matches = sqlx::query_as_with::<_, T, _>(&select_sql, to_arguments(&filter.values)?)
            .fetch_all(&mut *tx)
            .await?;
        if matches.is_empty() {
            return Err(RecordReadProcessor::not_found::<T>());
        }

        let mut updated = Vec::with_capacity(matches.len());
        for record in &matches {
            let id = record
                .id()
                .ok_or_else(|| AppError::Internal(format!("{} row without id", T::NAME)))?;
            let values = RecordUpdateProcessor::bind_values(&set, id);
            sqlx::query_with(&update_sql, to_arguments(&values)?)
                .execute(&mut *tx)
                .await?;
            updated.push(Self::require_by_id::<T>(&mut tx, id).await?);
        }
        tx.commit().await?;

        tracing::info!(table = T::TABLE, count = updated.len(), "records patched");
        Ok(updated)
    }

    async fn delete_one(&self, id: i64) -> AppResult<()> {
        let sql = RecordDeleteProcessor::delete_by_id_sql::<T>();

        let mut tx = self.pool.begin().await?;
        Self::require_by_id::<T>(&mut tx, id).await?;
        sqlx::query_with(&sql, to_arguments(&[SqlValue::Integer(id)])?)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(())
    }

    async fn delete_many(&self, params: &QueryParams) -> AppResult<u64> {
        let filter = build_filter_clause::<T>(params)?;
        let sql = RecordDeleteProcessor::delete_filtered_sql::<T>(&filter);

        let mut tx = self.pool.begin().await?;
        let result = sqlx::query_with(&sql, to_arguments(&filter.values)?)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RecordReadProcessor::not_found::<T>());
        }
        tx.commit().await?;

        tracing::info!(table = T::TABLE, count = result.rows_affected(), "records deleted");
        Ok(result.rows_affected())
    }
}
