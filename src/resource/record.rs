//! HTTP handlers shared by every record type.
//!
//! Each handler is generic over the record; `record_routes::<T>()` mounts the
//! collection and item routes at `/{table}` and `/{table}/{id}`.

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};

use super::AppState;
use crate::backend::database::SqliteBackend;
use crate::backend::RecordBackend;
use crate::error::AppResult;
use crate::extractors::{RecordId, RecordJson};
use crate::models::Record;
use crate::parser::QueryParams;

/// Success envelope: `{status, count?, data}`
#[derive(Debug, Serialize)]
pub struct Envelope<D> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub data: D,
}

impl<T> Envelope<Vec<T>> {
    pub fn many(data: Vec<T>) -> Self {
        Envelope {
            status: "success",
            count: Some(data.len()),
            data,
        }
    }
}

impl<T> Envelope<T> {
    pub fn one(data: T) -> Self {
        Envelope {
            status: "success",
            count: None,
            data,
        }
    }
}

pub fn record_routes<T>() -> Router<AppState>
where
    T: Record,
    SqliteBackend: RecordBackend<T>,
{
    Router::new()
        .route(
            &format!("/{}", T::TABLE),
            get(list_records::<T>)
                .post(create_records::<T>)
                .patch(patch_records::<T>)
                .delete(delete_records::<T>),
        )
        .route(
            &format!("/{}/{{id}}", T::TABLE),
            get(get_record::<T>)
                .put(replace_record::<T>)
                .patch(patch_record::<T>)
                .delete(delete_record::<T>),
        )
}

pub async fn list_records<T>(
    State(backend): State<AppState>,
    params: QueryParams,
) -> AppResult<Json<Envelope<Vec<T>>>>
where
    T: Record,
    SqliteBackend: RecordBackend<T>,
{
    let records = RecordBackend::<T>::list(backend.as_ref(), &params).await?;
    Ok(Json(Envelope::many(records)))
}

pub async fn get_record<T>(
    State(backend): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Json<Envelope<T>>>
where
    T: Record,
    SqliteBackend: RecordBackend<T>,
{
    let record = RecordBackend::<T>::get(backend.as_ref(), id).await?;
    Ok(Json(Envelope::one(record)))
}

pub async fn create_records<T>(
    State(backend): State<AppState>,
    RecordJson(records): RecordJson<Vec<T>>,
) -> AppResult<(StatusCode, Json<Envelope<Vec<T>>>)>
where
    T: Record,
    SqliteBackend: RecordBackend<T>,
{
    let created = RecordBackend::<T>::create_many(backend.as_ref(), records).await?;
    Ok((StatusCode::CREATED, Json(Envelope::many(created))))
}

pub async fn replace_record<T>(
    State(backend): State<AppState>,
    RecordId(id): RecordId,
    RecordJson(record): RecordJson<T>,
) -> AppResult<Json<Envelope<T>>>
where
    T: Record,
    SqliteBackend: RecordBackend<T>,
{
    let updated = RecordBackend::<T>::replace_one(backend.as_ref(), id, record).await?;
    Ok(Json(Envelope::one(updated)))
}

pub async fn patch_record<T>(
    State(backend): State<AppState>,
    RecordId(id): RecordId,
    RecordJson(patch): RecordJson<Value>,
) -> AppResult<Json<Envelope<T>>>
where
    T: Record,
    SqliteBackend: RecordBackend<T>,
{
    let updated = RecordBackend::<T>::patch_one(backend.as_ref(), id, &patch).await?;
    Ok(Json(Envelope::one(updated)))
}

pub async fn patch_records<T>(
    State(backend): State<AppState>,
    params: QueryParams,
    RecordJson(patch): RecordJson<Value>,
) -> AppResult<Json<Envelope<Vec<T>>>>
where
    T: Record,
    SqliteBackend: RecordBackend<T>,
{
    let updated = RecordBackend::<T>::patch_many(backend.as_ref(), &params, &patch).await?;
    Ok(Json(Envelope::many(updated)))
}

pub async fn delete_record<T>(
    State(backend): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Json<Value>>
where
    T: Record,
    SqliteBackend: RecordBackend<T>,
{
    RecordBackend::<T>::delete_one(backend.as_ref(), id).await?;
    Ok(Json(json!({ "status": "success", "id": id })))
}

pub async fn delete_records<T>(
    State(backend): State<AppState>,
    params: QueryParams,
) -> AppResult<Json<Value>>
where
    T: Record,
    SqliteBackend: RecordBackend<T>,
{
    let deleted = RecordBackend::<T>::delete_many(backend.as_ref(), &params).await?;
    Ok(Json(json!({ "status": "success", "count_deleted": deleted })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Subject;

    #[test]
    fn test_envelope_many_includes_count() {
        let value = serde_json::to_value(Envelope::many(vec![1, 2, 3])).unwrap();
        assert_eq!(value, json!({"status": "success", "count": 3, "data": [1, 2, 3]}));
    }

    #[test]
    fn test_envelope_one_omits_count() {
        let subject = Subject {
            id: Some(2),
            name: "Art".to_string(),
            description: "Drawing".to_string(),
            total_hours: 10,
        };
        let value = serde_json::to_value(Envelope::one(subject)).unwrap();

        assert!(value.get("count").is_none());
        assert_eq!(value["data"]["id"], 2);
    }
}
