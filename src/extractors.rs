use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{header, request::Parts},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::parser::QueryParams;

/// JSON body extractor that reports every decoding failure as
/// [`AppError::InvalidPayload`] in the API's error envelope
pub struct RecordJson<T>(pub T);

impl<T, S> FromRequest<S> for RecordJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(content_type) = req.headers().get(header::CONTENT_TYPE) {
            let media_type = content_type
                .to_str()
                .map_err(|_| AppError::InvalidPayload("unreadable Content-Type".to_string()))?
                .split(';')
                .next()
                .unwrap_or("")
                .trim()
                .to_lowercase();

            if media_type != "application/json" {
                return Err(AppError::InvalidPayload(
                    "Content-Type must be application/json".to_string(),
                ));
            }
        }

        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(RecordJson(value)),
            Err(rejection) => Err(AppError::InvalidPayload(rejection.body_text())),
        }
    }
}

/// Path identity parsed as a positive integer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordId(pub i64);

impl RecordId {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw.trim().parse::<i64>() {
            Ok(id) if id > 0 => Ok(RecordId(id)),
            _ => Err(AppError::InvalidIdentity(raw.to_string())),
        }
    }
}

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::InvalidIdentity(e.body_text()))?;
        RecordId::parse(&raw)
    }
}

impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(QueryParams::from_raw(parts.uri.query()))
    }
}
