use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::model::Produce;
use crate::store::{ProduceStore, StoreError};

/// Errors surfaced to HTTP clients
#[derive(Debug, Error)]
pub(crate) enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("produce not found")]
    NotFound,
    #[error("expected request with `Content-Type: application/json`")]
    UnsupportedMediaType,
    #[error(transparent)]
    MalformedRequest(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Store(err) => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::UnsupportedMediaType => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, self.to_string()).into_response()
            }
            ApiError::MalformedRequest(rejection) => {
                let status = match rejection {
                    JsonRejection::JsonDataError(_) => StatusCode::BAD_REQUEST,
                    _ => rejection.status(),
                };
                (status, rejection.body_text()).into_response()
            }
        }
    }
}

/// Whether the media type is exactly `application/json`, ignoring parameters
fn is_json_media_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|media_type| media_type.trim().eq_ignore_ascii_case("application/json"))
}

/// GET /produce
pub(crate) async fn handler_list_produce(
    State(store): State<Arc<ProduceStore>>,
) -> Json<Vec<Produce>> {
    Json(store.list())
}

/// GET /produce/:code
pub(crate) async fn handler_get_produce(
    State(store): State<Arc<ProduceStore>>,
    Path(code): Path<String>,
) -> Result<Json<Produce>, ApiError> {
    match store.get(&code) {
        Some(produce) => Ok(Json(produce)),
        None => {
            debug!("Produce {} not found", code);
            Err(ApiError::NotFound)
        }
    }
}

/// POST /produce with a JSON array of new or updated produce
pub(crate) async fn handler_upsert_produce(
    State(store): State<Arc<ProduceStore>>,
    headers: HeaderMap,
    payload: Result<Json<Vec<Produce>>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    if !is_json_media_type(&headers) {
        warn!("Rejecting produce request with unsupported content type");
        return Err(ApiError::UnsupportedMediaType);
    }

    let Json(batch) = payload.inspect_err(|rejection| {
        warn!("Rejecting malformed produce request: {}", rejection.body_text());
    })?;

    let summary = store.upsert(batch).inspect_err(|err| match err {
        StoreError::InvalidProductCode { code } => {
            warn!("Rejecting produce batch, invalid product code {:?}", code)
        }
    })?;
    if summary.overwritten > 0 {
        warn!("{} produce entries overwritten by upsert", summary.overwritten);
    }
    debug!("Upserted {} produce entries", summary.written);

    Ok(StatusCode::CREATED)
}

/// DELETE /produce/:code, succeeds whether or not the code exists
pub(crate) async fn handler_delete_produce(
    State(store): State<Arc<ProduceStore>>,
    Path(code): Path<String>,
) -> StatusCode {
    store.delete(&code);
    debug!("Deleted produce {}", code);
    StatusCode::OK
}
