use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ontid_common::Ddo;
use ontid_common::did::is_ont_did;
use tracing::info;

use crate::error::AppError;
use crate::server::AppState;

/// Media type for resolved DID Documents.
const DID_DOCUMENT_CONTENT_TYPE: &str = "application/did+ld+json";

/// GET /1.0/identifiers/{did}
pub async fn resolve_did(
    State(state): State<AppState>,
    Path(did): Path<String>,
) -> Result<Response, AppError> {
    if !is_ont_did(&did) {
        return Err(AppError::InvalidDid(did));
    }

    let raw = state
        .ledger
        .lookup_ddo(&did)
        .await
        .map_err(AppError::Ledger)?
        .ok_or_else(|| AppError::NotFound(did.clone()))?;

    let document = Ddo::decode(&did, &raw)
        .and_then(Ddo::into_document)
        .map_err(AppError::Resolution)?;
    let body = document.to_json_pretty().map_err(AppError::Resolution)?;

    info!(%did, "resolved");

    Ok((
        StatusCode::OK,
        [("content-type", DID_DOCUMENT_CONTENT_TYPE)],
        body,
    )
        .into_response())
}
