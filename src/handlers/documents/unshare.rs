use axum::{extract::Path, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::documents::service;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct UnshareRequest {
    pub email: String,
}

/// POST /api/documents/:id/unshare - revoke a collaborator's access
pub async fn unshare(
    Path(id): Path<String>,
    Json(body): Json<UnshareRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let room = service::remove_collaborator(&id, &body.email).await?;

    Ok(Json(json!({ "success": true, "data": room })))
}
