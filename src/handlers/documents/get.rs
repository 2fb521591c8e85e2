use axum::{extract::Path, response::IntoResponse, Extension, Json};
use serde_json::json;

use crate::documents::service;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// GET /api/documents/:id - fetch one document, members only
pub async fn get(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let room = service::get(&id, &user.email).await?;

    Ok(Json(json!({ "success": true, "data": room })))
}
