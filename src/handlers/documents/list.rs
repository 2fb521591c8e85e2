use axum::{response::IntoResponse, Extension, Json};
use serde_json::json;

use crate::documents::service;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// GET /api/documents - list documents where the caller is a member
pub async fn list(Extension(user): Extension<AuthUser>) -> Result<impl IntoResponse, ApiError> {
    let rooms = service::list(&user.email).await?;

    Ok(Json(json!({ "success": true, "data": rooms })))
}
