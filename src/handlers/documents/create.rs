use axum::{http::StatusCode, response::IntoResponse, Extension, Json};
use serde_json::json;

use crate::documents::service;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// POST /api/documents - create a document owned by the caller
pub async fn create(Extension(user): Extension<AuthUser>) -> Result<impl IntoResponse, ApiError> {
    let room = service::create(&user.user_id, &user.email).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": room })),
    ))
}
