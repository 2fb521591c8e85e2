use axum::{extract::Path, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::documents::service;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct UpdateTitleRequest {
    pub title: String,
}

/// PATCH /api/documents/:id - rename a document
pub async fn update(
    Path(id): Path<String>,
    Json(body): Json<UpdateTitleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let room = service::update_title(&id, &body.title).await?;

    Ok(Json(json!({ "success": true, "data": room })))
}
