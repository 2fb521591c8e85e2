use axum::{extract::Path, response::Redirect};

use crate::documents::service;
use crate::error::ApiError;

/// DELETE /api/documents/:id - delete a document and send the caller home
pub async fn delete(Path(id): Path<String>) -> Result<Redirect, ApiError> {
    service::delete(&id).await?;

    Ok(Redirect::to("/"))
}
