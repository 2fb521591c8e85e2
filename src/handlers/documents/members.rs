use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::documents::service;
use crate::error::ApiError;
use crate::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct MemberSearchQuery {
    pub text: Option<String>,
}

/// GET /api/documents/:id/members?text= - search member emails, excluding
/// the requesting user
pub async fn members(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Query(query): Query<MemberSearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let text = query.text.unwrap_or_default();
    let emails = service::search_members(&id, &user.email, &text).await?;

    Ok(Json(json!({ "success": true, "data": emails })))
}
