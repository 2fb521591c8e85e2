use axum::{extract::Query, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::documents::service;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    /// Comma-separated email list; output order mirrors this order.
    pub emails: String,
}

/// GET /api/users?emails=a,b,c - resolve emails to display profiles
pub async fn resolve(Query(query): Query<ResolveQuery>) -> Result<impl IntoResponse, ApiError> {
    let emails: Vec<String> = query
        .emails
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if emails.is_empty() {
        return Err(ApiError::bad_request("emails query parameter is required"));
    }

    let profiles = service::resolve(&emails).await?;

    Ok(Json(json!({ "success": true, "data": profiles })))
}
