use axum::{extract::Path, response::IntoResponse, Extension, Json};
use serde::Deserialize;
use serde_json::json;

use crate::documents::{service, UserType};
use crate::error::ApiError;
use crate::identity::UserProfile;
use crate::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct ShareRequest {
    pub email: String,
    pub user_type: UserType,
}

/// POST /api/documents/:id/share - grant a role to a user and notify them
pub async fn share(
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<ShareRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let updated_by = actor_profile(&user).await?;
    let room = service::share(&id, &body.email, body.user_type, &updated_by).await?;

    Ok(Json(json!({ "success": true, "data": room })))
}

/// The notification names whoever granted access. Resolve the caller's
/// profile; if the identity provider has no record, fall back to the
/// session identity.
async fn actor_profile(user: &AuthUser) -> Result<UserProfile, ApiError> {
    let resolved = service::resolve(&[user.email.clone()]).await?;

    Ok(resolved
        .into_iter()
        .next()
        .flatten()
        .unwrap_or_else(|| UserProfile {
            id: user.user_id.clone(),
            name: user.email.clone(),
            email: user.email.clone(),
            avatar: String::new(),
        }))
}
