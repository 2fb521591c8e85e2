use axum::{
    extract::Path,
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;

use crate::cache;
use crate::documents::{role_of, service};
use crate::error::ApiError;
use crate::middleware;

/// GET /documents/:id - document page data. Unauthenticated callers are sent
/// to sign-in; missing or inaccessible documents fall back to home. The
/// caller's role is computed from the access map and returned with the room.
pub async fn document_page(headers: HeaderMap, Path(id): Path<String>) -> Response {
    let user = match middleware::authenticate(&headers) {
        Ok(user) => user,
        Err(_) => return Redirect::to("/sign-in").into_response(),
    };

    let cache_key = format!("/documents/{}?user={}", id, user.email);
    if let Some(cached) = cache::page_cache().get(&cache_key).await {
        return Json(json!({ "success": true, "data": cached })).into_response();
    }

    let room = match service::get(&id, &user.email).await {
        Ok(room) => room,
        Err(e) if e.hides_document() => return Redirect::to("/").into_response(),
        Err(e) => return ApiError::from(e).into_response(),
    };

    let role = role_of(&room, &user.email);
    let view = json!({
        "room": room,
        "currentUserRole": role,
    });

    cache::page_cache().put(cache_key, view.clone()).await;

    Json(json!({ "success": true, "data": view })).into_response()
}

/// GET /dashboard - home listing for the authenticated user
pub async fn dashboard(headers: HeaderMap) -> Response {
    let user = match middleware::authenticate(&headers) {
        Ok(user) => user,
        Err(_) => return Redirect::to("/sign-in").into_response(),
    };

    let cache_key = format!("/dashboard?user={}", user.email);
    if let Some(cached) = cache::page_cache().get(&cache_key).await {
        return Json(json!({ "success": true, "data": cached })).into_response();
    }

    let rooms = match service::list(&user.email).await {
        Ok(rooms) => rooms,
        Err(e) => return ApiError::from(e).into_response(),
    };

    let view = json!(rooms);
    cache::page_cache().put(cache_key, view.clone()).await;

    Json(json!({ "success": true, "data": view })).into_response()
}
