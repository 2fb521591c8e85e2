use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use livedocs_api::config;
use livedocs_api::handlers;
use livedocs_api::middleware::jwt_auth_middleware;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up provider keys and JWT_SECRET
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting LiveDocs API in {:?} mode", config.environment);

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("LIVEDOCS_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("LiveDocs API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Page surface (redirect-based auth)
        .merge(page_routes())
        // Protected API (bearer token)
        .merge(document_routes())
        .merge(user_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn page_routes() -> Router {
    use handlers::pages;

    Router::new()
        .route("/documents/:id", get(pages::document_page))
        .route("/dashboard", get(pages::dashboard))
}

fn document_routes() -> Router {
    use axum::routing::post;
    use handlers::documents;

    Router::new()
        .route(
            "/api/documents",
            get(documents::document_list).post(documents::document_create),
        )
        .route(
            "/api/documents/:id",
            get(documents::document_get)
                .patch(documents::document_update)
                .delete(documents::document_delete),
        )
        .route("/api/documents/:id/share", post(documents::document_share))
        .route("/api/documents/:id/unshare", post(documents::document_unshare))
        .route("/api/documents/:id/members", get(documents::document_members))
        .route_layer(axum::middleware::from_fn(jwt_auth_middleware))
}

fn user_routes() -> Router {
    use handlers::users;

    Router::new()
        .route("/api/users", get(users::user_resolve))
        .route_layer(axum::middleware::from_fn(jwt_auth_middleware))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "LiveDocs API",
            "version": version,
            "description": "Collaborative document backend API built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "documents": "/api/documents[/:id] (protected)",
                "share": "/api/documents/:id/share, /api/documents/:id/unshare (protected)",
                "members": "/api/documents/:id/members (protected)",
                "users": "/api/users?emails=... (protected)",
                "pages": "/documents/:id, /dashboard (session redirect)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();
    let config = config::config();

    let collab_ready = config.collab.is_configured();
    let identity_ready = config.identity.is_configured();

    let status = if collab_ready && identity_ready {
        axum::http::StatusCode::OK
    } else {
        axum::http::StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        axum::response::Json(json!({
            "success": status == axum::http::StatusCode::OK,
            "data": {
                "status": if status == axum::http::StatusCode::OK { "ok" } else { "degraded" },
                "timestamp": now,
                "collab": if collab_ready { "configured" } else { "unconfigured" },
                "identity": if identity_ready { "configured" } else { "unconfigured" },
            }
        })),
    )
}
