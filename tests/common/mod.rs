use std::collections::{BTreeMap, HashMap};
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};

pub const TEST_JWT_SECRET: &str = "livedocs-test-secret";

static STACK: OnceLock<TestStack> = OnceLock::new();

/// One server binary plus in-process mock providers, shared by every test in
/// a binary. Mock state is reachable directly for assertions.
pub struct TestStack {
    pub base_url: String,
    pub rooms: Arc<Mutex<BTreeMap<String, Value>>>,
    pub notifications: Arc<Mutex<Vec<Value>>>,
    #[allow(dead_code)]
    child: Child,
}

impl TestStack {
    fn spawn() -> Result<Self> {
        // Pick unused ports for isolation
        let collab_port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let identity_port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let api_port = portpicker::pick_unused_port().context("failed to pick free port")?;

        let rooms: Arc<Mutex<BTreeMap<String, Value>>> = Arc::new(Mutex::new(BTreeMap::new()));
        let notifications: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));

        let collab_state = CollabState {
            rooms: rooms.clone(),
            notifications: notifications.clone(),
        };

        // The mock providers run on their own runtime thread so they outlive
        // each test's per-test runtime
        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().expect("mock provider runtime");
            rt.block_on(async move {
                let collab = tokio::net::TcpListener::bind(("127.0.0.1", collab_port))
                    .await
                    .expect("bind collab mock");
                let identity = tokio::net::TcpListener::bind(("127.0.0.1", identity_port))
                    .await
                    .expect("bind identity mock");

                let _ = tokio::join!(
                    async { axum::serve(collab, collab_router(collab_state)).await },
                    async { axum::serve(identity, identity_router()).await },
                );
            });
        });

        // Token helpers in this process must agree with the server's secret
        std::env::set_var("JWT_SECRET", TEST_JWT_SECRET);

        // Spawn the already-built binary, pointed at the mocks
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_livedocs-api"));
        cmd.env("LIVEDOCS_PORT", api_port.to_string())
            .env("COLLAB_API_URL", format!("http://127.0.0.1:{}", collab_port))
            .env("COLLAB_SECRET_KEY", "sk_test_collab")
            .env("IDENTITY_API_URL", format!("http://127.0.0.1:{}", identity_port))
            .env("IDENTITY_SECRET_KEY", "sk_test_identity")
            .env("JWT_SECRET", TEST_JWT_SECRET)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}", api_port),
            rooms,
            notifications,
            child,
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == reqwest::StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

pub async fn ensure_stack() -> Result<&'static TestStack> {
    let stack = STACK.get_or_init(|| TestStack::spawn().expect("failed to spawn test stack"));
    stack.wait_ready(Duration::from_secs(15)).await?;
    Ok(stack)
}

/// Mint a session token the server will accept.
pub fn token_for(user_id: &str, email: &str) -> String {
    livedocs_api::auth::generate_jwt(livedocs_api::auth::Claims::new(
        user_id.to_string(),
        email.to_string(),
    ))
    .expect("mint session token")
}

// ---------------------------------------------------------------------------
// Mock collaboration provider
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct CollabState {
    rooms: Arc<Mutex<BTreeMap<String, Value>>>,
    notifications: Arc<Mutex<Vec<Value>>>,
}

fn collab_router(state: CollabState) -> Router {
    Router::new()
        .route("/v2/rooms", post(create_room).get(list_rooms))
        .route(
            "/v2/rooms/:id",
            get(get_room).post(update_room).delete(delete_room),
        )
        .route("/v2/inbox-notifications/trigger", post(trigger_notification))
        .with_state(state)
}

async fn create_room(State(state): State<CollabState>, Json(body): Json<Value>) -> Json<Value> {
    let id = body["id"].as_str().unwrap_or_default().to_string();

    let room = json!({
        "type": "room",
        "id": id,
        "metadata": body["metadata"],
        "usersAccesses": body["usersAccesses"],
        "defaultAccesses": body["defaultAccesses"],
        "createdAt": chrono::Utc::now().to_rfc3339(),
    });

    state.rooms.lock().unwrap().insert(id, room.clone());
    Json(room)
}

async fn get_room(State(state): State<CollabState>, Path(id): Path<String>) -> Response {
    match state.rooms.lock().unwrap().get(&id) {
        Some(room) => Json(room.clone()).into_response(),
        None => room_not_found().into_response(),
    }
}

async fn list_rooms(
    State(state): State<CollabState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let user = params.get("userId").cloned().unwrap_or_default();

    let data: Vec<Value> = state
        .rooms
        .lock()
        .unwrap()
        .values()
        .filter(|room| room["usersAccesses"].get(&user).is_some())
        .cloned()
        .collect();

    Json(json!({ "data": data, "nextCursor": null }))
}

async fn update_room(
    State(state): State<CollabState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut rooms = state.rooms.lock().unwrap();

    let Some(room) = rooms.get_mut(&id) else {
        return room_not_found().into_response();
    };

    if let Some(patch) = body.get("metadata").and_then(|v| v.as_object()) {
        let metadata = room["metadata"].as_object_mut().expect("room metadata");
        for (key, value) in patch {
            metadata.insert(key.clone(), value.clone());
        }
    }

    // A null access value deletes that user's entry
    if let Some(patch) = body.get("usersAccesses").and_then(|v| v.as_object()) {
        let accesses = room["usersAccesses"].as_object_mut().expect("room accesses");
        for (email, value) in patch {
            if value.is_null() {
                accesses.remove(email);
            } else {
                accesses.insert(email.clone(), value.clone());
            }
        }
    }

    Json(room.clone()).into_response()
}

async fn delete_room(State(state): State<CollabState>, Path(id): Path<String>) -> Response {
    match state.rooms.lock().unwrap().remove(&id) {
        Some(_) => Json(json!({})).into_response(),
        None => room_not_found().into_response(),
    }
}

async fn trigger_notification(
    State(state): State<CollabState>,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.notifications.lock().unwrap().push(body);
    Json(json!({}))
}

fn room_not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "room not found" })))
}

// ---------------------------------------------------------------------------
// Mock identity provider
// ---------------------------------------------------------------------------

fn identity_router() -> Router {
    Router::new().route("/v1/users", get(list_users))
}

/// Returns fixture users for the requested emails in REVERSE request order,
/// so callers that care about ordering have to re-sort.
async fn list_users(Query(params): Query<Vec<(String, String)>>) -> Json<Value> {
    let emails: Vec<String> = params
        .into_iter()
        .filter(|(key, _)| key == "email_address")
        .map(|(_, value)| value)
        .collect();

    let users: Vec<Value> = emails.iter().rev().filter_map(|e| fixture_user(e)).collect();

    Json(Value::Array(users))
}

fn fixture_user(email: &str) -> Option<Value> {
    let (id, first, last) = match email {
        "a@x.com" => ("user_ada", "Ada", "Lovelace"),
        "bob@y.com" => ("user_bob", "Bob", "Builder"),
        "carol@z.com" => ("user_carol", "Carol", "Danvers"),
        _ => return None,
    };

    Some(json!({
        "id": id,
        "first_name": first,
        "last_name": last,
        "image_url": format!("https://img.example.com/{}.png", first.to_lowercase()),
        "email_addresses": [{ "email_address": email }],
    }))
}
