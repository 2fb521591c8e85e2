pub mod client;
pub mod error;
pub mod types;

pub use client::CollabClient;
pub use error::CollabError;
pub use types::{
    InboxNotification, MetadataPatch, NewRoom, Permission, Room, RoomAccesses, RoomMetadata,
    RoomPage, RoomUpdate,
};

use once_cell::sync::Lazy;

static CLIENT: Lazy<CollabClient> = Lazy::new(|| CollabClient::new(&crate::config::config().collab));

/// Process-wide client, configured once from the environment
pub fn client() -> &'static CollabClient {
    &CLIENT
}
