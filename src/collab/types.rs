use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Provider permission strings as they appear in a room's access lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Permission {
    #[serde(rename = "room:write")]
    Write,
    #[serde(rename = "room:read")]
    Read,
    #[serde(rename = "room:presence:write")]
    PresenceWrite,
}

/// Map from user email to that user's permission list.
pub type RoomAccesses = BTreeMap<String, Vec<Permission>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomMetadata {
    pub creator_id: String,
    pub email: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub metadata: RoomMetadata,
    pub users_accesses: RoomAccesses,
    #[serde(default)]
    pub default_accesses: Vec<Permission>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Room {
    pub fn is_member(&self, email: &str) -> bool {
        self.users_accesses.contains_key(email)
    }
}

/// Creation payload: id is chosen by the caller, not the provider.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoom {
    pub id: String,
    pub metadata: RoomMetadata,
    pub users_accesses: RoomAccesses,
    pub default_accesses: Vec<Permission>,
}

/// Partial metadata update. Only fields present are patched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MetadataPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Partial room update. A `None` access-list value serializes as `null`,
/// which deletes that user's entry on the provider side.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MetadataPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users_accesses: Option<BTreeMap<String, Option<Vec<Permission>>>>,
}

impl RoomUpdate {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            metadata: Some(MetadataPatch {
                title: Some(title.into()),
            }),
            ..Self::default()
        }
    }

    pub fn grant_access(email: impl Into<String>, permissions: Vec<Permission>) -> Self {
        let mut accesses = BTreeMap::new();
        accesses.insert(email.into(), Some(permissions));
        Self {
            users_accesses: Some(accesses),
            ..Self::default()
        }
    }

    pub fn revoke_access(email: impl Into<String>) -> Self {
        let mut accesses = BTreeMap::new();
        accesses.insert(email.into(), None);
        Self {
            users_accesses: Some(accesses),
            ..Self::default()
        }
    }
}

/// One page of the room listing endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPage {
    pub data: Vec<Room>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Inbox notification trigger payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxNotification {
    pub user_id: String,
    pub kind: String,
    pub subject_id: String,
    pub activity_data: Value,
    pub room_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn permissions_serialize_to_provider_strings() {
        assert_eq!(serde_json::to_value(Permission::Write).unwrap(), json!("room:write"));
        assert_eq!(serde_json::to_value(Permission::Read).unwrap(), json!("room:read"));
        assert_eq!(
            serde_json::to_value(Permission::PresenceWrite).unwrap(),
            json!("room:presence:write")
        );
    }

    #[test]
    fn room_deserializes_from_camel_case_wire_format() {
        let room: Room = serde_json::from_value(json!({
            "id": "r1",
            "metadata": { "creatorId": "u1", "email": "a@x.com", "title": "Untitled document" },
            "usersAccesses": { "a@x.com": ["room:write"] },
            "defaultAccesses": [],
            "createdAt": "2024-01-01T00:00:00Z",
            "type": "room"
        }))
        .unwrap();

        assert_eq!(room.metadata.creator_id, "u1");
        assert!(room.is_member("a@x.com"));
        assert!(!room.is_member("bob@y.com"));
        assert!(room.default_accesses.is_empty());
    }

    #[test]
    fn revoke_access_serializes_null_entry() {
        let update = RoomUpdate::revoke_access("bob@y.com");
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, json!({ "usersAccesses": { "bob@y.com": null } }));
    }

    #[test]
    fn title_update_patches_only_the_title() {
        let update = RoomUpdate::title("Design notes");
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, json!({ "metadata": { "title": "Design notes" } }));
    }
}
