use serde_json::json;
use std::collections::BTreeMap;
use uuid::Uuid;

use super::access::{self, UserType};
use super::error::DocumentError;
use crate::cache;
use crate::collab::{self, CollabError, InboxNotification, NewRoom, Permission, Room, RoomMetadata, RoomUpdate};
use crate::identity::{self, sort_by_requested_order, UserProfile};

/// Title given to every freshly created document.
pub const DEFAULT_TITLE: &str = "Untitled document";

/// Notification kind understood by the collaboration provider's inbox.
const ACCESS_NOTIFICATION_KIND: &str = "$documentAccess";

/// Create a room owned by the caller. The creator is the only access-map
/// entry and `default_accesses` stays empty, so documents are private until
/// explicitly shared.
pub async fn create(user_id: &str, email: &str) -> Result<Room, DocumentError> {
    let room_id = Uuid::new_v4().to_string();

    let mut users_accesses = BTreeMap::new();
    users_accesses.insert(email.to_string(), vec![Permission::Write]);

    let room = NewRoom {
        id: room_id,
        metadata: RoomMetadata {
            creator_id: user_id.to_string(),
            email: email.to_string(),
            title: DEFAULT_TITLE.to_string(),
        },
        users_accesses,
        default_accesses: Vec::new(),
    };

    let created = collab::client().create_room(&room).await?;

    cache::page_cache().invalidate_prefix("/dashboard").await;
    Ok(created)
}

/// Fetch a room, enforcing the membership invariant: the requesting email
/// must be a key of the access map.
pub async fn get(room_id: &str, email: &str) -> Result<Room, DocumentError> {
    let room = fetch_room(room_id).await?;

    if !room.is_member(email) {
        return Err(DocumentError::AccessDenied {
            room_id: room_id.to_string(),
            email: email.to_string(),
        });
    }

    Ok(room)
}

pub async fn update_title(room_id: &str, title: &str) -> Result<Room, DocumentError> {
    let update = RoomUpdate::title(title);
    let room = update_room(room_id, &update).await?;

    cache::page_cache()
        .invalidate_prefix(&format!("/documents/{}", room_id))
        .await;
    Ok(room)
}

/// All rooms where the given email appears in the access map, unshaped.
pub async fn list(email: &str) -> Result<Vec<Room>, DocumentError> {
    Ok(collab::client().list_rooms(email).await?)
}

/// Grant a role to a user, then notify them. The notification rides on a
/// successful access patch only; a delivery failure is logged and does not
/// undo or fail the share.
pub async fn share(
    room_id: &str,
    email: &str,
    user_type: UserType,
    updated_by: &UserProfile,
) -> Result<Room, DocumentError> {
    let update = RoomUpdate::grant_access(email, access::permissions_for(user_type));
    let room = update_room(room_id, &update).await?;

    let notification = InboxNotification {
        user_id: email.to_string(),
        kind: ACCESS_NOTIFICATION_KIND.to_string(),
        subject_id: Uuid::new_v4().to_string(),
        activity_data: json!({
            "userType": user_type,
            "title": format!(
                "You have been granted {} access to the document by {}",
                user_type, updated_by.name
            ),
            "updatedBy": updated_by.name,
            "avatar": updated_by.avatar,
            "email": updated_by.email,
        }),
        room_id: room_id.to_string(),
    };

    if let Err(e) = collab::client().trigger_inbox_notification(&notification).await {
        tracing::warn!("access notification for room {} not delivered: {}", room_id, e);
    }

    cache::page_cache()
        .invalidate_prefix(&format!("/documents/{}", room_id))
        .await;
    Ok(room)
}

/// Remove a collaborator's access-map entry. The creator can never be
/// removed from their own document.
pub async fn remove_collaborator(room_id: &str, email: &str) -> Result<Room, DocumentError> {
    let room = fetch_room(room_id).await?;

    if room.metadata.email == email {
        return Err(DocumentError::SelfRemovalForbidden);
    }

    let update = RoomUpdate::revoke_access(email);
    let updated = update_room(room_id, &update).await?;

    cache::page_cache()
        .invalidate_prefix(&format!("/documents/{}", room_id))
        .await;
    Ok(updated)
}

pub async fn delete(room_id: &str) -> Result<(), DocumentError> {
    collab::client()
        .delete_room(room_id)
        .await
        .map_err(|e| not_found_or(e, room_id))?;

    cache::page_cache().invalidate_prefix("/dashboard").await;
    cache::page_cache()
        .invalidate_prefix(&format!("/documents/{}", room_id))
        .await;
    Ok(())
}

/// Resolve emails to display-ready profiles, preserving input order. Missing
/// identities stay as empty slots in their position.
pub async fn resolve(emails: &[String]) -> Result<Vec<Option<UserProfile>>, DocumentError> {
    let users = identity::client().users_by_email(emails).await?;

    let profiles: Vec<UserProfile> = users
        .into_iter()
        .filter_map(UserProfile::from_provider)
        .collect();

    Ok(sort_by_requested_order(profiles, emails))
}

/// Search a room's member emails, excluding the requesting user.
pub async fn search_members(
    room_id: &str,
    exclude_email: &str,
    text: &str,
) -> Result<Vec<String>, DocumentError> {
    let room = fetch_room(room_id).await?;
    Ok(access::filter_members(
        room.users_accesses.keys(),
        exclude_email,
        text,
    ))
}

async fn fetch_room(room_id: &str) -> Result<Room, DocumentError> {
    collab::client()
        .get_room(room_id)
        .await
        .map_err(|e| not_found_or(e, room_id))
}

async fn update_room(room_id: &str, update: &RoomUpdate) -> Result<Room, DocumentError> {
    collab::client()
        .update_room(room_id, update)
        .await
        .map_err(|e| not_found_or(e, room_id))
}

fn not_found_or(err: CollabError, room_id: &str) -> DocumentError {
    if err.is_not_found() {
        DocumentError::NotFound(room_id.to_string())
    } else {
        DocumentError::Collab(err)
    }
}
