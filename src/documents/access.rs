use serde::{Deserialize, Serialize};

use crate::collab::{Permission, Room};

/// Role requested when sharing a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Editor,
    Viewer,
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserType::Editor => write!(f, "editor"),
            UserType::Viewer => write!(f, "viewer"),
        }
    }
}

/// Role derived from a room's access map. Never stored; recomputed per read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Editor,
    Viewer,
}

/// Permission list written to the access map for a share request.
pub fn permissions_for(user_type: UserType) -> Vec<Permission> {
    match user_type {
        UserType::Editor => vec![Permission::Write],
        UserType::Viewer => vec![Permission::Read, Permission::PresenceWrite],
    }
}

/// Classify a member by presence of the write permission. `None` for
/// non-members.
pub fn role_of(room: &Room, email: &str) -> Option<UserRole> {
    let permissions = room.users_accesses.get(email)?;

    if permissions.contains(&Permission::Write) {
        Some(UserRole::Editor)
    } else {
        Some(UserRole::Viewer)
    }
}

/// Member-email search: drop the excluded address, then filter
/// case-insensitively by substring. Empty text means no filtering.
pub fn filter_members<'a>(
    emails: impl IntoIterator<Item = &'a String>,
    exclude_email: &str,
    text: &str,
) -> Vec<String> {
    let needle = text.to_lowercase();

    emails
        .into_iter()
        .filter(|email| email.as_str() != exclude_email)
        .filter(|email| needle.is_empty() || email.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::RoomMetadata;
    use std::collections::BTreeMap;

    fn room_with_accesses(accesses: &[(&str, Vec<Permission>)]) -> Room {
        let mut users_accesses = BTreeMap::new();
        for (email, permissions) in accesses {
            users_accesses.insert(email.to_string(), permissions.clone());
        }

        Room {
            id: "r1".to_string(),
            metadata: RoomMetadata {
                creator_id: "u1".to_string(),
                email: "a@x.com".to_string(),
                title: "Untitled document".to_string(),
            },
            users_accesses,
            default_accesses: Vec::new(),
            created_at: None,
        }
    }

    #[test]
    fn editor_share_grants_write() {
        assert_eq!(permissions_for(UserType::Editor), vec![Permission::Write]);
    }

    #[test]
    fn viewer_share_grants_read_and_presence() {
        assert_eq!(
            permissions_for(UserType::Viewer),
            vec![Permission::Read, Permission::PresenceWrite]
        );
    }

    #[test]
    fn write_permission_makes_an_editor() {
        let room = room_with_accesses(&[
            ("a@x.com", vec![Permission::Write]),
            ("bob@y.com", vec![Permission::Read, Permission::PresenceWrite]),
        ]);

        assert_eq!(role_of(&room, "a@x.com"), Some(UserRole::Editor));
        assert_eq!(role_of(&room, "bob@y.com"), Some(UserRole::Viewer));
        assert_eq!(role_of(&room, "carol@z.com"), None);
    }

    #[test]
    fn member_search_filters_case_insensitively() {
        let emails = vec![
            "a@x.com".to_string(),
            "bob@y.com".to_string(),
            "carol@z.com".to_string(),
        ];

        assert_eq!(filter_members(&emails, "a@x.com", "b"), vec!["bob@y.com"]);
        assert_eq!(filter_members(&emails, "a@x.com", "BOB"), vec!["bob@y.com"]);
    }

    #[test]
    fn member_search_never_includes_the_excluded_email() {
        let emails = vec!["a@x.com".to_string(), "bob@y.com".to_string()];

        assert_eq!(filter_members(&emails, "a@x.com", ""), vec!["bob@y.com"]);
        assert_eq!(filter_members(&emails, "a@x.com", "a@x"), Vec::<String>::new());
    }
}
