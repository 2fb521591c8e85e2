use thiserror::Error;

use crate::collab::CollabError;
use crate::identity::IdentityError;

/// Tagged outcome of every document operation. Callers can tell a missing
/// room from a membership failure from an upstream fault.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("access denied to document {room_id} for {email}")]
    AccessDenied { room_id: String, email: String },

    #[error("the creator cannot be removed from their own document")]
    SelfRemovalForbidden,

    #[error(transparent)]
    Collab(#[from] CollabError),

    #[error(transparent)]
    Identity(#[from] IdentityError),
}

impl DocumentError {
    /// True when a page route should fall back to the home redirect.
    pub fn hides_document(&self) -> bool {
        matches!(
            self,
            DocumentError::NotFound(_) | DocumentError::AccessDenied { .. }
        )
    }
}
