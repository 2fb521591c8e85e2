use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollabError {
    #[error("collaboration API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("collaboration API transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid collaboration API response: {0}")]
    InvalidResponse(String),
}

impl CollabError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CollabError::Status { status: 404, .. })
    }
}
