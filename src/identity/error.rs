use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("identity API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("identity API transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid identity API response: {0}")]
    InvalidResponse(String),
}
