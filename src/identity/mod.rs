pub mod client;
pub mod error;
pub mod types;

pub use client::IdentityClient;
pub use error::IdentityError;
pub use types::{sort_by_requested_order, ProviderUser, UserProfile};

use once_cell::sync::Lazy;

static CLIENT: Lazy<IdentityClient> =
    Lazy::new(|| IdentityClient::new(&crate::config::config().identity));

/// Process-wide client, configured once from the environment
pub fn client() -> &'static IdentityClient {
    &CLIENT
}
