use serde::{Deserialize, Serialize};

/// User record as returned by the identity provider. Only the fields this
/// service projects are decoded; everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderUser {
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub email_addresses: Vec<ProviderEmailAddress>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderEmailAddress {
    pub email_address: String,
}

/// Display-ready projection served to clients. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
}

impl UserProfile {
    /// Project a provider record; users without any email address cannot be
    /// keyed into an access map and yield `None`.
    pub fn from_provider(user: ProviderUser) -> Option<Self> {
        let email = user.email_addresses.first()?.email_address.clone();

        let name = format!(
            "{} {}",
            user.first_name.as_deref().unwrap_or(""),
            user.last_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_string();

        Some(Self {
            id: user.id,
            name,
            email,
            avatar: user.image_url.unwrap_or_default(),
        })
    }
}

/// Re-sort projected profiles to the exact order of the queried email list.
/// Positions whose email the provider did not return stay empty.
pub fn sort_by_requested_order(
    profiles: Vec<UserProfile>,
    emails: &[String],
) -> Vec<Option<UserProfile>> {
    emails
        .iter()
        .map(|email| profiles.iter().find(|p| &p.email == email).cloned())
        .collect()
}
