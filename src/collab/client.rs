use reqwest::Client;
use std::time::Duration;

use super::error::CollabError;
use super::types::{InboxNotification, NewRoom, Room, RoomPage, RoomUpdate};
use crate::config::ProviderConfig;

/// Thin typed client for the hosted collaboration service REST API. Rooms are
/// the provider's unit of shared content; this service never persists one.
pub struct CollabClient {
    client: Client,
    base_url: String,
    secret_key: String,
    timeout: Duration,
}

impl CollabClient {
    pub fn new(config: &ProviderConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_url.trim_end_matches('/').to_string(),
            secret_key: config.secret_key.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub async fn create_room(&self, room: &NewRoom) -> Result<Room, CollabError> {
        let response = self
            .client
            .post(format!("{}/v2/rooms", self.base_url))
            .bearer_auth(&self.secret_key)
            .timeout(self.timeout)
            .json(room)
            .send()
            .await?;

        Self::decode(response).await
    }

    pub async fn get_room(&self, room_id: &str) -> Result<Room, CollabError> {
        let response = self
            .client
            .get(format!("{}/v2/rooms/{}", self.base_url, room_id))
            .bearer_auth(&self.secret_key)
            .timeout(self.timeout)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// All rooms where the given user id (this application keys access by
    /// email) appears in the access map.
    pub async fn list_rooms(&self, user_id: &str) -> Result<Vec<Room>, CollabError> {
        let response = self
            .client
            .get(format!("{}/v2/rooms", self.base_url))
            .query(&[("userId", user_id)])
            .bearer_auth(&self.secret_key)
            .timeout(self.timeout)
            .send()
            .await?;

        let page: RoomPage = Self::decode(response).await?;
        Ok(page.data)
    }

    pub async fn update_room(&self, room_id: &str, update: &RoomUpdate) -> Result<Room, CollabError> {
        let response = self
            .client
            .post(format!("{}/v2/rooms/{}", self.base_url, room_id))
            .bearer_auth(&self.secret_key)
            .timeout(self.timeout)
            .json(update)
            .send()
            .await?;

        Self::decode(response).await
    }

    pub async fn delete_room(&self, room_id: &str) -> Result<(), CollabError> {
        let response = self
            .client
            .delete(format!("{}/v2/rooms/{}", self.base_url, room_id))
            .bearer_auth(&self.secret_key)
            .timeout(self.timeout)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    pub async fn trigger_inbox_notification(
        &self,
        notification: &InboxNotification,
    ) -> Result<(), CollabError> {
        let response = self
            .client
            .post(format!("{}/v2/inbox-notifications/trigger", self.base_url))
            .bearer_auth(&self.secret_key)
            .timeout(self.timeout)
            .json(notification)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, CollabError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(CollabError::Status { status, body })
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, CollabError> {
        let response = Self::check(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| CollabError::InvalidResponse(e.to_string()))
    }
}
