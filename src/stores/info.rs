use std::sync::Arc;

use crate::{
    api::{
        self,
        types::{UpdateUserRequest, UserQuery},
    },
    http::{Envelope, HttpClient, HttpError},
    session::UserInfo,
};

/// Profile of the signed-in user.
pub struct InfoStore {
    client: Arc<HttpClient>,
    legacy_asset_origin: Option<String>,
}

impl InfoStore {
    /// `legacy_asset_origin` is stripped from avatar URLs so they resolve
    /// against the API origin instead.
    pub fn new(client: Arc<HttpClient>, legacy_asset_origin: Option<String>) -> Self {
        Self {
            client,
            legacy_asset_origin: legacy_asset_origin.filter(|origin| !origin.is_empty()),
        }
    }

    pub async fn info(&self) -> Option<UserInfo> {
        self.client.session().cache().await.info
    }

    /// Fetches the profile and caches it. Returns the cached value.
    pub async fn refresh(&self) -> Result<Option<UserInfo>, HttpError> {
        let envelope = api::get_user(&self.client, &UserQuery::default()).await?;
        let Some(mut info) = envelope.data else {
            return Ok(self.info().await);
        };
        if let Some(origin) = &self.legacy_asset_origin {
            info.avatar_url = rewrite_avatar_url(&info.avatar_url, origin);
        }
        self.client.session().set_info(Some(info.clone())).await;
        Ok(Some(info))
    }

    /// Applies `request` and re-fetches the profile.
    pub async fn update(&self, request: &UpdateUserRequest) -> Result<Envelope<UserInfo>, HttpError> {
        let envelope = api::update_user(&self.client, request).await?;
        self.refresh().await?;
        Ok(envelope)
    }

    pub async fn clear(&self) {
        self.client.session().set_info(None).await;
    }
}

/// Drops `origin` from `url`, leaving a path relative to the API host.
pub fn rewrite_avatar_url(url: &str, origin: &str) -> String {
    if !origin.is_empty() && url.contains(origin) {
        url.replacen(origin, "", 1)
    } else {
        url.to_string()
    }
}
