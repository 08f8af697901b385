use std::sync::Arc;

use log::debug;
use serde_json::Value;

use crate::{
    api::{self, types::UpdateCompanionRequest},
    http::{Envelope, HttpClient, HttpError, RequestDescriptor},
    session::CompanionProfile,
};

/// Companion profile of the signed-in user.
pub struct CompanionStore {
    client: Arc<HttpClient>,
}

impl CompanionStore {
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    pub async fn profile(&self) -> Option<CompanionProfile> {
        self.client.session().cache().await.companion
    }

    /// Fetches the profile and merges every field the backend returned into
    /// the cached one. Fields it left out keep their cached values.
    pub async fn refresh(&self) -> Result<Envelope, HttpError> {
        let envelope: Envelope = self
            .client
            .send_json(RequestDescriptor::get(api::COMPANION_PROFILE_PATH))
            .await?;
        if envelope.is_success() &&
            let Some(Value::Object(fields)) = &envelope.data
        {
            let current = self.profile().await.unwrap_or_default();
            let merged = merge_profile(&current, fields)?;
            self.client.session().set_companion(Some(merged)).await;
        }
        Ok(envelope)
    }

    /// Applies `request`, then re-fetches the profile when the backend
    /// accepted it.
    pub async fn update(&self, request: &UpdateCompanionRequest) -> Result<Envelope<CompanionProfile>, HttpError> {
        let envelope = api::update_companion_profile(&self.client, request).await?;
        if envelope.is_success() {
            self.refresh().await?;
        }
        Ok(envelope)
    }

    /// Switches online status and mirrors it locally once accepted.
    pub async fn set_status(&self, status: i32) -> Result<Envelope, HttpError> {
        let envelope = api::update_companion_status(&self.client, status).await?;
        if envelope.is_success() {
            self.client
                .session()
                .update_companion(|profile| profile.status = status)
                .await;
            debug!(status = status; "Companion status updated");
        }
        Ok(envelope)
    }

    pub async fn clear(&self) {
        self.client.session().set_companion(None).await;
    }
}

fn merge_profile(
    current: &CompanionProfile,
    fields: &serde_json::Map<String, Value>,
) -> Result<CompanionProfile, serde_json::Error> {
    let mut merged = match serde_json::to_value(current)? {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    for (key, value) in fields {
        merged.insert(key.clone(), value.clone());
    }
    serde_json::from_value(Value::Object(merged))
}
