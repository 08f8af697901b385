use std::sync::Arc;

use log::info;

use crate::{
    api::{
        self,
        types::{CodeLoginRequest, LoginData, LoginRequest},
    },
    http::{Envelope, HttpClient, HttpError},
    session::SessionCredential,
};

/// Owns the session credential.
pub struct UserStore {
    client: Arc<HttpClient>,
}

impl UserStore {
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Signs in with phone and password and stores the returned tokens.
    pub async fn login(&self, phone: &str, password: &str) -> Result<Envelope<LoginData>, HttpError> {
        let request = LoginRequest {
            phone: phone.to_string(),
            password: password.to_string(),
        };
        let envelope = api::login(&self.client, &request).await?;
        self.store(&envelope).await;
        Ok(envelope)
    }

    /// Signs in with an SMS verification code.
    pub async fn login_by_code(&self, phone: &str, code: &str) -> Result<Envelope<LoginData>, HttpError> {
        let request = CodeLoginRequest {
            phone: phone.to_string(),
            code: code.to_string(),
        };
        let envelope = api::login_by_code(&self.client, &request).await?;
        self.store(&envelope).await;
        Ok(envelope)
    }

    pub async fn logout(&self) {
        self.client.session().clear().await;
    }

    pub async fn credential(&self) -> Option<SessionCredential> {
        self.client.session().get().await
    }

    async fn store(&self, envelope: &Envelope<LoginData>) {
        let Some(credential) = envelope.data.as_ref().filter(|c| !c.is_empty()) else {
            return;
        };
        let session = self.client.session();
        // Cached state of a previous account must not leak into the new one.
        session.clear().await;
        session.set(credential.clone()).await;
        info!(expires_in = credential.expires_in.unwrap_or_default(); "Signed in");
    }
}
