use std::sync::Arc;

use crate::{
    api,
    http::{Envelope, HttpClient, HttpError},
    session::WalletInfo,
};

pub struct WalletStore {
    client: Arc<HttpClient>,
}

impl WalletStore {
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    pub async fn wallet(&self) -> Option<WalletInfo> {
        self.client.session().cache().await.wallet
    }

    /// Replaces the cached wallet with whatever the backend returns.
    pub async fn refresh(&self) -> Result<Envelope<WalletInfo>, HttpError> {
        let envelope = api::get_wallet(&self.client).await?;
        self.client.session().set_wallet(envelope.data.clone()).await;
        Ok(envelope)
    }

    pub async fn clear(&self) {
        self.client.session().set_wallet(None).await;
    }
}
