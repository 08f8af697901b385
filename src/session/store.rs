use std::sync::Arc;

use log::{debug, info, warn};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tokio::sync::RwLock;

use super::{
    SessionCredential,
    cache::{CachedState, CompanionProfile, UserInfo, WalletInfo},
    persistence::{MemoryPersistence, StatePersistence},
};
use crate::db::DbError;

const CREDENTIAL_KEY: &str = "user";
const INFO_KEY: &str = "info";
const WALLET_KEY: &str = "wallet";
const COMPANION_KEY: &str = "companion";
const ALL_KEYS: [&str; 4] = [CREDENTIAL_KEY, INFO_KEY, WALLET_KEY, COMPANION_KEY];

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Persistence error: {0}")]
    Db(#[from] DbError),
}

#[derive(Debug, Default)]
struct SessionState {
    credential: Option<SessionCredential>,
    cache: CachedState,
}

/// Session credential plus the cached state that depends on it.
///
/// Load once at startup with [`SessionStore::load`]; every mutation is written
/// back through the [`StatePersistence`] it was loaded from on the blocking
/// pool, while the write lock is still held so writes land in mutation order.
/// A failed write is logged and never fails the mutation itself.
pub struct SessionStore {
    state: RwLock<SessionState>,
    persistence: Arc<dyn StatePersistence>,
}

impl SessionStore {
    /// An empty session that is not persisted across runs.
    pub fn in_memory() -> Self {
        Self {
            state: RwLock::new(SessionState::default()),
            persistence: Arc::new(MemoryPersistence::new()),
        }
    }

    pub fn load(persistence: Arc<dyn StatePersistence>) -> Result<Self, StoreError> {
        let credential =
            load_entry::<SessionCredential>(persistence.as_ref(), CREDENTIAL_KEY)?.filter(|c| !c.is_empty());
        let cache = CachedState {
            info: load_entry(persistence.as_ref(), INFO_KEY)?,
            wallet: load_entry(persistence.as_ref(), WALLET_KEY)?,
            companion: load_entry(persistence.as_ref(), COMPANION_KEY)?,
        };

        debug!(
            authenticated = credential.is_some(),
            cached = !cache.is_empty();
            "Session state loaded"
        );

        Ok(Self {
            state: RwLock::new(SessionState { credential, cache }),
            persistence,
        })
    }

    pub async fn get(&self) -> Option<SessionCredential> {
        self.state.read().await.credential.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.credential.is_some()
    }

    pub async fn set(&self, credential: SessionCredential) {
        let mut state = self.state.write().await;
        self.persist(CREDENTIAL_KEY, Some(&credential)).await;
        state.credential = Some(credential);
        info!("Session credential stored");
    }

    /// Replaces the tokens of the current credential after the gateway rotated
    /// them. Does nothing when no session exists.
    pub async fn rotate_tokens(&self, access_token: String, refresh_token: Option<String>) -> bool {
        let mut state = self.state.write().await;
        let Some(credential) = state.credential.as_mut() else {
            return false;
        };
        credential.access_token = access_token;
        if let Some(refresh_token) = refresh_token {
            credential.refresh_token = refresh_token;
        }
        self.persist(CREDENTIAL_KEY, Some(&*credential)).await;
        debug!("Session tokens rotated");
        true
    }

    /// Drops the credential and every cached value derived from it.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        *state = SessionState::default();
        let persistence = self.persistence.clone();
        let removed = tokio::task::spawn_blocking(move || {
            for key in ALL_KEYS {
                if let Err(e) = persistence.remove(key) {
                    warn!(key = key, error:% = e; "Failed to remove persisted session entry");
                }
            }
        })
        .await;
        if let Err(e) = removed {
            warn!(error:% = e; "Session persistence task failed");
        }
        info!("Session cleared");
    }

    pub async fn cache(&self) -> CachedState {
        self.state.read().await.cache.clone()
    }

    pub async fn set_info(&self, info: Option<UserInfo>) {
        let mut state = self.state.write().await;
        self.persist(INFO_KEY, info.as_ref()).await;
        state.cache.info = info;
    }

    pub async fn set_wallet(&self, wallet: Option<WalletInfo>) {
        let mut state = self.state.write().await;
        self.persist(WALLET_KEY, wallet.as_ref()).await;
        state.cache.wallet = wallet;
    }

    pub async fn set_companion(&self, companion: Option<CompanionProfile>) {
        let mut state = self.state.write().await;
        self.persist(COMPANION_KEY, companion.as_ref()).await;
        state.cache.companion = companion;
    }

    /// Applies `update` to the cached companion profile, starting from an empty
    /// profile when none is cached yet.
    pub async fn update_companion<F>(&self, update: F) -> CompanionProfile
    where F: FnOnce(&mut CompanionProfile) {
        let mut state = self.state.write().await;
        let profile = state.cache.companion.get_or_insert_with(CompanionProfile::default);
        update(profile);
        let profile = profile.clone();
        self.persist(COMPANION_KEY, Some(&profile)).await;
        profile
    }

    async fn persist<T: Serialize>(&self, key: &'static str, value: Option<&T>) {
        let json = match value.map(serde_json::to_string).transpose() {
            Ok(json) => json,
            Err(e) => {
                warn!(key = key, error:% = e; "Failed to serialize session entry");
                return;
            },
        };
        let persistence = self.persistence.clone();
        let result = tokio::task::spawn_blocking(move || match json {
            Some(json) => persistence.save(key, &json),
            None => persistence.remove(key),
        })
        .await;
        match result {
            Ok(Ok(())) => {},
            Ok(Err(e)) => warn!(key = key, error:% = e; "Failed to persist session entry"),
            Err(e) => warn!(key = key, error:% = e; "Session persistence task failed"),
        }
    }
}

/// Reads one persisted entry. An entry that no longer deserializes is dropped
/// from storage and treated as absent.
fn load_entry<T: DeserializeOwned>(persistence: &dyn StatePersistence, key: &str) -> Result<Option<T>, StoreError> {
    let Some(json) = persistence.load(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&json) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!(key = key, error:% = e; "Discarding unreadable session entry");
            if let Err(e) = persistence.remove(key) {
                warn!(key = key, error:% = e; "Failed to remove persisted session entry");
            }
            Ok(None)
        },
    }
}
