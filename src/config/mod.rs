mod loader;

use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};
use url::Url;

pub use loader::{get_default_config, load_client_config, load_configuration, write_config_to};

use crate::{
    cli::ClientArgs,
    codec::BigIntMode,
    http::{ClientOptions, DEFAULT_TIMEOUT_SECS},
    session::{BearerToken, DEFAULT_BEARER_TOKEN},
};

/// The `[client]` section of the configuration file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub bearer_token: BearerToken,
    pub send_refresh_token: bool,
    pub big_int_mode: BigIntMode,
    pub redirect_on_unauthorized: bool,
    pub database_path: PathBuf,
    pub legacy_asset_origin: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8888/api".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            bearer_token: DEFAULT_BEARER_TOKEN,
            send_refresh_token: true,
            big_int_mode: BigIntMode::default(),
            redirect_on_unauthorized: true,
            database_path: PathBuf::from("data/session.db"),
            legacy_asset_origin: None,
        }
    }
}

impl ClientConfig {
    pub const SECTION: &'static str = "client";

    /// Command line flags win over file and environment values.
    pub fn apply_args(&mut self, args: &ClientArgs) {
        if let Some(base_url) = &args.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(timeout_secs) = args.timeout_secs {
            self.timeout_secs = timeout_secs;
        }
        if let Some(bearer_token) = args.bearer_token {
            self.bearer_token = bearer_token;
        }
        if let Some(big_int_mode) = args.big_int_mode {
            self.big_int_mode = big_int_mode;
        }
        if let Some(database_path) = &args.database_path {
            self.database_path = database_path.clone();
        }
    }

    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.base_url)
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            timeout: Duration::from_secs(self.timeout_secs),
            bearer_token: self.bearer_token,
            send_refresh_token: self.send_refresh_token,
            big_int_mode: self.big_int_mode,
            redirect_on_unauthorized: self.redirect_on_unauthorized,
        }
    }
}
