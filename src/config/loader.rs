use std::{fs, fs::File, io::Write, path::Path};

use anyhow::{Context, Result};
use config::{Config, Environment};
use log::info;

use super::ClientConfig;

pub fn get_default_config() -> &'static str {
    include_str!("../../config/config.toml")
}

/// Reads `path`, creating it from the embedded defaults first when missing,
/// and layers `SLGAMING_*` environment variables on top.
pub fn load_configuration(path: &Path) -> Result<Config> {
    if !path.exists() {
        let sources = get_default_config();
        write_config_to(path, sources).context("Could not create default config")?;
        info!(path:% = path.display(); "Created new configuration file");
    }

    let filename = path.to_str().context("Invalid config file path")?;

    Config::builder()
        .add_source(config::File::with_name(filename))
        .add_source(Environment::with_prefix("SLGAMING").prefix_separator("_").separator("__"))
        .build()
        .context("Could not build config")
}

/// The `[client]` section of `config`, with defaults for whatever it omits.
pub fn load_client_config(config: &Config) -> Result<ClientConfig> {
    match config.get::<ClientConfig>(ClientConfig::SECTION) {
        Ok(client) => Ok(client),
        Err(config::ConfigError::NotFound(_)) => Ok(ClientConfig::default()),
        Err(e) => Err(e).context("Invalid client configuration"),
    }
}

pub fn write_config_to(path: &Path, source: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create parent directories")?;
    };

    let mut file = File::create(path).context("Failed to create config file")?;
    file.write_all(source.as_bytes())
        .context("Failed to write config content")?;
    file.write_all(b"\n").context("Failed to write newline")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::{codec::BigIntMode, session::BearerToken};

    #[test]
    fn creates_default_file_on_first_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = load_configuration(&path).unwrap();
        assert!(path.exists());

        let client = load_client_config(&config).unwrap();
        assert_eq!(client, ClientConfig::default());
    }

    #[test]
    fn reads_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        write_config_to(
            &path,
            "[client]\nbase_url = \"https://slgaming.example.com/api\"\nbearer_token = \"refresh\"\nbig_int_mode = \"string\"\nlegacy_asset_origin = \"http://120.26.29.242\"",
        )
        .unwrap();

        let client = load_client_config(&load_configuration(&path).unwrap()).unwrap();
        assert_eq!(client.base_url, "https://slgaming.example.com/api");
        assert_eq!(client.bearer_token, BearerToken::Refresh);
        assert_eq!(client.big_int_mode, BigIntMode::String);
        assert_eq!(client.legacy_asset_origin.as_deref(), Some("http://120.26.29.242"));
        assert_eq!(client.timeout_secs, 100);
    }
}
