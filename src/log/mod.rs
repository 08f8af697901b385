pub mod redacting_console_encoder;

use std::{path::Path, sync::OnceLock};

use anyhow::{Context, anyhow};
use log::{debug, info};
use log4rs::{
    Config,
    config::{Deserializers, RawConfig},
};

use crate::log::redacting_console_encoder::RedactingConsoleEncoderDeserializer;

/// Keys whose values never reach the log unmasked.
const SENSITIVE_KEYS: &[&str] = &["token", "access_token", "refresh_token", "authorization", "password", "phone"];

/// Initializes logging from `log4rs.yml` in the working directory, or from
/// the embedded defaults when there is none.
pub fn init_logging() -> anyhow::Result<()> {
    let mut deserializers = Deserializers::default();
    deserializers.insert("redacting_console", RedactingConsoleEncoderDeserializer);

    let config_path = "log4rs.yml";
    let path = Path::new(config_path);

    if path.exists() {
        log4rs::init_file(path, deserializers).context("Failed to load external log4rs.yml")?;
        info!(
            path = config_path;
            "Logging initialized from external configuration"
        );
        return Ok(());
    }

    let yaml_content = include_str!("../../resources/default_log4rs.yml");
    let raw_config: RawConfig =
        serde_yaml::from_str(yaml_content).context("Embedded logging configuration is invalid YAML")?;

    let (appenders, errors) = raw_config.appenders_lossy(&deserializers);
    if !errors.is_empty() {
        return Err(anyhow!("Errors parsing embedded appenders: {:?}", errors));
    }

    let config = Config::builder()
        .appenders(appenders)
        .loggers(raw_config.loggers())
        .build(raw_config.root())
        .context("Failed to build logging config")?;

    log4rs::init_config(config).context("Failed to initialize logging from embedded config")?;

    debug!("Logging initialized from embedded defaults (no external log4rs.yml found)");
    Ok(())
}

fn reveal_pii() -> bool {
    static REVEAL_PII_CACHE: OnceLock<bool> = OnceLock::new();

    *REVEAL_PII_CACHE.get_or_init(|| {
        std::env::var("REVEAL_PII")
            .map(|v| {
                let val = v.to_lowercase();
                val == "true" || val == "1"
            })
            .unwrap_or(false)
    })
}

pub fn is_sensitive_key(key: &str) -> bool {
    SENSITIVE_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

/// Masks a secret showing only start and end characters.
/// If REVEAL_PII is true, returns the original string.
pub fn mask_string(s: &str) -> String {
    if reveal_pii() {
        return s.to_string();
    }

    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 12 {
        return "***".to_string();
    }

    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 6..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensitive_keys_ignore_case() {
        assert!(is_sensitive_key("Authorization"));
        assert!(is_sensitive_key("refresh_token"));
        assert!(!is_sensitive_key("url"));
    }

    #[test]
    fn masks_by_length() {
        assert_eq!(mask_string("13124917464"), "***");
        assert_eq!(mask_string("1996080936390758400"), "199608...758400");
    }

    #[test]
    fn embedded_config_is_valid_yaml() {
        let raw: RawConfig = serde_yaml::from_str(include_str!("../../resources/default_log4rs.yml")).unwrap();
        let mut deserializers = Deserializers::default();
        deserializers.insert("redacting_console", RedactingConsoleEncoderDeserializer);
        let (appenders, errors) = raw.appenders_lossy(&deserializers);
        assert!(errors.is_empty(), "{errors:?}");
        assert!(!appenders.is_empty());
    }
}
