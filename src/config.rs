use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_DELAY_SECS: u64 = 30;
pub const DEFAULT_PUSHOVER_ENDPOINT: &str = "https://api.pushover.net/1/messages.json";
pub const DEFAULT_TARGET_URL: &str = "https://id.txtfire.net/qqq3";
pub const DEFAULT_DB_DIR: &str = "db";
pub const DEFAULT_DB_FILENAME: &str = "fire_alerts.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub delay: Duration,
    pub search_term: String,
    pub pushover_token: String,
    pub pushover_user: String,
    pub pushover_endpoint: String,
    pub target_url: String,
    pub db_dir: PathBuf,
    pub db_filename: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Parses configuration from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let pushover_token = get("PUSHOVER_TOKEN").ok_or(ConfigError::Missing("PUSHOVER_TOKEN"))?;
        let pushover_user = get("PUSHOVER_USER").ok_or(ConfigError::Missing("PUSHOVER_USER"))?;

        let delay_secs = match get("DELAY") {
            Some(raw) => parse_delay(&raw)?,
            None => DEFAULT_DELAY_SECS,
        };

        Ok(Self {
            delay: Duration::from_secs(delay_secs),
            search_term: get("SEARCH_TERM").unwrap_or_default(),
            pushover_token,
            pushover_user,
            pushover_endpoint: get("PUSHOVER_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_PUSHOVER_ENDPOINT.to_string()),
            target_url: get("TARGET_URL").unwrap_or_else(|| DEFAULT_TARGET_URL.to_string()),
            db_dir: get("JSON_DB_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_DIR)),
            db_filename: get("JSON_DB_FILENAME").unwrap_or_else(|| DEFAULT_DB_FILENAME.to_string()),
        })
    }

    pub fn store_path(&self) -> PathBuf {
        self.db_dir.join(&self.db_filename)
    }
}

fn parse_delay(raw: &str) -> Result<u64, ConfigError> {
    let invalid = |reason: &str| ConfigError::Invalid {
        key: "DELAY",
        value: raw.to_string(),
        reason: reason.to_string(),
    };

    let secs: u64 = raw
        .parse()
        .map_err(|_| invalid("expected a whole number of seconds"))?;
    if secs == 0 {
        return Err(invalid("must be at least 1 second"));
    }
    Ok(secs)
}

#[cfg(test)]
mod tests {
    use super::AppConfig;
    use crate::error::ConfigError;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    const CREDS: [(&str, &str); 2] = [("PUSHOVER_TOKEN", "app-token"), ("PUSHOVER_USER", "user-key")];

    #[test]
    fn applies_defaults() {
        let config = AppConfig::from_lookup(lookup(&CREDS)).unwrap();
        assert_eq!(config.delay, Duration::from_secs(30));
        assert_eq!(config.search_term, "");
        assert_eq!(config.pushover_endpoint, "https://api.pushover.net/1/messages.json");
        assert_eq!(config.target_url, "https://id.txtfire.net/qqq3");
        assert_eq!(config.store_path(), PathBuf::from("db").join("fire_alerts.json"));
    }

    #[test]
    fn reads_overrides() {
        let mut pairs = CREDS.to_vec();
        pairs.extend([
            ("DELAY", "120"),
            ("SEARCH_TERM", " Quezon City "),
            ("JSON_DB_DIR", "/var/lib/firewatch"),
            ("JSON_DB_FILENAME", "qc.json"),
            ("TARGET_URL", "http://localhost:8080/feed"),
        ]);
        let config = AppConfig::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.delay, Duration::from_secs(120));
        assert_eq!(config.search_term, "Quezon City");
        assert_eq!(config.store_path(), PathBuf::from("/var/lib/firewatch/qc.json"));
        assert_eq!(config.target_url, "http://localhost:8080/feed");
    }

    #[test]
    fn missing_token_is_fatal() {
        let err = AppConfig::from_lookup(lookup(&[("PUSHOVER_USER", "user-key")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("PUSHOVER_TOKEN")));
    }

    #[test]
    fn blank_user_counts_as_missing() {
        let err = AppConfig::from_lookup(lookup(&[
            ("PUSHOVER_TOKEN", "app-token"),
            ("PUSHOVER_USER", "   "),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("PUSHOVER_USER")));
    }

    #[test]
    fn rejects_bad_delay() {
        for bad in ["soon", "-5", "1.5", "0"] {
            let mut pairs = CREDS.to_vec();
            pairs.push(("DELAY", bad));
            let err = AppConfig::from_lookup(lookup(&pairs)).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { key: "DELAY", .. }),
                "DELAY={bad} should be rejected"
            );
        }
    }
}
