pub mod alert;
pub mod config;
pub mod domain;
pub mod error;
pub mod notifier;
pub mod source;
pub mod store;
pub mod utils;
pub mod watcher;

use config::AppConfig;
use store::IdentifierStore;
use utils::mask_secret;
use watcher::{CycleContext, Watchtower};

use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Loads `.env` before reading `RUST_LOG`, so a level set there takes effect.
/// Falls back to `info` when no filter is configured.
pub fn load_env_filter<F>(load_dotenv: F) -> (std::result::Result<PathBuf, dotenv::Error>, EnvFilter)
where
    F: FnOnce() -> std::result::Result<PathBuf, dotenv::Error>,
{
    let loaded = load_dotenv();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    (loaded, filter)
}

pub async fn run() -> Result<()> {
    let config = AppConfig::from_env()?;
    log_config(&config);

    let store = IdentifierStore::load_or_reset(config.store_path());
    info!(
        "📋 Loaded {} notified incident ids from {:?}",
        store.len(),
        store.path()
    );

    let app = Watchtower::from_config(&config);
    app.run(CycleContext::new(store)).await
}

fn log_config(config: &AppConfig) {
    debug!("{}", "=".repeat(70));
    debug!("Configuration:");
    debug!("Search Term: {:?}", config.search_term);
    debug!("Delay: {} seconds", config.delay.as_secs());
    debug!("JSON DB Path: {:?}", config.store_path());
    debug!("Target URL: {}", config.target_url);
    debug!("Pushover Token: {}", mask_secret(&config.pushover_token));
    debug!("Pushover User: {}", mask_secret(&config.pushover_user));
    debug!("Pushover Endpoint: {}", config.pushover_endpoint);
    debug!("{}", "=".repeat(70));
}

#[cfg(test)]
mod tests {
    use super::load_env_filter;
    use tempfile::TempDir;

    // One test so nothing else races on RUST_LOG.
    #[test]
    fn rust_log_from_dotenv_reaches_the_filter() {
        std::env::remove_var("RUST_LOG");
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");

        let (loaded, filter) = load_env_filter(|| dotenv::from_path(&path).map(|_| path.clone()));
        assert!(loaded.is_err());
        assert!(filter.to_string().contains("info"));
        assert!(!filter.to_string().contains("debug"));

        std::fs::write(&path, "RUST_LOG=firewatch=debug\n").unwrap();
        let (loaded, filter) = load_env_filter(|| dotenv::from_path(&path).map(|_| path.clone()));
        std::env::remove_var("RUST_LOG");

        assert_eq!(loaded.unwrap(), path);
        assert!(filter.to_string().contains("firewatch=debug"));
    }
}
