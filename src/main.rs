// Firewatch - Fire Incident Notifier
// Polls the txtfire feed and pushes dangerous incidents to a phone via Pushover

use anyhow::Result;
use tracing::{info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let (dotenv_result, filter) = firewatch::load_env_filter(dotenv::dotenv);
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match dotenv_result {
        Ok(path) => info!("📄 Loaded .env from {:?}", path),
        Err(e) => warn!("⚠️  Could not load .env file: {}", e),
    }

    info!("🏗️  Starting Firewatch - Fire Incident Notifier");
    firewatch::run().await
}
