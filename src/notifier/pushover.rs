use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::domain::Alert;
use crate::error::NotifyError;

// Emergency priority: the device keeps re-alerting every `retry` seconds
// until acknowledged or `expire` seconds pass.
const SOUND: &str = "alien";
const PRIORITY: &str = "2";
const RETRY_SECS: &str = "30";
const EXPIRE_SECS: &str = "3600";
const TTL_SECS: &str = "60";

#[derive(Debug, Clone)]
pub struct PushoverNotifier {
    endpoint: String,
    token: String,
    user: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct PushoverResponse {
    status: i64,
    #[serde(default)]
    errors: Vec<String>,
}

impl PushoverNotifier {
    pub fn new(endpoint: String, token: String, user: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            endpoint,
            token,
            user,
            client,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.pushover_endpoint.clone(),
            config.pushover_token.clone(),
            config.pushover_user.clone(),
        )
    }

    pub async fn send(&self, alert: &Alert) -> Result<(), NotifyError> {
        self.notify(&alert.title, &alert.message).await
    }

    pub async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        let form = [
            ("token", self.token.as_str()),
            ("user", self.user.as_str()),
            ("title", title),
            ("message", message),
            ("sound", SOUND),
            ("priority", PRIORITY),
            ("retry", RETRY_SECS),
            ("expire", EXPIRE_SECS),
            ("ttl", TTL_SECS),
        ];

        let response = self.client.post(&self.endpoint).form(&form[..]).send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        // Pushover answers {"status":1,...} on success and {"status":0,"errors":[...]} otherwise.
        let parsed = serde_json::from_str::<PushoverResponse>(&body).ok();
        let accepted = parsed.as_ref().map(|p| p.status == 1).unwrap_or(true);

        if status.is_success() && accepted {
            info!("Alert sent to Pushover: {}", title);
            return Ok(());
        }

        let errors = match parsed {
            Some(p) if !p.errors.is_empty() => p.errors,
            _ if body.is_empty() => vec!["Unknown error".to_string()],
            _ => vec![body],
        };
        warn!("Failed to send Pushover alert: {}", errors.join("; "));
        Err(NotifyError::Rejected { status, errors })
    }
}
