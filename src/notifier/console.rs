use crate::domain::Alert;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }

    pub fn send(&self, alert: &Alert) {
        println!(
            "🚨 [{}] {} - {}",
            alert.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            alert.title,
            alert.message.replace('\n', " | ")
        );
        info!("Alert sent to console: {}", alert.title);
    }
}
