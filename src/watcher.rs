use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::alert::IncidentFilter;
use crate::config::AppConfig;
use crate::notifier::{ConsoleNotifier, NotifierHub, PushoverNotifier};
use crate::source::TxtFireSource;
use crate::store::IdentifierStore;

/// State carried from one cycle to the next.
#[derive(Debug)]
pub struct CycleContext {
    pub store: IdentifierStore,
    pub cycles: u64,
}

impl CycleContext {
    pub fn new(store: IdentifierStore) -> Self {
        Self { store, cycles: 0 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub fetch_failed: bool,
    pub fetched: usize,
    pub notifiable: usize,
    pub already_seen: usize,
    pub notified: usize,
    pub failed: usize,
}

pub struct Watchtower {
    delay: Duration,
    filter: IncidentFilter,
    source: TxtFireSource,
    notifier: NotifierHub,
}

impl Watchtower {
    pub fn new(
        delay: Duration,
        filter: IncidentFilter,
        source: TxtFireSource,
        notifier: NotifierHub,
    ) -> Self {
        Self {
            delay,
            filter,
            source,
            notifier,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.delay,
            IncidentFilter::new(config.search_term.clone()),
            TxtFireSource::new(config.target_url.clone()),
            NotifierHub::new(ConsoleNotifier::new(), PushoverNotifier::from_config(config)),
        )
    }

    /// Polls forever, sleeping `delay` between cycles. Ctrl-C while idle stops the loop.
    pub async fn run(&self, mut ctx: CycleContext) -> Result<()> {
        info!(
            "👁️  Polling {} every {}s (search term: {:?})",
            self.source.url(),
            self.delay.as_secs(),
            self.filter.keyword()
        );

        loop {
            let (next, report) = self.run_cycle(ctx).await;
            ctx = next;

            if !report.fetch_failed {
                info!(
                    "🔁 Cycle {}: {} fetched, {} notifiable, {} already sent, {} notified, {} failed",
                    ctx.cycles,
                    report.fetched,
                    report.notifiable,
                    report.already_seen,
                    report.notified,
                    report.failed
                );
            }

            tokio::select! {
                _ = tokio::time::sleep(self.delay) => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("🛑 Interrupted, stopping after {} cycles", ctx.cycles);
                    return Ok(());
                }
            }
        }
    }

    /// One fetch, filter, notify and persist pass.
    ///
    /// An id is recorded once a notification has been attempted, whether or not
    /// the relay accepted it, so a failing incident is not resent every cycle.
    pub async fn run_cycle(&self, mut ctx: CycleContext) -> (CycleContext, CycleReport) {
        ctx.cycles += 1;
        let mut report = CycleReport::default();

        let incidents = match self.source.fetch().await {
            Ok(incidents) => incidents,
            Err(e) => {
                warn!("⚠️  Failed to fetch incidents from {}: {}", self.source.url(), e);
                report.fetch_failed = true;
                return (ctx, report);
            }
        };
        report.fetched = incidents.len();

        for incident in &incidents {
            let Some(alert) = self.filter.should_alert(incident) else {
                debug!(
                    "Skipping {} at {} ({})",
                    incident.alert_type, incident.location, incident.reported_at
                );
                continue;
            };
            report.notifiable += 1;

            if ctx.store.contains(&incident.id) {
                debug!("Already sent: {}", incident.id);
                report.already_seen += 1;
                continue;
            }

            info!("🔥 {} at {} ({})", incident.alert_type, incident.location, incident.reported_at);
            match self.notifier.send(&alert).await {
                Ok(()) => report.notified += 1,
                Err(e) => {
                    warn!("⚠️  Notification for {} was lost: {}", incident.id, e);
                    report.failed += 1;
                }
            }
            ctx.store.add(incident.id.clone());
        }

        if let Err(e) = ctx.store.save() {
            warn!("⚠️  Failed to persist notified ids: {}", e);
        }

        (ctx, report)
    }
}
