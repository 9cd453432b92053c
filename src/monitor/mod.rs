mod polling;
mod report;

use crate::core::items::TrackedItems;
use crate::core::settings::Settings;
use crate::core::store::SnapshotStore;
use crate::providers::StatsProvider;
use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

pub use polling::MONITOR_INTERVAL;
pub use report::{item_report_lines, unavailable_lines};

#[derive(Debug, Clone)]
pub struct MonitorOptions {
    pub interval: Duration,
    pub persist_monitoring: bool,
    pub desktop_notifications: bool,
}

impl MonitorOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            interval: settings.interval,
            persist_monitoring: settings.persist_monitoring,
            desktop_notifications: settings.desktop_notifications,
        }
    }
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self {
            interval: MONITOR_INTERVAL,
            persist_monitoring: false,
            desktop_notifications: false,
        }
    }
}

pub struct Monitor<P: StatsProvider> {
    provider: P,
    items: TrackedItems,
    snapshot_path: PathBuf,
    options: MonitorOptions,
}

impl<P: StatsProvider> Monitor<P> {
    pub fn new(
        provider: P,
        items: TrackedItems,
        snapshot_path: PathBuf,
        options: MonitorOptions,
    ) -> Self {
        Self {
            provider,
            items,
            snapshot_path,
            options,
        }
    }

    #[cfg(test)]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Items the service has no entry for keep their `previous` value, if any.
    pub async fn baseline<W: Write>(
        &self,
        previous: &SnapshotStore,
        out: &mut W,
    ) -> Result<SnapshotStore> {
        let mut next = SnapshotStore::new();

        for item_id in self.items.iter() {
            let prior = previous.get(item_id);

            let lines = match self.provider.fetch_stats(item_id).await? {
                Some(current) => {
                    let lines = item_report_lines(&current, prior);
                    next.record(current);
                    lines
                }
                None => {
                    tracing::warn!(item_id, "Stats unavailable for baseline report");
                    if let Some(prior) = prior {
                        next.record(prior.clone());
                    }
                    unavailable_lines(item_id)
                }
            };

            for line in lines {
                writeln!(out, "{}", line)?;
            }
        }

        next.save(&self.snapshot_path)?;
        tracing::info!(path = ?self.snapshot_path, items = next.len(), "Baseline snapshot saved");

        Ok(next)
    }

    // Cycle 1 compares against the baseline fetch, not the file loaded at startup.
    pub async fn run<W: Write>(&self, previous: &SnapshotStore, out: &mut W) -> Result<()> {
        writeln!(out, "Initial statistics (including changes since the last session):")?;
        let rolling = self.baseline(previous, out).await?;

        writeln!(out, "Entering change monitoring mode...")?;
        self.run_forever(rolling, out).await
    }
}
