use super::Monitor;
use crate::core::models::ChangeEvent;
use crate::core::notifications::send_change_notification;
use crate::core::store::SnapshotStore;
use crate::providers::StatsProvider;
use anyhow::Result;
use chrono::Local;
use std::io::Write;
use std::time::Duration;

pub const MONITOR_INTERVAL: Duration = Duration::from_millis(10_000);

impl<P: StatsProvider> Monitor<P> {
    /// One pass over the tracked items. Each change is written to `out` as soon
    /// as its item is compared, before the next fetch starts.
    pub async fn poll_cycle<W: Write>(
        &self,
        rolling: &mut SnapshotStore,
        out: &mut W,
    ) -> Result<Vec<ChangeEvent>> {
        let mut events = Vec::new();

        for item_id in self.items.iter() {
            let Some(current) = self.provider.fetch_stats(item_id).await? else {
                tracing::warn!(item_id, "Stats unavailable, skipping this cycle");
                continue;
            };

            if let Some(previous) = rolling.get(item_id) {
                let now = Local::now();
                for metric in current.increased_metrics(previous) {
                    let event = ChangeEvent::new(&current, metric, now);
                    self.emit(&event, out)?;
                    events.push(event);
                }
            }

            rolling.record(current);
        }

        Ok(events)
    }

    fn emit<W: Write>(&self, event: &ChangeEvent, out: &mut W) -> Result<()> {
        writeln!(out, "{}", event)?;
        out.flush()?;

        if self.options.desktop_notifications {
            if let Err(e) = send_change_notification(event) {
                tracing::warn!(error = %e, "Failed to send desktop notification");
            }
        }

        Ok(())
    }

    pub async fn run_forever<W: Write>(&self, mut rolling: SnapshotStore, out: &mut W) -> Result<()> {
        tracing::info!(
            interval = ?self.options.interval,
            items = self.items.len(),
            persist = self.options.persist_monitoring,
            "Monitoring started"
        );

        loop {
            let events = self.poll_cycle(&mut rolling, out).await?;

            if self.options.persist_monitoring {
                if let Err(e) = rolling.save(&self.snapshot_path) {
                    tracing::warn!(error = %e, "Failed to persist monitoring snapshot");
                }
            }

            tracing::debug!(events = events.len(), "Monitoring cycle complete");
            tokio::time::sleep(self.options.interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::items::TrackedItems;
    use crate::core::models::Metric;
    use crate::monitor::MonitorOptions;
    use crate::providers::scripted::{stats, ScriptedProvider};
    use std::path::Path;
    use tempfile::TempDir;

    fn monitor(dir: &TempDir, ids: &str, options: MonitorOptions) -> Monitor<ScriptedProvider> {
        Monitor::new(
            ScriptedProvider::new(),
            TrackedItems::parse(Path::new("items.txt"), ids).unwrap(),
            dir.path().join("snapshot.json"),
            options,
        )
    }

    fn rolling_with(entries: &[crate::core::models::ItemStats]) -> SnapshotStore {
        let mut store = SnapshotStore::new();
        for entry in entries {
            store.record(entry.clone());
        }
        store
    }

    #[test]
    fn test_default_interval() {
        assert_eq!(MONITOR_INTERVAL, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_no_change_emits_nothing() {
        let dir = TempDir::new().unwrap();
        let monitor = monitor(&dir, "1\n", MonitorOptions::default());
        monitor.provider().push("1", Some(stats("1", 5, 1, 1)));

        let mut rolling = rolling_with(&[stats("1", 5, 1, 1)]);
        let events = monitor.poll_cycle(&mut rolling, &mut std::io::sink()).await.unwrap();
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_increase_emits_single_event() {
        let dir = TempDir::new().unwrap();
        let monitor = monitor(&dir, "1\n", MonitorOptions::default());
        monitor.provider().push("1", Some(stats("1", 7, 1, 1)));

        let mut rolling = rolling_with(&[stats("1", 5, 1, 1)]);
        let events = monitor.poll_cycle(&mut rolling, &mut std::io::sink()).await.unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].metric, Metric::Views);
        assert_eq!(events[0].title, "Item 1");
        assert!(events[0].to_string().ends_with("Item 1: new unique visitor"));
        assert_eq!(rolling.get("1").map(|s| s.views), Some(7));
    }

    #[tokio::test]
    async fn test_decrease_is_silent_but_updates_rolling_state() {
        let dir = TempDir::new().unwrap();
        let monitor = monitor(&dir, "1\n", MonitorOptions::default());
        monitor.provider().push("1", Some(stats("1", 3, 0, 0)));
        monitor.provider().push("1", Some(stats("1", 4, 0, 0)));

        let mut rolling = rolling_with(&[stats("1", 5, 2, 2)]);
        assert!(monitor.poll_cycle(&mut rolling, &mut std::io::sink()).await.unwrap().is_empty());

        let events = monitor.poll_cycle(&mut rolling, &mut std::io::sink()).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].metric, Metric::Views);
    }

    #[tokio::test]
    async fn test_events_follow_item_order_then_metric_order() {
        let dir = TempDir::new().unwrap();
        let monitor = monitor(&dir, "b\na\n", MonitorOptions::default());
        monitor.provider().push("b", Some(stats("b", 1, 1, 0)));
        monitor.provider().push("a", Some(stats("a", 0, 0, 1)));

        let mut rolling = rolling_with(&[stats("a", 0, 0, 0), stats("b", 0, 0, 0)]);
        let events = monitor.poll_cycle(&mut rolling, &mut std::io::sink()).await.unwrap();

        let order: Vec<_> = events.iter().map(|e| (e.title.as_str(), e.metric)).collect();
        assert_eq!(
            order,
            vec![
                ("Item b", Metric::Views),
                ("Item b", Metric::Subscriptions),
                ("Item a", Metric::Favorited),
            ]
        );
    }

    #[tokio::test]
    async fn test_new_item_is_recorded_without_events() {
        let dir = TempDir::new().unwrap();
        let monitor = monitor(&dir, "1\n", MonitorOptions::default());
        monitor.provider().push("1", Some(stats("1", 100, 10, 10)));

        let mut rolling = SnapshotStore::new();
        assert!(monitor.poll_cycle(&mut rolling, &mut std::io::sink()).await.unwrap().is_empty());
        assert_eq!(rolling.get("1").map(|s| s.views), Some(100));
    }

    #[tokio::test]
    async fn test_unavailable_item_keeps_previous_entry() {
        let dir = TempDir::new().unwrap();
        let monitor = monitor(&dir, "1\n2\n", MonitorOptions::default());
        monitor.provider().push("1", None);
        monitor.provider().push("2", Some(stats("2", 2, 0, 0)));

        let mut rolling = rolling_with(&[stats("1", 9, 9, 9), stats("2", 1, 0, 0)]);
        let events = monitor.poll_cycle(&mut rolling, &mut std::io::sink()).await.unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(rolling.get("1").map(|s| s.views), Some(9));
        assert_eq!(monitor.provider().calls(), vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_run_forever_stops_on_fetch_error() {
        let dir = TempDir::new().unwrap();
        let options = MonitorOptions {
            interval: Duration::from_millis(1),
            persist_monitoring: true,
            desktop_notifications: false,
        };
        let monitor = monitor(&dir, "1\n", options);
        monitor.provider().push("1", Some(stats("1", 6, 1, 1)));

        let mut out = Vec::new();
        let result = monitor
            .run_forever(rolling_with(&[stats("1", 5, 1, 1)]), &mut out)
            .await;

        assert!(result.is_err());
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("Item 1: new unique visitor"));

        let saved = SnapshotStore::load(&dir.path().join("snapshot.json")).unwrap();
        assert_eq!(saved.get("1").map(|s| s.views), Some(6));
    }

    #[tokio::test]
    async fn test_events_written_before_later_fetch_fails() {
        let dir = TempDir::new().unwrap();
        let monitor = monitor(&dir, "1\n2\n", MonitorOptions::default());
        monitor.provider().push("1", Some(stats("1", 6, 0, 0)));

        let mut rolling = rolling_with(&[stats("1", 5, 0, 0), stats("2", 0, 0, 0)]);
        let mut out = Vec::new();
        let result = monitor.poll_cycle(&mut rolling, &mut out).await;

        assert!(result.is_err());
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("Item 1: new unique visitor"));
        assert_eq!(rolling.get("1").map(|s| s.views), Some(6));
    }

    #[tokio::test]
    async fn test_run_forever_prints_events_from_failing_cycle() {
        let dir = TempDir::new().unwrap();
        let monitor = monitor(&dir, "1\n2\n", MonitorOptions::default());
        monitor.provider().push("1", Some(stats("1", 6, 0, 0)));

        let mut out = Vec::new();
        let result = monitor
            .run_forever(rolling_with(&[stats("1", 5, 0, 0), stats("2", 0, 0, 0)]), &mut out)
            .await;

        assert!(result.is_err());
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("Item 1: new unique visitor"));
    }

    #[tokio::test]
    async fn test_run_forever_does_not_persist_by_default() {
        let dir = TempDir::new().unwrap();
        let options = MonitorOptions {
            interval: Duration::from_millis(1),
            ..MonitorOptions::default()
        };
        let monitor = monitor(&dir, "1\n", options);
        monitor.provider().push("1", Some(stats("1", 6, 1, 1)));

        let result = monitor
            .run_forever(rolling_with(&[stats("1", 5, 1, 1)]), &mut std::io::sink())
            .await;

        assert!(result.is_err());
        assert!(!dir.path().join("snapshot.json").exists());
    }
}
