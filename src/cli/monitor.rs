use crate::cli::{AppPaths, Startup};
use crate::core::store::SnapshotStore;
use crate::monitor::{Monitor, MonitorOptions};
use crate::stats::{aggregate, summary_lines};
use anyhow::Result;
use std::io;

pub async fn run(paths: &AppPaths) -> Result<()> {
    let startup = Startup::load(paths)?;

    let summary = aggregate(&startup.client, startup.items.as_slice()).await?;
    for line in summary_lines(&summary) {
        println!("{}", line);
    }

    let previous = SnapshotStore::load(&paths.snapshot)?;
    if previous.is_empty() {
        tracing::info!("No previous session data, deltas will start with the next run");
    }

    let monitor = Monitor::new(
        startup.client,
        startup.items,
        paths.snapshot.clone(),
        MonitorOptions::from_settings(&startup.settings),
    );

    monitor.run(&previous, &mut io::stdout()).await
}
