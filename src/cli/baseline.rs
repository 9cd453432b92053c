use crate::cli::{AppPaths, Startup};
use crate::core::store::SnapshotStore;
use crate::monitor::{Monitor, MonitorOptions};
use anyhow::Result;
use std::io;

pub async fn run(paths: &AppPaths) -> Result<()> {
    let startup = Startup::load(paths)?;
    let previous = SnapshotStore::load(&paths.snapshot)?;

    let monitor = Monitor::new(
        startup.client,
        startup.items,
        paths.snapshot.clone(),
        MonitorOptions::from_settings(&startup.settings),
    );

    println!("Initial statistics (including changes since the last session):");
    monitor.baseline(&previous, &mut io::stdout()).await?;
    Ok(())
}
