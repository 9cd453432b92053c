use crate::cli::{AppPaths, Startup};
use crate::core::models::AggregateSummary;
use crate::stats::{aggregate, summary_lines};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
struct SummaryOutput {
    items: usize,
    summary: AggregateSummary,
    #[serde(with = "chrono::serde::ts_seconds")]
    fetched_at: DateTime<Utc>,
}

pub async fn run(paths: &AppPaths, json: bool) -> Result<()> {
    let startup = Startup::load(paths)?;
    let summary = aggregate(&startup.client, startup.items.as_slice()).await?;

    if json {
        let output = SummaryOutput {
            items: startup.items.len(),
            summary,
            fetched_at: Utc::now(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for line in summary_lines(&summary) {
            println!("{}", line);
        }
    }

    Ok(())
}
