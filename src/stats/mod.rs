use crate::core::models::{AggregateSummary, ItemStats, Metric};
use crate::providers::StatsProvider;
use anyhow::Result;

pub const SEPARATOR_WIDTH: usize = 40;

pub fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

pub async fn aggregate(provider: &dyn StatsProvider, items: &[String]) -> Result<AggregateSummary> {
    let mut all = Vec::with_capacity(items.len());

    for item_id in items {
        match provider.fetch_stats(item_id).await? {
            Some(stats) => all.push(stats),
            None => tracing::warn!(item_id = %item_id, "Stats unavailable, excluded from summary"),
        }
    }

    tracing::info!(
        fetched = all.len(),
        tracked = items.len(),
        provider = provider.name(),
        "Aggregated item stats"
    );

    Ok(AggregateSummary::from_stats(&all))
}

pub fn summary_lines(summary: &AggregateSummary) -> Vec<String> {
    let title_of = |stats: Option<&ItemStats>| {
        stats
            .map(ItemStats::display_title)
            .unwrap_or_else(|| "n/a".to_string())
    };

    vec![
        format!("Total unique visitors: {}", summary.total_views),
        format!("Total subscribers across all items: {}", summary.total_subscriptions),
        format!("Total added to favorites: {}", summary.total_favorited),
        separator(),
        format!(
            "Most popular item by unique visitors: {}",
            title_of(summary.most(Metric::Views))
        ),
        format!(
            "Most popular item by subscribers: {}",
            title_of(summary.most(Metric::Subscriptions))
        ),
        format!(
            "Most popular item by favorites: {}",
            title_of(summary.most(Metric::Favorited))
        ),
        separator(),
    ]
}
