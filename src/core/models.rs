use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Views,
    Subscriptions,
    Favorited,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Views, Metric::Subscriptions, Metric::Favorited];

    pub fn name(&self) -> &'static str {
        match self {
            Metric::Views => "views",
            Metric::Subscriptions => "subscriptions",
            Metric::Favorited => "favorited",
        }
    }

    pub fn increase_phrase(&self) -> &'static str {
        match self {
            Metric::Views => "new unique visitor",
            Metric::Subscriptions => "new subscriber",
            Metric::Favorited => "added to favorites",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemStats {
    pub id: String,
    pub title: Option<String>,
    pub views: u64,
    pub subscriptions: u64,
    pub favorited: u64,
}

impl ItemStats {
    pub fn value(&self, metric: Metric) -> u64 {
        match metric {
            Metric::Views => self.views,
            Metric::Subscriptions => self.subscriptions,
            Metric::Favorited => self.favorited,
        }
    }

    pub fn display_title(&self) -> String {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => format!("<untitled item {}>", self.id),
        }
    }

    pub fn delta_since(&self, previous: &ItemStats) -> StatsDelta {
        StatsDelta {
            views: signed_diff(self.views, previous.views),
            subscriptions: signed_diff(self.subscriptions, previous.subscriptions),
            favorited: signed_diff(self.favorited, previous.favorited),
        }
    }

    /// Metrics that strictly increased relative to `previous`, in `Metric::ALL` order.
    pub fn increased_metrics(&self, previous: &ItemStats) -> Vec<Metric> {
        Metric::ALL
            .into_iter()
            .filter(|m| self.value(*m) > previous.value(*m))
            .collect()
    }
}

fn signed_diff(current: u64, previous: u64) -> i64 {
    (current as i128 - previous as i128).clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsDelta {
    pub views: i64,
    pub subscriptions: i64,
    pub favorited: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub at: DateTime<Local>,
    pub title: String,
    pub metric: Metric,
}

impl ChangeEvent {
    pub fn new(stats: &ItemStats, metric: Metric, at: DateTime<Local>) -> Self {
        Self {
            at,
            title: stats.display_title(),
            metric,
        }
    }
}

impl fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.at.format("%H:%M:%S"),
            self.title,
            self.metric.increase_phrase()
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateSummary {
    pub total_views: u64,
    pub total_subscriptions: u64,
    pub total_favorited: u64,
    pub most_viewed: Option<ItemStats>,
    pub most_subscribed: Option<ItemStats>,
    pub most_favorited: Option<ItemStats>,
}

impl AggregateSummary {
    pub fn from_stats(stats: &[ItemStats]) -> Self {
        Self {
            total_views: stats.iter().map(|s| s.views).sum(),
            total_subscriptions: stats.iter().map(|s| s.subscriptions).sum(),
            total_favorited: stats.iter().map(|s| s.favorited).sum(),
            most_viewed: first_max(stats, Metric::Views).cloned(),
            most_subscribed: first_max(stats, Metric::Subscriptions).cloned(),
            most_favorited: first_max(stats, Metric::Favorited).cloned(),
        }
    }

    pub fn most(&self, metric: Metric) -> Option<&ItemStats> {
        match metric {
            Metric::Views => self.most_viewed.as_ref(),
            Metric::Subscriptions => self.most_subscribed.as_ref(),
            Metric::Favorited => self.most_favorited.as_ref(),
        }
    }
}

// `Iterator::max_by_key` keeps the last maximum; ties here go to the earliest item.
fn first_max(stats: &[ItemStats], metric: Metric) -> Option<&ItemStats> {
    stats.iter().fold(None, |best, s| match best {
        Some(b) if b.value(metric) >= s.value(metric) => Some(b),
        _ => Some(s),
    })
}
