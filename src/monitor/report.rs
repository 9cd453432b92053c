use crate::core::models::ItemStats;
use crate::stats::separator;

pub fn item_report_lines(current: &ItemStats, previous: Option<&ItemStats>) -> Vec<String> {
    let mut lines = vec![
        format!("Item: {}", current.display_title()),
        format!("Unique visitors: {}", current.views),
    ];

    match previous {
        Some(previous) => {
            let delta = current.delta_since(previous);
            lines.push(format!(
                "New unique visitors since last session: {}",
                delta.views
            ));
            lines.push(format!(
                "New subscribers since last session: {}",
                delta.subscriptions
            ));
            lines.push(format!(
                "Added to favorites since last session: {}",
                delta.favorited
            ));
        }
        None => lines.push("No data from the previous session.".to_string()),
    }

    lines.push(format!("Subscribers: {}", current.subscriptions));
    lines.push(format!("Added to favorites: {}", current.favorited));
    lines.push(separator());
    lines
}

pub fn unavailable_lines(item_id: &str) -> Vec<String> {
    vec![format!("Stats unavailable for item {}.", item_id), separator()]
}
