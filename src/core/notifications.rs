use crate::core::models::ChangeEvent;
use anyhow::Result;
use notify_rust::Notification;

pub fn send_change_notification(event: &ChangeEvent) -> Result<()> {
    Notification::new()
        .summary(&format!("Workshop: {}", event.title))
        .body(&format!(
            "{} ({})",
            capitalize(event.metric.increase_phrase()),
            event.at.format("%H:%M:%S")
        ))
        .appname("workshop-stats")
        .timeout(notify_rust::Timeout::Milliseconds(5000))
        .show()?;

    tracing::debug!(
        title = %event.title,
        metric = event.metric.name(),
        "Sent change notification"
    );

    Ok(())
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
