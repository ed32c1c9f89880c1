use jobscout_core::{Alert, JobEntry, SessionState, SessionView, StatusIndicator};

pub fn status_line(view: &SessionView) -> String {
    let dot = match view.indicator {
        StatusIndicator::Alive => "●",
        StatusIndicator::Dead => "○",
    };
    let session = match view.session {
        SessionState::Idle => "Idle",
        SessionState::Starting => "Starting",
        SessionState::Running => "Running",
    };

    let mut line = format!(
        "{} {} | [{}] | Jobs: {}",
        dot, session, view.toggle_label, view.rendered_jobs
    );
    if view.dropped_events > 0 {
        line.push_str(&format!(" | Dropped: {}", view.dropped_events));
    }
    line
}

pub fn alert_lines(alert: Option<&Alert>) -> Vec<String> {
    match alert {
        Some(alert) => vec![
            "!! Request failed".to_string(),
            format!("   {}", alert.body),
            format!("   at {}", alert.url),
            "   (type c to close)".to_string(),
        ],
        None => vec!["Alert closed".to_string()],
    }
}

pub fn entry_lines(index: usize, entry: &JobEntry, received_at: &str) -> Vec<String> {
    let mut lines = vec![format!("#{} {} [{}]", index, entry.title, received_at)];
    if !entry.heading.is_empty() {
        lines.push(format!("   {}", entry.heading));
    }
    if let Some(discovered) = &entry.discovered {
        lines.push(format!("   Discovered: {}", discovered));
    }
    for section in &entry.sections {
        lines.push(format!("   {}: {}", section.label, section.text));
    }
    for link in &entry.links {
        lines.push(format!("   {} -> {}", link.label, link.target));
    }
    lines
}
