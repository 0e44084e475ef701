use crate::jira::TicketSummary;

/// `[<component>][<key>]: <summary>`
pub fn format_commit_message(ticket: &TicketSummary) -> String {
    format!(
        "[{}][{}]: {}",
        ticket.component,
        ticket.key,
        ticket.summary.trim()
    )
}

/// Append ` - <suffix>` when a suffix was given, even an empty one
pub fn append_suffix(message: String, suffix: Option<&str>) -> String {
    match suffix {
        Some(suffix) => format!("{} - {}", message, suffix),
        None => message,
    }
}
