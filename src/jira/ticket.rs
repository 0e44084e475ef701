use serde_json::Value;

use crate::error::{Error, Result, TicketField};

/// The parts of a Jira issue a commit message is built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketSummary {
    /// First component name, spaces replaced by hyphens
    pub component: String,
    pub key: String,
    pub summary: String,
}

impl TicketSummary {
    /// Build from the body of a `/search` response, using the first issue.
    ///
    /// Null, absent or wrongly typed values count as missing; issues after
    /// the first are never looked at.
    pub fn from_search_json(body: &str) -> Result<Self> {
        let json: Value = serde_json::from_str(body)?;

        let issue = json
            .get("issues")
            .and_then(|v| v.as_array())
            .and_then(|issues| issues.first())
            .ok_or(Error::NoIssuesFound)?;

        let fields = issue.get("fields");

        let summary = fields
            .and_then(|f| f.get("summary"))
            .and_then(|v| v.as_str())
            .filter(|s| !s.trim().is_empty())
            .ok_or(Error::MissingTicketField(TicketField::Summary))?
            .to_string();

        let key = issue
            .get("key")
            .and_then(|v| v.as_str())
            .filter(|k| !k.is_empty())
            .ok_or(Error::MissingTicketField(TicketField::TicketNumber))?
            .to_string();

        let component = fields
            .and_then(|f| f.get("components"))
            .and_then(|v| v.as_array())
            .and_then(|components| components.first())
            .and_then(|c| c.get("name"))
            .and_then(|v| v.as_str())
            .filter(|n| !n.is_empty())
            .map(|n| n.replace(' ', "-"))
            .ok_or(Error::MissingTicketField(TicketField::Project))?;

        Ok(Self {
            component,
            key,
            summary,
        })
    }
}
