//! Issue id resolution from branch names or explicit ids
//!
//! Branch names conventionally embed a project key and ticket number:
//! - `PROJ-123-short-description`
//! - `feature/PROJ-123`
//!
//! The project key is the text before the first `-` (minus any `prefix/`),
//! the issue id is the first `<project>-<1 to 4 digits>` found in the name.

use regex::Regex;

use crate::error::{Error, Result};
use crate::git::BranchSource;

/// What the issue id was looked up in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueSource {
    Branch(String),
    Explicit(String),
}

impl IssueSource {
    pub fn text(&self) -> &str {
        match self {
            Self::Branch(s) | Self::Explicit(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIssue {
    pub project: String,
    /// `None` when nothing in the source matched the issue pattern
    pub issue_id: Option<String>,
    pub source: IssueSource,
}

/// Extract the project key from a branch name or issue id
pub fn extract_project(text: &str) -> Option<String> {
    let head = text.split('-').next().unwrap_or_default();
    let project = match head.rfind('/') {
        Some(idx) => &head[idx + 1..],
        None => head,
    };

    if project.is_empty() {
        None
    } else {
        Some(project.to_string())
    }
}

/// Find the first `<project>-<1 to 4 digits>` occurrence in `text`.
///
/// Ticket numbers longer than four digits are truncated to their first four.
pub fn extract_issue(text: &str, project: &str) -> Option<String> {
    let pattern = format!(r"{}-\d{{1,4}}", regex::escape(project));
    let re = Regex::new(&pattern).ok()?;
    re.find(text).map(|m| m.as_str().to_string())
}

/// Determine project and issue id, from `explicit` when given, else from the current branch
pub fn resolve(explicit: Option<&str>, branches: &impl BranchSource) -> Result<ResolvedIssue> {
    let source = match explicit {
        Some(issue) => IssueSource::Explicit(issue.to_string()),
        None => IssueSource::Branch(branches.current_branch_name()?),
    };

    let project = extract_project(source.text()).ok_or_else(|| {
        Error::ProjectExtraction(match &source {
            IssueSource::Branch(_) => "branch".to_string(),
            IssueSource::Explicit(_) => "issue".to_string(),
        })
    })?;
    let issue_id = extract_issue(source.text(), &project);

    tracing::debug!(?source, %project, ?issue_id, "resolved issue");

    Ok(ResolvedIssue {
        project,
        issue_id,
        source,
    })
}
