use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Ticket fields that must be present to build a commit message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketField {
    Summary,
    TicketNumber,
    Project,
}

impl fmt::Display for TicketField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Summary => "Summary",
            Self::TicketNumber => "Ticket number",
            Self::Project => "Project",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to write config file {}: {source}", .path.display())]
    ConfigWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to delete config file {}: {source}", .path.display())]
    ConfigDelete {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to determine config directory")]
    ConfigDir,

    #[error("The command should run inside a git repository")]
    NotARepository,

    #[error("Error retrieving branch name: {0}")]
    BranchUnavailable(String),

    #[error("Couldn't extract project from {0}")]
    ProjectExtraction(String),

    #[error("Something went wrong, maybe you need to re-authenticate with your Jira provider")]
    AuthenticationSuspected,

    #[error("No issues found")]
    NoIssuesFound,

    #[error("{0} is missing")]
    MissingTicketField(TicketField),

    #[error("Invalid {0}")]
    InvalidInput(&'static str),

    #[error("Input closed, nothing was changed")]
    Aborted,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Jira API error: {0}")]
    Api(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether a stale or wrong saved configuration could explain this error
    pub fn suggests_reset(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Api(_) | Self::Json(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
