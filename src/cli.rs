use clap::Parser;
use std::ffi::OsString;

/// Flag prefixes the tool understands; every other token is dropped before parsing
const RECOGNIZED_PREFIXES: &[&str] = &[
    "-m", "-r", "-i", "-v", "-h", "-V", "--message", "--reset", "--issue", "--verbose", "--help",
    "--version",
];

#[derive(Parser, Debug)]
#[command(name = "jira-commit")]
#[command(
    author,
    version,
    about = "Generate a commit message from the Jira ticket of the current branch",
    args_override_self = true,
    ignore_errors = true
)]
pub struct Cli {
    /// Text appended to the generated message as " - <TEXT>" (attach it: -m"text")
    #[arg(
        short = 'm',
        long = "message",
        value_name = "TEXT",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub message: Option<String>,

    /// Delete the saved configuration before running
    #[arg(short = 'r', long = "reset")]
    pub reset: bool,

    /// Look up this issue id instead of the one in the branch name (attach it: -iPROJ-123)
    #[arg(short = 'i', long = "issue", value_name = "ISSUE")]
    pub issue: Option<String>,

    /// Log debug output to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    /// Parse the process arguments, silently ignoring unrecognized tokens
    pub fn parse_lenient() -> Self {
        Self::parse_from(recognized_args(std::env::args_os()))
    }
}

/// Keep the program name and every token that starts with a known flag
fn recognized_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    args.into_iter()
        .enumerate()
        .filter(|(i, arg)| {
            *i == 0 || {
                let arg = arg.to_string_lossy();
                RECOGNIZED_PREFIXES.iter().any(|p| arg.starts_with(p))
            }
        })
        .map(|(_, arg)| arg)
        .collect()
}
