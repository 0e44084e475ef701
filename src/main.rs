mod cli;
mod commands;
mod commit;
mod config;
mod error;
mod git;
mod issue;
mod jira;
mod message;
mod prompt;
mod ui;

use cli::Cli;
use commands::RunOutcome;
use error::Error;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit status when no issue id could be matched
const EXIT_NO_ISSUE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_lenient();
    init_logging(cli.verbose);

    match commands::run(&cli).await {
        Ok(RunOutcome::Commit(outcome)) => {
            tracing::debug!(?outcome, "finished");
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::NoIssue) => ExitCode::from(EXIT_NO_ISSUE),
        Err(err) => {
            let _ = ui::output::render_error(&err.to_string());
            if err.downcast_ref::<Error>().is_some_and(Error::suggests_reset) {
                let _ = ui::output::render_info("Try to run again with option '-r'");
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("jira_commit=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
