use std::path::PathBuf;

use crate::cli::Cli;
use crate::commit::{CommitOutcome, confirm_and_commit};
use crate::config::{API_KEY_ENV, Config, Settings, env_api_key};
use crate::error;
use crate::git::{BranchSource, Committer, CurrentDirRepo, GitCli};
use crate::issue;
use crate::jira::{JiraClient, TicketSource};
use crate::message::{append_suffix, format_commit_message};
use crate::prompt::{Prompt, TerminalPrompt};
use crate::ui::output;
use anyhow::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Commit(CommitOutcome),
    /// Neither the branch nor the `-i` value contained an issue id
    NoIssue,
}

/// The outside world a run talks to
pub struct Context<P, B, C> {
    pub config_path: PathBuf,
    /// Raw value of [`API_KEY_ENV`], validated once the run starts
    pub env_api_key: Option<String>,
    pub prompt: P,
    pub branches: B,
    pub committer: C,
}

/// Resolve the ticket, build its commit message and commit after confirmation
pub async fn run(cli: &Cli) -> Result<RunOutcome> {
    let mut ctx = Context {
        config_path: Config::config_path()?,
        env_api_key: std::env::var(API_KEY_ENV).ok(),
        prompt: TerminalPrompt::stdin(),
        branches: CurrentDirRepo,
        committer: GitCli,
    };

    run_with(cli, &mut ctx, JiraClient::new).await
}

/// [`run`] against explicit collaborators. `connect` builds the tracker client
/// and is only called once an issue id is known.
pub async fn run_with<P, B, C, T>(
    cli: &Cli,
    ctx: &mut Context<P, B, C>,
    connect: impl FnOnce(&Settings) -> error::Result<T>,
) -> Result<RunOutcome>
where
    P: Prompt,
    B: BranchSource,
    C: Committer,
    T: TicketSource,
{
    if cli.reset {
        Config::delete(&ctx.config_path)?;
        tracing::info!(path = %ctx.config_path.display(), "config removed");
    }

    let env_key = env_api_key(ctx.env_api_key.clone())?;
    let loaded = Config::load(&ctx.config_path).unwrap_or_default();
    tracing::debug!(source = ?loaded.api_key_source(env_key.as_deref()), "api key");

    let (config, settings, prompted) = loaded.fill_missing(env_key.as_deref(), &mut ctx.prompt)?;

    if prompted && let Err(e) = config.save(&ctx.config_path) {
        tracing::warn!(error = %e, "could not save config, continuing");
    }

    let explicit = cli.issue.as_deref().filter(|i| !i.is_empty());
    let resolved = issue::resolve(explicit, &ctx.branches)?;

    let Some(issue_id) = resolved.issue_id.as_deref() else {
        output::render_no_issue(&resolved)?;
        return Ok(RunOutcome::NoIssue);
    };

    let tracker = connect(&settings)?;
    let ticket = tracker.fetch_ticket(&resolved.project, issue_id).await?;

    let message = append_suffix(format_commit_message(&ticket), cli.message.as_deref());
    output::render_commit_message(&message, &resolved)?;

    let outcome = confirm_and_commit(&message, &mut ctx.prompt, &ctx.committer)?;
    if outcome == CommitOutcome::Declined {
        output::render_declined()?;
    }

    Ok(RunOutcome::Commit(outcome))
}
