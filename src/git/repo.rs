use git2::{ErrorCode, Repository};
use std::path::Path;
use std::process::Command;

use crate::error::{Error, Result};

/// Anything that can tell which branch is checked out
pub trait BranchSource {
    fn current_branch_name(&self) -> Result<String>;
}

/// Anything that can record a commit with a given message
pub trait Committer {
    fn commit(&self, message: &str) -> Result<()>;
}

pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Open the git repository containing the current directory
    pub fn open_current_dir() -> Result<Self> {
        Self::discover(".")
    }

    /// Open the git repository containing `path`
    pub fn discover(path: impl AsRef<Path>) -> Result<Self> {
        let repo = Repository::discover(path).map_err(|e| match e.code() {
            ErrorCode::NotFound => Error::NotARepository,
            _ => Error::BranchUnavailable(e.message().to_string()),
        })?;
        Ok(Self { repo })
    }

    /// Get the name of the current branch
    pub fn current_branch(&self) -> Result<String> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == ErrorCode::UnbornBranch => return self.unborn_branch(),
            Err(e) => return Err(Error::BranchUnavailable(e.message().to_string())),
        };

        if head.is_branch() {
            let branch_name = head
                .shorthand()
                .ok_or_else(|| Error::BranchUnavailable("branch name is not valid UTF-8".into()))?
                .to_string();
            Ok(branch_name)
        } else {
            // Detached HEAD state
            let commit = head
                .peel_to_commit()
                .map_err(|e| Error::BranchUnavailable(e.message().to_string()))?;
            let short_id = commit.id().to_string();
            Ok(format!("(detached HEAD at {})", &short_id[..7]))
        }
    }

    /// HEAD of a repository without commits still names the branch it will create
    fn unborn_branch(&self) -> Result<String> {
        let head = self
            .repo
            .find_reference("HEAD")
            .map_err(|e| Error::BranchUnavailable(e.message().to_string()))?;
        let target = head
            .symbolic_target()
            .ok_or_else(|| Error::BranchUnavailable("HEAD has no symbolic target".into()))?;
        Ok(target.trim_start_matches("refs/heads/").to_string())
    }
}

impl BranchSource for GitRepo {
    fn current_branch_name(&self) -> Result<String> {
        self.current_branch()
    }
}

/// Opens the repository of the current directory only when a branch is asked for
pub struct CurrentDirRepo;

impl BranchSource for CurrentDirRepo {
    fn current_branch_name(&self) -> Result<String> {
        GitRepo::open_current_dir()?.current_branch()
    }
}

/// Commits through the `git` executable so hooks, signing and editor
/// configuration behave exactly as with a manual `git commit`
pub struct GitCli;

impl Committer for GitCli {
    fn commit(&self, message: &str) -> Result<()> {
        let status = Command::new("git").args(["commit", "-m", message]).status()?;

        if !status.success() {
            return Err(Error::Io(std::io::Error::other(format!(
                "git commit exited with {}",
                status
            ))));
        }
        Ok(())
    }
}
