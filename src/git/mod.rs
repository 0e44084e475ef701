mod repo;

pub use repo::{BranchSource, Committer, CurrentDirRepo, GitCli};
