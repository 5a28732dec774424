pub mod audit;
pub mod command;
pub mod config;
pub mod error;
pub mod git;
pub mod operator;
pub mod output;

// Re-export commonly used types for convenience
pub use command::{Command, DEFAULT_COMMIT_MESSAGE, RunSummary, UnknownCommand, run_commands};
pub use error::{AppError, GitError, Result};
pub use git::{Cleanliness, CommandOutput, CommandRunner, GitCommand, GitExecutor, is_git_repo};
pub use operator::{DirReport, MultiRepo, Operation, Outcome, Reporter};
