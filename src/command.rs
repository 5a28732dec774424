use crate::git::executor::CommandRunner;
use crate::operator::{DirReport, MultiRepo, Operation, Reporter};
use std::str::FromStr;
use thiserror::Error;

/// Commit message used when none is given
pub const DEFAULT_COMMIT_MESSAGE: &str = "Automatic commit";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("command '{0}' is invalid. Use --help for details")]
pub struct UnknownCommand(pub String);

/// A top-level command word as typed by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Status,
    Pull,
    Push,
    Add,
    Commit,
    /// add, commit, push
    FullPush,
    /// add, commit, pull, push
    FullSync,
}

impl Command {
    /// The operations this command stands for, in execution order
    pub fn operations(self) -> &'static [Operation] {
        match self {
            Command::Status => &[Operation::Status],
            Command::Pull => &[Operation::Pull],
            Command::Push => &[Operation::Push],
            Command::Add => &[Operation::Add],
            Command::Commit => &[Operation::Commit],
            Command::FullPush => &[Operation::Add, Operation::Commit, Operation::Push],
            Command::FullSync => &[
                Operation::Add,
                Operation::Commit,
                Operation::Pull,
                Operation::Push,
            ],
        }
    }
}

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "status" => Ok(Command::Status),
            "pull" => Ok(Command::Pull),
            "push" => Ok(Command::Push),
            "add" => Ok(Command::Add),
            "commit" => Ok(Command::Commit),
            "fullpush" => Ok(Command::FullPush),
            "fullsync" => Ok(Command::FullSync),
            other => Err(UnknownCommand(other.to_string())),
        }
    }
}

/// Everything produced by a `run_commands` call
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<DirReport>,
    pub unknown: Vec<UnknownCommand>,
}

impl RunSummary {
    /// Number of directories where a git command could not start or exited non-zero
    pub fn failures(&self) -> usize {
        self.reports.iter().filter(|r| r.outcome.failed()).count()
    }

    /// Process exit status. Failures only count under `strict`; otherwise 0.
    pub fn exit_code(&self, strict: bool) -> i32 {
        if strict && (self.failures() > 0 || !self.unknown.is_empty()) {
            1
        } else {
            0
        }
    }
}

/// Run each command word in order. Every operation finishes across all
/// directories before the next one starts. Unknown words are reported on
/// stderr and skipped.
pub fn run_commands<R, S>(
    operator: &MultiRepo<R>,
    words: &[S],
    message: &str,
    reporter: &mut dyn Reporter,
) -> RunSummary
where
    R: CommandRunner,
    S: AsRef<str>,
{
    let mut summary = RunSummary::default();
    for word in words {
        let command = match word.as_ref().parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e);
                summary.unknown.push(e);
                continue;
            }
        };
        for &operation in command.operations() {
            log::debug!("applying {} to {} directories", operation, operator.dirs().len());
            let reports = operator.apply(operation, message, reporter);
            summary.reports.extend(reports);
        }
    }
    summary
}
