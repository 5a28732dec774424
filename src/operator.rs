use crate::error::GitError;
use crate::git::executor::{CommandRunner, GitCommand};
use crate::git::repository::is_git_repo;
use crate::git::status::{Cleanliness, cleanliness};
use std::fmt;
use std::path::{Path, PathBuf};

/// A single git operation applied across all directories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Status,
    Pull,
    Push,
    Add,
    Commit,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::Status => "status",
            Operation::Pull => "pull",
            Operation::Push => "push",
            Operation::Add => "add",
            Operation::Commit => "commit",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What happened in one directory. Carries no presentation details.
#[derive(Debug)]
pub enum Outcome {
    NotARepository,
    Clean,
    Dirty,
    NothingToAdd,
    NothingToCommit,
    /// A git command was run; `failure` is set when it could not start or exited non-zero
    Ran {
        output: String,
        failure: Option<GitError>,
    },
}

impl Outcome {
    pub fn failed(&self) -> bool {
        matches!(self, Outcome::Ran { failure: Some(_), .. })
    }
}

impl From<Cleanliness> for Outcome {
    fn from(value: Cleanliness) -> Self {
        match value {
            Cleanliness::Clean => Outcome::Clean,
            Cleanliness::Dirty => Outcome::Dirty,
        }
    }
}

#[derive(Debug)]
pub struct DirReport {
    pub dir: PathBuf,
    pub operation: Operation,
    pub outcome: Outcome,
}

/// Receives per-directory progress while an operation runs.
///
/// `begin` fires before anything is checked, `running` right before a git
/// subprocess is spawned, `finish` once the directory is done.
pub trait Reporter {
    fn begin(&mut self, dir: &Path, operation: Operation);
    fn running(&mut self, dir: &Path, operation: Operation);
    fn finish(&mut self, report: &DirReport);
}

/// Reporter that discards every event
#[derive(Debug, Default)]
pub struct Silent;

impl Reporter for Silent {
    fn begin(&mut self, _dir: &Path, _operation: Operation) {}
    fn running(&mut self, _dir: &Path, _operation: Operation) {}
    fn finish(&mut self, _report: &DirReport) {}
}

/// Applies git operations to an ordered list of directories, one directory at a time
#[derive(Debug)]
pub struct MultiRepo<R> {
    dirs: Vec<PathBuf>,
    runner: R,
}

impl<R: CommandRunner> MultiRepo<R> {
    pub fn new<I, P>(dirs: I, runner: R) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
            runner,
        }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn pull(&self, reporter: &mut dyn Reporter) -> Vec<DirReport> {
        self.each_repo(Operation::Pull, reporter, |dir, reporter| {
            self.run_git(dir, Operation::Pull, &GitCommand::pull(), reporter)
        })
    }

    pub fn push(&self, reporter: &mut dyn Reporter) -> Vec<DirReport> {
        self.each_repo(Operation::Push, reporter, |dir, reporter| {
            self.run_git(dir, Operation::Push, &GitCommand::push(), reporter)
        })
    }

    pub fn status(&self, reporter: &mut dyn Reporter) -> Vec<DirReport> {
        self.each_repo(Operation::Status, reporter, |dir, _| {
            self.cleanliness(dir).into()
        })
    }

    /// `git add .` in every dirty repository
    pub fn add_all(&self, reporter: &mut dyn Reporter) -> Vec<DirReport> {
        self.each_repo(Operation::Add, reporter, |dir, reporter| {
            if self.cleanliness(dir).is_clean() {
                return Outcome::NothingToAdd;
            }
            self.run_git(dir, Operation::Add, &GitCommand::add_all(), reporter)
        })
    }

    /// `git commit -a -m <message>` in every dirty repository
    pub fn commit_all(&self, message: &str, reporter: &mut dyn Reporter) -> Vec<DirReport> {
        let command = GitCommand::commit_all(message);
        self.each_repo(Operation::Commit, reporter, |dir, reporter| {
            if self.cleanliness(dir).is_clean() {
                return Outcome::NothingToCommit;
            }
            self.run_git(dir, Operation::Commit, &command, reporter)
        })
    }

    /// Dispatch one operation; `message` is only used by commits
    pub fn apply(
        &self,
        operation: Operation,
        message: &str,
        reporter: &mut dyn Reporter,
    ) -> Vec<DirReport> {
        match operation {
            Operation::Status => self.status(reporter),
            Operation::Pull => self.pull(reporter),
            Operation::Push => self.push(reporter),
            Operation::Add => self.add_all(reporter),
            Operation::Commit => self.commit_all(message, reporter),
        }
    }

    /// Run `git status` in `dir` and classify it; any failure counts as dirty
    pub fn cleanliness(&self, dir: &Path) -> Cleanliness {
        match self.runner.run(dir, &GitCommand::status()) {
            Ok(output) => cleanliness(&output),
            Err(e) => {
                log::debug!("git status failed in {}: {}", dir.display(), e);
                Cleanliness::Dirty
            }
        }
    }

    /// Validate each directory before handing it to `op`
    fn each_repo<F>(
        &self,
        operation: Operation,
        reporter: &mut dyn Reporter,
        op: F,
    ) -> Vec<DirReport>
    where
        F: Fn(&Path, &mut dyn Reporter) -> Outcome,
    {
        let mut reports = Vec::with_capacity(self.dirs.len());
        for dir in &self.dirs {
            reporter.begin(dir, operation);
            let outcome = if is_git_repo(dir) {
                op(dir, &mut *reporter)
            } else {
                Outcome::NotARepository
            };
            let report = DirReport {
                dir: dir.clone(),
                operation,
                outcome,
            };
            reporter.finish(&report);
            reports.push(report);
        }
        reports
    }

    fn run_git(
        &self,
        dir: &Path,
        operation: Operation,
        command: &GitCommand,
        reporter: &mut dyn Reporter,
    ) -> Outcome {
        reporter.running(dir, operation);
        let output = match self.runner.run(dir, command) {
            Ok(output) => output,
            Err(e) => {
                log::warn!("{}: could not run `{}`: {}", dir.display(), command, e);
                return Outcome::Ran {
                    output: String::new(),
                    failure: Some(e),
                };
            }
        };

        let partial = output.stdout.clone();
        match output.into_result() {
            Ok(stdout) => Outcome::Ran {
                output: stdout,
                failure: None,
            },
            Err(e) => {
                log::warn!("{}: `{}` failed: {}", dir.display(), command, e);
                Outcome::Ran {
                    output: partial,
                    failure: Some(e),
                }
            }
        }
    }
}
