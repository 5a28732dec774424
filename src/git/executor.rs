use crate::audit::AuditLogger;
use crate::error::{GitError, Result};
use std::fmt;
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// How the child's stdout/stderr are wired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Piped back to us and returned in `CommandOutput`
    Capture,
    /// Shared with our terminal so prompts stay visible; captured text is empty
    Inherit,
}

/// A git invocation, kept as an argument vector so nothing is ever re-split by a shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCommand {
    args: Vec<String>,
    mode: OutputMode,
    envs: Vec<(String, String)>,
}

impl GitCommand {
    /// Build a captured command from its arguments (without the leading "git")
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            mode: OutputMode::Capture,
            envs: Vec::new(),
        }
    }

    pub fn interactive(mut self) -> Self {
        self.mode = OutputMode::Inherit;
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// `git status`, forced to the C locale so its phrases can be matched
    pub fn status() -> Self {
        Self::new(["status"]).env("LC_ALL", "C")
    }

    pub fn pull() -> Self {
        Self::new(["pull"])
    }

    pub fn push() -> Self {
        Self::new(["push"]).interactive()
    }

    pub fn add_all() -> Self {
        Self::new(["add", "."]).interactive()
    }

    pub fn commit_all(message: &str) -> Self {
        Self::new(["commit", "-a", "-m", message]).interactive()
    }

    pub fn rev_parse_git_dir() -> Self {
        Self::new(["rev-parse", "--git-dir"])
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn envs(&self) -> &[(String, String)] {
        &self.envs
    }

    /// The git subcommand, e.g. "commit"
    pub fn subcommand(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}

impl fmt::Display for GitCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("git")?;
        for arg in &self.args {
            write!(f, " {}", quote_arg(arg))?;
        }
        Ok(())
    }
}

/// Quote one word for a POSIX shell. Plain words are returned untouched.
pub fn quote_arg(arg: &str) -> String {
    let is_plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_@%+=:,./-".contains(c));
    if is_plain {
        return arg.to_string();
    }
    format!("'{}'", arg.replace('\'', r"'\''"))
}

/// Result of executing a git command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub success: bool,
}

impl CommandOutput {
    pub fn from_output(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            success: output.status.success(),
        }
    }

    /// Stdout on success, `CommandFailed` otherwise
    pub fn into_result(self) -> Result<String> {
        if self.success {
            Ok(self.stdout)
        } else {
            Err(GitError::CommandFailed {
                exit_code: self.exit_code,
                stderr: self.stderr,
            })
        }
    }
}

/// Runs git commands inside a working directory.
///
/// `Err` is reserved for failing to launch git at all; a git process that
/// exits non-zero still yields `Ok` with `success == false`.
pub trait CommandRunner {
    fn run(&self, dir: &Path, command: &GitCommand) -> Result<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, dir: &Path, command: &GitCommand) -> Result<CommandOutput> {
        (**self).run(dir, command)
    }
}

/// Executes git commands as real subprocesses
#[derive(Debug, Default)]
pub struct GitExecutor {
    audit: Option<AuditLogger>,
}

impl GitExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every executed command in the given audit log
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }
}

impl CommandRunner for GitExecutor {
    fn run(&self, dir: &Path, command: &GitCommand) -> Result<CommandOutput> {
        log::debug!("running `{}` in {}", command, dir.display());

        let mut child = Command::new("git");
        child.args(command.args()).current_dir(dir);
        for (key, value) in command.envs() {
            child.env(key, value);
        }
        match command.mode() {
            OutputMode::Capture => {
                child
                    .stdin(Stdio::null())
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped());
            }
            OutputMode::Inherit => {
                child
                    .stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit());
            }
        }

        let output = CommandOutput::from_output(child.output()?);

        if let Some(audit) = &self.audit {
            if let Err(e) = audit.log_command(&command.to_string(), dir, output.exit_code) {
                log::warn!("failed to write audit log {}: {}", audit.log_path().display(), e);
            }
        }

        Ok(output)
    }
}
