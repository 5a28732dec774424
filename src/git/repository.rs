use crate::error::{GitError, Result};
use crate::git::executor::{CommandRunner, GitCommand};
use std::path::{Path, PathBuf};

/// Directories a `.git` must contain to count as a working copy
const REQUIRED_DIRS: [&str; 3] = ["objects", "branches", "refs"];

/// Files a `.git` must contain to count as a working copy
const REQUIRED_FILES: [&str; 2] = ["config", "HEAD"];

/// Check whether `dir` is a git working copy.
///
/// Looks at the on-disk layout of `dir/.git` only; nothing is cached, so the
/// answer reflects the filesystem at the time of the call.
pub fn is_git_repo<P: AsRef<Path>>(dir: P) -> bool {
    let git_dir = dir.as_ref().join(".git");
    if !git_dir.is_dir() {
        return false;
    }
    REQUIRED_DIRS.iter().all(|name| git_dir.join(name).is_dir())
        && REQUIRED_FILES.iter().all(|name| git_dir.join(name).is_file())
}

/// Find the working copy that contains `cwd` by asking git for its metadata
/// directory and taking the parent.
///
/// Falls back to "." when git cannot answer, so the caller's validity check
/// reports the directory instead of the run aborting.
pub fn discover_default_dir<R: CommandRunner>(runner: &R, cwd: &Path) -> PathBuf {
    match git_dir_parent(runner, cwd) {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!("could not locate a repository from {}: {}", cwd.display(), e);
            PathBuf::from(".")
        }
    }
}

fn git_dir_parent<R: CommandRunner>(runner: &R, cwd: &Path) -> Result<PathBuf> {
    let output = runner.run(cwd, &GitCommand::rev_parse_git_dir())?;
    let stdout = output.into_result()?;
    let git_dir = stdout.trim();
    if git_dir.is_empty() {
        return Err(GitError::ParseError(
            "git rev-parse --git-dir printed nothing".to_string(),
        ));
    }

    // A bare ".git" has an empty parent, which means the current directory
    match Path::new(git_dir).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(parent.to_path_buf()),
        _ => Ok(PathBuf::from(".")),
    }
}
