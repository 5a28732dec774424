#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Run git in `dir`, panicking on failure
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Initialize a repository at `path` with a committer identity
pub fn init_repo(path: &Path) {
    fs::create_dir_all(path).expect("Failed to create repo directory");
    git(path, &["init"]);
    git(path, &["config", "user.name", "Test User"]);
    git(path, &["config", "user.email", "test@example.com"]);

    // Recent git templates no longer ship .git/branches
    fs::create_dir_all(path.join(".git").join("branches")).expect("Failed to create .git/branches");
}

/// Helper to create a test git repository
pub fn create_test_repo() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let repo_path = temp_dir.path().join("repo");
    init_repo(&repo_path);
    (temp_dir, repo_path)
}

/// Helper to create a commit
pub fn create_commit(repo_path: &Path, file: &str, content: &str, message: &str) {
    fs::write(repo_path.join(file), content).expect("Failed to write file");
    git(repo_path, &["add", file]);
    git(repo_path, &["commit", "-m", message]);
}

/// A directory with no git metadata at all
pub fn create_plain_dir(parent: &Path, name: &str) -> PathBuf {
    let dir = parent.join(name);
    fs::create_dir_all(&dir).expect("Failed to create plain directory");
    dir
}

/// Six-entry `.git` skeleton, enough for the validity check without running git
pub fn create_fake_repo(parent: &Path, name: &str) -> PathBuf {
    let dir = parent.join(name);
    let git_dir = dir.join(".git");
    for sub in ["objects", "branches", "refs"] {
        fs::create_dir_all(git_dir.join(sub)).unwrap();
    }
    fs::write(git_dir.join("config"), "").unwrap();
    fs::write(git_dir.join("HEAD"), "ref: refs/heads/main\n").unwrap();
    dir
}
