use crate::git::executor::CommandOutput;
use regex::Regex;
use std::sync::LazyLock;

static NOTHING_TO_COMMIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^nothing to commit").expect("valid regex"));

// Older git prefixed every long-format status line with "# "
static AHEAD_OF_UPSTREAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(# )?your branch is ahead of").expect("valid regex"));

/// Whether a working copy has anything left to commit or push
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cleanliness {
    Clean,
    Dirty,
}

impl Cleanliness {
    pub fn is_clean(self) -> bool {
        self == Cleanliness::Clean
    }
}

/// Classify the captured output of `git status`.
///
/// Clean iff the last line starts with "nothing to commit" and no line says
/// the branch is ahead of its upstream. A failed status run is Dirty.
pub fn cleanliness(output: &CommandOutput) -> Cleanliness {
    if !output.success {
        return Cleanliness::Dirty;
    }
    classify_status_text(&output.stdout)
}

/// Apply the two status rules to raw `git status` text
pub fn classify_status_text(text: &str) -> Cleanliness {
    let last_line_clean = text
        .lines()
        .last()
        .is_some_and(|line| NOTHING_TO_COMMIT.is_match(line));
    let ahead = text.lines().any(|line| AHEAD_OF_UPSTREAM.is_match(line));

    if last_line_clean && !ahead {
        Cleanliness::Clean
    } else {
        Cleanliness::Dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(stdout: &str) -> CommandOutput {
        CommandOutput {
            stdout: stdout.to_string(),
            stderr: String::new(),
            exit_code: 0,
            success: true,
        }
    }

    #[test]
    fn test_clean_working_tree() {
        let text = "On branch main\nYour branch is up to date with 'origin/main'.\n\nnothing to commit, working tree clean\n";
        assert_eq!(cleanliness(&ok(text)), Cleanliness::Clean);
    }

    #[test]
    fn test_empty_repository_is_clean() {
        let text = "On branch main\n\nNo commits yet\n\nnothing to commit (create/copy files and use \"git add\" to track)\n";
        assert_eq!(cleanliness(&ok(text)), Cleanliness::Clean);
    }

    #[test]
    fn test_modified_files_are_dirty() {
        let text = "On branch main\nChanges not staged for commit:\n  (use \"git add <file>...\" to update what will be committed)\n\tmodified:   README.md\n\nno changes added to commit (use \"git add\" and/or \"git commit -a\")\n";
        assert_eq!(cleanliness(&ok(text)), Cleanliness::Dirty);
    }

    #[test]
    fn test_untracked_files_are_dirty() {
        let text = "On branch main\nUntracked files:\n\tnew.txt\n\nnothing added to commit but untracked files present (use \"git add\" to track)\n";
        assert_eq!(cleanliness(&ok(text)), Cleanliness::Dirty);
    }

    #[test]
    fn test_ahead_of_upstream_is_dirty() {
        let text = "On branch main\nYour branch is ahead of 'origin/main' by 1 commit.\n  (use \"git push\" to publish your local commits)\n\nnothing to commit, working tree clean\n";
        assert_eq!(cleanliness(&ok(text)), Cleanliness::Dirty);
    }

    #[test]
    fn test_legacy_hash_prefix() {
        let ahead = "# On branch master\n# Your branch is ahead of 'origin/master' by 2 commits.\n#\nnothing to commit (working directory clean)\n";
        assert_eq!(classify_status_text(ahead), Cleanliness::Dirty);

        let clean = "# On branch master\nnothing to commit (working directory clean)\n";
        assert_eq!(classify_status_text(clean), Cleanliness::Clean);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        assert_eq!(classify_status_text("NOTHING TO COMMIT"), Cleanliness::Clean);
        assert_eq!(
            classify_status_text("YOUR BRANCH IS AHEAD OF x\nnothing to commit"),
            Cleanliness::Dirty
        );
    }

    #[test]
    fn test_only_last_line_counts() {
        let text = "nothing to commit\nChanges not staged for commit:\n\tmodified:   a.txt\n";
        assert_eq!(classify_status_text(text), Cleanliness::Dirty);
    }

    #[test]
    fn test_phrase_must_start_the_line() {
        assert_eq!(classify_status_text("  nothing to commit"), Cleanliness::Dirty);
    }

    #[test]
    fn test_empty_output_is_dirty() {
        assert_eq!(cleanliness(&ok("")), Cleanliness::Dirty);
    }

    #[test]
    fn test_failed_status_is_dirty() {
        let output = CommandOutput {
            stdout: "nothing to commit, working tree clean\n".to_string(),
            stderr: "fatal: something broke".to_string(),
            exit_code: 128,
            success: false,
        };
        assert_eq!(cleanliness(&output), Cleanliness::Dirty);
    }
}
