//! Current-branch lookup through the `git` executable.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{DevGateError, Result};

/// Source of the currently checked-out branch name.
#[cfg_attr(test, mockall::automock)]
pub trait BranchSource {
    /// Short name of the checked-out branch.
    fn current_branch(&self) -> Result<String>;
}

/// Queries `git symbolic-ref --short HEAD`.
#[derive(Debug, Default, Clone)]
pub struct GitCli {
    workdir: Option<PathBuf>,
}

impl GitCli {
    /// Run git in the process working directory.
    pub fn new() -> Self {
        Self { workdir: None }
    }

    /// Run git inside `workdir`.
    pub fn in_dir(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: Some(workdir.into()),
        }
    }

    fn workdir(&self) -> Option<&Path> {
        self.workdir.as_deref()
    }
}

impl BranchSource for GitCli {
    fn current_branch(&self) -> Result<String> {
        let mut command = Command::new("git");
        command.args(["symbolic-ref", "--short", "HEAD"]);
        if let Some(dir) = self.workdir() {
            command.current_dir(dir);
        }

        let output = command.output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DevGateError::Other(format!(
                "git symbolic-ref failed with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Branch name, or an empty string when it cannot be determined.
///
/// Covers detached HEAD, running outside a repository, and a missing `git`.
pub fn current_branch_or_empty<B: BranchSource>(source: &B) -> String {
    match source.current_branch() {
        Ok(branch) => branch,
        Err(err) => {
            log::debug!("could not determine current branch: {err}");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BranchSource, GitCli, MockBranchSource, current_branch_or_empty};
    use crate::DevGateError;
    use std::io;
    use std::path::{Path, PathBuf};
    use std::process::Command;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static UNIQUE_COUNTER: AtomicUsize = AtomicUsize::new(0);

    #[test]
    fn lookup_failures_collapse_to_empty_branch() {
        let mut source = MockBranchSource::new();
        source
            .expect_current_branch()
            .returning(|| Err(DevGateError::Other("detached HEAD".to_string())));

        assert_eq!(current_branch_or_empty(&source), "");
    }

    #[test]
    fn successful_lookup_is_passed_through() {
        let mut source = MockBranchSource::new();
        source
            .expect_current_branch()
            .returning(|| Ok("feature/badges".to_string()));

        assert_eq!(current_branch_or_empty(&source), "feature/badges");
    }

    #[test]
    fn git_cli_reads_symbolic_ref() {
        let root = init_git_repo("feature/changelog");

        let branch = GitCli::in_dir(&root).current_branch().expect("branch");
        assert_eq!(branch, "feature/changelog");

        std::fs::remove_dir_all(&root).expect("cleanup repo");
    }

    #[test]
    fn missing_git_binary_collapses_to_empty_branch() {
        let mut source = MockBranchSource::new();
        source.expect_current_branch().returning(|| {
            Err(io::Error::new(io::ErrorKind::NotFound, "git: command not found").into())
        });

        assert_eq!(current_branch_or_empty(&source), "");
    }

    #[test]
    fn git_cli_reports_spawn_failure_as_io_error() {
        let absent = std::env::temp_dir()
            .join(unique_dir_name())
            .join("not-created");
        let source = GitCli::in_dir(&absent);

        assert!(matches!(source.current_branch(), Err(DevGateError::Io(_))));
        assert_eq!(current_branch_or_empty(&source), "");
    }

    #[test]
    fn git_cli_errors_on_detached_head() {
        let root = init_git_repo("main");
        git(
            &root,
            &[
                "-c",
                "user.name=DevGate",
                "-c",
                "user.email=devgate@example.com",
                "commit",
                "-q",
                "--allow-empty",
                "-m",
                "init",
            ],
        );
        git(&root, &["checkout", "-q", "--detach"]);
        let source = GitCli::in_dir(&root);

        assert!(matches!(source.current_branch(), Err(DevGateError::Other(_))));
        assert_eq!(current_branch_or_empty(&source), "");

        std::fs::remove_dir_all(&root).expect("cleanup repo");
    }

    fn init_git_repo(branch: &str) -> PathBuf {
        let root = std::env::temp_dir().join(unique_dir_name());
        std::fs::create_dir_all(&root).expect("create repo");
        git(&root, &["init", "-q"]);
        git(&root, &["symbolic-ref", "HEAD", &format!("refs/heads/{branch}")]);
        root
    }

    fn git(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .args(args)
            .current_dir(dir)
            .status()
            .expect("git");
        assert!(status.success(), "git {args:?} failed");
    }

    fn unique_dir_name() -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("system time")
            .as_nanos();
        let counter = UNIQUE_COUNTER.fetch_add(1, Ordering::Relaxed);
        PathBuf::from(format!("devgate_git_test_{nanos}_{counter}"))
    }
}
