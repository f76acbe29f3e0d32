//! Changelog gate orchestration.

use std::path::Path;

use crate::changelog::{branch_matches_prefix, changelog_exists, has_valid_next_section};
use crate::domain::{GateOutcome, HookContext, Stage};
use crate::fs::FileSystem;

/// Default changelog file checked by the gate.
pub const DEFAULT_CHANGELOG: &str = "CHANGELOG.md";

/// Branch prefixes that enable the gate when none are configured.
pub const DEFAULT_BRANCH_PREFIXES: [&str; 5] = ["feature", "hotfix", "bugfix", "other", "release"];

/// Stage assumed when the hook framework does not report one.
pub const DEFAULT_INVOCATION_STAGE: &str = "commit";

/// Decide whether the changelog must be checked and check it.
///
/// Gates are evaluated in order: branch filter, stage, file presence,
/// NEXT section. The first gate that decides returns.
pub fn run_gate<F: FileSystem>(fs: &F, context: &HookContext, changelog: &Path) -> GateOutcome {
    if !context.all_branches
        && !branch_matches_prefix(&context.current_branch, &context.branch_prefixes)
    {
        log::debug!(
            "branch {:?} matches none of {:?}",
            context.current_branch,
            context.branch_prefixes
        );
        return GateOutcome::SkippedBranch {
            branch: context.current_branch.clone(),
        };
    }

    if Stage::from_hook_env(&context.invocation_stage) != Some(context.configured_stage) {
        return GateOutcome::SkippedStage {
            current: context.invocation_stage.clone(),
            configured: context.configured_stage,
        };
    }

    if !changelog_exists(fs, changelog) {
        return GateOutcome::MissingChangelog {
            path: changelog.to_path_buf(),
        };
    }

    if !has_valid_next_section(fs, changelog) {
        return GateOutcome::InvalidSection {
            path: changelog.to_path_buf(),
        };
    }

    GateOutcome::Valid {
        path: changelog.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_BRANCH_PREFIXES, DEFAULT_INVOCATION_STAGE, run_gate};
    use crate::domain::{GateOutcome, HookContext, Stage};
    use crate::fs::MockFileSystem;
    use std::io;
    use std::path::{Path, PathBuf};

    const VALID: &str = "# Changelog\n\n## NEXT\n\nSome planned changes\n";
    const INVALID: &str = "# Changelog\n\n## NEXT\nSome planned changes\n";

    fn context(branch: &str) -> HookContext {
        HookContext {
            current_branch: branch.to_string(),
            branch_prefixes: DEFAULT_BRANCH_PREFIXES.iter().map(|p| p.to_string()).collect(),
            all_branches: false,
            configured_stage: Stage::Commit,
            invocation_stage: DEFAULT_INVOCATION_STAGE.to_string(),
        }
    }

    fn changelog_fs(contents: &'static str) -> MockFileSystem {
        let mut fs = MockFileSystem::new();
        fs.expect_is_file().returning(|_| true);
        fs.expect_read_to_string()
            .returning(move |_| Ok(contents.to_string()));
        fs
    }

    #[test]
    fn unmatched_branch_skips_without_touching_files() {
        let fs = MockFileSystem::new();

        let outcome = run_gate(&fs, &context("main"), Path::new("CHANGELOG.md"));

        assert_eq!(
            outcome,
            GateOutcome::SkippedBranch {
                branch: "main".to_string()
            }
        );
        assert_eq!(outcome.exit_code(), 0);
    }

    #[test]
    fn unknown_branch_is_skipped() {
        let fs = MockFileSystem::new();
        let outcome = run_gate(&fs, &context(""), Path::new("CHANGELOG.md"));
        assert!(matches!(outcome, GateOutcome::SkippedBranch { .. }));
    }

    #[test]
    fn all_branches_overrides_prefix_filter() {
        let fs = changelog_fs(VALID);
        let mut ctx = context("main");
        ctx.all_branches = true;

        let outcome = run_gate(&fs, &ctx, Path::new("CHANGELOG.md"));

        assert_eq!(
            outcome,
            GateOutcome::Valid {
                path: PathBuf::from("CHANGELOG.md")
            }
        );
    }

    #[test]
    fn stage_mismatch_skips() {
        let fs = MockFileSystem::new();
        let mut ctx = context("feature/x");
        ctx.invocation_stage = "push".to_string();

        let outcome = run_gate(&fs, &ctx, Path::new("CHANGELOG.md"));

        assert_eq!(
            outcome,
            GateOutcome::SkippedStage {
                current: "push".to_string(),
                configured: Stage::Commit,
            }
        );
        assert!(outcome.passed());
    }

    #[test]
    fn hook_framework_stage_names_match() {
        let fs = changelog_fs(VALID);
        let mut ctx = context("release/2.0");
        ctx.configured_stage = Stage::Push;
        ctx.invocation_stage = "pre-push".to_string();

        let outcome = run_gate(&fs, &ctx, Path::new("CHANGELOG.md"));

        assert!(matches!(outcome, GateOutcome::Valid { .. }));
    }

    #[test]
    fn unrecognised_stage_never_matches() {
        let fs = MockFileSystem::new();
        let mut ctx = context("feature/x");
        ctx.invocation_stage = "manual".to_string();

        let outcome = run_gate(&fs, &ctx, Path::new("CHANGELOG.md"));

        assert!(matches!(outcome, GateOutcome::SkippedStage { .. }));
    }

    #[test]
    fn missing_changelog_fails() {
        let mut fs = MockFileSystem::new();
        fs.expect_is_file()
            .withf(|path| path == Path::new("docs/CHANGES.md"))
            .returning(|_| false);

        let outcome = run_gate(&fs, &context("hotfix/y"), Path::new("docs/CHANGES.md"));

        assert_eq!(
            outcome,
            GateOutcome::MissingChangelog {
                path: PathBuf::from("docs/CHANGES.md")
            }
        );
        assert_eq!(outcome.exit_code(), 1);
    }

    #[test]
    fn malformed_section_fails() {
        let fs = changelog_fs(INVALID);

        let outcome = run_gate(&fs, &context("bugfix/z"), Path::new("CHANGELOG.md"));

        assert!(matches!(outcome, GateOutcome::InvalidSection { .. }));
        assert_eq!(outcome.exit_code(), 1);
    }

    #[test]
    fn unreadable_changelog_fails_as_invalid() {
        let mut fs = MockFileSystem::new();
        fs.expect_is_file().returning(|_| true);
        fs.expect_read_to_string()
            .returning(|_| Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied").into()));

        let outcome = run_gate(&fs, &context("feature/x"), Path::new("CHANGELOG.md"));

        assert!(matches!(outcome, GateOutcome::InvalidSection { .. }));
    }
}
