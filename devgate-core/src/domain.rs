//! Domain entities for DevGate.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Color bucket assigned to a coverage percentage.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    /// 90% and above.
    BrightGreen,
    /// 80% up to 90%.
    Green,
    /// 70% up to 80%.
    YellowGreen,
    /// Below 70%.
    Red,
}

impl BadgeColor {
    /// Map a coverage percentage (0-100) to its tier; boundaries belong to the higher tier.
    pub fn for_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Self::BrightGreen
        } else if percentage >= 80.0 {
            Self::Green
        } else if percentage >= 70.0 {
            Self::YellowGreen
        } else {
            Self::Red
        }
    }

    /// Color name understood by the badge service.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BrightGreen => "brightgreen",
            Self::Green => "green",
            Self::YellowGreen => "yellowgreen",
            Self::Red => "red",
        }
    }
}

impl fmt::Display for BadgeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered coverage badge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Badge {
    /// Line coverage as a percentage.
    pub percentage: f64,
    /// Tier derived from the percentage.
    pub color: BadgeColor,
    /// Badge image URL.
    pub url: String,
}

impl Badge {
    /// Markdown image reference written to the badge file.
    pub fn markdown(&self) -> String {
        format!("![Coverage]({})", self.url)
    }
}

/// Git lifecycle point at which a hook runs.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stage {
    /// Run on `git commit`.
    Commit,
    /// Run on `git push`.
    Push,
}

impl Stage {
    /// Parse the stage name exported by hook frameworks.
    ///
    /// Accepts both the short names and the `pre-` prefixed hook names.
    pub fn from_hook_env(value: &str) -> Option<Self> {
        match value.trim() {
            "commit" | "pre-commit" => Some(Self::Commit),
            "push" | "pre-push" => Some(Self::Push),
            _ => None,
        }
    }

    /// Short stage name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Commit => "commit",
            Self::Push => "push",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs that decide whether the changelog gate runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookContext {
    /// Checked-out branch, empty when it could not be determined.
    pub current_branch: String,
    /// Branch prefixes that enable the check.
    pub branch_prefixes: Vec<String>,
    /// Ignore the prefix filter and check on every branch.
    pub all_branches: bool,
    /// Stage the hook is configured for.
    pub configured_stage: Stage,
    /// Stage reported by the hook framework, as given.
    pub invocation_stage: String,
}

/// Terminal result of a changelog gate run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Branch is outside the configured prefixes.
    SkippedBranch {
        /// Branch that was skipped.
        branch: String,
    },
    /// Hook invoked at a stage other than the configured one.
    SkippedStage {
        /// Stage reported by the hook framework.
        current: String,
        /// Stage the hook is configured for.
        configured: Stage,
    },
    /// Changelog file does not exist.
    MissingChangelog {
        /// Path that was checked.
        path: PathBuf,
    },
    /// Changelog lacks exactly one well-formed NEXT section.
    InvalidSection {
        /// Path that was checked.
        path: PathBuf,
    },
    /// Changelog passed.
    Valid {
        /// Path that was checked.
        path: PathBuf,
    },
}

impl GateOutcome {
    /// Whether the hook should let the git operation proceed.
    pub fn passed(&self) -> bool {
        !matches!(
            self,
            Self::MissingChangelog { .. } | Self::InvalidSection { .. }
        )
    }

    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        if self.passed() { 0 } else { 1 }
    }
}

impl fmt::Display for GateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SkippedBranch { branch } => {
                write!(f, "Skipping changelog check on branch '{branch}'")
            }
            Self::SkippedStage {
                current,
                configured,
            } => write!(
                f,
                "Skipping changelog check at '{current}' stage (configured for '{configured}' stage)"
            ),
            Self::MissingChangelog { path } => {
                write!(f, "Error: {} does not exist", path.display())
            }
            Self::InvalidSection { path } => {
                writeln!(
                    f,
                    "Error: {} must contain exactly one '## NEXT' section.",
                    path.display()
                )?;
                writeln!(f, "The format must be:")?;
                writeln!(f, "## NEXT")?;
                writeln!(f, "<empty line>")?;
                write!(
                    f,
                    "No spaces after '## NEXT' are allowed, and there must be exactly one empty line after it."
                )
            }
            Self::Valid { path } => write!(f, "✓ {} is valid", path.display()),
        }
    }
}
