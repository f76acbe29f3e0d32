#![deny(missing_docs)]
//! DevGate core library.
//!
//! This crate contains the domain types and checks behind the DevGate
//! developer-workflow tools: the coverage badge generator and the
//! changelog gate hook.

pub mod badge;
pub mod changelog;
pub mod domain;
pub mod error;
pub mod fs;
pub mod gate;
pub mod git;

pub use badge::{
    DEFAULT_BADGE_OUTPUT, DEFAULT_COVERAGE_REPORT, badge_for_line_rate, badge_url, generate_badge,
    parse_line_rate, write_badge,
};
pub use changelog::{
    NEXT_SECTION_MARKER, branch_matches_prefix, changelog_exists, count_next_sections,
    has_valid_next_section, is_valid_next_section,
};
pub use domain::{Badge, BadgeColor, GateOutcome, HookContext, Stage};
pub use error::{DevGateError, Result};
pub use fs::{FileSystem, StdFileSystem};
pub use gate::{DEFAULT_BRANCH_PREFIXES, DEFAULT_CHANGELOG, DEFAULT_INVOCATION_STAGE, run_gate};
pub use git::{BranchSource, GitCli, current_branch_or_empty};
