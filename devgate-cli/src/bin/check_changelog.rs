#![deny(missing_docs)]
//! `check-changelog` hook entry point.
//!
//! Blocks a commit or push on gated branches unless the changelog carries
//! exactly one well-formed `## NEXT` section.

use clap::{Parser, ValueEnum};
use devgate_core::{
    BranchSource, DEFAULT_BRANCH_PREFIXES, DEFAULT_CHANGELOG, DEFAULT_INVOCATION_STAGE,
    FileSystem, GateOutcome, GitCli, HookContext, Stage, StdFileSystem, current_branch_or_empty,
    run_gate,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "check-changelog",
    version,
    about = "Verify the changelog has exactly one '## NEXT' section"
)]
struct Cli {
    /// Name of the changelog file to check.
    #[arg(long, default_value = DEFAULT_CHANGELOG)]
    filename: PathBuf,
    /// Branch prefixes that should trigger the check.
    #[arg(long, num_args = 1.., default_values = DEFAULT_BRANCH_PREFIXES)]
    branch_prefixes: Vec<String>,
    /// Run on all branches, ignoring branch prefixes.
    #[arg(long)]
    all_branches: bool,
    /// Stage at which to run the hook.
    #[arg(long, value_enum, default_value_t = StageArg::Commit)]
    stage: StageArg,
    /// Stage reported by the hook framework.
    #[arg(
        long,
        env = "PRE_COMMIT_HOOK_STAGE",
        default_value = DEFAULT_INVOCATION_STAGE,
        hide = true
    )]
    hook_stage: String,
    /// Filenames passed by the hook framework (ignored; the changelog is always checked).
    filenames: Vec<PathBuf>,
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum StageArg {
    Commit,
    Push,
}

impl From<StageArg> for Stage {
    fn from(value: StageArg) -> Self {
        match value {
            StageArg::Commit => Stage::Commit,
            StageArg::Push => Stage::Push,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let outcome = run(&cli, &StdFileSystem::new(), &GitCli::new());
    println!("{outcome}");
    std::process::exit(outcome.exit_code());
}

fn run<F: FileSystem, B: BranchSource>(cli: &Cli, fs: &F, branches: &B) -> GateOutcome {
    if !cli.filenames.is_empty() {
        log::debug!("ignoring {} filename argument(s)", cli.filenames.len());
    }
    let context = HookContext {
        current_branch: current_branch_or_empty(branches),
        branch_prefixes: split_prefixes(&cli.branch_prefixes),
        all_branches: cli.all_branches,
        configured_stage: cli.stage.into(),
        invocation_stage: cli.hook_stage.clone(),
    };
    run_gate(fs, &context, &cli.filename)
}

/// Accept both repeated values and a single space-separated value.
///
/// A blank value is kept verbatim; an empty prefix matches every branch.
fn split_prefixes(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| {
            if value.trim().is_empty() {
                vec![value.clone()]
            } else {
                value.split_whitespace().map(str::to_string).collect()
            }
        })
        .collect()
}
