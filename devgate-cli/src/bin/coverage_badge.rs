#![deny(missing_docs)]
//! `coverage-badge` entry point.
//!
//! Reads a coverage report and writes a Markdown badge reference.

use clap::Parser;
use devgate_core::{
    Badge, DEFAULT_BADGE_OUTPUT, DEFAULT_COVERAGE_REPORT, FileSystem, StdFileSystem,
    generate_badge, write_badge,
};
use std::path::PathBuf;

type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser, Debug)]
#[command(
    name = "coverage-badge",
    version,
    about = "Generate a coverage badge from coverage.xml"
)]
struct Cli {
    /// Coverage report to read.
    #[arg(long, default_value = DEFAULT_COVERAGE_REPORT)]
    input: PathBuf,
    /// Markdown file to write the badge reference to.
    #[arg(long, default_value = DEFAULT_BADGE_OUTPUT)]
    output: PathBuf,
    /// Print the badge as JSON instead of a summary line.
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match run(&cli, &StdFileSystem::new()).and_then(|badge| render(&cli, &badge)) {
        Ok(summary) => println!("{summary}"),
        Err(err) => {
            println!("{err}");
            std::process::exit(1);
        }
    }
}

fn run<F: FileSystem>(cli: &Cli, fs: &F) -> CliResult<Badge> {
    if !fs.is_file(&cli.input) {
        return Err(format!("Error: {} not found", cli.input.display()).into());
    }

    let badge = generate_badge(fs, &cli.input)
        .map_err(|err| format!("Error generating badge: {err}"))?;
    write_badge(fs, &cli.output, &badge)
        .map_err(|err| format!("Error writing {}: {err}", cli.output.display()))?;
    log::info!("wrote {}", cli.output.display());
    Ok(badge)
}

fn render(cli: &Cli, badge: &Badge) -> CliResult<String> {
    if cli.json {
        return Ok(serde_json::to_string_pretty(badge)?);
    }
    Ok(format!(
        "Coverage {:.2}% ({}) written to {}",
        badge.percentage,
        badge.color,
        cli.output.display()
    ))
}
