//! Coverage badge generation from Cobertura-style XML reports.

use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::domain::{Badge, BadgeColor};
use crate::error::{DevGateError, Result};
use crate::fs::FileSystem;

/// Coverage report read when no path is given.
pub const DEFAULT_COVERAGE_REPORT: &str = "coverage.xml";

/// Badge Markdown file written when no path is given.
pub const DEFAULT_BADGE_OUTPUT: &str = "coverage_badge.md";

/// Root attribute holding the line coverage fraction.
pub const LINE_RATE_ATTRIBUTE: &str = "line-rate";

const BADGE_URL_PREFIX: &str = "https://img.shields.io/badge/coverage-";

/// Read a coverage report and build its badge.
pub fn generate_badge<F: FileSystem>(fs: &F, report_path: &Path) -> Result<Badge> {
    let xml = fs.read_to_string(report_path)?;
    let line_rate = parse_line_rate(&xml)?;
    log::debug!(
        "{}: {LINE_RATE_ATTRIBUTE}={line_rate}",
        report_path.display()
    );
    Ok(badge_for_line_rate(line_rate))
}

/// Build a badge from a line-rate fraction in `[0, 1]`.
pub fn badge_for_line_rate(line_rate: f64) -> Badge {
    let percentage = line_rate * 100.0;
    let color = BadgeColor::for_percentage(percentage);
    Badge {
        percentage,
        color,
        url: badge_url(percentage, color),
    }
}

/// Badge service URL for a percentage and color; `%` is encoded as `%25`.
pub fn badge_url(percentage: f64, color: BadgeColor) -> String {
    format!("{BADGE_URL_PREFIX}{percentage:.2}%25-{color}")
}

/// Write the badge Markdown to `output`, replacing any previous contents.
pub fn write_badge<F: FileSystem>(fs: &F, output: &Path, badge: &Badge) -> Result<()> {
    fs.write(output, &badge.markdown())
}

/// Extract the root element's `line-rate` attribute.
///
/// The whole document is read and must be well formed: exactly one root
/// element, every element closed, no text outside the root.
pub fn parse_line_rate(xml: &str) -> Result<f64> {
    let mut reader = Reader::from_str(xml);
    let mut line_rate = None;
    let mut depth = 0usize;

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(element) => {
                if line_rate.is_none() {
                    line_rate = Some(root_line_rate(&element)?);
                } else if depth == 0 {
                    return Err(malformed("content after the root element"));
                }
                depth += 1;
            }
            Event::Empty(element) => {
                if line_rate.is_none() {
                    line_rate = Some(root_line_rate(&element)?);
                } else if depth == 0 {
                    return Err(malformed("content after the root element"));
                }
            }
            Event::End(_) => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| malformed("closing tag without an open element"))?;
            }
            Event::Text(text)
                if depth == 0 && !text.iter().all(|byte| byte.is_ascii_whitespace()) =>
            {
                return Err(malformed("text outside the root element"));
            }
            Event::CData(_) if depth == 0 => {
                return Err(malformed("text outside the root element"));
            }
            Event::Eof if depth > 0 => {
                return Err(malformed("unexpected end of document, unclosed element"));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    line_rate.ok_or_else(|| DevGateError::Parse("coverage report has no root element".into()))
}

fn root_line_rate(root: &BytesStart<'_>) -> Result<f64> {
    let attribute = root
        .try_get_attribute(LINE_RATE_ATTRIBUTE)
        .map_err(malformed)?
        .ok_or_else(|| {
            DevGateError::Parse(format!(
                "root element is missing the {LINE_RATE_ATTRIBUTE} attribute"
            ))
        })?;
    let raw = attribute.unescape_value().map_err(malformed)?;
    parse_fraction(&raw)
}

fn parse_fraction(raw: &str) -> Result<f64> {
    let value: f64 = raw.trim().parse().map_err(|_| {
        DevGateError::Parse(format!("{LINE_RATE_ATTRIBUTE} is not a number: {raw:?}"))
    })?;
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(DevGateError::Parse(format!(
            "{LINE_RATE_ATTRIBUTE} must be between 0 and 1, got {raw}"
        )));
    }
    Ok(value)
}

fn malformed(detail: impl std::fmt::Display) -> DevGateError {
    DevGateError::Parse(format!("invalid coverage XML: {detail}"))
}
