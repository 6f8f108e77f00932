use std::sync::OnceLock;

use regex::Regex;

use super::profile::{Direction, RiskComparisonResult};

/// The completion did not match the required sentence template.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("backend returned an unexpected format: \"{completion}\"")]
pub struct FormatMismatchError {
    /// The raw trimmed completion, kept for diagnostics.
    pub completion: String,
}

static TEMPLATE_RE: OnceLock<Regex> = OnceLock::new();

fn template_re() -> &'static Regex {
    TEMPLATE_RE.get_or_init(|| {
        Regex::new(
            r"(?i)^You are\s+(\d+(\.\d+)?)\s+(more|less)\s+likely to get diabetes after the proposed changes$",
        )
        .expect("template pattern compiles")
    })
}

/// Extract `(multiplier, direction)` from a completion.
///
/// Exactly one anchored, case-insensitive grammar is applied to the full
/// text. Any deviation in punctuation, word order, or a missing clause is a
/// `FormatMismatchError`; there is no relaxed re-match. The multiplier
/// digits are taken verbatim, so downstream consumers see the backend's own
/// rendering of the number.
pub fn parse_completion(text: &str) -> Result<RiskComparisonResult, FormatMismatchError> {
    let captures = template_re()
        .captures(text)
        .ok_or_else(|| FormatMismatchError {
            completion: text.to_string(),
        })?;

    let multiplier = captures[1].to_string();
    let direction = if captures[3].eq_ignore_ascii_case("more") {
        Direction::More
    } else {
        Direction::Less
    };

    Ok(RiskComparisonResult {
        multiplier,
        direction,
    })
}
