//! Version comparator
//!
//! npm flavoured semantic versioning built on `node-semver`:
//! - parsing of versions and ranges
//! - range satisfaction and highest-satisfying search
//! - ordering
//! - nearest-match search used to repair unsatisfiable declarations

use crate::error::VersionError;
use node_semver::{Range, Version};
use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

/// Leading operators and `v` markers in front of a bare version
static LEADING_OPERATORS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s^~><=v]+").unwrap());

/// Caret or tilde prefix kept when a range is rewritten
static CARET_TILDE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\^~]").unwrap());

/// Parse a version string
pub fn parse(version: &str) -> Result<Version, VersionError> {
    Version::parse(version.trim()).map_err(|e| VersionError::InvalidVersion {
        version: version.to_string(),
        message: e.to_string(),
    })
}

/// Parse an npm range string
pub fn parse_range(range: &str) -> Result<Range, VersionError> {
    Range::parse(range.trim()).map_err(|e| VersionError::InvalidRange {
        range: range.to_string(),
        message: e.to_string(),
    })
}

/// Returns true if `version` satisfies `range`; invalid input never satisfies
pub fn satisfies(version: &str, range: &str) -> bool {
    match (parse(version), parse_range(range)) {
        (Ok(version), Ok(range)) => range.satisfies(&version),
        _ => false,
    }
}

/// Highest version in `versions` satisfying `range`
///
/// Unparseable entries are ignored. Returns `None` for an invalid range.
pub fn max_satisfying<I, S>(versions: I, range: &str) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let range = parse_range(range).ok()?;
    max_satisfying_parsed(
        versions
            .into_iter()
            .filter_map(|v| parse(v.as_ref()).ok().map(|parsed| (v, parsed))),
        &range,
    )
}

fn max_satisfying_parsed<I, S>(candidates: I, range: &Range) -> Option<String>
where
    I: IntoIterator<Item = (S, Version)>,
    S: AsRef<str>,
{
    candidates
        .into_iter()
        .filter(|(_, parsed)| range.satisfies(parsed))
        .max_by(|(_, a), (_, b)| a.cmp(b))
        .map(|(raw, _)| raw.as_ref().to_string())
}

/// Compare two versions; `None` if either cannot be parsed
pub fn compare(a: &str, b: &str) -> Option<Ordering> {
    Some(parse(a).ok()?.cmp(&parse(b).ok()?))
}

/// Remove every leading operator (`^`, `~`, `>`, `<`, `=`, `v`) and whitespace
pub fn strip_prefix(range: &str) -> &str {
    match LEADING_OPERATORS_RE.find(range) {
        Some(m) => &range[m.end()..],
        None => range,
    }
}

/// The caret or tilde prefix of a range, or an empty string
pub fn range_prefix(range: &str) -> &str {
    CARET_TILDE_RE
        .find(range)
        .map(|m| m.as_str())
        .unwrap_or("")
}

/// Best available match for `target` among `versions`
///
/// 1. the bare target itself when it is a member,
/// 2. the highest member satisfying `target` read as a range,
/// 3. the member nearest to the bare target by (major, minor, patch) distance,
///    falling back to the highest member.
///
/// Ties resolve to the first candidate in descending order.
pub fn closest<I, S>(versions: I, target: &str) -> Result<String, VersionError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut candidates: Vec<(String, Option<Version>)> = versions
        .into_iter()
        .map(|v| {
            let raw = v.as_ref().to_string();
            let parsed = parse(&raw).ok();
            (raw, parsed)
        })
        .collect();

    if candidates.is_empty() {
        return Err(VersionError::NoVersionsAvailable);
    }

    // Descending; unparseable entries sink to the end in their original order
    candidates.sort_by(|(_, a), (_, b)| match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    let bare = strip_prefix(target).trim();
    if let Some((raw, _)) = candidates.iter().find(|(raw, _)| raw == bare) {
        return Ok(raw.clone());
    }

    if let Ok(range) = parse_range(target) {
        let parsed = candidates
            .iter()
            .filter_map(|(raw, parsed)| parsed.clone().map(|p| (raw.as_str(), p)));
        if let Some(best) = max_satisfying_parsed(parsed, &range) {
            return Ok(best);
        }
    }

    let highest = candidates[0].0.clone();
    let Ok(target_version) = parse(bare) else {
        return Ok(highest);
    };

    let mut best: Option<(&str, (u64, u64, u64))> = None;
    for (raw, parsed) in &candidates {
        let Some(parsed) = parsed else { continue };
        let distance = distance(parsed, &target_version);
        let closer = match best {
            Some((_, min)) => distance < min,
            None => true,
        };
        if closer {
            best = Some((raw.as_str(), distance));
        }
    }

    Ok(best.map(|(raw, _)| raw.to_string()).unwrap_or(highest))
}

/// Component-wise absolute distance, compared lexicographically
fn distance(a: &Version, b: &Version) -> (u64, u64, u64) {
    (
        a.major.abs_diff(b.major),
        a.minor.abs_diff(b.minor),
        a.patch.abs_diff(b.patch),
    )
}
