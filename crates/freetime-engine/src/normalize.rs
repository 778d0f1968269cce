//! Boundary normalization of textual instants onto the UTC timeline.
//!
//! Every instant entering the engine passes through [`parse_instant`] exactly
//! once, so the engine itself never reasons about offsets. Text with an
//! explicit offset is converted directly. Naive text (no offset, or a bare
//! date) is handled by a single [`NaivePolicy`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::error::{EngineError, Result};
use crate::interval::BusyInterval;
use crate::window::resolve_local;

/// How to treat an instant that carries no UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NaivePolicy {
    /// Read naive wall-clock text in this zone.
    AssumeZone(Tz),
    /// Refuse naive text with [`EngineError::TimezoneAmbiguity`].
    Reject,
}

impl Default for NaivePolicy {
    fn default() -> Self {
        NaivePolicy::AssumeZone(Tz::UTC)
    }
}

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M%:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an IANA timezone name (e.g. "America/Chicago").
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse()
        .map_err(|_| EngineError::InvalidTimezone(name.to_string()))
}

/// Parse an ISO-8601-like instant.
///
/// Accepts RFC 3339 (`Z` or numeric offset), naive date-times with `T` or a
/// space separator and optional seconds/fraction, and bare dates (read as the
/// start of that day).
///
/// # Errors
/// `InvalidInstant` for unrecognised text, `TimezoneAmbiguity` for naive text
/// under [`NaivePolicy::Reject`].
pub fn parse_instant(text: &str, policy: &NaivePolicy) -> Result<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return Err(EngineError::InvalidInstant("empty string".to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    // `Z` is only understood by the RFC 3339 parser, which needs seconds.
    let zulu = text
        .strip_suffix(|c: char| c == 'Z' || c == 'z')
        .map(|rest| format!("{}+00:00", rest));
    let offset_text = zulu.as_deref().unwrap_or(text);
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(offset_text, fmt).ok())
    {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| EngineError::InvalidInstant(text.to_string()))?;

    match policy {
        NaivePolicy::AssumeZone(tz) => resolve_local(tz, naive),
        NaivePolicy::Reject => Err(EngineError::TimezoneAmbiguity(text.to_string())),
    }
}

/// Build a busy interval from textual bounds.
///
/// Any parse failure is reported as `MalformedInterval` so callers can apply
/// the skip-and-warn policy uniformly. The interval itself is not validated
/// here; inversion is detected by the gap finder.
pub fn parse_busy(
    start: &str,
    end: &str,
    summary: Option<&str>,
    policy: &NaivePolicy,
) -> Result<BusyInterval> {
    let label = summary.unwrap_or("(untitled)");
    let bound = |text: &str, which: &str| {
        parse_instant(text, policy).map_err(|e| EngineError::MalformedInterval {
            reason: format!("'{}' {}: {}", label, which, e),
        })
    };
    Ok(BusyInterval {
        start: bound(start, "start")?,
        end: bound(end, "end")?,
        summary: summary.map(str::to_string),
    })
}
