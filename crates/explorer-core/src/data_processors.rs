use chrono::{DateTime, NaiveDate, NaiveDateTime};

// ── ColumnNameProcessor ───────────────────────────────────────────────────────

/// Canonicalizes raw header names.
pub struct ColumnNameProcessor;

impl ColumnNameProcessor {
    /// Trim surrounding whitespace, lowercase, and turn every internal space
    /// into an underscore: `" Grand Total "` → `"grand_total"`.
    ///
    /// Applying it to an already canonical name is a no-op.
    pub fn canonicalize(name: &str) -> String {
        name.trim().to_lowercase().replace(' ', "_")
    }
}

// ── TimestampProcessor ────────────────────────────────────────────────────────

/// Parses free-text order timestamps.
pub struct TimestampProcessor;

impl TimestampProcessor {
    /// Patterns tried in order after RFC 3339.
    const DATETIME_FORMATS: &'static [&'static str] = &[
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%m/%d/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M",
    ];

    const DATE_FORMATS: &'static [&'static str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

    /// Attempt to parse `s` into a wall-clock timestamp.
    ///
    /// Offsets in RFC 3339 input are dropped and the local wall-clock time
    /// kept, so the derived month and date match what the source recorded.
    /// Date-only input resolves to midnight. Returns `None` for anything
    /// unrecognised; callers turn that into a missing value.
    pub fn parse(s: &str) -> Option<NaiveDateTime> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        let normalised = match s.strip_suffix('Z') {
            Some(stripped) => format!("{}+00:00", stripped),
            None => s.to_string(),
        };
        if let Ok(dt) = DateTime::parse_from_rfc3339(&normalised) {
            return Some(dt.naive_local());
        }

        for fmt in Self::DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                return Some(naive);
            }
        }

        for fmt in Self::DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
                return date.and_hms_opt(0, 0, 0);
            }
        }

        None
    }
}

// ── NumberProcessor ───────────────────────────────────────────────────────────

/// Parses monetary amounts written with thousands separators.
pub struct NumberProcessor;

impl NumberProcessor {
    /// Strip `,` separators and parse as `f64`: `"1,234.50"` → `1234.5`.
    ///
    /// Returns `None` for empty, unparsable or NaN input.
    pub fn parse(s: &str) -> Option<f64> {
        let cleaned: String = s.chars().filter(|&c| c != ',').collect();
        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            return None;
        }
        cleaned.parse::<f64>().ok().filter(|n| !n.is_nan())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
