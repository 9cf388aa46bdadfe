use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};

use crate::error::{MinimapError, MinimapResult};

use super::MinimapHost;

/// Formats unix-millisecond values as calendar dates (UTC).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateLabelFormatter {
    pattern: String,
}

impl Default for DateLabelFormatter {
    fn default() -> Self {
        Self::new("%b %-d, %Y")
    }
}

impl DateLabelFormatter {
    /// `pattern` uses `chrono` strftime syntax.
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// Like `new`, but rejects patterns chrono cannot parse.
    pub fn try_new(pattern: impl Into<String>) -> MinimapResult<Self> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(MinimapError::InvalidData(format!(
                "invalid date label pattern `{pattern}`"
            )));
        }
        Ok(Self { pattern })
    }

    /// Falls back to the plain number when the value or pattern can't be formatted.
    #[must_use]
    pub fn format(&self, unix_millis: f64) -> String {
        if !unix_millis.is_finite() {
            return unix_millis.to_string();
        }
        let Some(time) = DateTime::<Utc>::from_timestamp_millis(unix_millis.round() as i64) else {
            return unix_millis.to_string();
        };
        let mut label = String::new();
        match write!(label, "{}", time.format(&self.pattern)) {
            Ok(()) => label,
            Err(_) => unix_millis.to_string(),
        }
    }
}

/// Builds the `"<start> - <end>"` label shown for a data-space window.
#[must_use]
pub fn format_range_label(host: &dyn MinimapHost, from: f64, to: f64) -> String {
    format!("{} - {}", host.date_string(from), host.date_string(to))
}

#[cfg(test)]
mod tests {
    use super::DateLabelFormatter;
    use crate::error::MinimapError;

    #[test]
    fn formats_unix_millis_as_short_dates() {
        let formatter = DateLabelFormatter::default();
        // 2019-04-01T00:00:00Z
        assert_eq!(formatter.format(1_554_076_800_000.0), "Apr 1, 2019");
    }

    #[test]
    fn custom_pattern_and_non_finite_fallback() {
        let formatter = DateLabelFormatter::new("%Y-%m-%d");
        assert_eq!(formatter.format(0.0), "1970-01-01");
        assert_eq!(formatter.format(f64::NAN), "NaN");
    }

    #[test]
    fn unparseable_pattern_falls_back_to_number() {
        let formatter = DateLabelFormatter::new("%Q range");
        assert_eq!(formatter.format(0.0), "0");
        assert_eq!(formatter.format(1_500.0), "1500");
    }

    #[test]
    fn try_new_rejects_unparseable_pattern() {
        let err = DateLabelFormatter::try_new("%Q range").expect_err("pattern must be rejected");
        assert!(matches!(err, MinimapError::InvalidData(_)));
        assert!(DateLabelFormatter::try_new("%Y-%m-%d").is_ok());
    }
}
