//! Pattern-based formatters bound to a time zone and a locale.

use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::Tz;
use tracing::warn;

use super::error::FormatError;
use super::locale::Locale;
use crate::util::timezone::{localized_datetime, system_time_zone};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Layout {
    /// chrono strftime pattern, validated at construction.
    Pattern(String),
    /// RFC 3339 with whole seconds and `Z` for UTC.
    Iso8601,
}

/// Renders an instant as text. Immutable: the `with_*` methods return a new
/// formatter bound to a different zone or locale.
#[derive(Debug, Clone)]
pub struct Formatter {
    layout: Layout,
    time_zone: Tz,
    locale: Locale,
}

impl Formatter {
    /// Parse a strftime pattern. The formatter is bound to the system default
    /// time zone and locale until re-bound.
    pub fn pattern(pattern: impl Into<String>) -> Result<Self, FormatError> {
        let pattern = pattern.into();
        if pattern.trim().is_empty()
            || StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error))
        {
            return Err(FormatError::invalid_pattern(pattern));
        }
        Ok(Self::bound(Layout::Pattern(pattern)))
    }

    pub fn iso8601() -> Self {
        Self::bound(Layout::Iso8601)
    }

    fn bound(layout: Layout) -> Self {
        Self {
            layout,
            time_zone: system_time_zone(),
            locale: Locale::system(),
        }
    }

    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// The strftime pattern, or `ISO-8601` for the ISO renderer.
    pub fn describe(&self) -> &str {
        match &self.layout {
            Layout::Pattern(pattern) => pattern,
            Layout::Iso8601 => "ISO-8601",
        }
    }

    pub fn with_zone_and_locale(&self, time_zone: Tz, locale: Locale) -> Self {
        Self {
            layout: self.layout.clone(),
            time_zone,
            locale,
        }
    }

    pub fn with_time_zone(&self, time_zone: Tz) -> Self {
        self.with_zone_and_locale(time_zone, self.locale.clone())
    }

    pub fn with_locale(&self, locale: Locale) -> Self {
        self.with_zone_and_locale(self.time_zone, locale)
    }

    pub fn print(&self, instant: DateTime<Utc>) -> String {
        let local = localized_datetime(instant, self.time_zone);
        match &self.layout {
            Layout::Iso8601 => local.to_rfc3339_opts(SecondsFormat::Secs, true),
            Layout::Pattern(pattern) => {
                let mut out = String::new();
                let rendered = local.format_localized(pattern, self.locale.as_chrono());
                if write!(out, "{rendered}").is_err() {
                    warn!(
                        pattern = %pattern,
                        locale = %self.locale,
                        "Locale expansion produced an unsupported specifier, using ISO-8601"
                    );
                    return local.to_rfc3339_opts(SecondsFormat::Secs, true);
                }
                out
            }
        }
    }
}
