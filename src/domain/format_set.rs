//! Immutable collections of named formatters bound to one zone and locale.
//!
//! A [`FormatSet`] keeps a flat lookup table where every primary name and every
//! alias points at the same entry. Sets never change after construction:
//! re-targeting a set to another zone or locale yields a fresh set, or the same
//! `Arc` when nothing would change.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;

use super::error::FormatError;
use super::format::Format;
use super::formatter::Formatter;
use super::locale::Locale;
use super::named::NamedFormatter;
use super::relative;
use crate::util::timezone::system_time_zone;

/// `(name, pattern, aliases)`; a `None` pattern selects the ISO-8601 renderer.
const BUILT_IN: [(&str, Option<&str>, &[&str]); 19] = [
    ("shortTime", Some("%H:%M"), &["st", "short_time"]),
    ("medTime", Some("%H:%M:%S"), &["mt", "med_time"]),
    ("longTime", Some("%H:%M:%S %Z"), &["lt", "long_time"]),
    ("fullTime", Some("%H:%M:%S %Z (%:z)"), &["ft", "full_time"]),
    ("shortDate", Some("%Y-%m-%d"), &["sd", "short_date"]),
    ("medDate", Some("%-d %b %Y"), &["md", "med_date"]),
    ("longDate", Some("%-d %B %Y"), &["ld", "long_date"]),
    ("fullDate", Some("%A %-d %B %Y"), &["fd", "full_date"]),
    ("shortDateTime", Some("%Y-%m-%d %H:%M"), &["sdt", "short_date_time"]),
    ("medDateTime", Some("%-d %b %Y %H:%M:%S"), &["mdt", "med_date_time"]),
    (
        "longDateTime",
        Some("%-d %B %Y %H:%M:%S %Z"),
        &["ldt", "long_date_time"],
    ),
    (
        "fullDateTime",
        Some("%A %-d %B %Y %H:%M:%S %Z (%:z)"),
        &["fdt", "full_date_time"],
    ),
    ("isoDateTime", None, &["idt", "iso_date_time"]),
    ("dayOfWeek", Some("%A"), &["dow", "day_of_week"]),
    ("monthDay", Some("%b %-d"), &["month_day"]),
    ("ymdCSV", Some("%Y,%m,%-d"), &["ymdcsv", "ymd_csv"]),
    ("ymd", Some("%Y%m%-d"), &[]),
    ("year", Some("%Y"), &["y"]),
    (
        "timeDayMonth",
        Some("%-I:%M%p %A %-d %B"),
        &["tmd", "time_day_month"],
    ),
];

static DEFAULT_FORMATTERS: Lazy<Vec<NamedFormatter>> = Lazy::new(|| {
    BUILT_IN
        .iter()
        .map(|(name, pattern, aliases)| {
            let formatter = match pattern {
                Some(pattern) => Formatter::pattern(*pattern)?,
                None => Formatter::iso8601(),
            };
            NamedFormatter::new(*name, formatter, aliases.iter().copied())
        })
        .collect::<Result<_, _>>()
        .expect("built-in formatters are valid")
});

static STANDARD: Lazy<Arc<FormatSet>> = Lazy::new(|| {
    Arc::new(
        FormatSet::new(default_formatters(), None, None)
            .expect("built-in formatters have unique names and aliases"),
    )
});

/// The built-in formatters, bound to the system default zone and locale.
pub fn default_formatters() -> Vec<NamedFormatter> {
    DEFAULT_FORMATTERS.clone()
}

#[derive(Debug)]
pub struct FormatSet {
    time_zone: Tz,
    locale: Locale,
    /// One entry per distinct formatter, in registration order.
    entries: Vec<NamedFormatter>,
    /// Every name and alias → position in `entries`.
    index: HashMap<String, usize>,
}

impl FormatSet {
    /// Build a set, binding every formatter to `time_zone` and `locale` (system
    /// defaults when absent).
    ///
    /// Fails when a name or alias is already registered, whether as another
    /// entry's name or as another entry's alias.
    pub fn new<I>(
        formatters: I,
        time_zone: Option<Tz>,
        locale: Option<Locale>,
    ) -> Result<Self, FormatError>
    where
        I: IntoIterator<Item = NamedFormatter>,
    {
        let time_zone = time_zone.unwrap_or_else(system_time_zone);
        let locale = locale.unwrap_or_else(Locale::system);

        let mut entries = Vec::new();
        let mut index = HashMap::new();
        for formatter in formatters {
            let formatter = formatter.with_zone_and_locale(time_zone, locale.clone());
            let position = entries.len();

            if index.contains_key(formatter.name()) {
                return Err(FormatError::duplicate_name(formatter.name()));
            }
            index.insert(formatter.name().to_string(), position);

            for alias in formatter.aliases() {
                if index.contains_key(alias) {
                    return Err(FormatError::duplicate_alias(alias.as_str()));
                }
                index.insert(alias.clone(), position);
            }
            entries.push(formatter);
        }

        Ok(Self {
            time_zone,
            locale,
            entries,
            index,
        })
    }

    /// Build a set from custom `name → pattern` entries. Default formatters are
    /// kept when neither their name nor any alias collides with a custom name.
    pub fn from_patterns<I, K, V>(
        patterns: I,
        time_zone: Option<Tz>,
        locale: Option<Locale>,
    ) -> Result<Self, FormatError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let custom = patterns
            .into_iter()
            .map(|(name, pattern)| NamedFormatter::from_pattern(name, pattern.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let custom_names: BTreeSet<&str> = custom.iter().map(NamedFormatter::name).collect();

        let defaults: Vec<NamedFormatter> = DEFAULT_FORMATTERS
            .iter()
            .filter(|default| {
                !custom_names.contains(default.name())
                    && default
                        .aliases()
                        .iter()
                        .all(|alias| !custom_names.contains(alias.as_str()))
            })
            .cloned()
            .collect();

        Self::new(custom.iter().cloned().chain(defaults), time_zone, locale)
    }

    /// The canonical set of built-in formatters in the system zone and locale.
    pub fn standard() -> Arc<FormatSet> {
        Arc::clone(&STANDARD)
    }

    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Distinct formatters, one per primary name.
    pub fn formatters(&self) -> &[NamedFormatter] {
        &self.entries
    }

    /// Every registered name and alias.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, name_or_alias: &str) -> Option<&NamedFormatter> {
        self.index
            .get(name_or_alias)
            .map(|&position| &self.entries[position])
    }

    pub fn lookup(&self, name_or_alias: &str) -> Option<&Formatter> {
        self.entry(name_or_alias).map(NamedFormatter::formatter)
    }

    /// Formatter for a well-known format; `None` for the relative phrases and
    /// for sets built without that entry.
    pub fn formatter(&self, format: Format) -> Option<&Formatter> {
        if format.is_relative() {
            return None;
        }
        self.lookup(format.name())
    }

    /// Re-target the set. Absent values resolve to system defaults; when both
    /// resolved values match the current ones the same `Arc` is returned.
    pub fn with_zone_and_locale(
        self: &Arc<Self>,
        time_zone: Option<Tz>,
        locale: Option<Locale>,
    ) -> Arc<Self> {
        let time_zone = time_zone.unwrap_or_else(system_time_zone);
        let locale = locale.unwrap_or_else(Locale::system);
        if time_zone == self.time_zone && locale == self.locale {
            return Arc::clone(self);
        }
        Arc::new(self.rebind(time_zone, locale))
    }

    pub fn with_time_zone(self: &Arc<Self>, time_zone: Option<Tz>) -> Arc<Self> {
        self.with_zone_and_locale(time_zone, Some(self.locale.clone()))
    }

    pub fn with_locale(self: &Arc<Self>, locale: Option<Locale>) -> Arc<Self> {
        self.with_zone_and_locale(Some(self.time_zone), locale)
    }

    // Names and aliases are unchanged, so the lookup table carries over and no
    // duplicate check is needed.
    fn rebind(&self, time_zone: Tz, locale: Locale) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|entry| entry.with_zone_and_locale(time_zone, locale.clone()))
            .collect();
        Self {
            time_zone,
            locale,
            entries,
            index: self.index.clone(),
        }
    }

    /// Format `instant` with a named formatter, or with one of the relative
    /// phrases (`ago`/`a`, `days_ago`/`da`). Unknown names yield `None`.
    pub fn format(&self, instant: DateTime<Utc>, name: &str) -> Option<String> {
        self.format_at(instant, name, Utc::now())
    }

    /// [`FormatSet::format`] with an explicit reading of the current time.
    pub fn format_at(
        &self,
        instant: DateTime<Utc>,
        name: &str,
        now: DateTime<Utc>,
    ) -> Option<String> {
        if relative::is_ago(name) {
            return Some(relative::ago(instant, now));
        }
        if relative::is_days_ago(name) {
            return Some(relative::days_ago(instant, now, self.time_zone));
        }
        self.lookup(name).map(|formatter| formatter.print(instant))
    }
}
