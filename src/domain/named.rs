use std::collections::BTreeSet;

use chrono_tz::Tz;

use super::error::FormatError;
use super::formatter::Formatter;
use super::locale::Locale;

/// A formatter registered under a primary name and optional aliases.
#[derive(Debug, Clone)]
pub struct NamedFormatter {
    name: String,
    aliases: BTreeSet<String>,
    formatter: Formatter,
}

impl NamedFormatter {
    pub fn new<I, S>(
        name: impl Into<String>,
        formatter: Formatter,
        aliases: I,
    ) -> Result<Self, FormatError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(FormatError::InvalidName);
        }

        let aliases: BTreeSet<String> = aliases.into_iter().map(Into::into).collect();
        if aliases.iter().any(|alias| alias.trim().is_empty()) {
            return Err(FormatError::InvalidAlias { name });
        }

        Ok(Self {
            name,
            aliases,
            formatter,
        })
    }

    /// Parse `pattern` and register it under `name` without aliases.
    pub fn from_pattern(name: impl Into<String>, pattern: &str) -> Result<Self, FormatError> {
        Self::new(name, Formatter::pattern(pattern)?, std::iter::empty::<String>())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &BTreeSet<String> {
        &self.aliases
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    /// True if `key` is the name or one of the aliases.
    pub fn answers_to(&self, key: &str) -> bool {
        self.name == key || self.aliases.contains(key)
    }

    pub fn with_zone_and_locale(&self, time_zone: Tz, locale: Locale) -> Self {
        self.rebind(self.formatter.with_zone_and_locale(time_zone, locale))
    }

    pub fn with_time_zone(&self, time_zone: Tz) -> Self {
        self.rebind(self.formatter.with_time_zone(time_zone))
    }

    pub fn with_locale(&self, locale: Locale) -> Self {
        self.rebind(self.formatter.with_locale(locale))
    }

    fn rebind(&self, formatter: Formatter) -> Self {
        Self {
            name: self.name.clone(),
            aliases: self.aliases.clone(),
            formatter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_is_rejected() {
        let err = NamedFormatter::new("", Formatter::iso8601(), ["iso"]).unwrap_err();
        assert_eq!(err, FormatError::InvalidName);
        assert!(NamedFormatter::new("  ", Formatter::iso8601(), ["iso"]).is_err());
    }

    #[test]
    fn empty_alias_is_rejected() {
        let err = NamedFormatter::new("iso", Formatter::iso8601(), ["i", ""]).unwrap_err();
        assert_eq!(
            err,
            FormatError::InvalidAlias {
                name: "iso".to_string()
            }
        );
    }

    #[test]
    fn rebinding_leaves_original_untouched() {
        let original = NamedFormatter::new("iso", Formatter::iso8601(), ["i"])
            .expect("valid formatter")
            .with_zone_and_locale(Tz::UTC, Locale::en_us());
        let tokyo = original.with_time_zone(Tz::Asia__Tokyo);

        assert_eq!(original.formatter().time_zone(), Tz::UTC);
        assert_eq!(tokyo.formatter().time_zone(), Tz::Asia__Tokyo);
        assert_eq!(tokyo.formatter().locale(), &Locale::en_us());
        assert_eq!(tokyo.name(), "iso");
        assert!(tokyo.answers_to("i"));
        assert!(!tokyo.answers_to("j"));
    }

    #[test]
    fn from_pattern_propagates_parse_errors() {
        assert_eq!(
            NamedFormatter::from_pattern("broken", "%Q").unwrap_err(),
            FormatError::invalid_pattern("%Q")
        );
        let year = NamedFormatter::from_pattern("year", "%Y").expect("valid pattern");
        assert!(year.aliases().is_empty());
    }
}
