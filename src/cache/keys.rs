//! Cache key definitions.
//!
//! A [`FormatSetKey`] names one derived format set by its effective zone and
//! locale. Absent inputs to [`FormatSetKey::new`] resolve to the system
//! defaults, so two keys for the same effective pair are always equal. Deriving
//! from an existing key keeps its own values for absent inputs.

use std::borrow::Cow;
use std::fmt;

use chrono_tz::Tz;

use crate::domain::locale::Locale;
use crate::util::timezone::system_time_zone;

/// Separator between zone and locale in textual keys (`Europe/Paris@fr_FR`).
pub(crate) const KEY_SEPARATOR: char = '@';

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FormatSetKey {
    time_zone: Tz,
    locale: Locale,
}

impl FormatSetKey {
    pub fn new(time_zone: Option<Tz>, locale: Option<Locale>) -> Self {
        Self {
            time_zone: time_zone.unwrap_or_else(system_time_zone),
            locale: locale.unwrap_or_else(Locale::system),
        }
    }

    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Key for the given zone and locale. Absent values keep this key's own.
    /// Borrows `self` when nothing would change.
    pub fn with_zone_and_locale(
        &self,
        time_zone: Option<Tz>,
        locale: Option<Locale>,
    ) -> Cow<'_, FormatSetKey> {
        let time_zone = time_zone.unwrap_or(self.time_zone);
        match locale {
            Some(locale) if locale != self.locale => Cow::Owned(Self { time_zone, locale }),
            _ if time_zone != self.time_zone => Cow::Owned(Self {
                time_zone,
                locale: self.locale.clone(),
            }),
            _ => Cow::Borrowed(self),
        }
    }

    pub fn with_time_zone(&self, time_zone: Option<Tz>) -> Cow<'_, FormatSetKey> {
        self.with_zone_and_locale(time_zone, None)
    }

    pub fn with_locale(&self, locale: Option<Locale>) -> Cow<'_, FormatSetKey> {
        self.with_zone_and_locale(None, locale)
    }
}

impl fmt::Display for FormatSetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{KEY_SEPARATOR}{}",
            self.time_zone.name(),
            self.locale.tag()
        )
    }
}
