//! Cache configuration.
//!
//! `[cache] warm` lists the zone/locale pairs loaded at startup, written as
//! `zone@locale`. Either side may be left blank to inherit the cache's default.

use std::fmt;
use std::str::FromStr;

use chrono_tz::Tz;

use crate::domain::error::FormatError;
use crate::domain::locale::Locale;
use crate::util::timezone::parse_time_zone;

use super::keys::{FormatSetKey, KEY_SEPARATOR};

#[derive(Debug, Clone, Default)]
pub struct CacheConfig {
    /// Pairs preloaded by [`FormatSetCache::warm`](super::FormatSetCache::warm).
    pub warm: Vec<WarmTarget>,
}

impl CacheConfig {
    /// Warm targets resolved against `base`, in configuration order.
    pub fn warm_keys(&self, base: &FormatSetKey) -> Vec<FormatSetKey> {
        self.warm.iter().map(|target| target.resolve(base)).collect()
    }
}

/// A partially specified cache key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarmTarget {
    time_zone: Option<Tz>,
    locale: Option<Locale>,
}

impl WarmTarget {
    pub fn time_zone(&self) -> Option<Tz> {
        self.time_zone
    }

    pub fn locale(&self) -> Option<&Locale> {
        self.locale.as_ref()
    }

    /// Fill the blank sides from `base`.
    pub fn resolve(&self, base: &FormatSetKey) -> FormatSetKey {
        FormatSetKey::new(
            Some(self.time_zone.unwrap_or(base.time_zone())),
            Some(
                self.locale
                    .clone()
                    .unwrap_or_else(|| base.locale().clone()),
            ),
        )
    }
}

impl FromStr for WarmTarget {
    type Err = FormatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (zone, locale) = value.split_once(KEY_SEPARATOR).unwrap_or((value, ""));
        let time_zone = match zone.trim() {
            "" => None,
            zone => Some(parse_time_zone(zone)?),
        };
        let locale = match locale.trim() {
            "" => None,
            locale => Some(Locale::parse(locale)?),
        };
        Ok(Self { time_zone, locale })
    }
}

impl fmt::Display for WarmTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(zone) = self.time_zone {
            f.write_str(zone.name())?;
        }
        write!(f, "{KEY_SEPARATOR}")?;
        if let Some(locale) = self.locale.as_ref() {
            f.write_str(locale.tag())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locale(tag: &str) -> Locale {
        Locale::parse(tag).expect("known locale")
    }

    fn base() -> FormatSetKey {
        FormatSetKey::new(Some(Tz::UTC), Some(Locale::en_us()))
    }

    #[test]
    fn parses_both_sides() {
        let target: WarmTarget = "Europe/Paris@fr_FR".parse().expect("valid target");
        assert_eq!(target.time_zone(), Some(Tz::Europe__Paris));
        assert_eq!(target.locale(), Some(&locale("fr_FR")));
        assert_eq!(
            target.resolve(&base()),
            FormatSetKey::new(Some(Tz::Europe__Paris), Some(locale("fr_FR")))
        );
        assert_eq!(target.to_string(), "Europe/Paris@fr_FR");
    }

    #[test]
    fn blank_sides_inherit_from_base() {
        let zone_only: WarmTarget = "Asia/Tokyo".parse().expect("valid target");
        assert_eq!(
            zone_only.resolve(&base()),
            FormatSetKey::new(Some(Tz::Asia__Tokyo), Some(Locale::en_us()))
        );

        let locale_only: WarmTarget = " @de_DE ".parse().expect("valid target");
        assert_eq!(
            locale_only.resolve(&base()),
            FormatSetKey::new(Some(Tz::UTC), Some(locale("de_DE")))
        );
    }

    #[test]
    fn rejects_unknown_parts() {
        assert_eq!(
            "Mars/Olympus@fr_FR".parse::<WarmTarget>(),
            Err(FormatError::unknown_time_zone("Mars/Olympus"))
        );
        assert!(matches!(
            "UTC@xx_YY".parse::<WarmTarget>(),
            Err(FormatError::UnknownLocale { .. })
        ));
    }

    #[test]
    fn warm_keys_keep_configuration_order() {
        let config = CacheConfig {
            warm: vec![
                "Asia/Tokyo".parse().expect("valid target"),
                "@fr_FR".parse().expect("valid target"),
            ],
        };
        let keys = config.warm_keys(&base());
        assert_eq!(keys[0].time_zone(), Tz::Asia__Tokyo);
        assert_eq!(keys[1].locale(), &locale("fr_FR"));
    }
}
