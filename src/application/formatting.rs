use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, instrument};

use crate::cache::{CacheConfig, FormatSetCache, FormatSetKey};
use crate::config::FormatSettings;
use crate::domain::error::FormatError;
use crate::domain::format_set::FormatSet;
use crate::domain::formatted::FormattedDate;
use crate::domain::locale::Locale;

/// One row of [`FormattingService::list`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatListing {
    pub name: String,
    pub aliases: Vec<String>,
    pub layout: String,
    pub sample: String,
}

/// Entry point for formatting instants through a shared [`FormatSetCache`].
#[derive(Debug, Clone)]
pub struct FormattingService {
    cache: Arc<FormatSetCache>,
}

impl FormattingService {
    pub fn new(cache: Arc<FormatSetCache>) -> Self {
        Self { cache }
    }

    /// Service over the process-wide cache of built-in formats.
    pub fn standard() -> Self {
        Self::new(FormatSetCache::standard())
    }

    /// Build the template set described by `formats`, then preload the
    /// configured warm targets.
    pub fn from_settings(
        formats: &FormatSettings,
        cache: &CacheConfig,
    ) -> Result<Self, FormatError> {
        let template = if formats.custom.is_empty() {
            FormatSet::standard().with_zone_and_locale(formats.time_zone, formats.locale.clone())
        } else {
            Arc::new(FormatSet::from_patterns(
                formats
                    .custom
                    .iter()
                    .map(|custom| (custom.name.clone(), custom.pattern.as_str())),
                formats.time_zone,
                formats.locale.clone(),
            )?)
        };
        debug!(
            formats = template.len(),
            time_zone = %template.time_zone(),
            locale = %template.locale(),
            "Built template format set"
        );

        let cache_store = FormatSetCache::new(template);
        let warm = cache.warm_keys(cache_store.default_key());
        if !warm.is_empty() {
            cache_store.warm(&warm);
        }
        Ok(Self::new(Arc::new(cache_store)))
    }

    pub fn cache(&self) -> &Arc<FormatSetCache> {
        &self.cache
    }

    pub fn default_key(&self) -> &FormatSetKey {
        self.cache.default_key()
    }

    /// Key for the given overrides; absent values keep the template's.
    pub fn key(&self, time_zone: Option<Tz>, locale: Option<Locale>) -> FormatSetKey {
        self.cache
            .default_key()
            .with_zone_and_locale(time_zone, locale)
            .into_owned()
    }

    pub fn lookup_format(&self, instant: DateTime<Utc>, key: &FormatSetKey) -> FormattedDate {
        FormattedDate::new(instant, self.cache.get(key))
    }

    /// Format `instant` by name or alias. `None` when no such format exists.
    #[instrument(level = "debug", skip(self))]
    pub fn format(
        &self,
        instant: DateTime<Utc>,
        name: &str,
        time_zone: Option<Tz>,
        locale: Option<Locale>,
    ) -> Option<String> {
        let key = self.key(time_zone, locale);
        self.lookup_format(instant, &key).format(name)
    }

    /// Every format of the set for `key`, rendered at `instant`.
    pub fn list(&self, instant: DateTime<Utc>, key: &FormatSetKey) -> Vec<FormatListing> {
        let set = self.cache.get(key);
        set.formatters()
            .iter()
            .map(|entry| FormatListing {
                name: entry.name().to_string(),
                aliases: entry.aliases().iter().cloned().collect(),
                layout: entry.formatter().describe().to_string(),
                sample: entry.formatter().print(instant),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::config::CustomPattern;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2015, 11, 4, 18, 50, 0)
            .single()
            .expect("valid instant")
    }

    fn paris_en() -> FormatSettings {
        FormatSettings {
            time_zone: Some(Tz::Europe__Paris),
            locale: Some(Locale::en_us()),
            custom: Vec::new(),
        }
    }

    #[test]
    fn absent_overrides_keep_template_values() {
        let service =
            FormattingService::from_settings(&paris_en(), &CacheConfig::default()).expect("valid");
        assert_eq!(service.key(None, None), *service.default_key());
        assert_eq!(
            service.format(instant(), "shortTime", None, None).as_deref(),
            Some("19:50")
        );
        assert_eq!(
            service
                .format(instant(), "shortTime", Some(Tz::Asia__Tokyo), None)
                .as_deref(),
            Some("03:50")
        );
        assert_eq!(service.format(instant(), "nope", None, None), None);
    }

    #[test]
    fn custom_patterns_join_the_template() {
        let formats = FormatSettings {
            custom: vec![CustomPattern {
                name: "stamp".to_string(),
                pattern: "%Y/%m/%d".to_string(),
            }],
            ..paris_en()
        };
        let service = FormattingService::from_settings(&formats, &CacheConfig::default())
            .expect("valid settings");
        assert_eq!(
            service.format(instant(), "stamp", None, None).as_deref(),
            Some("2015/11/04")
        );
        assert_eq!(
            service.format(instant(), "year", None, None).as_deref(),
            Some("2015")
        );
    }

    #[test]
    fn invalid_custom_pattern_is_rejected() {
        let formats = FormatSettings {
            custom: vec![CustomPattern {
                name: "broken".to_string(),
                pattern: "%Q".to_string(),
            }],
            ..paris_en()
        };
        assert!(matches!(
            FormattingService::from_settings(&formats, &CacheConfig::default()),
            Err(FormatError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn warm_targets_are_loaded_up_front() {
        let cache = CacheConfig {
            warm: vec![
                "Asia/Tokyo".parse().expect("valid target"),
                "@fr_FR".parse().expect("valid target"),
            ],
        };
        let service = FormattingService::from_settings(&paris_en(), &cache).expect("valid");
        assert_eq!(service.cache().loads(), 2);

        let tokyo = service.key(Some(Tz::Asia__Tokyo), None);
        service.lookup_format(instant(), &tokyo);
        assert_eq!(service.cache().loads(), 2);
    }

    #[test]
    fn list_renders_every_entry() {
        let service =
            FormattingService::from_settings(&paris_en(), &CacheConfig::default()).expect("valid");
        let listing = service.list(instant(), service.default_key());
        assert_eq!(listing.len(), 19);

        let year = listing
            .iter()
            .find(|row| row.name == "year")
            .expect("year listed");
        assert_eq!(year.aliases, vec!["y".to_string()]);
        assert_eq!(year.layout, "%Y");
        assert_eq!(year.sample, "2015");
    }
}
