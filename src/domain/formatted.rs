use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;

use super::format::Format;
use super::format_set::FormatSet;
use super::locale::Locale;
use super::relative;
use crate::util::timezone::localized_date;

/// An instant paired with the format set used to render it.
#[derive(Debug, Clone)]
pub struct FormattedDate {
    instant: DateTime<Utc>,
    set: Arc<FormatSet>,
}

impl FormattedDate {
    pub fn new(instant: DateTime<Utc>, set: Arc<FormatSet>) -> Self {
        Self { instant, set }
    }

    /// `instant` with the standard formats in `time_zone` (system default when
    /// absent).
    pub fn in_time_zone(instant: DateTime<Utc>, time_zone: Option<Tz>) -> Self {
        Self::new(instant, FormatSet::standard().with_time_zone(time_zone))
    }

    /// Same instant, formats re-targeted. The set is shared when nothing changes.
    pub fn with_zone_and_locale(&self, time_zone: Option<Tz>, locale: Option<Locale>) -> Self {
        Self::new(self.instant, self.set.with_zone_and_locale(time_zone, locale))
    }

    pub fn with_time_zone(&self, time_zone: Option<Tz>) -> Self {
        Self::new(self.instant, self.set.with_time_zone(time_zone))
    }

    pub fn with_locale(&self, locale: Option<Locale>) -> Self {
        Self::new(self.instant, self.set.with_locale(locale))
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    pub fn format_set(&self) -> &Arc<FormatSet> {
        &self.set
    }

    pub fn time_zone(&self) -> Tz {
        self.set.time_zone()
    }

    /// Render with a name, an alias or a relative phrase. `None` when the set
    /// has no such format.
    pub fn format(&self, name: &str) -> Option<String> {
        self.set.format(self.instant, name)
    }

    pub fn format_kind(&self, format: Format) -> Option<String> {
        self.format(format.name())
    }

    pub fn ago(&self) -> String {
        self.ago_at(Utc::now())
    }

    pub fn ago_at(&self, now: DateTime<Utc>) -> String {
        relative::ago(self.instant, now)
    }

    pub fn days_ago(&self) -> String {
        self.days_ago_at(Utc::now())
    }

    pub fn days_ago_at(&self, now: DateTime<Utc>) -> String {
        relative::days_ago(self.instant, now, self.set.time_zone())
    }

    pub fn is_today(&self) -> bool {
        self.is_today_at(Utc::now())
    }

    pub fn is_today_at(&self, now: DateTime<Utc>) -> bool {
        self.local_date() == localized_date(now, self.time_zone())
    }

    pub fn is_yesterday(&self) -> bool {
        self.is_yesterday_at(Utc::now())
    }

    pub fn is_yesterday_at(&self, now: DateTime<Utc>) -> bool {
        localized_date(now, self.time_zone()).pred_opt() == Some(self.local_date())
    }

    pub fn is_this_year(&self) -> bool {
        self.is_this_year_at(Utc::now())
    }

    pub fn is_this_year_at(&self, now: DateTime<Utc>) -> bool {
        self.local_date().year() == localized_date(now, self.time_zone()).year()
    }

    fn local_date(&self) -> chrono::NaiveDate {
        localized_date(self.instant, self.time_zone())
    }
}
