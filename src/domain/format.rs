use std::fmt;

/// The well-known formats every default set provides, plus the two relative
/// phrases that are computed rather than looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    ShortTime,
    MedTime,
    LongTime,
    FullTime,
    ShortDate,
    MedDate,
    LongDate,
    FullDate,
    ShortDateTime,
    MedDateTime,
    LongDateTime,
    FullDateTime,
    IsoDateTime,
    DayOfWeek,
    MonthDay,
    YmdCsv,
    Ymd,
    Year,
    TimeDayMonth,
    Ago,
    DaysAgo,
}

impl Format {
    pub const ALL: [Format; 21] = [
        Format::ShortTime,
        Format::MedTime,
        Format::LongTime,
        Format::FullTime,
        Format::ShortDate,
        Format::MedDate,
        Format::LongDate,
        Format::FullDate,
        Format::ShortDateTime,
        Format::MedDateTime,
        Format::LongDateTime,
        Format::FullDateTime,
        Format::IsoDateTime,
        Format::DayOfWeek,
        Format::MonthDay,
        Format::YmdCsv,
        Format::Ymd,
        Format::Year,
        Format::TimeDayMonth,
        Format::Ago,
        Format::DaysAgo,
    ];

    /// Primary name of the format in the default set.
    pub fn name(self) -> &'static str {
        match self {
            Format::ShortTime => "shortTime",
            Format::MedTime => "medTime",
            Format::LongTime => "longTime",
            Format::FullTime => "fullTime",
            Format::ShortDate => "shortDate",
            Format::MedDate => "medDate",
            Format::LongDate => "longDate",
            Format::FullDate => "fullDate",
            Format::ShortDateTime => "shortDateTime",
            Format::MedDateTime => "medDateTime",
            Format::LongDateTime => "longDateTime",
            Format::FullDateTime => "fullDateTime",
            Format::IsoDateTime => "isoDateTime",
            Format::DayOfWeek => "dayOfWeek",
            Format::MonthDay => "monthDay",
            Format::YmdCsv => "ymdCSV",
            Format::Ymd => "ymd",
            Format::Year => "year",
            Format::TimeDayMonth => "timeDayMonth",
            Format::Ago => "ago",
            Format::DaysAgo => "days_ago",
        }
    }

    /// Relative phrases depend on the current time and are never stored in a set.
    pub fn is_relative(self) -> bool {
        matches!(self, Format::Ago | Format::DaysAgo)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
