use thiserror::Error;

/// Construction-time failures. All of these are configuration errors: they can
/// only surface while a template or a custom set is being built, never while a
/// cached set is derived for another time zone or locale.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("formatter name must not be empty")]
    InvalidName,
    #[error("formatter `{name}` has an empty alias")]
    InvalidAlias { name: String },
    #[error("duplicate formatter for name `{name}`")]
    DuplicateName { name: String },
    #[error("duplicate formatter for alias `{alias}`")]
    DuplicateAlias { alias: String },
    #[error("invalid pattern `{pattern}`")]
    InvalidPattern { pattern: String },
    #[error("unknown time zone `{value}`")]
    UnknownTimeZone { value: String },
    #[error("unknown locale `{value}`")]
    UnknownLocale { value: String },
}

impl FormatError {
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    pub fn duplicate_alias(alias: impl Into<String>) -> Self {
        Self::DuplicateAlias {
            alias: alias.into(),
        }
    }

    pub fn invalid_pattern(pattern: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
        }
    }

    pub fn unknown_time_zone(value: impl Into<String>) -> Self {
        Self::UnknownTimeZone {
            value: value.into(),
        }
    }

    pub fn unknown_locale(value: impl Into<String>) -> Self {
        Self::UnknownLocale {
            value: value.into(),
        }
    }
}
