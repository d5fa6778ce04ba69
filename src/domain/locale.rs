//! Locale identifiers backed by chrono's locale tables.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use once_cell::sync::Lazy;
use tracing::debug;

use super::error::FormatError;

const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_TIME", "LANG"];

static SYSTEM_LOCALE: Lazy<Locale> = Lazy::new(resolve_system_locale);

/// A validated locale such as `fr_FR`.
///
/// Accepts POSIX (`fr_FR.UTF-8`), underscore (`fr_FR`) and hyphenated
/// (`fr-FR`) spellings; all of them compare equal. `C` is treated as `POSIX`.
/// An `@modifier` is kept and selects the matching variant (`sr_RS@latin`).
#[derive(Clone)]
pub struct Locale {
    tag: String,
    inner: chrono::Locale,
}

impl Locale {
    pub fn parse(value: &str) -> Result<Self, FormatError> {
        let tag = canonical_tag(value).ok_or_else(|| FormatError::unknown_locale(value))?;
        let inner = chrono::Locale::try_from(tag.as_str())
            .map_err(|_| FormatError::unknown_locale(value))?;
        Ok(Self { tag, inner })
    }

    pub fn en_us() -> Self {
        Self {
            tag: "en_US".to_string(),
            inner: chrono::Locale::en_US,
        }
    }

    /// The process default locale, resolved once from `LC_ALL`, `LC_TIME` or
    /// `LANG` and falling back to `en_US`.
    pub fn system() -> Locale {
        SYSTEM_LOCALE.clone()
    }

    /// Canonical underscore form, e.g. `fr_FR`.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub(crate) fn as_chrono(&self) -> chrono::Locale {
        self.inner
    }
}

fn resolve_system_locale() -> Locale {
    for var in LOCALE_ENV_VARS {
        let Ok(value) = std::env::var(var) else {
            continue;
        };
        if value.trim().is_empty() {
            continue;
        }
        match Locale::parse(&value) {
            Ok(locale) => return locale,
            Err(error) => {
                debug!(var, value = %value, error = %error, "Ignoring unusable locale variable");
            }
        }
    }
    Locale::en_us()
}

fn canonical_tag(value: &str) -> Option<String> {
    let trimmed = value.trim();
    let (name, modifier) = match trimmed.split_once('@') {
        Some((name, modifier)) => (name, Some(modifier.trim())),
        None => (trimmed, None),
    };
    let base = name
        .split('.')
        .next()
        .unwrap_or_default()
        .trim()
        .replace('-', "_");
    if base.is_empty() || modifier.is_some_and(str::is_empty) {
        return None;
    }

    let tag = if base == "C" || base.eq_ignore_ascii_case("posix") {
        "POSIX".to_string()
    } else {
        match base.split_once('_') {
            Some((language, region)) if !language.is_empty() && !region.is_empty() => {
                let region =
                    if region.len() == 2 && region.chars().all(|c| c.is_ascii_alphabetic()) {
                        region.to_ascii_uppercase()
                    } else {
                        region.to_string()
                    };
                format!("{}_{region}", language.to_ascii_lowercase())
            }
            Some(_) => return None,
            None => base.to_ascii_lowercase(),
        }
    };

    // Modifiers select a variant (`sr_RS@latin`); chrono rejects unknown ones.
    Some(match modifier {
        Some(modifier) => format!("{tag}@{}", modifier.to_ascii_lowercase()),
        None => tag,
    })
}

impl PartialEq for Locale {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
    }
}

impl Eq for Locale {}

impl Hash for Locale {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag.hash(state);
    }
}

impl fmt::Debug for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Locale").field(&self.tag).finish()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag.replace('_', "-"))
    }
}

impl FromStr for Locale {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
