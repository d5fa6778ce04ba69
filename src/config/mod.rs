//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{path::PathBuf, str::FromStr};

use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand, builder::BoolishValueParser};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

use crate::cache::{CacheConfig, WarmTarget};
use crate::domain::locale::Locale;
use crate::util::timezone::parse_time_zone;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "formatset";
const ENV_PREFIX: &str = "FORMATSET";

/// Command-line arguments for the formatset binary.
#[derive(Debug, Parser)]
#[command(
    name = "formatset",
    version,
    about = "Format instants with cached, zone and locale aware format sets"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "FORMATSET_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub logging: LoggingOverrides,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print one instant with a named format.
    Format(FormatArgs),
    /// Print every format of the selected set with a sample rendering.
    List(ListArgs),
}

#[derive(Debug, Args, Clone)]
pub struct FormatArgs {
    /// Format name, alias, or one of the relative phrases (`ago`, `days_ago`).
    #[arg(long, short = 'n', value_name = "NAME")]
    pub name: String,

    /// Instant to format, in RFC 3339. Defaults to now.
    #[arg(long, value_name = "RFC3339")]
    pub at: Option<DateTime<FixedOffset>>,

    #[command(flatten)]
    pub selection: SelectionOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ListArgs {
    #[command(flatten)]
    pub selection: SelectionOverrides,
}

/// Zone and locale picked on the command line. They select a cached set
/// derived from the configured template rather than replacing the template.
#[derive(Debug, Args, Default, Clone)]
pub struct SelectionOverrides {
    /// Time zone to format in (IANA name).
    #[arg(long = "time-zone", value_name = "ZONE")]
    pub time_zone: Option<String>,

    /// Locale to format with (for example `fr_FR`).
    #[arg(long = "locale", value_name = "LOCALE")]
    pub locale: Option<String>,
}

impl SelectionOverrides {
    pub fn time_zone(&self) -> Result<Option<Tz>, LoadError> {
        non_blank(self.time_zone.clone())
            .map(|zone| parse_time_zone(&zone))
            .transpose()
            .map_err(|err| LoadError::invalid("--time-zone", err.to_string()))
    }

    pub fn locale(&self) -> Result<Option<Locale>, LoadError> {
        non_blank(self.locale.clone())
            .map(|locale| Locale::parse(&locale))
            .transpose()
            .map_err(|err| LoadError::invalid("--locale", err.to_string()))
    }
}

#[derive(Debug, Args, Default, Clone)]
pub struct LoggingOverrides {
    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        global = true,
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,
}

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub formats: FormatSettings,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

/// The template set: its zone, its locale and any custom patterns.
/// Absent zone or locale fall back to the system defaults.
#[derive(Debug, Clone, Default)]
pub struct FormatSettings {
    pub time_zone: Option<Tz>,
    pub locale: Option<Locale>,
    pub custom: Vec<CustomPattern>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomPattern {
    pub name: String,
    pub pattern: String,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;

    raw.apply_logging_overrides(&cli.logging);

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    logging: RawLoggingSettings,
    formats: RawFormatSettings,
    cache: RawCacheSettings,
}

impl RawSettings {
    fn apply_logging_overrides(&mut self, overrides: &LoggingOverrides) {
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            logging,
            formats,
            cache,
        } = raw;

        let logging = build_logging_settings(logging)?;
        let formats = build_format_settings(formats)?;
        let cache = build_cache_settings(cache)?;

        Ok(Self {
            logging,
            formats,
            cache,
        })
    }
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::WARN,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_format_settings(formats: RawFormatSettings) -> Result<FormatSettings, LoadError> {
    let time_zone = non_blank(formats.time_zone)
        .map(|zone| parse_time_zone(&zone))
        .transpose()
        .map_err(|err| LoadError::invalid("formats.time_zone", err.to_string()))?;

    let locale = non_blank(formats.locale)
        .map(|locale| Locale::parse(&locale))
        .transpose()
        .map_err(|err| LoadError::invalid("formats.locale", err.to_string()))?;

    let mut custom = Vec::with_capacity(formats.custom.len());
    for entry in formats.custom {
        let name = entry.name.trim();
        if name.is_empty() {
            return Err(LoadError::invalid(
                "formats.custom",
                "name must not be empty",
            ));
        }
        if entry.pattern.trim().is_empty() {
            return Err(LoadError::invalid(
                "formats.custom",
                format!("pattern for `{name}` must not be empty"),
            ));
        }
        custom.push(CustomPattern {
            name: name.to_string(),
            pattern: entry.pattern,
        });
    }

    Ok(FormatSettings {
        time_zone,
        locale,
        custom,
    })
}

fn build_cache_settings(cache: RawCacheSettings) -> Result<CacheConfig, LoadError> {
    let warm = cache
        .warm
        .iter()
        .filter(|entry| !entry.trim().is_empty())
        .map(|entry| {
            entry
                .parse::<WarmTarget>()
                .map_err(|err| LoadError::invalid("cache.warm", format!("`{entry}`: {err}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CacheConfig { warm })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawFormatSettings {
    time_zone: Option<String>,
    locale: Option<String>,
    custom: Vec<RawCustomPattern>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawCustomPattern {
    name: String,
    pattern: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawCacheSettings {
    warm: Vec<String>,
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[cfg(test)]
mod tests;
