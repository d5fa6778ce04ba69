use std::fs;

use super::*;

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("info".to_string());

    raw.apply_logging_overrides(&LoggingOverrides {
        log_level: Some("debug".to_string()),
        ..Default::default()
    });
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn selection_overrides_parse_zone_and_locale() {
    let selection = SelectionOverrides {
        time_zone: Some("Asia/Tokyo".to_string()),
        locale: Some(" ".to_string()),
    };
    assert_eq!(selection.time_zone().expect("valid zone"), Some(Tz::Asia__Tokyo));
    assert_eq!(selection.locale().expect("blank locale"), None);

    let unknown = SelectionOverrides {
        time_zone: Some("Mars/Olympus".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        unknown.time_zone(),
        Err(LoadError::Invalid {
            key: "--time-zone",
            ..
        })
    ));
}

#[test]
fn defaults_leave_zone_and_locale_to_the_system() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");
    assert_eq!(settings.logging.level, LevelFilter::WARN);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
    assert!(settings.formats.time_zone.is_none());
    assert!(settings.formats.locale.is_none());
    assert!(settings.formats.custom.is_empty());
    assert!(settings.cache.warm.is_empty());
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    raw.apply_logging_overrides(&LoggingOverrides {
        log_json: Some(true),
        ..Default::default()
    });
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn rejects_unknown_time_zone() {
    let mut raw = RawSettings::default();
    raw.formats.time_zone = Some("Mars/Olympus".to_string());
    let err = Settings::from_raw(raw).expect_err("unknown zone");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "formats.time_zone",
            ..
        }
    ));
}

#[test]
fn rejects_unknown_locale() {
    let mut raw = RawSettings::default();
    raw.formats.locale = Some("xx_YY".to_string());
    let err = Settings::from_raw(raw).expect_err("unknown locale");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "formats.locale",
            ..
        }
    ));
}

#[test]
fn blank_zone_falls_back_to_default() {
    let mut raw = RawSettings::default();
    raw.formats.time_zone = Some("  ".to_string());
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert!(settings.formats.time_zone.is_none());
}

#[test]
fn rejects_blank_custom_pattern() {
    let mut raw = RawSettings::default();
    raw.formats.custom.push(RawCustomPattern {
        name: "stamp".to_string(),
        pattern: " ".to_string(),
    });
    let err = Settings::from_raw(raw).expect_err("blank pattern");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "formats.custom",
            ..
        }
    ));
}

#[test]
fn rejects_malformed_warm_entry() {
    let mut raw = RawSettings::default();
    raw.cache.warm = vec!["Europe/Paris@fr_FR".to_string(), "Nowhere@en_US".to_string()];
    let err = Settings::from_raw(raw).expect_err("unknown zone in warm list");
    match err {
        LoadError::Invalid { key, reason } => {
            assert_eq!(key, "cache.warm");
            assert!(reason.contains("Nowhere@en_US"), "{reason}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn loads_layered_file() {
    let path = std::env::temp_dir().join(format!("formatset-config-{}.toml", std::process::id()));
    fs::write(
        &path,
        r#"
[logging]
level = "info"

[formats]
time_zone = "Europe/Paris"
locale = "fr_FR"

[[formats.custom]]
name = "stamp"
pattern = "%Y%m%d"

[cache]
warm = ["Asia/Tokyo", "@de_DE"]
"#,
    )
    .expect("write config file");

    let args = CliArgs::parse_from([
        "formatset",
        "--config-file",
        path.to_str().expect("utf-8 temp path"),
        "list",
        "--locale",
        "de_DE",
    ]);
    let settings = load(&args);
    let _ = fs::remove_file(&path);
    let settings = settings.expect("valid settings");

    assert_eq!(settings.logging.level, LevelFilter::INFO);
    assert_eq!(settings.formats.time_zone, Some(Tz::Europe__Paris));
    assert_eq!(
        settings.formats.locale,
        Some(Locale::parse("fr_FR").expect("known locale"))
    );
    assert_eq!(
        settings.formats.custom,
        vec![CustomPattern {
            name: "stamp".to_string(),
            pattern: "%Y%m%d".to_string(),
        }]
    );
    assert_eq!(settings.cache.warm.len(), 2);
}

#[test]
fn missing_explicit_config_file_fails() {
    let args = CliArgs::parse_from([
        "formatset",
        "--config-file",
        "/nonexistent/formatset.toml",
        "list",
    ]);
    assert!(matches!(load(&args), Err(LoadError::Build(_))));
}

#[test]
fn parse_format_arguments() {
    let args = CliArgs::parse_from([
        "formatset",
        "format",
        "--name",
        "ymd",
        "--at",
        "2015-11-04T18:50:00Z",
        "--time-zone",
        "Asia/Tokyo",
        "--log-level",
        "debug",
    ]);

    assert_eq!(args.logging.log_level.as_deref(), Some("debug"));
    match args.command {
        Command::Format(format) => {
            assert_eq!(format.name, "ymd");
            assert_eq!(
                format.at.map(|at| at.to_rfc3339()),
                Some("2015-11-04T18:50:00+00:00".to_string())
            );
            assert_eq!(format.selection.time_zone.as_deref(), Some("Asia/Tokyo"));
            assert!(format.selection.locale.is_none());
        }
        _ => panic!("wrong command parsed"),
    }
}

#[test]
fn parse_list_arguments() {
    let args = CliArgs::parse_from(["formatset", "--log-json", "true", "list", "--locale", "fr_FR"]);

    assert_eq!(args.logging.log_json, Some(true));
    match args.command {
        Command::List(list) => {
            assert_eq!(list.selection.locale.as_deref(), Some("fr_FR"));
        }
        _ => panic!("wrong command parsed"),
    }
}
