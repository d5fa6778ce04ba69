use std::{
    io::{self, Write},
    process,
};

use chrono::Utc;
use formatset::{
    application::{error::AppError, formatting::FormattingService},
    cache::FormatSetKey,
    config::{self, FormatArgs, ListArgs, SelectionOverrides},
    infra::{error::InfraError, telemetry},
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

fn main() {
    if let Err(error) = run() {
        report_application_error(&error);
        process::exit(error.exit_code());
    }
}

fn report_application_error(error: &AppError) {
    let report = error.report();
    let emit = || {
        error!(
            error = %error,
            causes = ?&report.messages[1..],
            "application error"
        );
    };

    if dispatcher::has_been_set() {
        emit();
        return;
    }

    let subscriber = tracing_fmt()
        .with_writer(io::stderr)
        .with_max_level(Level::ERROR)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, emit);
}

fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    telemetry::init(&settings.logging)?;

    let service = FormattingService::from_settings(&settings.formats, &settings.cache)?;
    info!(
        key = %service.default_key(),
        cached = service.cache().len(),
        "Format sets ready"
    );

    match cli_args.command {
        config::Command::Format(args) => run_format(&service, args),
        config::Command::List(args) => run_list(&service, args),
    }
}

fn run_format(service: &FormattingService, args: FormatArgs) -> Result<(), AppError> {
    let instant = args
        .at
        .map(|at| at.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);
    let key = selected_key(service, &args.selection)?;
    let formatted = service
        .lookup_format(instant, &key)
        .format(&args.name)
        .ok_or_else(|| AppError::unknown_format(args.name.as_str()))?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{formatted}").map_err(InfraError::from)?;
    Ok(())
}

fn run_list(service: &FormattingService, args: ListArgs) -> Result<(), AppError> {
    let key = selected_key(service, &args.selection)?;
    let listing = service.list(Utc::now(), &key);

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "# {key}").map_err(InfraError::from)?;
    for row in listing {
        let aliases = if row.aliases.is_empty() {
            String::new()
        } else {
            format!(" ({})", row.aliases.join(", "))
        };
        writeln!(
            stdout,
            "{name}{aliases}\t{layout}\t{sample}",
            name = row.name,
            layout = row.layout,
            sample = row.sample,
        )
        .map_err(InfraError::from)?;
    }
    Ok(())
}

fn selected_key(
    service: &FormattingService,
    selection: &SelectionOverrides,
) -> Result<FormatSetKey, AppError> {
    Ok(service.key(selection.time_zone()?, selection.locale()?))
}
