//! orchaudit CLI
//!
//! Audits orchestrator configuration snapshots: recent configuration
//! changes, container port collisions and, given a second snapshot, image
//! version differences.

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use commands::audit::{AuditArgs, CliError, USAGE};
use orchaudit_core::errors::ExError;
use orchaudit_core::logging_facility::{self, Profile};
use orchaudit_core::{log_op_end, log_op_error, log_op_start};
use orchaudit_core_types::RunId;
use std::time::Instant;

mod commands;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    /// Human-readable lines on stderr
    Pretty,
    /// JSON objects on stderr
    Json,
}

impl From<LogFormat> for Profile {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Pretty => Profile::Development,
            LogFormat::Json => Profile::Production,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "orchaudit")]
#[command(about = "Audit container orchestrator configuration snapshots", long_about = None)]
struct Cli {
    #[command(flatten)]
    audit: AuditArgs,

    /// Log output format
    #[arg(long, value_enum, env = "ORCHAUDIT_LOG_FORMAT", default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

fn report_usage_error(reason: &str) -> ! {
    eprintln!("ERROR: {}", reason);
    eprintln!("{}", USAGE);
    std::process::exit(1);
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let rendered = e.to_string();
            let reason = rendered
                .lines()
                .next()
                .unwrap_or_default()
                .trim_start_matches("error: ")
                .to_string();
            report_usage_error(&reason)
        }
    };

    logging_facility::init(cli.log_format.into());

    let run_id = RunId::new();
    let span = tracing::info_span!("audit_run", run_id = %run_id);
    let _guard = span.enter();

    log_op_start!("audit_command");
    let start = Instant::now();
    let result = commands::audit::execute(&cli.audit, &run_id);
    let duration_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(output) => {
            log_op_end!("audit_command", duration_ms = duration_ms);
            print!("{}", output);
        }
        Err(err) => {
            let ex_err = ExError::from(&err).with_run_id(run_id.clone());
            log_op_error!("audit_command", ex_err, duration_ms = duration_ms);
            match &err {
                CliError::Usage(reason) => report_usage_error(reason),
                CliError::Unparsable { source, .. } => {
                    eprintln!("{}", err);
                    eprintln!("ERROR: {}", source.message());
                }
                CliError::Audit(_) | CliError::Serialization(_) => eprintln!("Error: {}", err),
            }
            std::process::exit(1);
        }
    }
}
