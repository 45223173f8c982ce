//! Audit command
//!
//! Usage: orchaudit <CONFIG_FILE_1> <TIME_WINDOW_HOURS> [CONFIG_FILE_2] [--json]

use crate::commands::load::load_snapshot;
use clap::Args;
use orchaudit_core::errors::{AuditError, ExError, ExErrorKind};
use orchaudit_core::{render_text_report, run_audit};
use orchaudit_core_types::RunId;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const USAGE: &str = "\
USAGE: orchaudit <orchestrator_cfg_json_file1> <time_window_hours> <optional_orchestrator_cfg_json_file2>.
WHERE:
  - <orchestrator_cfg_json_file1> is the main container orchestrator config file to be analyzed.
  - <time_window_hours> is the threshold in hours to check back in time for application config changes.
  - <optional_orchestrator_cfg_json_file2> is a secondary and optional container orchestrator config file.
    If it is present, a version comparison will be performed between this file and the main one.
    If it is absent, no version comparison is performed.";

#[derive(Debug, Args)]
pub struct AuditArgs {
    /// Main orchestrator configuration file to analyze
    pub config_file_1: PathBuf,

    /// How many hours back to look for application configuration changes
    pub time_window_hours: String,

    /// Second configuration file; enables the image version comparison
    pub config_file_2: Option<PathBuf>,

    /// Print the whole report as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Failures the driver reports, each with its own output shape
#[derive(Debug, Error)]
pub enum CliError {
    /// Bad arguments; reported with the usage text
    #[error("{0}")]
    Usage(String),

    /// A configuration file could not be read or decoded
    #[error("Unable to parse file {}.", .path.display())]
    Unparsable { path: PathBuf, source: ExError },

    /// The analysis aborted
    #[error(transparent)]
    Audit(#[from] AuditError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<&CliError> for ExError {
    fn from(err: &CliError) -> Self {
        match err {
            CliError::Usage(reason) => ExError::new(ExErrorKind::InvalidInput).with_message(reason),
            CliError::Unparsable { source, .. } => source.clone(),
            CliError::Audit(e) => e.clone().into(),
            CliError::Serialization(e) => {
                ExError::new(ExErrorKind::Serialization).with_message(e.to_string())
            }
        }
    }
}

/// Arguments after validation
#[derive(Debug)]
struct ValidatedArgs<'a> {
    primary: &'a Path,
    hours_window: u64,
    secondary: Option<&'a Path>,
}

fn require_file(position: u8, path: &Path) -> Result<(), CliError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CliError::Usage(format!(
            "Argument {} ({}) is not a valid path to an existing file.",
            position,
            path.display()
        )))
    }
}

/// Parse a window given as plain ASCII digits
pub fn parse_window_hours(raw: &str) -> Result<u64, CliError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CliError::Usage(format!(
            "Argument 2 ({}) is not an integer.",
            raw
        )));
    }
    raw.parse::<u64>().map_err(|_| {
        CliError::Usage(format!("Argument 2 ({}) is out of range.", raw))
    })
}

fn validate(args: &AuditArgs) -> Result<ValidatedArgs<'_>, CliError> {
    require_file(1, &args.config_file_1)?;
    let hours_window = parse_window_hours(&args.time_window_hours)?;
    if let Some(path) = &args.config_file_2 {
        require_file(3, path)?;
    }
    Ok(ValidatedArgs {
        primary: &args.config_file_1,
        hours_window,
        secondary: args.config_file_2.as_deref(),
    })
}

fn load(path: &Path) -> Result<serde_json::Value, CliError> {
    load_snapshot(path).map_err(|source| CliError::Unparsable {
        path: path.to_path_buf(),
        source,
    })
}

/// Execute the audit and return the rendered report
///
/// # Errors
///
/// Any [`CliError`]; the caller decides how each one is printed.
pub fn execute(args: &AuditArgs, run_id: &RunId) -> Result<String, CliError> {
    let validated = validate(args)?;

    let primary = load(validated.primary)?;
    let secondary = validated.secondary.map(load).transpose()?;

    let now = chrono::Utc::now().naive_utc();
    tracing::debug!(run_id = %run_id, now = %now, "reference instant");

    let report = run_audit(&primary, validated.hours_window, secondary.as_ref(), now)?;

    if args.json {
        Ok(serde_json::to_string_pretty(&report)?)
    } else {
        Ok(render_text_report(&report)?)
    }
}
