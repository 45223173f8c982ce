//! Snapshot loading
//!
//! Reads one configuration file into a `serde_json::Value`. The engine never
//! touches the filesystem, so this is the only place file I/O happens.

use orchaudit_core::errors::{ExError, ExErrorKind};
use orchaudit_core::{log_op_end, log_op_error, log_op_start};
use serde_json::Value;
use std::path::Path;
use std::time::Instant;

/// Read and parse the configuration file at `path`
///
/// # Errors
///
/// `ERR_IO` when the file cannot be read, `ERR_INVALID_DOCUMENT` when it is
/// not valid JSON. The message carries the underlying reason.
pub fn load_snapshot(path: &Path) -> Result<Value, ExError> {
    log_op_start!("load_snapshot", path = %path.display());
    let start = Instant::now();

    let parsed = std::fs::read_to_string(path)
        .map_err(|e| ExError::from(e).with_op("load_snapshot"))
        .and_then(|raw| {
            serde_json::from_str::<Value>(&raw).map_err(|e| {
                ExError::new(ExErrorKind::InvalidDocument)
                    .with_op("load_snapshot")
                    .with_message(e.to_string())
            })
        });

    let duration_ms = start.elapsed().as_millis() as u64;
    match parsed {
        Ok(doc) => {
            log_op_end!("load_snapshot", duration_ms = duration_ms);
            Ok(doc)
        }
        Err(err) => {
            log_op_error!("load_snapshot", err.clone(), duration_ms = duration_ms);
            Err(err)
        }
    }
}
