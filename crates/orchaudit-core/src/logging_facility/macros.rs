//! Lifecycle logging macros
//!
//! Every audit stage is bracketed by one `start` event and exactly one of
//! `end` or `end_error`. All three carry `component` (the calling module),
//! `op` and `event`; extra `key = value` pairs are passed straight through
//! to `tracing`. The expansion names `orchaudit_core_types`, so calling
//! crates depend on it directly.

/// Emit the `start` event of a stage at INFO
///
/// ```
/// # use orchaudit_core::log_op_start;
/// let hours_window = 24u64;
/// log_op_start!("filter_and_sort_by_recency", hours_window);
/// log_op_start!("extract_applications");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)+)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = orchaudit_core_types::schema::EVENT_START,
            $($($field)+)?
        );
    };
}

/// Emit the `end` event of a stage at INFO
///
/// `duration_ms` is required; result sizes usually follow it.
///
/// ```
/// # use orchaudit_core::log_op_end;
/// let collisions: Vec<u16> = vec![];
/// log_op_end!("detect_port_collisions", duration_ms = 0, result_len = collisions.len());
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = orchaudit_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)+)?
        );
    };
}

/// Emit the `end_error` event of a stage at ERROR
///
/// `$err` is anything convertible into [`ExError`](crate::errors::ExError).
/// The event carries its `err_kind`, stable `err_code` and the rendered
/// error as `error`.
///
/// ```
/// # use orchaudit_core::{log_op_error, errors::AuditError};
/// let err = AuditError::MissingImage { app_id: "/db".to_string(), snapshot: 2 };
/// log_op_error!("diff_versions_across_snapshots", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = orchaudit_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            error = %ex_err,
            $($($field)+)?
        );
    }};
}
