//! Structured observability hooks for the translation loop.
//!
//! This module provides:
//! - Batch-scoped tracing spans via `BatchSpan` RAII guard
//! - Emission functions for every phase of a step (read, validate, write)
//!   and for the start and end of a batch
//!
//! Per-step events are emitted at `debug!`, batch events at `info!`, and
//! failures at `warn!`. Filter with `RUST_LOG`.

use tracing::{debug, info, warn};

/// RAII guard that enters a batch-scoped tracing span for the duration of a batch.
///
/// # Example
///
/// ```ignore
/// let _span = BatchSpan::enter("b7c1...");
/// // every step event is now tagged with batch_id
/// ```
pub struct BatchSpan {
    _span: tracing::span::EnteredSpan,
}

impl BatchSpan {
    /// Create and enter a span tagged with the batch_id.
    pub fn enter(batch_id: &str) -> Self {
        let span = tracing::info_span!("hardware.batch", batch_id = %batch_id);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: batch started.
pub fn emit_batch_started(batch_id: &str) {
    info!(event = "batch.started", batch_id = %batch_id);
}

/// Emit event: batch reached end of input.
pub fn emit_batch_finished(batch_id: &str, translated: u64, duration_ms: u64) {
    info!(
        event = "batch.finished",
        batch_id = %batch_id,
        translated = translated,
        duration_ms = duration_ms,
    );
}

/// Emit event: batch aborted by a failing step.
pub fn emit_batch_failed(batch_id: &str, translated: u64, stage: &str, error: &dyn std::fmt::Display) {
    warn!(
        event = "batch.failed",
        batch_id = %batch_id,
        translated = translated,
        stage = %stage,
        error = %error,
    );
}

/// Emit event: about to read the next machine.
pub fn emit_read_started() {
    debug!(event = "translate.read");
}

/// Emit event: reader signalled end of input.
pub fn emit_exhausted() {
    debug!(event = "translate.exhausted");
}

/// Emit event: a machine was read.
pub fn emit_machine_read(machine: &crate::Machine) {
    debug!(event = "translate.machine_read", hostname = %machine.hostname, machine = ?machine);
}

/// Emit event: a machine passed validation.
pub fn emit_validated(hostname: &str) {
    debug!(event = "translate.validated", hostname = %hostname);
}

/// Emit event: a machine was written.
pub fn emit_written(hostname: &str) {
    debug!(event = "translate.written", hostname = %hostname);
}

/// Emit event: a step failed (warning level).
pub fn emit_step_failed(stage: &str, hostname: Option<&str>, error: &dyn std::fmt::Display) {
    warn!(
        event = "translate.failed",
        stage = %stage,
        hostname = hostname.unwrap_or("-"),
        error = %error,
    );
}
