//! Injectable logging seam for the scanner and parser.
//!
//! The original analyzer held a process-wide singleton logger; here a
//! [`Sink`] is passed into each phase at construction instead, so no module
//! reaches for hidden global state. [`FacadeSink`] is the default — it
//! forwards to the `log` crate, leaving the concrete backend (e.g.
//! `simple_logger`, wired up once in `main`) entirely up to the host.

/// Opaque diagnostic sink. No specific message format is part of the
/// contract; implementors just need somewhere to put the four severities.
pub trait Sink {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards to the `log` crate's global macros.
#[derive(Debug, Default, Clone, Copy)]
pub struct FacadeSink;

impl Sink for FacadeSink {
    fn debug(&self, message: &str) {
        log::debug!("{message}");
    }

    fn info(&self, message: &str) {
        log::info!("{message}");
    }

    fn warn(&self, message: &str) {
        log::warn!("{message}");
    }

    fn error(&self, message: &str) {
        log::error!("{message}");
    }
}

/// Discards everything. Used by tests and by callers who want silence.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl Sink for NullSink {
    fn debug(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}
