#![forbid(unsafe_code)]

//! Logging and tracing support.
//!
//! With the `tracing` feature the `debug!` and `trace!` event macros are
//! re-exported from `tracing`; without it they expand to nothing, so call
//! sites in the widget crates never need their own `cfg` guards for events.
//! Spans are opened with `tracing` directly under `#[cfg(feature = "tracing")]`.
//!
//! With `tracing-json`, [`init_json`] installs a JSON formatter for hosts that
//! want the picker's events in their structured logs.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace};

// When tracing is not enabled, provide no-op macros
#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// Swallows a `debug!` event when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// Swallows a `trace!` event when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }
}

/// Failure to install the global JSON subscriber.
#[cfg(feature = "tracing-json")]
#[derive(Debug)]
pub enum LoggingInitError {
    /// The filter directive string could not be parsed.
    Filter(String),
    /// A global subscriber was already installed.
    AlreadyInstalled(String),
}

#[cfg(feature = "tracing-json")]
impl std::fmt::Display for LoggingInitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Filter(msg) => write!(f, "invalid log filter: {msg}"),
            Self::AlreadyInstalled(msg) => write!(f, "subscriber already installed: {msg}"),
        }
    }
}

#[cfg(feature = "tracing-json")]
impl std::error::Error for LoggingInitError {}

/// Install a JSON-formatting global subscriber filtered by `directives`
/// (for example `"dimpick=debug"`).
///
/// # Errors
///
/// Returns [`LoggingInitError::Filter`] when `directives` does not parse and
/// [`LoggingInitError::AlreadyInstalled`] when the host already set a global
/// subscriber.
#[cfg(feature = "tracing-json")]
pub fn init_json(directives: &str) -> Result<(), LoggingInitError> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(directives)
        .map_err(|err| LoggingInitError::Filter(err.to_string()))?;
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| LoggingInitError::AlreadyInstalled(err.to_string()))
}

#[cfg(test)]
mod tests {
    #[cfg(feature = "tracing-json")]
    use super::{LoggingInitError, init_json};

    #[test]
    fn event_macros_accept_widget_call_forms() {
        let value = "100";
        crate::debug!(target: "dimpick::number_input", raw = "150", committed = value, "blur commit");
        crate::trace!(target: "dimpick::panel", unit = %"px", "press routed");
        crate::debug!("plain message");
    }

    #[test]
    #[cfg(feature = "tracing-json")]
    fn bad_directive_is_rejected() {
        let err = init_json("dimpick=notalevel").unwrap_err();
        assert!(matches!(err, LoggingInitError::Filter(_)));
    }
}
