use thiserror::Error;

/// Raised when the cart signal is used without a live provider scope, or
/// when the scope's auto-reset driver was never spawned.
///
/// Either way this is a wiring mistake in the consuming application, so callers are
/// expected to surface it rather than fall back to a default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("signal accessed outside provider scope ({operation})")]
    OutsideProviderScope { operation: &'static str },
    #[error("cart auto-reset is not running ({operation})")]
    ResetNotRunning { operation: &'static str },
}

impl ConfigurationError {
    pub fn outside_scope(operation: &'static str) -> Self {
        dioxus_logger::tracing::warn!("cart signal misuse: {} called outside provider scope", operation);
        Self::OutsideProviderScope { operation }
    }

    pub fn reset_not_running(operation: &'static str) -> Self {
        dioxus_logger::tracing::warn!("cart signal misuse: {} with no auto-reset driver", operation);
        Self::ResetNotRunning { operation }
    }

    /// Name of the operation that was attempted.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::OutsideProviderScope { operation } | Self::ResetNotRunning { operation } => {
                *operation
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_scope_and_operation() {
        let err = ConfigurationError::outside_scope("trigger_open");
        assert_eq!(
            err.to_string(),
            "signal accessed outside provider scope (trigger_open)"
        );
        assert_eq!(err.operation(), "trigger_open");
    }

    #[test]
    fn missing_driver_is_its_own_message() {
        let err = ConfigurationError::reset_not_running("trigger_open");
        assert_eq!(err.to_string(), "cart auto-reset is not running (trigger_open)");
        assert_eq!(err.operation(), "trigger_open");
    }
}
