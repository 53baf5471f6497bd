//! Error types for service control.
use thiserror::Error;

use crate::init::{Action, InitSystemKind};

/// Errors raised while detecting the init system or driving a service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// PID 1 matched neither systemd nor SysV init, or an unusable kind was
    /// handed in directly.
    #[error(
        "Current init system is not supported ({}). Please use systemd or SystemV init",
        identity_note(.identity)
    )]
    UnsupportedInitSystem {
        /// Text reported for PID 1, `None` when no detection ran.
        identity: Option<String>,
    },

    /// The init system's command exited non-zero.
    #[error("Failed to {action} service '{service}' (exit code {code:?}){}", stderr_suffix(.stderr))]
    ActionFailed {
        /// The service that was acted on.
        service: String,
        /// The action that failed.
        action: Action,
        /// Exit code, `None` when the command was killed by a signal.
        code: Option<i32>,
        /// Captured stderr, empty when the command ran with inherited stdio.
        stderr: String,
    },

    /// The command could not be spawned at all.
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// A controller ended up bound to a kind it cannot drive.
    #[error("Service controller is bound to an unusable init system: {kind:?}")]
    InconsistentState { kind: InitSystemKind },
}

impl ServiceError {
    /// Whether retrying the same call could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ServiceError::ActionFailed { .. })
    }
}

fn identity_note(identity: &Option<String>) -> String {
    match identity {
        Some(identity) => format!("PID 1: {:?}", identity),
        None => "init system was selected without detection".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}
