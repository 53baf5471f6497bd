mod detect;

pub use detect::{classify, detect, Detection};

use std::fmt;

/// Substring systemd prints in `systemctl status` for a running unit
pub const ACTIVE_MARKER: &str = "Active: active";

/// Init system families (systemd, SysV init)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitSystemKind {
    Systemd,
    SystemV,
    /// Detection matched nothing we can drive
    Unknown,
}

impl InitSystemKind {
    /// Get a human-readable name for this init system
    pub fn name(&self) -> &'static str {
        match self {
            InitSystemKind::Systemd => "systemd",
            InitSystemKind::SystemV => "SysV init",
            InitSystemKind::Unknown => "unknown",
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, InitSystemKind::Unknown)
    }
}

/// Lifecycle actions understood by both `systemctl` and `service`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Stop,
    Status,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Stop => "stop",
            Action::Status => "status",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the argument vector for `action` on service `name`.
///
/// `elevation` is prepended verbatim (e.g. `["sudo"]`). The service name is
/// passed through untouched as a single argument. Returns `None` for
/// [`InitSystemKind::Unknown`].
pub fn build_command(
    kind: InitSystemKind,
    name: &str,
    action: Action,
    elevation: &[String],
) -> Option<Vec<String>> {
    let tail: [&str; 3] = match kind {
        InitSystemKind::Systemd => ["systemctl", action.as_str(), name],
        InitSystemKind::SystemV => ["service", name, action.as_str()],
        InitSystemKind::Unknown => return None,
    };

    let mut argv = elevation.to_vec();
    argv.extend(tail.iter().map(|s| s.to_string()));
    Some(argv)
}
