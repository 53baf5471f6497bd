//! Lifecycle control of a single named service.
//!
//! ```no_run
//! use svcctl::ServiceController;
//!
//! let couchdb = ServiceController::new("couchdb")?;
//! if !couchdb.is_running()? {
//!     couchdb.start()?;
//! }
//! couchdb.stop()?;
//! # Ok::<(), svcctl::ServiceError>(())
//! ```

use std::fmt;
use std::sync::Arc;

use crate::cmd::{CommandRunner, SystemRunner};
use crate::config::{Config, Elevation};
use crate::error::ServiceError;
use crate::init::{self, Action, InitSystemKind, ACTIVE_MARKER};

/// Start, stop and query one service through whichever init system owns the host.
///
/// The init system is detected once, at construction, and never changes
/// afterwards. A controller is never bound to [`InitSystemKind::Unknown`].
#[derive(Clone)]
pub struct ServiceController {
    name: String,
    kind: InitSystemKind,
    elevation: Vec<String>,
    runner: Arc<dyn CommandRunner>,
}

impl fmt::Debug for ServiceController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceController")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("elevation", &self.elevation)
            .finish_non_exhaustive()
    }
}

impl ServiceController {
    /// Detect the init system and bind to `name` using default settings
    pub fn new(name: impl Into<String>) -> Result<Self, ServiceError> {
        Self::from_config(name, &Config::default())
    }

    pub fn from_config(name: impl Into<String>, config: &Config) -> Result<Self, ServiceError> {
        Self::with_runner(name, Arc::new(SystemRunner::new()), config)
    }

    /// Detect through `runner` instead of the host's process table
    pub fn with_runner(
        name: impl Into<String>,
        runner: Arc<dyn CommandRunner>,
        config: &Config,
    ) -> Result<Self, ServiceError> {
        let detection = init::detect(runner.as_ref(), &config.probe)?;
        if !detection.kind.is_supported() {
            return Err(ServiceError::UnsupportedInitSystem {
                identity: Some(detection.identity),
            });
        }
        Self::with_kind(name, detection.kind, runner, &config.elevation)
    }

    /// Bind to an init system that is already known, skipping detection
    pub fn with_kind(
        name: impl Into<String>,
        kind: InitSystemKind,
        runner: Arc<dyn CommandRunner>,
        elevation: &Elevation,
    ) -> Result<Self, ServiceError> {
        if !kind.is_supported() {
            return Err(ServiceError::UnsupportedInitSystem { identity: None });
        }

        let name = name.into();
        tracing::debug!("Managing {} via {}", name, kind.name());

        Ok(Self {
            name,
            kind,
            elevation: elevation.prefix(),
            runner,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> InitSystemKind {
        self.kind
    }

    /// Start the service; non-zero exit is an error
    pub fn start(&self) -> Result<(), ServiceError> {
        self.run_checked(Action::Start)
    }

    /// Stop the service; non-zero exit is an error
    pub fn stop(&self) -> Result<(), ServiceError> {
        self.run_checked(Action::Stop)
    }

    /// Check if the service is running.
    ///
    /// A stopped service is `Ok(false)`, not an error.
    pub fn is_running(&self) -> Result<bool, ServiceError> {
        let argv = self.command(Action::Status)?;

        match self.kind {
            // systemctl status exits non-zero for some healthy units, only the text counts
            InitSystemKind::Systemd => {
                let output = self.runner.output(&argv).map_err(|e| spawn_error(&argv, e))?;
                Ok(output.stdout.contains(ACTIVE_MARKER))
            }
            // LSB status scripts report through the exit code alone
            InitSystemKind::SystemV => {
                let code = self.runner.status(&argv).map_err(|e| spawn_error(&argv, e))?;
                Ok(code == Some(0))
            }
            InitSystemKind::Unknown => Err(ServiceError::InconsistentState { kind: self.kind }),
        }
    }

    fn run_checked(&self, action: Action) -> Result<(), ServiceError> {
        let argv = self.command(action)?;
        let code = self.runner.status(&argv).map_err(|e| spawn_error(&argv, e))?;

        if code != Some(0) {
            return Err(ServiceError::ActionFailed {
                service: self.name.clone(),
                action,
                code,
                stderr: String::new(),
            });
        }

        Ok(())
    }

    fn command(&self, action: Action) -> Result<Vec<String>, ServiceError> {
        init::build_command(self.kind, &self.name, action, &self.elevation)
            .ok_or(ServiceError::InconsistentState { kind: self.kind })
    }
}

fn spawn_error(argv: &[String], source: std::io::Error) -> ServiceError {
    ServiceError::Spawn {
        program: argv.first().cloned().unwrap_or_default(),
        source,
    }
}
