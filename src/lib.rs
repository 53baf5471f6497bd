//! Uniform start/stop/status control of OS services on systemd and SysV init hosts.

pub mod cmd;
pub mod config;
pub mod error;
pub mod init;
pub mod paths;
pub mod service;

pub use config::{Config, Elevation, ElevationPolicy};
pub use error::ServiceError;
pub use init::{Action, InitSystemKind};
pub use service::ServiceController;
