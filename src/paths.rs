/// Config file read when `SVCCTL_CONFIG` is unset
pub const DEFAULT_CONFIG_PATH: &str = "/etc/svcctl/config.toml";

/// Environment variable naming an alternative config file
pub const CONFIG_ENV: &str = "SVCCTL_CONFIG";

/// Default command used to identify PID 1
pub const PID1_PROBE: &[&str] = &["ps", "-p", "1"];
