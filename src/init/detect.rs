//! Init system detection from the identity of PID 1

use super::InitSystemKind;
use crate::cmd::CommandRunner;
use crate::error::ServiceError;

/// Classify the text reported for PID 1.
///
/// Case-sensitive substring match. `systemd` is tested before `init`, so a
/// string carrying both tokens is systemd.
pub fn classify(identity: &str) -> InitSystemKind {
    if identity.contains("systemd") {
        InitSystemKind::Systemd
    } else if identity.contains("init") {
        InitSystemKind::SystemV
    } else {
        InitSystemKind::Unknown
    }
}

/// What PID 1 reported and how it was classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub kind: InitSystemKind,
    /// Probe stdout with surrounding whitespace trimmed
    pub identity: String,
}

/// Run `probe` (normally `ps -p 1`) and return its stdout.
///
/// The probe's exit code is ignored: a failed listing prints nothing useful
/// and later classifies as `Unknown`.
fn identify(runner: &dyn CommandRunner, probe: &[String]) -> Result<String, ServiceError> {
    let output = runner.output(probe).map_err(|source| ServiceError::Spawn {
        program: probe.first().cloned().unwrap_or_default(),
        source,
    })?;
    Ok(output.stdout)
}

/// Probe PID 1 and classify it
pub fn detect(runner: &dyn CommandRunner, probe: &[String]) -> Result<Detection, ServiceError> {
    let stdout = identify(runner, probe)?;
    let kind = classify(&stdout);
    let identity = stdout.trim().to_string();
    tracing::debug!("PID 1 identity {:?} -> {}", identity, kind.name());
    Ok(Detection { kind, identity })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::CommandOutput;
    use std::io;

    struct Probe(io::Result<CommandOutput>);

    impl CommandRunner for Probe {
        fn status(&self, _argv: &[String]) -> io::Result<Option<i32>> {
            unreachable!("detection only captures output")
        }

        fn output(&self, argv: &[String]) -> io::Result<CommandOutput> {
            assert_eq!(argv, ["ps", "-p", "1"]);
            match &self.0 {
                Ok(out) => Ok(out.clone()),
                Err(e) => Err(io::Error::new(e.kind(), e.to_string())),
            }
        }
    }

    fn ps() -> Vec<String> {
        vec!["ps".into(), "-p".into(), "1".into()]
    }

    fn stdout(text: &str) -> Probe {
        Probe(Ok(CommandOutput {
            code: Some(0),
            stdout: text.to_string(),
            stderr: String::new(),
        }))
    }

    #[test]
    fn systemd_identity() {
        assert_eq!(classify("systemd"), InitSystemKind::Systemd);
        assert_eq!(
            classify("    PID TTY          TIME CMD\n      1 ?        00:00:02 systemd\n"),
            InitSystemKind::Systemd
        );
    }

    #[test]
    fn systemd_wins_over_init() {
        assert_eq!(classify("init systemd"), InitSystemKind::Systemd);
        assert_eq!(classify("/sbin/init splash (systemd)"), InitSystemKind::Systemd);
    }

    #[test]
    fn init_identity_is_sysv() {
        assert_eq!(
            classify("  PID TTY          TIME CMD\n    1 ?        00:00:01 init\n"),
            InitSystemKind::SystemV
        );
        assert_eq!(classify("runit-init"), InitSystemKind::SystemV);
    }

    #[test]
    fn match_is_case_sensitive() {
        assert_eq!(classify("SYSTEMD"), InitSystemKind::Unknown);
        assert_eq!(classify("INIT"), InitSystemKind::Unknown);
        assert_eq!(classify("Systemd"), InitSystemKind::Unknown);
    }

    #[test]
    fn unrecognised_identity() {
        assert_eq!(classify(""), InitSystemKind::Unknown);
        assert_eq!(classify("      1 ?        00:00:00 launchd"), InitSystemKind::Unknown);
        assert_eq!(classify("s6-svscan"), InitSystemKind::Unknown);
    }

    #[test]
    fn detect_classifies_probe_stdout() {
        let detection = detect(&stdout("  1 ?  00:00:02 systemd\n"), &ps()).unwrap();
        assert_eq!(detection.kind, InitSystemKind::Systemd);
        assert_eq!(detection.identity, "1 ?  00:00:02 systemd");
    }

    #[test]
    fn detect_ignores_probe_exit_code() {
        let probe = Probe(Ok(CommandOutput {
            code: Some(1),
            stdout: String::new(),
            stderr: "ps: error\n".into(),
        }));
        let detection = detect(&probe, &ps()).unwrap();
        assert_eq!(detection.kind, InitSystemKind::Unknown);
        assert_eq!(detection.identity, "");
    }

    #[test]
    fn identify_returns_raw_stdout() {
        let text = identify(&stdout("  1 ?  00:00:01 init\n"), &ps()).unwrap();
        assert_eq!(text, "  1 ?  00:00:01 init\n");
    }

    #[test]
    fn detect_reports_spawn_failure() {
        let probe = Probe(Err(io::Error::new(io::ErrorKind::NotFound, "no ps")));
        let err = detect(&probe, &ps()).unwrap_err();
        assert!(matches!(err, ServiceError::Spawn { ref program, .. } if program == "ps"));
    }
}
