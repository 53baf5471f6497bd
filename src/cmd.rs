use std::io;
use std::process::{Command, Stdio};

/// Result of a command run with captured output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Process execution capability.
///
/// Commands are argument vectors; the first element is the program.
/// Nothing goes through a shell.
pub trait CommandRunner: Send + Sync {
    /// Run with inherited stdio and return the exit code
    fn status(&self, argv: &[String]) -> io::Result<Option<i32>>;

    /// Run with stdout and stderr captured as text
    fn output(&self, argv: &[String]) -> io::Result<CommandOutput>;
}

/// Runs commands on the host via `std::process::Command`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn status(&self, argv: &[String]) -> io::Result<Option<i32>> {
        let (program, args) = split(argv)?;
        tracing::debug!("> {}", argv.join(" "));

        let status = Command::new(program).args(args).status()?;

        tracing::debug!("{} exited with {:?}", program, status.code());
        Ok(status.code())
    }

    fn output(&self, argv: &[String]) -> io::Result<CommandOutput> {
        let (program, args) = split(argv)?;
        tracing::debug!("> {}", argv.join(" "));

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()?;

        tracing::debug!("{} exited with {:?}", program, output.status.code());
        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

fn split(argv: &[String]) -> io::Result<(&String, &[String])> {
    argv.split_first()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty command"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_command_is_invalid_input() {
        let runner = SystemRunner::new();
        let err = runner.status(&[]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        let err = runner.output(&[]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let runner = SystemRunner::new();
        let err = runner
            .output(&argv(&["svcctl-definitely-not-a-real-program"]))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn output_captures_stdout_and_code() {
        let runner = SystemRunner::new();
        let out = runner.output(&argv(&["sh", "-c", "echo hello; exit 3"])).unwrap();
        assert_eq!(out.stdout, "hello\n");
        assert_eq!(out.code, Some(3));
        assert!(!out.success());
    }

    #[test]
    fn arguments_are_not_shell_expanded() {
        let runner = SystemRunner::new();
        let out = runner.output(&argv(&["echo", "$HOME;", "x"])).unwrap();
        assert_eq!(out.stdout, "$HOME; x\n");
        assert!(out.success());
    }

    #[test]
    fn status_returns_exit_code() {
        let runner = SystemRunner::new();
        assert_eq!(runner.status(&argv(&["true"])).unwrap(), Some(0));
        assert_eq!(runner.status(&argv(&["false"])).unwrap(), Some(1));
    }
}
