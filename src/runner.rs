//! Command runner: echo a shell command, execute it, and decide whether a
//! non-zero exit stops the run.

use std::io;

use crate::color::{log_note_stdout, log_step_stdout};
use crate::errors::SetupError;
use crate::exec::{io_error_kind, ExecRequest, ExecService};

/// One shell invocation and whether its failure may be ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub command: String,
    pub ignore_errors: bool,
}

impl Step {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ignore_errors: false,
        }
    }

    pub fn tolerant(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ignore_errors: true,
        }
    }
}

/// Exit information for a finished command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    pub code: Option<i32>,
}

impl CommandStatus {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Executes a command line in a subshell and waits for it.
pub trait Shell {
    fn execute(&mut self, command: &str) -> io::Result<CommandStatus>;
}

/// `sh -c` / `cmd /C` with inherited stdio and environment.
#[derive(Debug, Default)]
pub struct SystemShell {
    exec: ExecService,
}

impl SystemShell {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Shell for SystemShell {
    fn execute(&mut self, command: &str) -> io::Result<CommandStatus> {
        match self.exec.run(ExecRequest::shell(command)) {
            Ok(out) => Ok(CommandStatus {
                code: out.status.code(),
            }),
            Err(e) => {
                let kind = io_error_kind(&e).unwrap_or(io::ErrorKind::Other);
                Err(io::Error::new(kind, e.to_string()))
            }
        }
    }
}

pub struct Runner<S: Shell> {
    shell: S,
    dry_run: bool,
    use_color: bool,
}

impl<S: Shell> Runner<S> {
    pub fn new(shell: S, dry_run: bool, use_color: bool) -> Self {
        Self {
            shell,
            dry_run,
            use_color,
        }
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn use_color(&self) -> bool {
        self.use_color
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }

    /// Run one step. A failing step returns `Err` unless it is tolerant, in
    /// which case a warning is printed and `Ok` returned. Fatal failures are
    /// reported by whoever ends the run.
    pub fn run(&mut self, step: &Step) -> Result<(), SetupError> {
        log_step_stdout(self.use_color, &format!("Running: {}", step.command));
        if self.dry_run {
            log_note_stdout(self.use_color, "Dry run: not executed");
            return Ok(());
        }

        let _span = tracing::info_span!("step", command = %step.command).entered();
        let code = match self.shell.execute(&step.command) {
            Ok(status) if status.success() => {
                tracing::debug!("step succeeded");
                return Ok(());
            }
            Ok(status) => {
                tracing::warn!(code = ?status.code, ignore_errors = step.ignore_errors, "step failed");
                status.code
            }
            Err(e) => {
                tracing::warn!(error = %e, ignore_errors = step.ignore_errors, "step could not be spawned");
                None
            }
        };

        if step.ignore_errors {
            log_note_stdout(self.use_color, "Warning: Command failed but skipping...");
            Ok(())
        } else {
            Err(SetupError::CommandFailed {
                command: step.command.clone(),
                code,
            })
        }
    }

    /// Run steps in order, stopping at the first fatal failure.
    pub fn run_all(&mut self, steps: &[Step]) -> Result<(), SetupError> {
        for step in steps {
            self.run(step)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;

    /// Records every executed command; exit codes come from `codes` (default 0).
    #[derive(Debug, Default)]
    pub struct RecordingShell {
        pub executed: Vec<String>,
        pub codes: HashMap<String, i32>,
        pub unspawnable: Vec<String>,
    }

    impl RecordingShell {
        pub fn failing(mut self, command: &str, code: i32) -> Self {
            self.codes.insert(command.to_string(), code);
            self
        }

        pub fn unspawnable(mut self, command: &str) -> Self {
            self.unspawnable.push(command.to_string());
            self
        }
    }

    impl Shell for RecordingShell {
        fn execute(&mut self, command: &str) -> io::Result<CommandStatus> {
            self.executed.push(command.to_string());
            if self.unspawnable.iter().any(|c| c == command) {
                return Err(io::Error::new(io::ErrorKind::NotFound, "sh"));
            }
            Ok(CommandStatus {
                code: Some(*self.codes.get(command).unwrap_or(&0)),
            })
        }
    }
}
