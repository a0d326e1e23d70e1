use std::ffi::OsString;
use std::io;
use std::process::{Command, ExitStatus, Stdio};

use anyhow::{Context, Result};

/// Blocking process execution. Steps run until the child exits; there is no
/// timeout and no cancellation. Children inherit the environment.
#[derive(Debug, Clone, Default)]
pub struct ExecService;

impl ExecService {
    pub fn new() -> Self {
        Self
    }

    pub fn run(&self, request: ExecRequest) -> Result<ExecOutput> {
        let mut cmd = Command::new(&request.program);
        cmd.args(&request.args);

        if request.capture_output {
            let out = cmd
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .output()
                .with_context(|| spawn_context(&request))?;
            return Ok(ExecOutput {
                status: out.status,
                stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            });
        }

        let mut child = cmd.spawn().with_context(|| spawn_context(&request))?;
        let status = child.wait().context("failed to wait for process")?;
        Ok(ExecOutput {
            status,
            stdout: String::new(),
        })
    }
}

fn spawn_context(request: &ExecRequest) -> String {
    format!(
        "failed to spawn {:?} with args {:?}",
        request.program, request.args
    )
}

#[derive(Debug, Default)]
pub struct ExecRequest {
    program: OsString,
    args: Vec<OsString>,
    capture_output: bool,
}

impl ExecRequest {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// Run `command` through the platform shell (`sh -c` / `cmd /C`).
    pub fn shell(command: &str) -> Self {
        if cfg!(windows) {
            Self::new("cmd").args(["/C", command])
        } else {
            Self::new("sh").args(["-c", command])
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Pipe stdout/stderr instead of inheriting them.
    pub fn capture_output(mut self, capture: bool) -> Self {
        self.capture_output = capture;
        self
    }
}

#[derive(Debug)]
pub struct ExecOutput {
    pub status: ExitStatus,
    pub stdout: String,
}

/// Recover the `io::Error` behind a spawn failure, if that is what failed.
pub fn io_error_kind(err: &anyhow::Error) -> Option<io::ErrorKind> {
    err.chain()
        .find_map(|c| c.downcast_ref::<io::Error>())
        .map(|e| e.kind())
}
