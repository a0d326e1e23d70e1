/*!
Test support helpers shared across integration tests.

- os_release(dir, id): write a release-metadata file and return its path
- setup_cmd(): the built binary with a hermetic environment
- run(cmd): capture exit code and stdout

Every invocation sets DOCKER_SETUP_SKIP_LOCK=1 and NO_COLOR=1 unless a test
overrides them, and tests only ever exercise --dry-run or fatal early exits.
*/

use std::path::{Path, PathBuf};
use std::process::Command;

#[allow(dead_code)]
pub struct Outcome {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Write an os-release file with the given ID line (None writes no ID at all).
#[allow(dead_code)]
pub fn os_release(dir: &Path, id_line: Option<&str>) -> PathBuf {
    let p = dir.join("os-release");
    let mut body = String::from("NAME=\"Test Linux\"\nPRETTY_NAME=\"Test Linux\"\n");
    if let Some(line) = id_line {
        body.push_str(line);
        body.push('\n');
    }
    std::fs::write(&p, body).expect("write os-release");
    p
}

#[allow(dead_code)]
pub fn setup_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_docker-setup"));
    cmd.env("DOCKER_SETUP_SKIP_LOCK", "1")
        .env("NO_COLOR", "1")
        .env_remove("DOCKER_SETUP_DRY_RUN")
        .env_remove("DOCKER_SETUP_LOG")
        .env_remove("DOCKER_SETUP_OS_RELEASE");
    cmd
}

#[allow(dead_code)]
pub fn run(cmd: &mut Command) -> Outcome {
    let out = cmd.output().expect("run docker-setup");
    Outcome {
        code: out.status.code(),
        stdout: String::from_utf8_lossy(&out.stdout).to_string(),
        stderr: String::from_utf8_lossy(&out.stderr).to_string(),
    }
}

/// True when a `docker` executable is already on PATH, which turns every
/// supported-distro run into the "already installed" branch.
#[allow(dead_code)]
pub fn docker_on_path() -> bool {
    which::which("docker").is_ok()
}
