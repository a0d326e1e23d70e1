//! Orchestrator: classify the host, pick an installer, check Compose, print
//! the completion banner.

use crate::banner::print_completion_banner;
use crate::color::{log_error_stdout, log_step_stdout};
use crate::errors::{exit_code_for_setup_error, SetupError};
use crate::installer::{install_docker_linux, install_docker_windows, WindowsOutcome};
use crate::platform::{is_supported_distro, Host, OsFamily};
use crate::runner::{Runner, Shell};

pub const DOCKER_BINARY: &str = "docker";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    AlreadyInstalled,
    Linux { distro: String },
    Windows(WindowsOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupReport {
    pub os: OsFamily,
    pub install: InstallOutcome,
    pub compose_available: bool,
}

/// Drive one full bootstrap run. `Err` means the process should exit 1.
pub fn run_setup<H: Host, S: Shell>(
    host: &H,
    runner: &mut Runner<S>,
) -> Result<SetupReport, SetupError> {
    let use_color = runner.use_color();
    let os = host.os_family();
    log_step_stdout(use_color, &format!("Detected OS: {os}"));
    tracing::info!(os = %os, dry_run = runner.dry_run(), "starting setup");

    let install = match &os {
        OsFamily::Linux => {
            let distro = host.distro();
            tracing::debug!(distro = %distro, "linux distribution");
            if !is_supported_distro(&distro) {
                return Err(SetupError::UnsupportedDistro(distro));
            }
            if host.command_exists(DOCKER_BINARY) {
                log_step_stdout(use_color, "Docker already installed");
                InstallOutcome::AlreadyInstalled
            } else {
                install_docker_linux(host, runner, &distro)?;
                InstallOutcome::Linux { distro }
            }
        }
        OsFamily::Windows => {
            if host.command_exists(DOCKER_BINARY) {
                log_step_stdout(use_color, "Docker already installed");
                InstallOutcome::AlreadyInstalled
            } else {
                InstallOutcome::Windows(install_docker_windows(host, runner)?)
            }
        }
        OsFamily::Other(name) => return Err(SetupError::UnsupportedOs(name.clone())),
    };

    let compose_available = host.compose_available();
    if compose_available {
        log_step_stdout(use_color, "Docker Compose (v2) available");
    } else {
        log_error_stdout(use_color, "Docker Compose not found");
    }

    print_completion_banner(use_color);
    tracing::info!(?install, compose_available, "setup finished");

    Ok(SetupReport {
        os,
        install,
        compose_available,
    })
}

/// Run setup and turn the result into the process exit code: 0 on
/// completion, otherwise the `[-]` line is printed and the mapped code returned.
pub fn run_to_exit_code<H: Host, S: Shell>(host: &H, runner: &mut Runner<S>) -> u8 {
    match run_setup(host, runner) {
        Ok(report) => {
            tracing::debug!(
                os = %report.os,
                install = ?report.install,
                compose = report.compose_available,
                "setup report"
            );
            0
        }
        Err(e) => {
            report_fatal(runner.use_color(), &e);
            exit_code_for_setup_error(&e)
        }
    }
}

/// Print the `[-]` line for a fatal condition.
pub fn report_fatal(use_color: bool, err: &SetupError) {
    tracing::error!(error = %err, "setup aborted");
    log_error_stdout(use_color, &err.to_string());
}
