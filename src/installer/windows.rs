//! Docker Desktop through winget.
//!
//! Missing Administrator rights or a missing winget are not fatal: guidance
//! is printed and the caller carries on to the Compose check.

use crate::color::{log_detail_stdout, log_error_stdout, log_note_stdout, log_step_stdout};
use crate::errors::SetupError;
use crate::platform::Host;
use crate::runner::{Runner, Shell, Step};

pub const WINGET: &str = "winget";
pub const DOCKER_DESKTOP_MANUAL_URL: &str = "https://docs.docker.com/desktop/install/windows-install/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowsOutcome {
    Installed,
    NotAdministrator,
    WingetMissing,
}

pub fn desktop_install_step() -> Step {
    Step::new("winget install -e --id Docker.DockerDesktop")
}

pub fn install_docker_windows<H: Host, S: Shell>(
    host: &H,
    runner: &mut Runner<S>,
) -> Result<WindowsOutcome, SetupError> {
    let use_color = runner.use_color();
    log_step_stdout(use_color, "Windows detected");

    if !host.is_privileged() {
        log_error_stdout(use_color, "Please run this script as Administrator on Windows.");
        return Ok(WindowsOutcome::NotAdministrator);
    }

    if !host.command_exists(WINGET) {
        log_error_stdout(use_color, "winget not found.");
        log_error_stdout(use_color, "Please install Docker Desktop manually from:");
        log_detail_stdout(DOCKER_DESKTOP_MANUAL_URL);
        return Ok(WindowsOutcome::WingetMissing);
    }

    log_step_stdout(use_color, "Installing Docker Desktop via winget...");
    runner.run(&desktop_install_step())?;

    log_note_stdout(use_color, "Docker Desktop installed.");
    log_note_stdout(use_color, "Please reboot and ensure WSL2 is enabled.");
    log_note_stdout(
        use_color,
        "After reboot, open Docker Desktop once before using docker.",
    );
    Ok(WindowsOutcome::Installed)
}
