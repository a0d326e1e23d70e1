use clap::Parser;
use std::process::ExitCode;

use docker_setup::{
    acquire_lock, build_identity, color_enabled_stdout, exit_code_for_setup_error, report_fatal,
    run_to_exit_code, set_color_mode, should_acquire_lock, telemetry_init, Runner, SystemHost,
    SystemShell,
};

mod cli;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    if let Some(mode) = cli.color {
        set_color_mode(mode);
    }
    let use_color = color_enabled_stdout();

    if let Err(e) = telemetry_init(cli.verbose) {
        eprintln!("docker-setup: tracing disabled: {e:#}");
    }
    tracing::debug!("{}", build_identity());

    let _lock = if should_acquire_lock() {
        match acquire_lock() {
            Ok(lock) => lock,
            Err(e) => {
                report_fatal(use_color, &e);
                return ExitCode::from(exit_code_for_setup_error(&e));
            }
        }
    } else {
        None
    };

    let host = SystemHost::new();
    let mut runner = Runner::new(SystemShell::new(), cli.effective_dry_run(), use_color);

    ExitCode::from(run_to_exit_code(&host, &mut runner))
}
