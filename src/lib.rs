//! docker-setup: bring a workstation to "Docker and Compose are installed and
//! runnable" in one pass.
//!
//! The run is strictly linear: probe the platform, pick the installer for the
//! detected OS/distribution, execute its steps in order, then report whether
//! `docker compose` works. Every step is a shell command; a failing step
//! either stops the run or is ignored, depending on how it was declared.

pub mod banner;
pub mod color;
pub mod errors;
pub mod exec;
pub mod installer;
pub mod lock;
pub mod platform;
pub mod runner;
pub mod setup;
pub mod telemetry;

pub use banner::{build_identity, print_completion_banner};
pub use color::{color_enabled_stdout, paint, set_color_mode, ColorMode};
pub use errors::{exit_code_for_setup_error, SetupError};
pub use lock::{acquire_lock, should_acquire_lock, SetupLock};
pub use platform::{Host, OsFamily, SystemHost, SUPPORTED_DISTROS};
pub use runner::{Runner, Shell, Step, SystemShell};
pub use setup::{report_fatal, run_setup, run_to_exit_code, InstallOutcome, SetupReport};
pub use telemetry::telemetry_init;
