//! Per-platform installer routines. Each is a fixed, ordered list of shell
//! steps driven through a `Runner`.

pub mod linux;
pub mod windows;

pub use self::linux::install_docker_linux;
pub use self::windows::{install_docker_windows, WindowsOutcome};
