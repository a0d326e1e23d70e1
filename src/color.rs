#![allow(clippy::module_name_repetitions)]
//! Color mode configuration and the prefixed status printers.
//!
//! Status line policy (stdout one-liners):
//! - `[+]` progress, `[!]` reminders and tolerated failures, `[-]` errors.
//! - Precompute once per scope and reuse:
//!     let use_out = docker_setup::color_enabled_stdout();
//! - Color only wraps the line; message text is identical with color off.
//! - Standard output is the only reporting surface; diagnostics go through
//!   `tracing` (see `telemetry`).

use clap::ValueEnum;
use once_cell::sync::OnceCell;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

static COLOR_MODE: OnceCell<ColorMode> = OnceCell::new();

pub fn set_color_mode(mode: ColorMode) {
    let _ = COLOR_MODE.set(mode);
}

fn parse_color_mode(s: &str) -> Option<ColorMode> {
    match s.trim().to_ascii_lowercase().as_str() {
        "auto" => Some(ColorMode::Auto),
        "always" | "on" | "true" | "yes" => Some(ColorMode::Always),
        "never" | "off" | "false" | "no" => Some(ColorMode::Never),
        _ => None,
    }
}

fn env_color_mode_pref() -> Option<ColorMode> {
    std::env::var("DOCKER_SETUP_COLOR")
        .ok()
        .and_then(|v| parse_color_mode(&v))
}

fn no_color_env() -> bool {
    // Per https://no-color.org/
    std::env::var("NO_COLOR").is_ok()
}

fn resolve(mode: ColorMode, is_tty: bool) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => is_tty,
    }
}

fn color_enabled_for(is_tty: bool) -> bool {
    if no_color_env() {
        return false;
    }
    if let Some(mode) = COLOR_MODE.get().copied() {
        return resolve(mode, is_tty);
    }
    if let Some(env_mode) = env_color_mode_pref() {
        return resolve(env_mode, is_tty);
    }
    is_tty
}

pub fn color_enabled_stdout() -> bool {
    color_enabled_for(atty::is(atty::Stream::Stdout))
}

/// Wrap string with ANSI color code when enabled; otherwise return unchanged.
pub fn paint(enabled: bool, code: &str, s: &str) -> String {
    if enabled {
        format!("{code}{s}\x1b[0m")
    } else {
        s.to_string()
    }
}

pub fn status_line(prefix: &str, msg: &str) -> String {
    format!("[{prefix}] {msg}")
}

/// `[+] msg` in bold cyan.
pub fn log_step_stdout(use_color: bool, msg: &str) {
    println!("{}", paint(use_color, "\x1b[36;1m", &status_line("+", msg)));
}

/// `[!] msg` in yellow.
pub fn log_note_stdout(use_color: bool, msg: &str) {
    println!("{}", paint(use_color, "\x1b[33m", &status_line("!", msg)));
}

/// `[-] msg` in bold red.
pub fn log_error_stdout(use_color: bool, msg: &str) {
    println!("{}", paint(use_color, "\x1b[31;1m", &status_line("-", msg)));
}

/// Continuation line printed under a `[-]`/`[!]` message (e.g. a URL).
pub fn log_detail_stdout(msg: &str) {
    println!("    {msg}");
}
