#![allow(clippy::module_name_repetitions)]
//! Platform probe: OS family, Linux distribution, privilege, executable
//! lookup and Compose availability.
//!
//! Probes never fail; anything unreadable degrades to an "unknown" answer
//! and the orchestrator decides whether that is fatal.

use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::exec::{ExecRequest, ExecService};

/// Distributions the Linux installer knows how to handle.
pub const SUPPORTED_DISTROS: &[&str] = &["ubuntu", "debian", "kali"];

/// Sentinel used when no release metadata can be read.
pub const UNKNOWN_DISTRO: &str = "unknown";

const OS_RELEASE_CANDIDATES: &[&str] = &["/etc/os-release", "/usr/lib/os-release"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OsFamily {
    Linux,
    Windows,
    Other(String),
}

impl OsFamily {
    pub fn from_os_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "linux" => OsFamily::Linux,
            "windows" => OsFamily::Windows,
            other => OsFamily::Other(other.to_string()),
        }
    }

    pub fn detect() -> Self {
        Self::from_os_name(env::consts::OS)
    }

    pub fn as_str(&self) -> &str {
        match self {
            OsFamily::Linux => "linux",
            OsFamily::Windows => "windows",
            OsFamily::Other(name) => name,
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn is_supported_distro(id: &str) -> bool {
    SUPPORTED_DISTROS.contains(&id)
}

/// Extract the lower-cased `ID` from os-release text.
///
/// Lines are `KEY=VALUE`; one level of matching quotes is stripped and
/// comments are skipped. A file without `ID` yields `linux`, the
/// freedesktop default.
pub fn parse_os_release_id(text: &str) -> String {
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        if key.trim() == "ID" {
            return unquote(value.trim()).to_lowercase();
        }
    }
    "linux".to_string()
}

fn unquote(s: &str) -> &str {
    let b = s.as_bytes();
    if b.len() >= 2 && (b[0] == b'"' || b[0] == b'\'') && b[b.len() - 1] == b[0] {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

/// Release-metadata files to try, honoring `DOCKER_SETUP_OS_RELEASE`.
pub fn os_release_paths() -> Vec<PathBuf> {
    if let Some(p) = env::var_os("DOCKER_SETUP_OS_RELEASE").filter(|v| !v.is_empty()) {
        return vec![PathBuf::from(p)];
    }
    OS_RELEASE_CANDIDATES.iter().map(PathBuf::from).collect()
}

/// Best-effort distribution id from the first readable candidate.
pub fn detect_distro_from(paths: &[PathBuf]) -> String {
    for p in paths {
        match fs::read_to_string(p) {
            Ok(text) => {
                tracing::debug!(path = %p.display(), "read release metadata");
                return parse_os_release_id(&text);
            }
            Err(e) => tracing::debug!(path = %p.display(), error = %e, "release metadata unreadable"),
        }
    }
    UNKNOWN_DISTRO.to_string()
}

pub fn detect_distro() -> String {
    detect_distro_from(&os_release_paths())
}

/// Root on Unix, Administrator token on Windows.
pub fn is_privileged() -> bool {
    #[cfg(unix)]
    {
        nix::unistd::geteuid().is_root()
    }
    #[cfg(windows)]
    {
        // SAFETY: IsUserAnAdmin takes no arguments and only reads the process token.
        unsafe { ::windows::Win32::UI::Shell::IsUserAnAdmin().as_bool() }
    }
    #[cfg(not(any(unix, windows)))]
    {
        false
    }
}

pub fn command_exists(name: &str) -> bool {
    which::which(name).is_ok()
}

/// `docker compose version` exits zero. A missing `docker` binary and a
/// non-zero exit are the same negative answer.
pub fn docker_compose_available(exec: &ExecService) -> bool {
    let req = ExecRequest::new("docker")
        .args(["compose", "version"])
        .capture_output(true);
    match exec.run(req) {
        Ok(out) => {
            tracing::debug!(status = ?out.status.code(), stdout = %out.stdout.trim(), "compose probe");
            out.status.success()
        }
        Err(e) => {
            tracing::debug!(error = %e, "compose probe could not run docker");
            false
        }
    }
}

/// Everything the orchestrator asks about the machine it runs on.
pub trait Host {
    fn os_family(&self) -> OsFamily;
    fn distro(&self) -> String;
    fn is_privileged(&self) -> bool;
    fn command_exists(&self, name: &str) -> bool;
    fn compose_available(&self) -> bool;
    fn env_var(&self, key: &str) -> Option<String>;
}

/// The live machine.
#[derive(Debug, Default)]
pub struct SystemHost {
    exec: ExecService,
}

impl SystemHost {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Host for SystemHost {
    fn os_family(&self) -> OsFamily {
        OsFamily::detect()
    }

    fn distro(&self) -> String {
        detect_distro()
    }

    fn is_privileged(&self) -> bool {
        is_privileged()
    }

    fn command_exists(&self, name: &str) -> bool {
        command_exists(name)
    }

    fn compose_available(&self) -> bool {
        docker_compose_available(&self.exec)
    }

    fn env_var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}
