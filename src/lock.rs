use fs2::FileExt;
use std::env;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use crate::errors::SetupError;

const LOCK_FILE_NAME: &str = "docker-setup.lock";

/// Single-instance guard; removes the lock file on drop.
#[derive(Debug)]
pub struct SetupLock {
    file: File,
    path: PathBuf,
}

impl Drop for SetupLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
        let _ = fs::remove_file(&self.path);
    }
}

/// Honor DOCKER_SETUP_SKIP_LOCK=1.
pub fn should_acquire_lock() -> bool {
    env::var("DOCKER_SETUP_SKIP_LOCK").ok().as_deref() != Some("1")
}

/// `$XDG_RUNTIME_DIR/docker-setup.lock`, then `<tmp>/docker-setup.lock`.
pub fn candidate_lock_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(rt) = env::var_os("XDG_RUNTIME_DIR").filter(|s| !s.is_empty()) {
        paths.push(PathBuf::from(rt).join(LOCK_FILE_NAME));
    }
    let tmp = env::temp_dir().join(LOCK_FILE_NAME);
    if !paths.contains(&tmp) {
        paths.push(tmp);
    }
    paths
}

/// Try a non-blocking exclusive lock at `p`.
pub fn acquire_lock_at(p: &Path) -> Result<SetupLock, SetupError> {
    if let Some(parent) = p.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let file = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .truncate(true)
        .open(p)?;
    match file.try_lock_exclusive() {
        Ok(()) => Ok(SetupLock {
            file,
            path: p.to_path_buf(),
        }),
        Err(e) if e.raw_os_error() == fs2::lock_contended_error().raw_os_error() => {
            Err(SetupError::LockHeld)
        }
        Err(e) => Err(SetupError::Io(e)),
    }
}

/// First candidate that can be locked wins. `Ok(None)` means no candidate
/// could even be opened; the caller continues unguarded.
pub fn acquire_lock() -> Result<Option<SetupLock>, SetupError> {
    let mut last_err: Option<io::Error> = None;
    for p in candidate_lock_paths() {
        match acquire_lock_at(&p) {
            Ok(lock) => {
                tracing::debug!(path = %p.display(), "setup lock acquired");
                return Ok(Some(lock));
            }
            Err(SetupError::LockHeld) => return Err(SetupError::LockHeld),
            Err(SetupError::Io(e)) => {
                tracing::debug!(path = %p.display(), error = %e, "lock candidate unusable");
                last_err = Some(e);
            }
            Err(other) => return Err(other),
        }
    }
    if let Some(e) = last_err {
        tracing::warn!(error = %e, "no usable lock location");
    }
    Ok(None)
}
