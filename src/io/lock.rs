use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Advisory file lock for serializing writes to a data file.
///
/// Uses platform-native flock (Unix) to coordinate between the TUI
/// and CLI processes. The lock lives in a sibling `<file>.lock` that is never
/// removed; the flock is released when the file closes.
pub struct FileLock {
    _file: File,
}

/// Error type for lock operations
#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("could not create lock file at {path}: {source}")]
    CreateError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not acquire lock on {path}: another daypad process may be writing")]
    Timeout { path: PathBuf },
}

/// Path of the lock file guarding `data_file`
pub fn lock_path(data_file: &Path) -> PathBuf {
    let mut name = data_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".lock");
    data_file.with_file_name(name)
}

impl FileLock {
    /// Acquire an advisory lock for `data_file`.
    /// Blocks up to `timeout` waiting for the lock.
    pub fn acquire(data_file: &Path, timeout: Duration) -> Result<Self, LockError> {
        let lock_path = lock_path(data_file);
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| LockError::CreateError {
                path: lock_path.clone(),
                source: e,
            })?;

        let start = Instant::now();
        loop {
            match try_lock(&file) {
                Ok(()) => {
                    return Ok(FileLock { _file: file });
                }
                Err(_) if start.elapsed() < timeout => {
                    std::thread::sleep(Duration::from_millis(10));
                }
                Err(_) => {
                    return Err(LockError::Timeout { path: lock_path });
                }
            }
        }
    }

    /// Acquire with default timeout (5 seconds)
    pub fn acquire_default(data_file: &Path) -> Result<Self, LockError> {
        Self::acquire(data_file, Duration::from_secs(5))
    }
}

/// Try to acquire an exclusive flock on the file (non-blocking)
#[cfg(unix)]
pub(crate) fn try_lock(file: &File) -> Result<(), std::io::Error> {
    use std::os::unix::io::AsRawFd;
    let fd = file.as_raw_fd();
    let result = unsafe { libc::flock(fd, libc::LOCK_EX | libc::LOCK_NB) };
    if result == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
pub(crate) fn try_lock(_file: &File) -> Result<(), std::io::Error> {
    Ok(())
}
