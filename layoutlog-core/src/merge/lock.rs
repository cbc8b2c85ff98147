use std::{
    fs::{File, OpenOptions},
    path::{Path, PathBuf},
};

use fs2::FileExt;

use crate::error::{Error, Result};

/// Exclusive advisory lock on a lock file, held until dropped.
///
/// Advisory only: it excludes other sessions that take the same lock, not
/// arbitrary writers of the log files. Acquisition blocks with no timeout.
#[derive(Debug)]
pub struct LogLock {
    file: File,
    path: PathBuf,
}

impl LogLock {
    /// Open (or create) `path` and block until the exclusive lock is held.
    pub fn acquire(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        ensure_parent(path).map_err(|source| {
            Box::new(Error::OpenLock {
                path: path.to_path_buf(),
                source,
            })
        })?;

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)
            .map_err(|source| {
                Box::new(Error::OpenLock {
                    path: path.to_path_buf(),
                    source,
                })
            })?;

        tracing::debug!(path = %path.display(), "Waiting for layout log lock");
        // Explicit fs2 call to avoid the std `File::lock_exclusive` (1.89+)
        FileExt::lock_exclusive(&file).map_err(|source| {
            Box::new(Error::Lock {
                path: path.to_path_buf(),
                source,
            })
        })?;
        tracing::debug!(path = %path.display(), "Acquired layout log lock");

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LogLock {
    fn drop(&mut self) {
        // Closing the file releases the lock too; unlock eagerly anyway.
        let _ = FileExt::unlock(&self.file);
        tracing::debug!(path = %self.path.display(), "Released layout log lock");
    }
}

pub(crate) fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            Arc,
            atomic::{AtomicBool, Ordering},
        },
        thread,
        time::Duration,
    };

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_acquire_creates_empty_lock_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("out.lock");

        let lock = LogLock::acquire(&path).unwrap();

        assert_eq!(lock.path(), path);
        assert!(path.exists());
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
    }

    #[test]
    fn test_unopenable_lock_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.lock");
        std::fs::create_dir_all(&path).unwrap();

        let err = LogLock::acquire(&path).unwrap_err();
        assert!(matches!(*err, Error::OpenLock { .. }));
    }

    #[test]
    fn test_second_holder_waits_for_release() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.lock");

        let first = LogLock::acquire(&path).unwrap();
        let acquired = Arc::new(AtomicBool::new(false));

        let waiter = {
            let path = path.clone();
            let acquired = Arc::clone(&acquired);
            thread::spawn(move || {
                let _second = LogLock::acquire(&path).unwrap();
                acquired.store(true, Ordering::SeqCst);
            })
        };

        thread::sleep(Duration::from_millis(100));
        assert!(!acquired.load(Ordering::SeqCst));

        drop(first);
        waiter.join().unwrap();
        assert!(acquired.load(Ordering::SeqCst));
    }
}
