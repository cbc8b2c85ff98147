use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

/// The files that make up one shared output location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogPaths {
    /// `<base>.list.log`, one qualified name per line.
    pub list: PathBuf,
    /// `<base>.layout.log`, one full-view block per name.
    pub layout: PathBuf,
    /// `<base>.lock`, an empty file used as the lock handle.
    pub lock: PathBuf,
}

impl LogPaths {
    pub fn new(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        Self {
            list: with_suffix(base, ".list.log"),
            layout: with_suffix(base, ".layout.log"),
            lock: with_suffix(base, ".lock"),
        }
    }
}

/// Append `suffix` to the whole path, unlike `with_extension`, which would
/// replace an existing extension.
fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sibling_paths() {
        let paths = LogPaths::new("out/layouts");
        assert_eq!(paths.list, PathBuf::from("out/layouts.list.log"));
        assert_eq!(paths.layout, PathBuf::from("out/layouts.layout.log"));
        assert_eq!(paths.lock, PathBuf::from("out/layouts.lock"));
    }

    #[test]
    fn test_existing_extension_is_kept() {
        let paths = LogPaths::new("build/app.v2");
        assert_eq!(paths.list, PathBuf::from("build/app.v2.list.log"));
    }
}
