//! # Target identity.
//!
//! [`Target`] is the opaque descriptor of the supervised executable. It is
//! sufficient for both halves of the watchdog's job:
//! - **liveness**: [`Target::name`] is the executable file name that a
//!   process-listing probe matches against;
//! - **launch**: [`Target::path`] is what the launcher spawns.
//!
//! The core never interprets the identity beyond passing it to the injected
//! capabilities.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Identity of the supervised executable.
///
/// Cheap to clone (the path is shared behind an `Arc`), so capabilities and
/// function-backed fakes can take it by value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    path: Arc<PathBuf>,
}

impl Target {
    /// Creates a target from an executable path or bare program name.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
        }
    }

    /// Full path handed to the launch capability.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Executable file name used for process-list matching.
    ///
    /// Falls back to the full path string when the path has no final
    /// component (e.g. `..`).
    pub fn name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_else(|| self.path.to_str().unwrap_or(""))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for Target {
    fn from(s: &str) -> Self {
        Target::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_file_name() {
        let t = Target::new("/opt/app/daemon.exe");
        assert_eq!(t.name(), "daemon.exe");
        assert_eq!(t.path(), Path::new("/opt/app/daemon.exe"));
    }

    #[test]
    fn test_bare_name_round_trips() {
        let t = Target::from("foo");
        assert_eq!(t.name(), "foo");
        assert_eq!(t.to_string(), "foo");
    }
}
