//! Filesystem abstraction consumed by the walk.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Minimal read-only filesystem view needed by [`DirectoryScanner`].
///
/// Implement this to scan something other than the host filesystem, or to
/// observe the walk in tests.
///
/// [`DirectoryScanner`]: super::DirectoryScanner
pub trait FileSystem {
    /// Names of the immediate entries of `dir`, in listing order, without
    /// the `.` and `..` pseudo-entries.
    fn list_entries(&self, dir: &Path) -> io::Result<Vec<OsString>>;

    fn is_regular_file(&self, path: &Path) -> bool;

    fn is_directory(&self, path: &Path) -> bool;

    fn join(&self, dir: &Path, name: &OsStr) -> PathBuf {
        dir.join(name)
    }
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn list_entries(&self, dir: &Path) -> io::Result<Vec<OsString>> {
        (**self).list_entries(dir)
    }

    fn is_regular_file(&self, path: &Path) -> bool {
        (**self).is_regular_file(path)
    }

    fn is_directory(&self, path: &Path) -> bool {
        (**self).is_directory(path)
    }

    fn join(&self, dir: &Path, name: &OsStr) -> PathBuf {
        (**self).join(dir, name)
    }
}

/// The host filesystem via `std::fs`.
///
/// Type queries follow symbolic links, so a link to a directory is walked
/// like a directory; cycles are bounded by the depth limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn list_entries(&self, dir: &Path) -> io::Result<Vec<OsString>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            names.push(entry?.file_name());
        }
        Ok(names)
    }

    fn is_regular_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_directory(&self, path: &Path) -> bool {
        path.is_dir()
    }
}
