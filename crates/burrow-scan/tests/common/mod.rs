//! Shared fixtures: an in-memory filesystem with deterministic listing order,
//! injectable permission failures, and a log of every directory listed.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};

use burrow_scan::FileSystem;

pub const ROOT: &str = "/mem";

#[derive(Debug, Default)]
pub struct MemoryFs {
    dirs: HashMap<PathBuf, Vec<OsString>>,
    files: HashSet<PathBuf>,
    denied: HashSet<PathBuf>,
    listed: RefCell<Vec<PathBuf>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        let mut fs = Self::default();
        fs.dirs.insert(PathBuf::from(ROOT), Vec::new());
        fs
    }

    /// Add a file at a root-relative `/`-separated path, creating parents.
    pub fn file(mut self, rel: &str) -> Self {
        let path = self.abs(rel);
        self.attach(&path);
        self.files.insert(path);
        self
    }

    /// Add an (empty) directory, creating parents.
    pub fn dir(mut self, rel: &str) -> Self {
        let path = self.abs(rel);
        self.ensure_dir(&path);
        self
    }

    /// Add a file with an arbitrary OS name inside the directory `parent`
    /// (`""` for the root).
    pub fn file_named(mut self, parent: &str, name: &OsStr) -> Self {
        let path = self.entry_path(parent, name);
        self.attach(&path);
        self.files.insert(path);
        self
    }

    /// Add a directory with an arbitrary OS name inside `parent`.
    pub fn dir_named(mut self, parent: &str, name: &OsStr) -> Self {
        let path = self.entry_path(parent, name);
        self.ensure_dir(&path);
        self
    }

    /// Make listing this directory fail with `PermissionDenied`.
    pub fn deny(mut self, rel: &str) -> Self {
        let path = self.abs(rel);
        self.ensure_dir(&path);
        self.denied.insert(path);
        self
    }

    pub fn abs(&self, rel: &str) -> PathBuf {
        rel.split('/').fold(PathBuf::from(ROOT), |acc, part| acc.join(part))
    }

    fn entry_path(&self, parent: &str, name: &OsStr) -> PathBuf {
        let dir = if parent.is_empty() {
            PathBuf::from(ROOT)
        } else {
            self.abs(parent)
        };
        dir.join(name)
    }

    /// Directories listed so far, in order.
    pub fn listed(&self) -> Vec<PathBuf> {
        self.listed.borrow().clone()
    }

    pub fn listing_count(&self) -> usize {
        self.listed.borrow().len()
    }

    pub fn was_listed(&self, rel: &str) -> bool {
        let path = self.abs(rel);
        self.listed.borrow().iter().any(|p| *p == path)
    }

    fn ensure_dir(&mut self, path: &Path) {
        if self.dirs.contains_key(path) {
            return;
        }
        self.attach(path);
        self.dirs.insert(path.to_path_buf(), Vec::new());
    }

    fn attach(&mut self, path: &Path) {
        let parent = path.parent().expect("path below root").to_path_buf();
        self.ensure_dir(&parent);
        let name = path.file_name().expect("named entry").to_os_string();
        let children = self.dirs.get_mut(&parent).expect("parent exists");
        if !children.contains(&name) {
            children.push(name);
        }
    }
}

impl FileSystem for MemoryFs {
    fn list_entries(&self, dir: &Path) -> io::Result<Vec<OsString>> {
        self.listed.borrow_mut().push(dir.to_path_buf());
        if self.denied.contains(dir) {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        self.dirs
            .get(dir)
            .cloned()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn is_regular_file(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    fn is_directory(&self, path: &Path) -> bool {
        self.dirs.contains_key(path)
    }
}

/// The three-entry tree used throughout: `a.txt`, `b.txt`, `sub/c.txt`.
pub fn abc_tree() -> MemoryFs {
    MemoryFs::new().file("a.txt").file("b.txt").file("sub/c.txt")
}
