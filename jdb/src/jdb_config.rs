use crate::common::DEFAULT_ROOT_DIR;
use std::path::{Path, PathBuf};

/// Configuration for a [`crate::jdb::Jdb`] engine.
///
/// Holds the root data directory and the storage mode. When `in_memory` is
/// set the root is ignored and nothing ever touches the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JdbConfig {
    root: PathBuf,
    in_memory: bool,
}

impl JdbConfig {
    /// Creates a config with the default root directory (`./data`) in
    /// durable mode.
    pub fn new() -> Self {
        JdbConfig {
            root: PathBuf::from(DEFAULT_ROOT_DIR),
            in_memory: false,
        }
    }

    /// The root directory collection files live under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the engine stores everything in memory.
    pub fn in_memory(&self) -> bool {
        self.in_memory
    }

    pub(crate) fn set_root(&mut self, root: &Path) {
        self.root = root.to_path_buf();
    }

    pub(crate) fn set_in_memory(&mut self, in_memory: bool) {
        self.in_memory = in_memory;
    }
}

impl Default for JdbConfig {
    fn default() -> Self {
        JdbConfig::new()
    }
}
