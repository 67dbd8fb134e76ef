// ABOUTME: Command implementations for the kinship CLI
// ABOUTME: Submodules for add, link, show, and check commands

pub mod add;
pub mod check;
pub mod link;
pub mod show;

use crate::session::Session;
use kinship_lib::{AnomalyScan, KinshipConfig, Result};
use std::path::PathBuf;

/// Options shared by every command
pub struct SessionConfig {
    pub file: PathBuf,
    pub config: Option<PathBuf>,
}

impl SessionConfig {
    fn kinship_config(&self) -> Result<KinshipConfig> {
        match &self.config {
            Some(path) => KinshipConfig::from_file(path),
            None => Ok(KinshipConfig::default()),
        }
    }

    /// Open the tree file, which must exist
    pub fn open(&self) -> Result<(Session, AnomalyScan)> {
        Session::open(&self.file, self.kinship_config()?)
    }

    /// Open the tree file, or start a new tree at that path
    pub fn open_or_new(&self) -> Result<Session> {
        Session::open_or_new(&self.file, self.kinship_config()?)
    }
}
