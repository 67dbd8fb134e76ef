// ABOUTME: Editing session holding the one live family tree for a command
// ABOUTME: Loads the tree file on open and writes it back on save

use kinship_lib::{codec, AnomalyDetector, AnomalyScan, FamilyTree, KinshipConfig, Result};
use std::path::{Path, PathBuf};

/// The tree being worked on, with where it came from
pub struct Session {
    path: PathBuf,
    config: KinshipConfig,
    pub tree: FamilyTree,
}

impl Session {
    /// Load an existing tree file; the load-time anomaly scan is returned alongside
    pub fn open(path: &Path, config: KinshipConfig) -> Result<(Self, AnomalyScan)> {
        let decoded = codec::load(path, &config)?;
        let session = Self {
            path: path.to_path_buf(),
            config,
            tree: decoded.tree,
        };
        Ok((session, decoded.scan))
    }

    /// Load the tree file, or start an empty tree if it does not exist yet
    pub fn open_or_new(path: &Path, config: KinshipConfig) -> Result<Self> {
        if path.exists() {
            return Self::open(path, config).map(|(session, _)| session);
        }
        Ok(Self {
            path: path.to_path_buf(),
            config,
            tree: FamilyTree::with_limits(config.limits),
        })
    }

    /// Anomaly rules configured for this session
    pub fn detector(&self) -> AnomalyDetector {
        AnomalyDetector::new(self.config.rules)
    }

    pub fn save(&self) -> Result<()> {
        codec::save(&self.tree, &self.path)
    }
}
