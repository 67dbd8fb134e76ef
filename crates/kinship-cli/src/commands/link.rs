// ABOUTME: 'kinship link' command implementation
// ABOUTME: Records a parent/child link and reports anomalies it introduces

use super::SessionConfig;
use kinship_lib::{FamilyTree, KinshipError, PersonId, Result};

/// Configuration for link command
pub struct LinkConfig {
    pub session: SessionConfig,
    pub child: String,
    pub parent: String,
}

/// Link two existing people, check the child, and save the tree
pub fn run(config: &LinkConfig) -> Result<()> {
    let mut session = config.session.open_or_new()?;

    let child = lookup(&session.tree, &config.child)?;
    let parent = lookup(&session.tree, &config.parent)?;

    let outcome = session.tree.link_parent_child(parent, child);
    if !outcome.child_recorded {
        println!(
            "⚠️  {} already has the maximum number of children, {} was not added to them",
            config.parent, config.child
        );
    }
    if !outcome.parent_recorded {
        println!(
            "⚠️  {} already has two parents, {} was not recorded as one",
            config.child, config.parent
        );
    }
    if outcome.is_complete() {
        println!("✅ {} is now a parent of {}", config.parent, config.child);
    }

    // anomalies are advisory, the link is kept either way
    for anomaly in session.detector().check(&session.tree, child) {
        println!("⚠️  Anomaly: {anomaly}");
    }

    session.save()
}

fn lookup(tree: &FamilyTree, name: &str) -> Result<PersonId> {
    tree.find_by_name(name.trim())
        .ok_or_else(|| KinshipError::NotFound(name.to_string()))
}
