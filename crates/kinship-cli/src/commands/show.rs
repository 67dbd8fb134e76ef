// ABOUTME: 'kinship show' command implementation
// ABOUTME: Lists every person with dates, parents, and children

use super::SessionConfig;
use kinship_lib::{FamilyTree, PersonId, Result};

/// Configuration for show command
pub struct ShowConfig {
    pub session: SessionConfig,
    pub family: Option<String>,
}

/// Print the whole tree
pub fn run(config: &ShowConfig) -> Result<()> {
    let (session, _) = config.session.open()?;
    let tree = &session.tree;

    if tree.is_empty() {
        println!("The tree is empty. Nothing to show.");
        return Ok(());
    }

    match &config.family {
        Some(family) => println!("👪 Members of the {family} family\n"),
        None => println!("👪 Family members\n"),
    }

    for (_, person) in tree.iter() {
        println!("{} (born {})", person.name(), person.birth());
        if let Some(death) = person.recorded_death() {
            println!("  Died {death}");
        }
        println!("  Parents: {}", name_list(tree, person.parents()));
        println!("  Children: {}", name_list(tree, person.children()));
    }

    Ok(())
}

fn name_list(tree: &FamilyTree, ids: &[PersonId]) -> String {
    if ids.is_empty() {
        return "none".to_string();
    }
    tree.names(ids).collect::<Vec<_>>().join(", ")
}
