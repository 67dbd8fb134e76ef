// ABOUTME: Sibling and first-cousin tests over parent links
// ABOUTME: Compares parents by handle identity, never by name

use crate::{FamilyTree, PersonId};

/// True if the two people share at least one parent.
///
/// A person is only their own sibling if they have a parent at all.
pub fn are_siblings(tree: &FamilyTree, first: PersonId, second: PersonId) -> bool {
    let theirs = tree[second].parents();
    tree[first]
        .parents()
        .iter()
        .any(|parent| theirs.contains(parent))
}

/// True if some parent of `first` and some parent of `second` are siblings.
///
/// Only the parents' generation is examined. Siblings are not excluded:
/// two children of the same parents are also cousins when their parents
/// happen to be siblings of each other.
pub fn are_first_cousins(tree: &FamilyTree, first: PersonId, second: PersonId) -> bool {
    let theirs = tree[second].parents();
    tree[first].parents().iter().any(|&mine| {
        theirs
            .iter()
            .any(|&other| are_siblings(tree, mine, other))
    })
}
