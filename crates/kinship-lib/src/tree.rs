// ABOUTME: The family tree arena owning every person and the links between them
// ABOUTME: Supports bounded insertion, paired parent/child linking, and name lookup

use crate::person::MAX_PARENTS;
use crate::{KinshipError, Person, PersonId, Result, TreeLimits};
use std::ops::{Index, IndexMut};
use tracing::warn;

/// Which halves of a parent/child link were stored.
///
/// Each side is capacity-checked on its own, so a link can end up
/// recorded on one person only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkOutcome {
    /// The child was appended to the parent's children
    pub child_recorded: bool,
    /// The parent was appended to the child's parents
    pub parent_recorded: bool,
}

impl LinkOutcome {
    /// Both sides were stored
    pub fn is_complete(&self) -> bool {
        self.child_recorded && self.parent_recorded
    }
}

/// Insertion-ordered collection of people.
///
/// The tree owns every [`Person`]; links between them are [`PersonId`]
/// handles into this storage. People are never removed.
#[derive(Debug, Clone, Default)]
pub struct FamilyTree {
    people: Vec<Person>,
    limits: TreeLimits,
}

impl FamilyTree {
    /// Create an empty tree with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty tree with the given limits
    pub fn with_limits(limits: TreeLimits) -> Self {
        Self {
            people: Vec::new(),
            limits,
        }
    }

    pub fn limits(&self) -> &TreeLimits {
        &self.limits
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Add a person at the end of the tree.
    ///
    /// Duplicate names are accepted; [`find_by_name`](Self::find_by_name)
    /// then returns the earliest one.
    pub fn add_person(&mut self, person: Person) -> Result<PersonId> {
        self.check_name(person.name())?;
        self.push(person)
    }

    /// Append without name checks, used while a record is still being read
    pub(crate) fn push(&mut self, person: Person) -> Result<PersonId> {
        if self.people.len() >= self.limits.max_people {
            return Err(KinshipError::CapacityExceeded {
                what: "tree",
                limit: self.limits.max_people,
            });
        }
        self.people
            .try_reserve(1)
            .map_err(|_| KinshipError::AllocationFailure)?;

        let id = PersonId(self.people.len());
        self.people.push(person);
        Ok(id)
    }

    /// Names must be a single whitespace-free token, since parent and child
    /// lists in the persisted format are split on whitespace
    pub(crate) fn check_name(&self, name: &str) -> Result<()> {
        if name.is_empty()
            || name.contains(char::is_whitespace)
            || name.len() > self.limits.max_name_len
        {
            return Err(KinshipError::InvalidName(name.to_string()));
        }
        Ok(())
    }

    /// Make `parent` a parent of `child`.
    ///
    /// The child is appended to the parent's children if that list is under
    /// `max_children`, and the parent is appended to the child's parents if
    /// fewer than two are linked. Repeating a call appends again.
    ///
    /// # Panics
    ///
    /// Panics if either id was not issued by this tree.
    pub fn link_parent_child(&mut self, parent: PersonId, child: PersonId) -> LinkOutcome {
        let max_children = self.limits.max_children;

        let children = &mut self.people[parent.0].children;
        let child_recorded = children.len() < max_children;
        if child_recorded {
            children.push(child);
        }

        let parents = &mut self.people[child.0].parents;
        let parent_recorded = parents.len() < MAX_PARENTS;
        if parent_recorded {
            parents.push(parent);
        }

        let outcome = LinkOutcome {
            child_recorded,
            parent_recorded,
        };
        if !outcome.is_complete() {
            warn!(
                parent = self.people[parent.0].name(),
                child = self.people[child.0].name(),
                child_recorded,
                parent_recorded,
                "link stored on one side only"
            );
        }
        outcome
    }

    /// First person whose name matches exactly
    pub fn find_by_name(&self, name: &str) -> Option<PersonId> {
        self.people
            .iter()
            .position(|person| person.name() == name)
            .map(PersonId)
    }

    pub fn get(&self, id: PersonId) -> Option<&Person> {
        self.people.get(id.0)
    }

    /// Every person with its id, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (PersonId, &Person)> {
        self.people
            .iter()
            .enumerate()
            .map(|(index, person)| (PersonId(index), person))
    }

    /// Names for a list of ids, in the same order
    pub fn names<'a>(&'a self, ids: &'a [PersonId]) -> impl Iterator<Item = &'a str> + 'a {
        ids.iter().map(move |&id| self[id].name())
    }
}

impl Index<PersonId> for FamilyTree {
    type Output = Person;

    fn index(&self, id: PersonId) -> &Person {
        &self.people[id.0]
    }
}

impl IndexMut<PersonId> for FamilyTree {
    fn index_mut(&mut self, id: PersonId) -> &mut Person {
        &mut self.people[id.0]
    }
}
