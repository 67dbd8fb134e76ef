// ABOUTME: Person records and the handles that link them inside a tree
// ABOUTME: Parents and children are PersonId indices, never owned values

use crate::Date;
use serde::Serialize;
use std::fmt;

/// Number of parent slots per person
pub const MAX_PARENTS: usize = 2;

/// Handle to a person stored in a [`FamilyTree`](crate::FamilyTree).
///
/// Only meaningful for the tree that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PersonId(pub(crate) usize);

impl PersonId {
    /// Position of the person in tree insertion order
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An individual in the family tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    name: String,
    birth: Date,
    death: Date,
    pub(crate) parents: Vec<PersonId>,
    pub(crate) children: Vec<PersonId>,
}

impl Person {
    /// Create a person with no parents or children.
    ///
    /// Pass [`Date::UNRECORDED`] as `death` for someone living.
    pub fn new(name: impl Into<String>, birth: Date, death: Date) -> Self {
        Self {
            name: name.into(),
            birth,
            death,
            parents: Vec::with_capacity(MAX_PARENTS),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn birth(&self) -> Date {
        self.birth
    }

    pub fn death(&self) -> Date {
        self.death
    }

    /// Death date if one is recorded
    pub fn recorded_death(&self) -> Option<Date> {
        self.death.is_recorded().then_some(self.death)
    }

    /// Parents in the order they were linked
    pub fn parents(&self) -> &[PersonId] {
        &self.parents
    }

    /// Children in the order they were linked
    pub fn children(&self) -> &[PersonId] {
        &self.children
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub(crate) fn set_birth(&mut self, birth: Date) {
        self.birth = birth;
    }

    pub(crate) fn set_death(&mut self, death: Date) {
        self.death = death;
    }
}
