// ABOUTME: Anomaly engine flagging implausible births and forbidden parent pairs
// ABOUTME: Findings are advisory values, they never block the edit that revealed them

use crate::relations::{are_first_cousins, are_siblings};
use crate::{FamilyTree, PersonId, RuleConfig};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

/// What is wrong with a subject's parentage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnomalyKind {
    /// Subject was born strictly before this parent
    BornBeforeParent { parent: String },
    /// Subject was born more than `months` months after this parent died
    BornAfterParentDeath { parent: String, months: u32 },
    /// Both parent slots hold the same person
    SameParentTwice { parent: String },
    /// The two parents share a parent
    SiblingParents { first: String, second: String },
    /// The two parents are first cousins
    CousinParents { first: String, second: String },
}

/// A finding about one person
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Anomaly {
    /// Name of the person being checked
    pub subject: String,
    #[serde(flatten)]
    pub kind: AnomalyKind,
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let subject = &self.subject;
        match &self.kind {
            AnomalyKind::BornBeforeParent { parent } => {
                write!(f, "{subject} is older than their parent {parent}")
            }
            AnomalyKind::BornAfterParentDeath { parent, months } => write!(
                f,
                "{subject} was born more than {months} months after the death of their parent {parent}"
            ),
            AnomalyKind::SameParentTwice { parent } => {
                write!(f, "{subject} has {parent} as both parents")
            }
            AnomalyKind::SiblingParents { first, second } => {
                write!(f, "{subject} was born to sibling parents {first} and {second}")
            }
            AnomalyKind::CousinParents { first, second } => write!(
                f,
                "{subject} was born to first-cousin parents {first} and {second}"
            ),
        }
    }
}

/// Outcome of scanning a whole tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnomalyScan {
    /// The tree had nobody to check
    Empty,
    /// Every person was checked
    Checked {
        people: usize,
        anomalies: Vec<Anomaly>,
    },
}

impl AnomalyScan {
    pub fn anomalies(&self) -> &[Anomaly] {
        match self {
            AnomalyScan::Empty => &[],
            AnomalyScan::Checked { anomalies, .. } => anomalies,
        }
    }

    /// No findings, including the empty-tree case
    pub fn is_clean(&self) -> bool {
        self.anomalies().is_empty()
    }
}

/// Runs the anomaly rules against people in a tree
#[derive(Debug, Clone, Copy, Default)]
pub struct AnomalyDetector {
    rules: RuleConfig,
}

impl AnomalyDetector {
    pub fn new(rules: RuleConfig) -> Self {
        Self { rules }
    }

    /// Check one person against their parents.
    ///
    /// The inversion and posthumous rules run once per parent, so each
    /// parent can contribute its own finding. The parent-pair rule only
    /// applies with exactly two parents and reports at most one of: same
    /// person twice, siblings, first cousins.
    pub fn check(&self, tree: &FamilyTree, subject: PersonId) -> Vec<Anomaly> {
        let person = &tree[subject];
        debug!(subject = person.name(), "checking anomalies");

        let finding = |kind| Anomaly {
            subject: person.name().to_string(),
            kind,
        };
        let mut anomalies = Vec::new();

        for &parent_id in person.parents() {
            let parent = &tree[parent_id];
            if person.birth() < parent.birth() {
                anomalies.push(finding(AnomalyKind::BornBeforeParent {
                    parent: parent.name().to_string(),
                }));
            }
        }

        let window = self.rules.posthumous_months;
        for &parent_id in person.parents() {
            let parent = &tree[parent_id];
            // applied to both slots: the model has no father/mother roles
            if let Some(death) = parent.recorded_death() {
                if person.birth() > death.add_months(window) {
                    anomalies.push(finding(AnomalyKind::BornAfterParentDeath {
                        parent: parent.name().to_string(),
                        months: window,
                    }));
                }
            }
        }

        if let &[first, second] = person.parents() {
            let first_name = tree[first].name().to_string();
            let second_name = tree[second].name().to_string();
            let kind = if first == second {
                Some(AnomalyKind::SameParentTwice { parent: first_name })
            } else if are_siblings(tree, first, second) {
                Some(AnomalyKind::SiblingParents {
                    first: first_name,
                    second: second_name,
                })
            } else if are_first_cousins(tree, first, second) {
                Some(AnomalyKind::CousinParents {
                    first: first_name,
                    second: second_name,
                })
            } else {
                None
            };
            anomalies.extend(kind.map(finding));
        }

        for anomaly in &anomalies {
            debug!(%anomaly, "anomaly found");
        }
        anomalies
    }

    /// Check every person in insertion order
    pub fn scan(&self, tree: &FamilyTree) -> AnomalyScan {
        if tree.is_empty() {
            info!("tree is empty, no anomalies to detect");
            return AnomalyScan::Empty;
        }

        let anomalies: Vec<Anomaly> = tree
            .iter()
            .flat_map(|(id, _)| self.check(tree, id))
            .collect();
        info!(
            people = tree.len(),
            anomalies = anomalies.len(),
            "anomaly scan complete"
        );
        AnomalyScan::Checked {
            people: tree.len(),
            anomalies,
        }
    }
}

/// Check one person with the default rules
pub fn check_anomalies(tree: &FamilyTree, subject: PersonId) -> Vec<Anomaly> {
    AnomalyDetector::default().check(tree, subject)
}

/// Check every person with the default rules
pub fn detect_all_anomalies(tree: &FamilyTree) -> AnomalyScan {
    AnomalyDetector::default().scan(tree)
}
