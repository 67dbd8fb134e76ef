// ABOUTME: Line-oriented text format for saving and loading a family tree
// ABOUTME: Loading re-resolves name references in one forward pass, then scans for anomalies

use crate::{
    AnomalyDetector, AnomalyScan, Date, FamilyTree, KinshipConfig, KinshipError, Person, PersonId,
    Result,
};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

const RECORD: &str = "Person";
const NAME: &str = "Name:";
const BIRTH: &str = "Birth:";
const DEATH: &str = "Death:";
const PARENTS: &str = "Parents:";
const CHILDREN: &str = "Children:";

/// A tree read back from text, with the anomaly scan run on it
#[derive(Debug, Clone)]
pub struct Decoded {
    pub tree: FamilyTree,
    pub scan: AnomalyScan,
}

/// Render the tree, one six-line record per person in tree order:
///
/// ```text
/// Person
/// Name: Jean
/// Birth: 1 1 1990
/// Death: 0 0 0
/// Parents: Marc Lea
/// Children:
/// ```
///
/// The `Parents: ` and `Children: ` prefixes keep their trailing space even
/// when the list is empty.
pub fn serialize(tree: &FamilyTree) -> String {
    let mut lines = Vec::with_capacity(tree.len() * 6);
    for (_, person) in tree.iter() {
        lines.push(RECORD.to_string());
        lines.push(format!("{NAME} {}", person.name()));
        lines.push(format!("{BIRTH} {}", date_fields(person.birth())));
        lines.push(format!("{DEATH} {}", date_fields(person.death())));
        lines.push(format!("{PARENTS} {}", name_list(tree, person.parents())));
        lines.push(format!("{CHILDREN} {}", name_list(tree, person.children())));
    }

    let mut text = lines.join("\n");
    if !text.is_empty() {
        text.push('\n');
    }
    text
}

fn date_fields(date: Date) -> String {
    format!("{} {} {}", date.day, date.month, date.year)
}

fn name_list(tree: &FamilyTree, ids: &[PersonId]) -> String {
    tree.names(ids).collect::<Vec<_>>().join(" ")
}

/// Rebuild a tree from text produced by [`serialize`].
///
/// Each `Person` line starts a record that joins the tree at once. A name on
/// a `Parents:` or `Children:` line links only if that person already
/// exists, so a reference to a record further down the text is dropped.
/// A link [`serialize`] writes on both of its records survives, because the
/// later record resolves it. Two cases do not round-trip: a self-link
/// resolves on both lines of the same record and comes back doubled, and a
/// link stored on one side only (a third parent kept in the parent's
/// children alone) is lost when that side is the earlier record. Lines with
/// no known label are ignored.
pub fn deserialize(text: &str, config: &KinshipConfig) -> Result<Decoded> {
    let mut tree = FamilyTree::with_limits(config.limits);
    let mut current: Option<PersonId> = None;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim_end();

        if line == RECORD {
            let record = Person::new("", Date::UNRECORDED, Date::UNRECORDED);
            current = Some(tree.push(record)?);
        } else if let Some(rest) = line.strip_prefix(NAME) {
            let id = open_record(current, line_no)?;
            let name = rest.trim();
            tree.check_name(name).map_err(|e| parse_error(line_no, e))?;
            tree[id].set_name(name);
        } else if let Some(rest) = line.strip_prefix(BIRTH) {
            let id = open_record(current, line_no)?;
            let birth = rest.parse::<Date>().map_err(|e| parse_error(line_no, e))?;
            tree[id].set_birth(birth);
        } else if let Some(rest) = line.strip_prefix(DEATH) {
            let id = open_record(current, line_no)?;
            let death = rest.parse::<Date>().map_err(|e| parse_error(line_no, e))?;
            tree[id].set_death(death);
        } else if let Some(rest) = line.strip_prefix(PARENTS) {
            let id = open_record(current, line_no)?;
            for name in rest.split_whitespace() {
                match tree.find_by_name(name) {
                    Some(parent) => {
                        tree.link_parent_child(parent, id);
                    }
                    None => debug!(name, line = line_no, "unresolved parent skipped"),
                }
            }
        } else if let Some(rest) = line.strip_prefix(CHILDREN) {
            let id = open_record(current, line_no)?;
            for name in rest.split_whitespace() {
                match tree.find_by_name(name) {
                    Some(child) => {
                        tree.link_parent_child(id, child);
                    }
                    None => debug!(name, line = line_no, "unresolved child skipped"),
                }
            }
        }
    }

    let scan = AnomalyDetector::new(config.rules).scan(&tree);
    Ok(Decoded { tree, scan })
}

fn open_record(current: Option<PersonId>, line: usize) -> Result<PersonId> {
    current.ok_or_else(|| KinshipError::Parse {
        line,
        message: format!("field before the first {RECORD} line"),
    })
}

fn parse_error(line: usize, err: KinshipError) -> KinshipError {
    KinshipError::Parse {
        line,
        message: err.to_string(),
    }
}

/// Write the serialized tree to `path`, replacing any existing file
pub fn save(tree: &FamilyTree, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, serialize(tree))?;
    info!(path = %path.display(), people = tree.len(), "tree saved");
    Ok(())
}

/// Read and rebuild a tree from `path`
pub fn load(path: impl AsRef<Path>, config: &KinshipConfig) -> Result<Decoded> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let decoded = deserialize(&text, config)?;
    info!(path = %path.display(), people = decoded.tree.len(), "tree loaded");
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AnomalyKind, TreeLimits};
    use tempfile::tempdir;

    fn add(tree: &mut FamilyTree, name: &str, birth: Date, death: Date) -> PersonId {
        tree.add_person(Person::new(name, birth, death)).unwrap()
    }

    /// Carl -> {Ana, Bob}; Ana + Dan -> Zoe
    fn sample_tree() -> FamilyTree {
        let mut tree = FamilyTree::new();
        let carl = add(&mut tree, "Carl", Date::new(3, 4, 1930), Date::new(9, 9, 1999));
        let ana = add(&mut tree, "Ana", Date::new(12, 5, 1960), Date::UNRECORDED);
        let bob = add(&mut tree, "Bob", Date::new(1, 2, 1962), Date::UNRECORDED);
        let dan = add(&mut tree, "Dan", Date::new(7, 7, 1959), Date::UNRECORDED);
        let zoe = add(&mut tree, "Zoe", Date::new(30, 2, 1990), Date::UNRECORDED);
        tree.link_parent_child(carl, ana);
        tree.link_parent_child(carl, bob);
        tree.link_parent_child(ana, zoe);
        tree.link_parent_child(dan, zoe);
        tree
    }

    fn names(tree: &FamilyTree, ids: &[PersonId]) -> Vec<String> {
        tree.names(ids).map(str::to_string).collect()
    }

    #[test]
    fn test_serialize_layout() {
        let mut tree = FamilyTree::new();
        let marc = add(&mut tree, "Marc", Date::new(1, 1, 1960), Date::new(2, 3, 2010));
        let jean = add(&mut tree, "Jean", Date::new(1, 1, 1990), Date::UNRECORDED);
        tree.link_parent_child(marc, jean);

        let expected = concat!(
            "Person\n",
            "Name: Marc\n",
            "Birth: 1 1 1960\n",
            "Death: 2 3 2010\n",
            "Parents: \n",
            "Children: Jean\n",
            "Person\n",
            "Name: Jean\n",
            "Birth: 1 1 1990\n",
            "Death: 0 0 0\n",
            "Parents: Marc\n",
            "Children: \n",
        );
        assert_eq!(serialize(&tree), expected);
    }

    #[test]
    fn test_serialize_empty_tree() {
        assert_eq!(serialize(&FamilyTree::new()), "");
    }

    #[test]
    fn test_round_trip_preserves_people_and_links() {
        let original = sample_tree();
        let decoded = deserialize(&serialize(&original), &KinshipConfig::default()).unwrap();
        let tree = decoded.tree;

        assert_eq!(tree.len(), original.len());
        for ((_, before), (_, after)) in original.iter().zip(tree.iter()) {
            assert_eq!(after.name(), before.name());
            assert_eq!(after.birth(), before.birth());
            assert_eq!(after.death(), before.death());
            assert_eq!(
                names(&tree, after.parents()),
                names(&original, before.parents())
            );
            assert_eq!(
                names(&tree, after.children()),
                names(&original, before.children())
            );
        }
        assert_eq!(serialize(&tree), serialize(&original));
    }

    #[test]
    fn test_round_trip_when_child_record_comes_first() {
        let mut tree = FamilyTree::new();
        let kid = add(&mut tree, "Kid", Date::new(1, 1, 2000), Date::UNRECORDED);
        let mom = add(&mut tree, "Mom", Date::new(1, 1, 1970), Date::UNRECORDED);
        tree.link_parent_child(mom, kid);

        let decoded = deserialize(&serialize(&tree), &KinshipConfig::default()).unwrap();
        let kid = decoded.tree.find_by_name("Kid").unwrap();
        let mom = decoded.tree.find_by_name("Mom").unwrap();

        // the Children: line of the later record restores the link
        assert_eq!(decoded.tree[kid].parents(), &[mom]);
        assert_eq!(decoded.tree[mom].children(), &[kid]);
    }

    #[test]
    fn test_forward_reference_is_dropped() {
        let text = "\
Person
Name: Kid
Birth: 1 1 2000
Death: 0 0 0
Parents: Mom
Children:
Person
Name: Mom
Birth: 1 1 1970
Death: 0 0 0
Parents:
Children:
";
        let decoded = deserialize(text, &KinshipConfig::default()).unwrap();
        let kid = decoded.tree.find_by_name("Kid").unwrap();
        let mom = decoded.tree.find_by_name("Mom").unwrap();

        assert_eq!(decoded.tree.len(), 2);
        assert!(decoded.tree[kid].parents().is_empty());
        assert!(decoded.tree[mom].children().is_empty());
    }

    #[test]
    fn test_children_line_links_earlier_records() {
        let text = "\
Person
Name: Kid
Birth: 1 1 2000
Death: 0 0 0
Person
Name: Dad
Birth: 1 1 1970
Death: 0 0 0
Children: Kid Ghost
";
        let decoded = deserialize(text, &KinshipConfig::default()).unwrap();
        let kid = decoded.tree.find_by_name("Kid").unwrap();
        let dad = decoded.tree.find_by_name("Dad").unwrap();

        assert_eq!(decoded.tree[dad].children(), &[kid]);
        assert_eq!(decoded.tree[kid].parents(), &[dad]);
    }

    #[test]
    fn test_load_runs_anomaly_scan() {
        let text = "\
Person
Name: Marc
Birth: 1 1 1995
Death: 0 0 0
Parents:
Children:
Person
Name: Jean
Birth: 1 1 1990
Death: 0 0 0
Parents: Marc
Children:
";
        let decoded = deserialize(text, &KinshipConfig::default()).unwrap();

        assert_eq!(decoded.scan.anomalies().len(), 1);
        let anomaly = &decoded.scan.anomalies()[0];
        assert_eq!(anomaly.subject, "Jean");
        assert_eq!(
            anomaly.kind,
            AnomalyKind::BornBeforeParent {
                parent: "Marc".into()
            }
        );
    }

    #[test]
    fn test_empty_text_gives_empty_scan() {
        let decoded = deserialize("", &KinshipConfig::default()).unwrap();
        assert!(decoded.tree.is_empty());
        assert_eq!(decoded.scan, AnomalyScan::Empty);
    }

    #[test]
    fn test_tolerates_crlf_and_unknown_lines() {
        let text = "# exported tree\r\nPerson\r\nName: Ana\r\nNickname: Annie\r\nBirth: 12 5 1960 \r\nDeath: 0 0 0\r\n";
        let decoded = deserialize(text, &KinshipConfig::default()).unwrap();
        let ana = decoded.tree.find_by_name("Ana").unwrap();

        assert_eq!(decoded.tree[ana].birth(), Date::new(12, 5, 1960));
    }

    #[test]
    fn test_field_before_record_is_rejected() {
        let err = deserialize("Name: Ana\n", &KinshipConfig::default()).unwrap_err();
        assert!(matches!(err, KinshipError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_bad_date_reports_line() {
        let text = "Person\nName: Ana\nBirth: 12 May 1960\n";
        let err = deserialize(text, &KinshipConfig::default()).unwrap_err();
        assert!(matches!(err, KinshipError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_name_with_space_is_rejected() {
        let text = "Person\nName: Jean Paul\nBirth: 1 1 1950\n";
        let err = deserialize(text, &KinshipConfig::default()).unwrap_err();
        assert!(matches!(err, KinshipError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_every_accepted_name_round_trips_its_links() {
        let mut tree = FamilyTree::new();
        let jean = add(&mut tree, "Jean-Paul", Date::new(1, 1, 1950), Date::UNRECORDED);
        let kid = add(&mut tree, "Kid", Date::new(1, 1, 1980), Date::UNRECORDED);
        tree.link_parent_child(jean, kid);
        assert!(tree
            .add_person(Person::new("Jean Paul", Date::UNRECORDED, Date::UNRECORDED))
            .is_err());

        let decoded = deserialize(&serialize(&tree), &KinshipConfig::default()).unwrap();
        let kid = decoded.tree.find_by_name("Kid").unwrap();

        assert_eq!(names(&decoded.tree, decoded.tree[kid].parents()), ["Jean-Paul"]);
    }

    #[test]
    fn test_extreme_death_month_does_not_overflow() {
        let text = "\
Person
Name: P
Birth: 1 1 1900
Death: 1 2147483647 1950
Parents:
Children:
Person
Name: K
Birth: 1 1 1960
Death: 0 0 0
Parents: P
Children:
";
        let decoded = deserialize(text, &KinshipConfig::default()).unwrap();

        assert_eq!(decoded.scan.anomalies().len(), 1);
        assert_eq!(
            decoded.scan.anomalies()[0].kind,
            AnomalyKind::BornAfterParentDeath {
                parent: "P".into(),
                months: 10
            }
        );
    }

    #[test]
    fn test_self_link_comes_back_doubled() {
        let mut tree = FamilyTree::new();
        let odd = add(&mut tree, "Odd", Date::new(1, 1, 1950), Date::UNRECORDED);
        tree.link_parent_child(odd, odd);

        let decoded = deserialize(&serialize(&tree), &KinshipConfig::default()).unwrap();
        let odd = decoded.tree.find_by_name("Odd").unwrap();

        // resolved once from Parents: and again from Children:
        assert_eq!(decoded.tree[odd].parents(), &[odd, odd]);
        assert_eq!(decoded.tree[odd].children(), &[odd, odd]);
        assert_eq!(decoded.scan.anomalies().len(), 1);
        assert_eq!(
            decoded.scan.anomalies()[0].kind,
            AnomalyKind::SameParentTwice {
                parent: "Odd".into()
            }
        );
    }

    #[test]
    fn test_one_sided_link_on_earlier_record_is_lost() {
        let mut tree = FamilyTree::new();
        let mom = add(&mut tree, "Mom", Date::new(1, 1, 1970), Date::UNRECORDED);
        let dad = add(&mut tree, "Dad", Date::new(1, 1, 1968), Date::UNRECORDED);
        let extra = add(&mut tree, "Extra", Date::new(1, 1, 1965), Date::UNRECORDED);
        let kid = add(&mut tree, "Kid", Date::new(1, 1, 2000), Date::UNRECORDED);
        tree.link_parent_child(mom, kid);
        tree.link_parent_child(dad, kid);
        let outcome = tree.link_parent_child(extra, kid);
        assert!(outcome.child_recorded && !outcome.parent_recorded);

        let decoded = deserialize(&serialize(&tree), &KinshipConfig::default()).unwrap();
        let extra = decoded.tree.find_by_name("Extra").unwrap();
        let kid = decoded.tree.find_by_name("Kid").unwrap();

        assert!(decoded.tree[extra].children().is_empty());
        assert_eq!(names(&decoded.tree, decoded.tree[kid].parents()), ["Mom", "Dad"]);
    }

    #[test]
    fn test_too_many_records_reports_capacity() {
        let config = KinshipConfig {
            limits: TreeLimits {
                max_people: 1,
                ..TreeLimits::default()
            },
            ..KinshipConfig::default()
        };
        let err = deserialize("Person\nName: A\nPerson\nName: B\n", &config).unwrap_err();
        assert!(matches!(err, KinshipError::CapacityExceeded { limit: 1, .. }));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("family.txt");
        let original = sample_tree();

        save(&original, &path).unwrap();
        let decoded = load(&path, &KinshipConfig::default()).unwrap();

        assert_eq!(serialize(&decoded.tree), serialize(&original));
        // Zoe's parents Ana and Dan are unrelated
        assert!(decoded.scan.is_clean());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = load(dir.path().join("absent.txt"), &KinshipConfig::default()).unwrap_err();
        assert!(matches!(err, KinshipError::Io(_)));
    }

    #[test]
    fn test_save_to_missing_directory_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("family.txt");

        let err = save(&sample_tree(), &path).unwrap_err();

        assert!(matches!(err, KinshipError::Io(_)));
        assert!(!path.exists());
    }
}
