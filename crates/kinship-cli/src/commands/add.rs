// ABOUTME: 'kinship add' command implementation
// ABOUTME: Parses the entered dates and appends a new person to the tree file

use super::SessionConfig;
use kinship_lib::{Date, KinshipError, Person, Result};
use regex_lite::Regex;
use std::sync::OnceLock;

static DATE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn date_pattern() -> &'static Regex {
    DATE_PATTERN.get_or_init(|| {
        Regex::new(r"^\s*(-?\d+)[\s/]+(-?\d+)[\s/]+(-?\d+)\s*$").expect("valid regex")
    })
}

/// Configuration for add command
pub struct AddConfig {
    pub session: SessionConfig,
    pub name: String,
    pub birth: String,
    pub death: Option<String>,
}

/// Add a person and save the tree
pub fn run(config: &AddConfig) -> Result<()> {
    let birth = parse_date(&config.birth)?;
    let death = match &config.death {
        Some(text) => parse_date(text)?,
        None => Date::UNRECORDED,
    };

    let mut session = config.session.open_or_new()?;
    let name = config.name.trim();
    session.tree.add_person(Person::new(name, birth, death))?;
    session.save()?;

    if death.is_recorded() {
        println!("✅ Added {name} ({birth} - {death})");
    } else {
        println!("✅ Added {name} (born {birth})");
    }
    Ok(())
}

/// Accepts `day month year` or `day/month/year`; `0 0 0` stays the unrecorded sentinel
pub fn parse_date(input: &str) -> Result<Date> {
    let invalid = || KinshipError::InvalidDate(input.trim().to_string());

    let captures = date_pattern().captures(input).ok_or_else(invalid)?;
    let field = |index: usize| captures[index].parse::<i32>().map_err(|_| invalid());

    Ok(Date::new(field(1)?, field(2)?, field(3)?))
}
