// ABOUTME: 'kinship check' command implementation
// ABOUTME: Prints the anomaly scan of the whole tree as text or JSON

use super::SessionConfig;
use kinship_lib::{Anomaly, AnomalyScan, Result};
use serde::Serialize;

/// Configuration for check command
pub struct CheckConfig {
    pub session: SessionConfig,
    pub json: bool,
}

#[derive(Serialize)]
struct CheckReport<'a> {
    people: usize,
    anomalies: &'a [Anomaly],
}

/// Report anomalies for every person; findings never make the command fail
pub fn run(config: &CheckConfig) -> Result<()> {
    let (session, scan) = config.session.open()?;

    if config.json {
        let report = CheckReport {
            people: session.tree.len(),
            anomalies: scan.anomalies(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match &scan {
        AnomalyScan::Empty => println!("The tree is empty. No anomalies to detect."),
        AnomalyScan::Checked { people, anomalies } => {
            for anomaly in anomalies {
                println!("⚠️  Anomaly: {anomaly}");
            }
            if anomalies.is_empty() {
                println!("✅ Checked {people} people, no anomalies found");
            } else {
                println!("Checked {people} people, {} anomalies found", anomalies.len());
            }
        }
    }

    Ok(())
}
