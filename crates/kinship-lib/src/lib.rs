// ABOUTME: Core library for the kinship tools providing the family tree engine
// ABOUTME: Includes the person/tree model, anomaly detection, text codec, and configuration

pub mod anomaly;
pub mod codec;
pub mod config;
pub mod date;
pub mod error;
pub mod person;
pub mod relations;
pub mod tree;

pub use anomaly::{
    check_anomalies, detect_all_anomalies, Anomaly, AnomalyDetector, AnomalyKind, AnomalyScan,
};
pub use codec::{deserialize, load, save, serialize, Decoded};
pub use config::{KinshipConfig, RuleConfig, TreeLimits};
pub use date::Date;
pub use error::KinshipError;
pub use person::{Person, PersonId, MAX_PARENTS};
pub use relations::{are_first_cousins, are_siblings};
pub use tree::{FamilyTree, LinkOutcome};

/// Result type alias using [`KinshipError`]
pub type Result<T> = std::result::Result<T, KinshipError>;
