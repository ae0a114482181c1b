//! Reference dataset: typed record model and CSV store
//!
//! The dataset is loaded once at startup and never mutated afterwards.

pub mod record;
pub mod store;

pub use record::{ActivityLevel, BmiCategory, Frequency, Gender, PatientRecord, Query, RiskLevel};
pub use store::{Dataset, DatasetSummary};
