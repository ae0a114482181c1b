//! NutriAdvisor - Personalized Nutrition Advice in the Terminal
//!
//! Matches a handful of user health attributes (BMI, gender, activity level,
//! eating habits) against a static reference dataset and reports the closest
//! profile's dietary advice and malnutrition risk level.
//!
//! # Architecture
//!
//! - **dataset**: CSV ingestion, preprocessing, and the typed record model
//! - **matcher**: weighted similarity scoring over the loaded dataset
//! - **repl**: interactive assessment form with built-in commands
//! - **cli / config / doctor**: argument parsing, TOML configuration,
//!   environment diagnostics

pub mod errors;
pub mod dataset;
pub mod matcher;

// Re-export commonly used types
pub use errors::{AdvisorError, Result};

// Interface layer
pub mod cli;
pub mod config;
pub mod doctor;
pub mod repl;
