//! CLI module for NutriAdvisor
//!
//! Argument parsing and verbosity control.

pub mod args;

pub use args::{AdviseArgs, Args, Commands, Verbosity};
