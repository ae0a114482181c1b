//! Command-line argument parsing for NutriAdvisor
//!
//! Provides clap-based CLI with subcommands and verbosity control.
//! Running without a subcommand starts the interactive assessment session.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::dataset::{ActivityLevel, Frequency, Gender};

/// NutriAdvisor - Personalized dietary advice from a reference dataset
#[derive(Parser, Debug)]
#[command(name = "nutriadvisor")]
#[command(version = "0.3.0")]
#[command(about = "Personalized dietary advice in the terminal", long_about = None)]
pub struct Args {
    /// Reference dataset CSV (overrides the configured path)
    #[arg(long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress all output except results)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// One-shot advice from flags instead of the interactive form
    Advise(AdviseArgs),

    /// Summarize the reference dataset
    Dataset,

    /// Run environment diagnostics
    Doctor,

    /// Display current configuration
    Config,
}

/// Query attributes for the `advise` subcommand
#[derive(clap::Args, Debug)]
pub struct AdviseArgs {
    /// Body Mass Index (10.0 to 60.0)
    #[arg(long, value_parser = parse_bmi)]
    pub bmi: f64,

    /// Gender: male or female
    #[arg(long)]
    pub gender: Gender,

    /// Physical activity level: light, moderate, active, or "very active"
    #[arg(long, default_value = "light")]
    pub activity: ActivityLevel,

    /// Rice consumption: never, rarely, often, or daily
    #[arg(long, default_value = "often")]
    pub rice: Frequency,

    /// Beans consumption
    #[arg(long, default_value = "rarely")]
    pub beans: Frequency,

    /// Soft drinks consumption
    #[arg(long, default_value = "rarely")]
    pub soft_drinks: Frequency,

    /// Snacks consumption
    #[arg(long, default_value = "rarely")]
    pub snacks: Frequency,

    /// Fruits consumption
    #[arg(long, default_value = "often")]
    pub fruits: Frequency,

    /// Vegetables consumption
    #[arg(long, default_value = "often")]
    pub vegetables: Frequency,

    /// Emit the recommendation as JSON instead of a panel
    #[arg(long)]
    pub json: bool,
}

/// Accepted BMI range for queries, matching the form bounds
pub const BMI_RANGE: (f64, f64) = (10.0, 60.0);

fn parse_bmi(value: &str) -> Result<f64, String> {
    let bmi: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if !(BMI_RANGE.0..=BMI_RANGE.1).contains(&bmi) {
        return Err(format!(
            "BMI must be between {} and {}",
            BMI_RANGE.0, BMI_RANGE.1
        ));
    }
    Ok(bmi)
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.verbose == 0 {
            Verbosity::Normal
        } else {
            Verbosity::Verbose
        }
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
        }
    }

    /// Check if should show the loading spinner
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }

    /// Check if should show matched-profile details
    pub fn show_details(&self) -> bool {
        matches!(self, Verbosity::Verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_is_interactive() {
        let args = Args::try_parse_from(["nutriadvisor"]).unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.verbosity(), Verbosity::Normal);
    }

    #[test]
    fn test_verbosity_flags() {
        let args = Args::try_parse_from(["nutriadvisor", "-q"]).unwrap();
        assert_eq!(args.verbosity(), Verbosity::Quiet);

        let args = Args::try_parse_from(["nutriadvisor", "-v"]).unwrap();
        assert_eq!(args.verbosity(), Verbosity::Verbose);

        let args = Args::try_parse_from(["nutriadvisor", "-vv"]).unwrap();
        assert_eq!(args.verbosity(), Verbosity::Verbose);
    }

    #[test]
    fn test_quiet_wins_over_verbose() {
        let args = Args::try_parse_from(["nutriadvisor", "-q", "-v"]).unwrap();
        assert_eq!(args.verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_data_override() {
        let args = Args::try_parse_from(["nutriadvisor", "--data", "custom.csv"]).unwrap();
        assert_eq!(args.data, Some(PathBuf::from("custom.csv")));
    }

    #[test]
    fn test_advise_required_flags() {
        let args = Args::try_parse_from([
            "nutriadvisor",
            "advise",
            "--bmi",
            "22.5",
            "--gender",
            "female",
        ])
        .unwrap();

        match args.command {
            Some(Commands::Advise(advise)) => {
                assert_eq!(advise.bmi, 22.5);
                assert_eq!(advise.gender, Gender::Female);
                // Defaults mirror the interactive form's initial selections
                assert_eq!(advise.activity, ActivityLevel::Light);
                assert_eq!(advise.rice, Frequency::Often);
                assert_eq!(advise.beans, Frequency::Rarely);
                assert_eq!(advise.fruits, Frequency::Often);
                assert!(!advise.json);
            }
            other => panic!("expected advise subcommand, got {:?}", other),
        }
    }

    #[test]
    fn test_advise_missing_bmi_fails() {
        let result = Args::try_parse_from(["nutriadvisor", "advise", "--gender", "male"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_advise_bmi_out_of_range_fails() {
        let result = Args::try_parse_from([
            "nutriadvisor",
            "advise",
            "--bmi",
            "75",
            "--gender",
            "male",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_advise_bad_gender_fails() {
        let result = Args::try_parse_from([
            "nutriadvisor",
            "advise",
            "--bmi",
            "22",
            "--gender",
            "martian",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_advise_full_flags() {
        let args = Args::try_parse_from([
            "nutriadvisor",
            "advise",
            "--bmi",
            "31.4",
            "--gender",
            "male",
            "--activity",
            "very active",
            "--rice",
            "daily",
            "--soft-drinks",
            "never",
            "--json",
        ])
        .unwrap();

        match args.command {
            Some(Commands::Advise(advise)) => {
                assert_eq!(advise.activity, ActivityLevel::VeryActive);
                assert_eq!(advise.rice, Frequency::Daily);
                assert_eq!(advise.soft_drinks, Frequency::Never);
                assert!(advise.json);
            }
            other => panic!("expected advise subcommand, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_bmi_bounds() {
        assert!(parse_bmi("10.0").is_ok());
        assert!(parse_bmi("60.0").is_ok());
        assert!(parse_bmi("9.9").is_err());
        assert!(parse_bmi("sixty").is_err());
    }

    #[test]
    fn test_verbosity_methods() {
        assert!(!Verbosity::Quiet.show_progress());
        assert!(Verbosity::Normal.show_progress());

        assert!(!Verbosity::Normal.show_details());
        assert!(Verbosity::Verbose.show_details());

        assert_eq!(Verbosity::Quiet.as_str(), "quiet");
    }

    #[test]
    fn test_subcommand_parsing() {
        assert!(matches!(
            Args::try_parse_from(["nutriadvisor", "dataset"]).unwrap().command,
            Some(Commands::Dataset)
        ));
        assert!(matches!(
            Args::try_parse_from(["nutriadvisor", "doctor"]).unwrap().command,
            Some(Commands::Doctor)
        ));
        assert!(matches!(
            Args::try_parse_from(["nutriadvisor", "config"]).unwrap().command,
            Some(Commands::Config)
        ));
    }
}
