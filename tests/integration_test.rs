//! Integration tests for NutriAdvisor
//!
//! Exercises the full load-then-match flow against CSV fixtures on disk.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use nutriadvisor::config::Config;
use nutriadvisor::dataset::{ActivityLevel, Dataset, Frequency, Gender, Query, RiskLevel};
use nutriadvisor::matcher::{find_best_match, MatchWeights};
use nutriadvisor::AdvisorError;

const HEADER: &str = "Age,Gender,Number of meals per day,Height in cm,Weight,BMI,\
BMI Category,Physical Activity level,Rice Consumption Rate,Beans Consumption Rate,\
Soft drinks Consumption Rate,Snacks Consumption Rate,Fruits Consumption Rate,\
Vegetables Consumption Rate,Malnutrition Risk Level,Dietary advice given";

fn write_dataset(dir: &TempDir, rows: &[&str]) -> PathBuf {
    let path = dir.path().join("profiles.csv");
    let mut contents = String::from(HEADER);
    for row in rows {
        contents.push('\n');
        contents.push_str(row);
    }
    fs::write(&path, contents).unwrap();
    path
}

fn default_query(bmi: f64, gender: Gender, activity: ActivityLevel) -> Query {
    Query {
        bmi,
        gender,
        activity,
        rice: Frequency::Often,
        beans: Frequency::Rarely,
        soft_drinks: Frequency::Rarely,
        snacks: Frequency::Rarely,
        fruits: Frequency::Often,
        vegetables: Frequency::Often,
    }
}

#[test]
fn test_load_and_match_single_row() {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(
        &dir,
        &["24,Female,3,162,58,22.0,Normal,Light Active,Often,Rarely,Rarely,Rarely,Often,Often,Low Risk,Increase protein"],
    );

    let dataset = Dataset::load(&path).unwrap();
    let query = default_query(22.0, Gender::Female, ActivityLevel::Light);

    let recommendation = find_best_match(&query, &dataset, &MatchWeights::default()).unwrap();
    assert_eq!(recommendation.advice, "Increase protein");
    assert_eq!(recommendation.risk, RiskLevel::Low);
    assert_eq!(recommendation.score, 0.0);
}

#[test]
fn test_match_prefers_closest_profile() {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(
        &dir,
        &[
            "23,Female,3,162,46,17.5,Underweight,Light Active,Often,Rarely,Rarely,Rarely,Often,Often,High Risk,Eat more",
            "30,Female,3,163,60,22.6,Normal,Active,Often,Rarely,Rarely,Rarely,Often,Often,Low Risk,Keep it up",
            "45,Male,2,174,95,31.4,Obesity (Class 1),Light Active,Daily,Rarely,Daily,Often,Rarely,Rarely,High Risk,Cut sugar",
        ],
    );

    let dataset = Dataset::load(&path).unwrap();
    let query = default_query(23.0, Gender::Female, ActivityLevel::Active);

    let recommendation = find_best_match(&query, &dataset, &MatchWeights::default()).unwrap();
    assert_eq!(recommendation.advice, "Keep it up");
}

#[test]
fn test_empty_dataset_surfaces_no_match() {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(&dir, &[]);

    let dataset = Dataset::load(&path).unwrap();
    let query = default_query(25.0, Gender::Male, ActivityLevel::Moderate);

    let err = find_best_match(&query, &dataset, &MatchWeights::default()).unwrap_err();
    assert!(matches!(err, AdvisorError::NoMatch));
}

#[test]
fn test_missing_dataset_is_load_error() {
    let dir = TempDir::new().unwrap();
    let err = Dataset::load(dir.path().join("missing.csv")).unwrap_err();
    assert!(matches!(err, AdvisorError::DataLoad { .. }));
}

#[test]
fn test_configured_weights_change_the_winner() {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(
        &dir,
        &[
            "30,Female,3,163,62,24.0,Normal,Active,Often,Rarely,Rarely,Rarely,Often,Often,Low Risk,same gender",
            "30,Male,3,178,70,22.0,Normal,Active,Often,Rarely,Rarely,Rarely,Often,Often,Medium Risk,closer bmi",
        ],
    );
    let dataset = Dataset::load(&path).unwrap();
    let query = default_query(22.0, Gender::Female, ActivityLevel::Active);

    // Default weights: the gender penalty dominates a 2.0 BMI gap
    let default_pick = find_best_match(&query, &dataset, &MatchWeights::default()).unwrap();
    assert_eq!(default_pick.advice, "same gender");

    // A config that zeroes the gender weight flips the outcome
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        "[weights]\ngender = 0.0\n",
    )
    .unwrap();
    let config = Config::load_from(&config_path).unwrap();

    let tuned_pick = find_best_match(&query, &dataset, &config.weights).unwrap();
    assert_eq!(tuned_pick.advice, "closer bmi");
}

#[test]
fn test_repeated_matches_are_identical() {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(
        &dir,
        &[
            "23,Female,3,162,46,17.5,Underweight,Light Active,Often,Rarely,Rarely,Rarely,Often,Often,High Risk,a",
            "30,Female,3,163,60,22.6,Normal,Active,Often,Rarely,Rarely,Rarely,Often,Often,Low Risk,b",
        ],
    );
    let dataset = Dataset::load(&path).unwrap();
    let weights = MatchWeights::default();
    let query = default_query(20.0, Gender::Female, ActivityLevel::Moderate);

    let first = find_best_match(&query, &dataset, &weights).unwrap();
    for _ in 0..10 {
        let again = find_best_match(&query, &dataset, &weights).unwrap();
        assert_eq!(again.advice, first.advice);
        assert_eq!(again.score, first.score);
    }
}

#[test]
fn test_shipped_dataset_loads_and_matches() {
    // The starter dataset in the repository must stay loadable
    let dataset = Dataset::load("data/nutrition_profiles.csv").unwrap();
    assert!(!dataset.is_empty());
    assert_eq!(dataset.genders().len(), 2);

    let query = default_query(27.0, Gender::Female, ActivityLevel::Light);
    let recommendation = find_best_match(&query, &dataset, &MatchWeights::default()).unwrap();
    assert!(!recommendation.advice.is_empty());
}
