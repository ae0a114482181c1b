//! Similarity matcher over the reference dataset
//!
//! Scores a query against every dataset row and recommends the closest
//! profile's advice and risk level. The score is a weighted dissimilarity:
//! numeric BMI distance, a flat penalty for gender mismatch, and ordinal
//! rank distances for activity level and per-food-group consumption.
//! Lower is closer; ties keep the earliest row in dataset order.

use serde::{Deserialize, Serialize};

use crate::dataset::{ActivityLevel, BmiCategory, Dataset, Gender, PatientRecord, Query, RiskLevel};
use crate::errors::{AdvisorError, Result};

/// Weight vector for the similarity score
///
/// Tuning lives in configuration rather than code; the defaults reproduce
/// the reference multipliers (activity doubled, soft drinks and snacks at
/// one and a half, remaining food groups flat).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchWeights {
    pub bmi: f64,
    pub gender: f64,
    pub activity: f64,
    pub rice: f64,
    pub beans: f64,
    pub soft_drinks: f64,
    pub snacks: f64,
    pub fruits: f64,
    pub vegetables: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        MatchWeights {
            bmi: 1.0,
            // Gender dominates so cross-gender rows only win when nothing
            // comparable exists on the query's side of the dataset.
            gender: 4.0,
            activity: 2.0,
            rice: 1.0,
            beans: 1.0,
            soft_drinks: 1.5,
            snacks: 1.5,
            fruits: 1.0,
            vegetables: 1.0,
        }
    }
}

impl MatchWeights {
    /// Set the BMI distance weight (clamped to non-negative)
    pub fn with_bmi(mut self, weight: f64) -> Self {
        self.bmi = weight.max(0.0);
        self
    }

    /// Set the gender mismatch penalty (clamped to non-negative)
    pub fn with_gender(mut self, weight: f64) -> Self {
        self.gender = weight.max(0.0);
        self
    }

    /// Set the activity rank-distance weight (clamped to non-negative)
    pub fn with_activity(mut self, weight: f64) -> Self {
        self.activity = weight.max(0.0);
        self
    }
}

/// Result of a successful match: the winning row's outcome fields plus the
/// matched profile's display attributes
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub advice: String,
    pub risk: RiskLevel,
    pub matched_gender: Gender,
    pub matched_bmi: f64,
    pub matched_bmi_category: BmiCategory,
    pub matched_activity: ActivityLevel,
    pub score: f64,
}

fn rank_distance(a: u8, b: u8) -> f64 {
    (f64::from(a) - f64::from(b)).abs()
}

/// Weighted dissimilarity between a query and one dataset row
pub fn score_record(query: &Query, record: &PatientRecord, weights: &MatchWeights) -> f64 {
    let mut score = (record.bmi - query.bmi).abs() * weights.bmi;

    if record.gender != query.gender {
        score += weights.gender;
    }

    score += rank_distance(record.activity.rank(), query.activity.rank()) * weights.activity;
    score += rank_distance(record.rice.rank(), query.rice.rank()) * weights.rice;
    score += rank_distance(record.beans.rank(), query.beans.rank()) * weights.beans;
    score += rank_distance(record.soft_drinks.rank(), query.soft_drinks.rank()) * weights.soft_drinks;
    score += rank_distance(record.snacks.rank(), query.snacks.rank()) * weights.snacks;
    score += rank_distance(record.fruits.rank(), query.fruits.rank()) * weights.fruits;
    score += rank_distance(record.vegetables.rank(), query.vegetables.rank()) * weights.vegetables;

    score
}

/// Find the closest dataset row to the query
///
/// Single deterministic pass in dataset order. The strict comparison keeps
/// the first of any equally-scored rows. Fails with
/// [`AdvisorError::NoMatch`] only when the dataset is empty.
pub fn find_best_match(
    query: &Query,
    dataset: &Dataset,
    weights: &MatchWeights,
) -> Result<Recommendation> {
    let mut best: Option<(&PatientRecord, f64)> = None;

    for record in dataset.records() {
        let score = score_record(query, record, weights);
        match best {
            Some((_, best_score)) if score >= best_score => {}
            _ => best = Some((record, score)),
        }
    }

    let (record, score) = best.ok_or(AdvisorError::NoMatch)?;

    Ok(Recommendation {
        advice: record.advice.clone(),
        risk: record.risk,
        matched_gender: record.gender,
        matched_bmi: record.bmi,
        matched_bmi_category: record.bmi_category,
        matched_activity: record.activity,
        score,
    })
}
