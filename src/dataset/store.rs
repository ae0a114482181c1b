//! Dataset store: CSV ingestion and preprocessing
//!
//! Loads the reference table wholesale at startup and holds it in memory,
//! read-only, for the lifetime of the process. Preprocessing mirrors the
//! source data conventions: string columns are trimmed and uppercased before
//! enum parsing, missing numeric cells are filled with the column median,
//! and unknown frequency/activity labels fall back to the lowest rank.

use std::path::Path;

use serde::Deserialize;

use crate::dataset::record::{
    ActivityLevel, BmiCategory, Frequency, Gender, PatientRecord, RiskLevel,
};
use crate::errors::{AdvisorError, Result};

/// Raw CSV row as it appears in the file, prior to normalization
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Age")]
    age: Option<f64>,
    #[serde(rename = "Gender")]
    gender: Option<String>,
    #[serde(rename = "Number of meals per day")]
    meals_per_day: Option<f64>,
    #[serde(rename = "Height in cm")]
    height_cm: Option<f64>,
    #[serde(rename = "Weight")]
    weight_kg: Option<f64>,
    #[serde(rename = "BMI")]
    bmi: Option<f64>,
    #[serde(rename = "BMI Category")]
    bmi_category: Option<String>,
    #[serde(rename = "Physical Activity level")]
    activity: Option<String>,
    #[serde(rename = "Rice Consumption Rate")]
    rice: Option<String>,
    #[serde(rename = "Beans Consumption Rate")]
    beans: Option<String>,
    #[serde(rename = "Soft drinks Consumption Rate")]
    soft_drinks: Option<String>,
    #[serde(rename = "Snacks Consumption Rate")]
    snacks: Option<String>,
    #[serde(rename = "Fruits Consumption Rate")]
    fruits: Option<String>,
    #[serde(rename = "Vegetables Consumption Rate")]
    vegetables: Option<String>,
    #[serde(rename = "Malnutrition Risk Level")]
    risk: Option<String>,
    #[serde(rename = "Dietary advice given")]
    advice: Option<String>,
}

/// The reference dataset: an ordered, immutable collection of records
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<PatientRecord>,
}

/// Aggregate view of the dataset used by the `dataset` subcommand and doctor
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub rows: usize,
    pub low_risk: usize,
    pub medium_risk: usize,
    pub high_risk: usize,
    pub bmi_min: f64,
    pub bmi_max: f64,
    pub missing_advice: usize,
}

impl Dataset {
    /// Load and preprocess the reference dataset from a CSV file
    ///
    /// Fails with [`AdvisorError::DataLoad`] when the file is missing or a
    /// row cannot be parsed. An empty file (headers only) loads as an empty
    /// dataset; the failure is deferred to match time.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = path.display().to_string();

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| AdvisorError::data_load(source.as_str(), e.to_string()))?;

        let mut raw = Vec::new();
        for (idx, row) in reader.deserialize::<RawRecord>().enumerate() {
            // +2: one for the header line, one for 1-based numbering
            let row = row
                .map_err(|e| {
                    AdvisorError::data_load(source.as_str(), format!("row {}: {}", idx + 2, e))
                })?;
            raw.push(row);
        }

        Self::from_raw(raw, &source)
    }

    /// Build a dataset from already-typed records (tests, benchmarks)
    pub fn from_records(records: Vec<PatientRecord>) -> Self {
        Dataset { records }
    }

    fn from_raw(raw: Vec<RawRecord>, source: &str) -> Result<Self> {
        let age_median = median(raw.iter().filter_map(|r| r.age));
        let meals_median = median(raw.iter().filter_map(|r| r.meals_per_day));
        let height_median = median(raw.iter().filter_map(|r| r.height_cm));
        let weight_median = median(raw.iter().filter_map(|r| r.weight_kg));
        let bmi_median = median(raw.iter().filter_map(|r| r.bmi));

        let mut records = Vec::with_capacity(raw.len());
        for (idx, row) in raw.into_iter().enumerate() {
            let line = idx + 2;

            let gender_label = normalize(row.gender.as_deref());
            let gender = Gender::parse(&gender_label).ok_or_else(|| {
                AdvisorError::data_load(
                    source,
                    format!("row {}: unrecognized gender '{}'", line, gender_label),
                )
            })?;

            let risk_label = normalize(row.risk.as_deref());
            let risk = RiskLevel::parse(&risk_label).ok_or_else(|| {
                AdvisorError::data_load(
                    source,
                    format!("row {}: unrecognized risk level '{}'", line, risk_label),
                )
            })?;

            let bmi = row.bmi.unwrap_or(bmi_median);
            let bmi_category = BmiCategory::parse(&normalize(row.bmi_category.as_deref()))
                .unwrap_or_else(|| BmiCategory::from_bmi(bmi));

            records.push(PatientRecord {
                age: row.age.unwrap_or(age_median),
                gender,
                meals_per_day: row.meals_per_day.unwrap_or(meals_median),
                rice: parse_frequency(row.rice.as_deref()),
                beans: parse_frequency(row.beans.as_deref()),
                soft_drinks: parse_frequency(row.soft_drinks.as_deref()),
                snacks: parse_frequency(row.snacks.as_deref()),
                fruits: parse_frequency(row.fruits.as_deref()),
                vegetables: parse_frequency(row.vegetables.as_deref()),
                activity: ActivityLevel::parse(&normalize(row.activity.as_deref()))
                    .unwrap_or(ActivityLevel::Light),
                height_cm: row.height_cm.unwrap_or(height_median),
                weight_kg: row.weight_kg.unwrap_or(weight_median),
                bmi,
                bmi_category,
                risk,
                advice: row.advice.unwrap_or_default().trim().to_string(),
            });
        }

        Ok(Dataset { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in original file order
    pub fn records(&self) -> &[PatientRecord] {
        &self.records
    }

    /// Distinct genders in first-seen order, for form options
    pub fn genders(&self) -> Vec<Gender> {
        let mut seen = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.gender) {
                seen.push(record.gender);
            }
        }
        seen
    }

    /// Aggregate statistics over the loaded records
    pub fn summary(&self) -> DatasetSummary {
        let mut summary = DatasetSummary {
            rows: self.records.len(),
            low_risk: 0,
            medium_risk: 0,
            high_risk: 0,
            bmi_min: f64::INFINITY,
            bmi_max: f64::NEG_INFINITY,
            missing_advice: 0,
        };

        for record in &self.records {
            match record.risk {
                RiskLevel::Low => summary.low_risk += 1,
                RiskLevel::Medium => summary.medium_risk += 1,
                RiskLevel::High => summary.high_risk += 1,
            }
            summary.bmi_min = summary.bmi_min.min(record.bmi);
            summary.bmi_max = summary.bmi_max.max(record.bmi);
            if record.advice.is_empty() {
                summary.missing_advice += 1;
            }
        }

        if self.records.is_empty() {
            summary.bmi_min = 0.0;
            summary.bmi_max = 0.0;
        }

        summary
    }
}

fn normalize(value: Option<&str>) -> String {
    value.unwrap_or("").trim().to_uppercase()
}

fn parse_frequency(value: Option<&str>) -> Frequency {
    Frequency::parse(&normalize(value)).unwrap_or(Frequency::Never)
}

/// Median over the present values; average of the two middles on even counts
fn median(values: impl Iterator<Item = f64>) -> f64 {
    let mut values: Vec<f64> = values.collect();
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const HEADER: &str = "Age,Gender,Number of meals per day,Height in cm,Weight,BMI,\
BMI Category,Physical Activity level,Rice Consumption Rate,Beans Consumption Rate,\
Soft drinks Consumption Rate,Snacks Consumption Rate,Fruits Consumption Rate,\
Vegetables Consumption Rate,Malnutrition Risk Level,Dietary advice given";

    fn write_csv(dir: &TempDir, rows: &[&str]) -> PathBuf {
        let path = dir.path().join("profiles.csv");
        let mut contents = String::from(HEADER);
        for row in rows {
            contents.push('\n');
            contents.push_str(row);
        }
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_well_formed() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            &[
                "24,Female,3,162,58,22.1,Normal,Light Active,Often,Rarely,Rarely,Rarely,Often,Often,Low Risk,Keep up the balanced diet",
                "31,Male,2,175,92,30.0,Obesity (Class 1),Active,Daily,Often,Often,Daily,Rarely,Rarely,High Risk,Cut back on soft drinks and snacks",
            ],
        );

        let dataset = Dataset::load(&path).unwrap();
        assert_eq!(dataset.len(), 2);

        let first = &dataset.records()[0];
        assert_eq!(first.gender, Gender::Female);
        assert_eq!(first.activity, ActivityLevel::Light);
        assert_eq!(first.rice, Frequency::Often);
        assert_eq!(first.risk, RiskLevel::Low);
        assert_eq!(first.bmi_category, BmiCategory::Normal);
        assert_eq!(first.advice, "Keep up the balanced diet");

        let second = &dataset.records()[1];
        assert_eq!(second.bmi_category, BmiCategory::ObesityClass1);
        assert_eq!(second.snacks, Frequency::Daily);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Dataset::load(dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, AdvisorError::DataLoad { .. }));
    }

    #[test]
    fn test_load_rejects_bad_gender() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            &["24,Martian,3,162,58,22.1,Normal,Active,Often,Rarely,Rarely,Rarely,Often,Often,Low Risk,advice"],
        );

        let err = Dataset::load(&path).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("row 2"), "unexpected message: {}", message);
        assert!(message.contains("MARTIAN"));
    }

    #[test]
    fn test_load_rejects_bad_risk() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            &["24,Female,3,162,58,22.1,Normal,Active,Often,Rarely,Rarely,Rarely,Often,Often,Extreme,advice"],
        );

        assert!(Dataset::load(&path).is_err());
    }

    #[test]
    fn test_median_fill_for_missing_bmi() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            &[
                "24,Female,3,162,58,20,Normal,Active,Often,Rarely,Rarely,Rarely,Often,Often,Low Risk,a",
                "25,Female,3,160,60,30,Obesity (Class 1),Active,Often,Rarely,Rarely,Rarely,Often,Often,Medium Risk,b",
                "26,Female,3,158,62,,,Active,Often,Rarely,Rarely,Rarely,Often,Often,High Risk,c",
            ],
        );

        let dataset = Dataset::load(&path).unwrap();
        let filled = &dataset.records()[2];
        assert_eq!(filled.bmi, 25.0);
        // Category falls back to derivation from the filled value
        assert_eq!(filled.bmi_category, BmiCategory::Overweight);
    }

    #[test]
    fn test_unknown_frequency_falls_back_to_never() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            &["24,Female,3,162,58,22.1,Normal,Active,Sometimes,Rarely,Rarely,Rarely,Often,Often,Low Risk,a"],
        );

        let dataset = Dataset::load(&path).unwrap();
        assert_eq!(dataset.records()[0].rice, Frequency::Never);
    }

    #[test]
    fn test_labels_normalized_before_parsing() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            &["24,  female ,3,162,58,22.1,normal,very active,daily,rarely,rarely,rarely,often,often,low risk,a"],
        );

        let dataset = Dataset::load(&path).unwrap();
        let record = &dataset.records()[0];
        assert_eq!(record.gender, Gender::Female);
        assert_eq!(record.activity, ActivityLevel::VeryActive);
        assert_eq!(record.rice, Frequency::Daily);
    }

    #[test]
    fn test_headers_only_is_empty_dataset() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, &[]);

        let dataset = Dataset::load(&path).unwrap();
        assert!(dataset.is_empty());
        let summary = dataset.summary();
        assert_eq!(summary.rows, 0);
        assert_eq!(summary.bmi_min, 0.0);
    }

    #[test]
    fn test_genders_distinct_first_seen_order() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            &[
                "24,Male,3,175,70,22.9,Normal,Active,Often,Rarely,Rarely,Rarely,Often,Often,Low Risk,a",
                "25,Female,3,160,60,23.4,Normal,Active,Often,Rarely,Rarely,Rarely,Often,Often,Low Risk,b",
                "26,Male,3,180,75,23.1,Normal,Active,Often,Rarely,Rarely,Rarely,Often,Often,Low Risk,c",
            ],
        );

        let dataset = Dataset::load(&path).unwrap();
        assert_eq!(dataset.genders(), vec![Gender::Male, Gender::Female]);
    }

    #[test]
    fn test_summary_counts() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            &[
                "24,Female,3,162,58,18.0,Underweight,Light Active,Often,Rarely,Rarely,Rarely,Often,Often,High Risk,eat more",
                "25,Female,3,160,60,23.4,Normal,Active,Often,Rarely,Rarely,Rarely,Often,Often,Low Risk,",
                "26,Male,3,180,75,27.0,Overweight,Active,Often,Rarely,Rarely,Rarely,Often,Often,Medium Risk,less sugar",
            ],
        );

        let summary = Dataset::load(&path).unwrap().summary();
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.low_risk, 1);
        assert_eq!(summary.medium_risk, 1);
        assert_eq!(summary.high_risk, 1);
        assert_eq!(summary.bmi_min, 18.0);
        assert_eq!(summary.bmi_max, 27.0);
        assert_eq!(summary.missing_advice, 1);
    }

    #[test]
    fn test_median_helpers() {
        assert_eq!(median([3.0, 1.0, 2.0].into_iter()), 2.0);
        assert_eq!(median([4.0, 1.0, 3.0, 2.0].into_iter()), 2.5);
        assert_eq!(median(std::iter::empty()), 0.0);
    }
}
