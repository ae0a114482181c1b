//! Typed record model for the reference dataset
//!
//! Categorical attributes are small enums with ordinal ranks where the
//! underlying scale is ordered (consumption frequency, activity level).
//! Declaration order defines the rank.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AdvisorError;

/// Patient gender as recorded in the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Parse from a normalized (trimmed, uppercased) dataset label
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "MALE" | "M" => Some(Gender::Male),
            "FEMALE" | "F" => Some(Gender::Female),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
        }
    }

    /// Title-case label for prompts and result panels
    pub fn display_name(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl FromStr for Gender {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::parse(&s.trim().to_uppercase()).ok_or(AdvisorError::ParseAttribute {
            kind: "gender",
            value: s.to_string(),
        })
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// How often a food group is consumed
///
/// Ordinal scale: NEVER < RARELY < OFTEN < DAILY
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Frequency {
    Never,
    Rarely,
    Often,
    Daily,
}

impl Frequency {
    /// All frequencies in rank order, for form options
    pub const ALL: [Frequency; 4] = [
        Frequency::Never,
        Frequency::Rarely,
        Frequency::Often,
        Frequency::Daily,
    ];

    /// Ordinal rank (0 = NEVER .. 3 = DAILY)
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Inverse of [`Frequency::rank`], saturating at DAILY
    pub fn from_rank(rank: u8) -> Self {
        match rank {
            0 => Frequency::Never,
            1 => Frequency::Rarely,
            2 => Frequency::Often,
            _ => Frequency::Daily,
        }
    }

    /// Parse from a normalized dataset label; unknown labels rank 0
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "NEVER" => Some(Frequency::Never),
            "RARELY" => Some(Frequency::Rarely),
            "OFTEN" => Some(Frequency::Often),
            "DAILY" => Some(Frequency::Daily),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Never => "NEVER",
            Frequency::Rarely => "RARELY",
            Frequency::Often => "OFTEN",
            Frequency::Daily => "DAILY",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Frequency::Never => "Never",
            Frequency::Rarely => "Rarely",
            Frequency::Often => "Often",
            Frequency::Daily => "Daily",
        }
    }
}

impl FromStr for Frequency {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Frequency::parse(&s.trim().to_uppercase()).ok_or(AdvisorError::ParseAttribute {
            kind: "consumption frequency",
            value: s.to_string(),
        })
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Physical activity level
///
/// Ordinal scale: LIGHT ACTIVE < MODERATELY ACTIVE < ACTIVE < VERY ACTIVE
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActivityLevel {
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    /// All levels in rank order, for form options
    pub const ALL: [ActivityLevel; 4] = [
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    /// Ordinal rank (0 = LIGHT ACTIVE .. 3 = VERY ACTIVE)
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Inverse of [`ActivityLevel::rank`], saturating at VERY ACTIVE
    pub fn from_rank(rank: u8) -> Self {
        match rank {
            0 => ActivityLevel::Light,
            1 => ActivityLevel::Moderate,
            2 => ActivityLevel::Active,
            _ => ActivityLevel::VeryActive,
        }
    }

    /// Parse from a normalized dataset label; unknown labels rank 0
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "LIGHT ACTIVE" | "LIGHT" => Some(ActivityLevel::Light),
            "MODERATELY ACTIVE" | "MODERATE" => Some(ActivityLevel::Moderate),
            "ACTIVE" => Some(ActivityLevel::Active),
            "VERY ACTIVE" => Some(ActivityLevel::VeryActive),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Light => "LIGHT ACTIVE",
            ActivityLevel::Moderate => "MODERATELY ACTIVE",
            ActivityLevel::Active => "ACTIVE",
            ActivityLevel::VeryActive => "VERY ACTIVE",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ActivityLevel::Light => "Light Active",
            ActivityLevel::Moderate => "Moderately Active",
            ActivityLevel::Active => "Active",
            ActivityLevel::VeryActive => "Very Active",
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivityLevel::parse(&s.trim().to_uppercase()).ok_or(AdvisorError::ParseAttribute {
            kind: "activity level",
            value: s.to_string(),
        })
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Weight status bucket derived from the BMI value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    ObesityClass1,
    ObesityClass2,
    SevereObesity,
}

impl BmiCategory {
    /// Categorize a BMI value into a weight status bucket
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else if bmi < 35.0 {
            BmiCategory::ObesityClass1
        } else if bmi < 40.0 {
            BmiCategory::ObesityClass2
        } else {
            BmiCategory::SevereObesity
        }
    }

    /// Parse from a normalized dataset label
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "UNDERWEIGHT" => Some(BmiCategory::Underweight),
            "NORMAL" => Some(BmiCategory::Normal),
            "OVERWEIGHT" => Some(BmiCategory::Overweight),
            "OBESITY (CLASS 1)" => Some(BmiCategory::ObesityClass1),
            "OBESITY (CLASS 2)" => Some(BmiCategory::ObesityClass2),
            "SEVERE/MORBID OBESITY" => Some(BmiCategory::SevereObesity),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "UNDERWEIGHT",
            BmiCategory::Normal => "NORMAL",
            BmiCategory::Overweight => "OVERWEIGHT",
            BmiCategory::ObesityClass1 => "OBESITY (CLASS 1)",
            BmiCategory::ObesityClass2 => "OBESITY (CLASS 2)",
            BmiCategory::SevereObesity => "SEVERE/MORBID OBESITY",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::ObesityClass1 => "Obesity (Class 1)",
            BmiCategory::ObesityClass2 => "Obesity (Class 2)",
            BmiCategory::SevereObesity => "Severe/Morbid Obesity",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Malnutrition risk level attached to a dataset row
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Parse from a normalized dataset label
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "LOW RISK" | "LOW" => Some(RiskLevel::Low),
            "MEDIUM RISK" | "MEDIUM" => Some(RiskLevel::Medium),
            "HIGH RISK" | "HIGH" => Some(RiskLevel::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW RISK",
            RiskLevel::Medium => "MEDIUM RISK",
            RiskLevel::High => "HIGH RISK",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::High => "High Risk",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One row of the reference dataset, immutable once loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    // Demographic
    pub age: f64,
    pub gender: Gender,

    // Behavioral
    pub meals_per_day: f64,
    pub rice: Frequency,
    pub beans: Frequency,
    pub soft_drinks: Frequency,
    pub snacks: Frequency,
    pub fruits: Frequency,
    pub vegetables: Frequency,
    pub activity: ActivityLevel,

    // Physiological
    pub height_cm: f64,
    pub weight_kg: f64,
    pub bmi: f64,
    pub bmi_category: BmiCategory,

    // Outcome
    pub risk: RiskLevel,
    pub advice: String,
}

/// A query built from user-submitted attributes
///
/// Shaped like a [`PatientRecord`] without the outcome fields. Construction
/// goes through form or flag validation, so a `Query` is always well-formed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Query {
    pub bmi: f64,
    pub gender: Gender,
    pub activity: ActivityLevel,
    pub rice: Frequency,
    pub beans: Frequency,
    pub soft_drinks: Frequency,
    pub snacks: Frequency,
    pub fruits: Frequency,
    pub vegetables: Frequency,
}

impl Query {
    /// Weight status bucket for the query's BMI value
    pub fn bmi_category(&self) -> BmiCategory {
        BmiCategory::from_bmi(self.bmi)
    }
}
