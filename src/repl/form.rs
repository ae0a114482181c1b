//! Guided assessment form
//!
//! Prompts for each query attribute in turn, re-asking on invalid input.
//! This is the validation boundary: a query that leaves the form is always
//! well-formed, so the matcher never sees malformed attributes.

use anyhow::Result;
use colored::*;

use crate::cli::args::BMI_RANGE;
use crate::dataset::{ActivityLevel, Frequency, Gender, Query};
use crate::repl::input::InputHandler;

const DEFAULT_BMI: f64 = 25.0;

/// Interactive form collecting one [`Query`]
pub struct AssessmentForm<'a> {
    input: &'a mut InputHandler,
    genders: Vec<Gender>,
}

impl<'a> AssessmentForm<'a> {
    /// Build a form whose gender options come from the dataset
    pub fn new(input: &'a mut InputHandler, genders: Vec<Gender>) -> Self {
        let genders = if genders.is_empty() {
            vec![Gender::Male, Gender::Female]
        } else {
            genders
        };
        AssessmentForm { input, genders }
    }

    /// Run the form to completion
    ///
    /// Returns Ok(None) when the user abandons the form with Ctrl-D;
    /// Ctrl-C propagates as an error for the caller to treat as a cancel.
    pub fn run(&mut self) -> Result<Option<Query>> {
        println!("\n{}", "Enter Your Details".bold().cyan());
        println!("{}", "-".repeat(60).cyan());

        let bmi = match self.prompt_bmi()? {
            Some(value) => value,
            None => return Ok(None),
        };
        let gender = match self.prompt_gender()? {
            Some(value) => value,
            None => return Ok(None),
        };
        let activity = match self.prompt_activity()? {
            Some(value) => value,
            None => return Ok(None),
        };

        println!("\n{}", "Eating Habits".bold().cyan());
        println!("{}", "-".repeat(60).cyan());

        let rice = match self.prompt_frequency("Rice consumption", Frequency::Often)? {
            Some(value) => value,
            None => return Ok(None),
        };
        let beans = match self.prompt_frequency("Beans consumption", Frequency::Rarely)? {
            Some(value) => value,
            None => return Ok(None),
        };
        let soft_drinks = match self.prompt_frequency("Soft drinks consumption", Frequency::Rarely)? {
            Some(value) => value,
            None => return Ok(None),
        };
        let snacks = match self.prompt_frequency("Snacks consumption", Frequency::Rarely)? {
            Some(value) => value,
            None => return Ok(None),
        };
        let fruits = match self.prompt_frequency("Fruits consumption", Frequency::Often)? {
            Some(value) => value,
            None => return Ok(None),
        };
        let vegetables = match self.prompt_frequency("Vegetables consumption", Frequency::Often)? {
            Some(value) => value,
            None => return Ok(None),
        };

        Ok(Some(Query {
            bmi,
            gender,
            activity,
            rice,
            beans,
            soft_drinks,
            snacks,
            fruits,
            vegetables,
        }))
    }

    fn prompt_bmi(&mut self) -> Result<Option<f64>> {
        loop {
            let prompt = format!("Body Mass Index (BMI) [{}]: ", DEFAULT_BMI);
            let line = match self.input.read_field(&prompt)? {
                Some(line) => line,
                None => return Ok(None),
            };

            match parse_bounded_number(&line, BMI_RANGE.0, BMI_RANGE.1, DEFAULT_BMI) {
                Some(value) => return Ok(Some(value)),
                None => println!(
                    "{}",
                    format!(
                        "Please enter a number between {} and {}",
                        BMI_RANGE.0, BMI_RANGE.1
                    )
                    .yellow()
                ),
            }
        }
    }

    fn prompt_gender(&mut self) -> Result<Option<Gender>> {
        let labels: Vec<&str> = self.genders.iter().map(|g| g.display_name()).collect();
        match self.prompt_choice("Gender", &labels, 0)? {
            Some(idx) => Ok(Some(self.genders[idx])),
            None => Ok(None),
        }
    }

    fn prompt_activity(&mut self) -> Result<Option<ActivityLevel>> {
        let labels: Vec<&str> = ActivityLevel::ALL.iter().map(|a| a.display_name()).collect();
        match self.prompt_choice("Physical activity level", &labels, 0)? {
            Some(idx) => Ok(Some(ActivityLevel::ALL[idx])),
            None => Ok(None),
        }
    }

    fn prompt_frequency(&mut self, label: &str, default: Frequency) -> Result<Option<Frequency>> {
        let labels: Vec<&str> = Frequency::ALL.iter().map(|f| f.display_name()).collect();
        let default_idx = default.rank() as usize;
        match self.prompt_choice(label, &labels, default_idx)? {
            Some(idx) => Ok(Some(Frequency::ALL[idx])),
            None => Ok(None),
        }
    }

    /// Numbered-choice prompt shared by the categorical fields
    fn prompt_choice(
        &mut self,
        label: &str,
        labels: &[&str],
        default_idx: usize,
    ) -> Result<Option<usize>> {
        let options = labels
            .iter()
            .enumerate()
            .map(|(idx, name)| format!("{}. {}", idx + 1, name))
            .collect::<Vec<_>>()
            .join("  ");
        println!("  {}", options.dimmed());

        loop {
            let prompt = format!("{} [{}]: ", label, labels[default_idx]);
            let line = match self.input.read_field(&prompt)? {
                Some(line) => line,
                None => return Ok(None),
            };

            match resolve_choice(&line, labels, default_idx) {
                Some(idx) => return Ok(Some(idx)),
                None => println!(
                    "{}",
                    "Please answer with an option number or name".yellow()
                ),
            }
        }
    }
}

/// Parse a numeric form answer; empty input takes the default
pub(crate) fn parse_bounded_number(input: &str, min: f64, max: f64, default: f64) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Some(default);
    }

    let value: f64 = trimmed.parse().ok()?;
    if (min..=max).contains(&value) {
        Some(value)
    } else {
        None
    }
}

/// Resolve a choice answer to an option index
///
/// Accepts the empty string (default), a 1-based option number, an exact
/// label, or an unambiguous case-insensitive prefix.
pub(crate) fn resolve_choice(input: &str, labels: &[&str], default_idx: usize) -> Option<usize> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Some(default_idx);
    }

    if let Ok(number) = trimmed.parse::<usize>() {
        if (1..=labels.len()).contains(&number) {
            return Some(number - 1);
        }
        return None;
    }

    let lowered = trimmed.to_lowercase();
    if let Some(idx) = labels.iter().position(|l| l.to_lowercase() == lowered) {
        return Some(idx);
    }

    let prefix_matches: Vec<usize> = labels
        .iter()
        .enumerate()
        .filter(|(_, l)| l.to_lowercase().starts_with(&lowered))
        .map(|(idx, _)| idx)
        .collect();

    match prefix_matches.as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}
