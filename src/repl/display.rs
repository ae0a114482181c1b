//! Display manager for the terminal UI
//!
//! Formatted output, the dataset-load spinner, and the recommendation
//! panel. Risk levels are color-coded by severity.

use colored::*;
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::time::Duration;

use crate::dataset::RiskLevel;
use crate::matcher::Recommendation;

/// Display manager for terminal output
pub struct DisplayManager {
    current_bar: Option<ProgressBar>,
    tick_interval: Duration,
}

impl DisplayManager {
    pub fn new() -> Self {
        DisplayManager {
            current_bar: None,
            tick_interval: Duration::from_millis(100),
        }
    }

    /// Show welcome banner
    pub fn show_banner(&self, version: &str, dataset_rows: usize) {
        let width = 64;
        let top = format!("{}", "=".repeat(width).cyan());
        let title = format!("  NutriAdvisor {} - Personalized Nutrition Advice", version);
        let info = format!("  Reference profiles: {} | Mode: Interactive", dataset_rows);
        let bottom = format!("{}", "=".repeat(width).cyan());

        println!("\n{}", top);
        println!("{}", title.bold().cyan());
        println!("{}", info.dimmed());
        println!("{}\n", bottom);
        println!(
            "Press {} to start an assessment (or {} for commands, {} to quit)\n",
            "Enter".green(),
            "/help".green(),
            "/exit".green()
        );
    }

    /// Start the dataset-load spinner
    pub fn start_loading(&mut self, message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(self.tick_interval);

        self.current_bar = Some(pb.clone());
        pb
    }

    /// Finish the current spinner with a success line
    pub fn finish_with_success(&mut self, message: &str) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
        println!("{} {}", "✓".green(), message);
    }

    /// Finish the current spinner with an error line
    pub fn finish_with_error(&mut self, message: &str) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
        println!("{} {}", "✗".red(), message.red());
    }

    /// Risk level colored by severity
    fn risk_colored(risk: RiskLevel) -> ColoredString {
        match risk {
            RiskLevel::Low => risk.display_name().green().bold(),
            RiskLevel::Medium => risk.display_name().yellow().bold(),
            RiskLevel::High => risk.display_name().red().bold(),
        }
    }

    /// Display the recommendation panel
    pub fn show_recommendation(&self, recommendation: &Recommendation, show_details: bool) {
        println!();
        println!("{}", "Here is Your Personalized Advice".bold().cyan());
        println!("{}", "-".repeat(60).cyan());

        println!(
            "  {} {}",
            "Malnutrition Risk:".bold(),
            Self::risk_colored(recommendation.risk)
        );

        if recommendation.advice.is_empty() {
            println!("  {} {}", "Dietary Advice:".bold(), "No specific advice available.".dimmed());
        } else {
            println!("  {} {}", "Dietary Advice:".bold(), recommendation.advice);
        }

        if show_details {
            self.show_section("Matched Profile Details");
            self.show_bullet(&format!("Gender: {}", recommendation.matched_gender));
            self.show_bullet(&format!(
                "BMI: {:.1} ({})",
                recommendation.matched_bmi, recommendation.matched_bmi_category
            ));
            self.show_bullet(&format!("Activity Level: {}", recommendation.matched_activity));
            self.show_bullet(&format!("Similarity Score: {:.2}", recommendation.score));
        }
        println!();
    }

    /// Shown when matching fails because the dataset is empty
    pub fn show_no_match(&self) {
        println!(
            "{} {}",
            "✗".red(),
            "No recommendation available. The reference dataset has no profiles.".red()
        );
    }

    /// Display error message
    pub fn show_error(&self, error: &str) {
        println!("{} {}", "Error:".red().bold(), error.red());
    }

    /// Display warning message
    pub fn show_warning(&self, warning: &str) {
        println!("{} {}", "Warning:".yellow().bold(), warning.yellow());
    }

    /// Display info message
    pub fn show_info(&self, info: &str) {
        println!("{} {}", "Info:".cyan(), info);
    }

    /// Clear screen
    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(io::stdout(), Clear(ClearType::All), cursor::MoveTo(0, 0))
    }

    /// Show section header
    pub fn show_section(&self, title: &str) {
        println!("\n{}", title.bold().cyan());
        println!("{}", "-".repeat(60).cyan());
    }

    /// Show bullet point
    pub fn show_bullet(&self, text: &str) {
        println!("  {} {}", "•".cyan(), text);
    }
}

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new()
    }
}
