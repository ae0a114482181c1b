//! Command handler for interactive built-in commands
//!
//! Slash commands for session introspection; any other input starts a new
//! assessment.

use anyhow::Result;
use colored::*;

use crate::dataset::Dataset;
use crate::matcher::MatchWeights;
use crate::repl::display::DisplayManager;
use crate::repl::session::SessionManager;

/// Built-in command types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    History { limit: Option<usize> },
    Status,
    Weights,
    Dataset,
    Reset,
    Verbose { enable: bool },
    Clear,
    Exit,
    Unknown { input: String },
}

/// Check whether an input line is a slash command
pub fn is_command(input: &str) -> bool {
    input.trim().starts_with('/')
}

/// Command handler for parsing and executing built-in commands
pub struct CommandHandler {
    verbose: bool,
}

impl CommandHandler {
    pub fn new() -> Self {
        CommandHandler { verbose: false }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn set_verbose(&mut self, enable: bool) {
        self.verbose = enable;
    }

    /// Parse input string into a command
    pub fn parse(&self, input: &str) -> Command {
        let trimmed = input.trim();

        if !trimmed.starts_with('/') {
            return Command::Unknown {
                input: input.to_string(),
            };
        }

        let parts: Vec<&str> = trimmed[1..].split_whitespace().collect();
        if parts.is_empty() {
            return Command::Unknown {
                input: input.to_string(),
            };
        }

        match parts[0].to_lowercase().as_str() {
            "help" | "h" => Command::Help,
            "exit" | "quit" | "q" => Command::Exit,
            "history" => {
                let limit = parts.get(1).and_then(|s| s.parse().ok());
                Command::History { limit }
            }
            "status" => Command::Status,
            "weights" => Command::Weights,
            "dataset" | "data" => Command::Dataset,
            "reset" => Command::Reset,
            "verbose" => {
                let enable = parts
                    .get(1)
                    .map(|s| s.to_lowercase() == "on" || s == &"1" || s == &"true")
                    .unwrap_or(true);
                Command::Verbose { enable }
            }
            "clear" | "cls" => Command::Clear,
            _ => Command::Unknown {
                input: input.to_string(),
            },
        }
    }

    /// Execute a command
    ///
    /// Returns true if the session should continue, false to exit
    pub fn execute(
        &mut self,
        command: Command,
        session: &mut SessionManager,
        dataset: &Dataset,
        weights: &MatchWeights,
        display: &DisplayManager,
    ) -> Result<bool> {
        match command {
            Command::Help => {
                self.show_help();
                Ok(true)
            }
            Command::Exit => {
                println!("{}", "Goodbye!".green());
                Ok(false)
            }
            Command::History { limit } => {
                self.show_history(session, limit.unwrap_or(10));
                Ok(true)
            }
            Command::Status => {
                self.show_status(session, dataset);
                Ok(true)
            }
            Command::Weights => {
                self.show_weights(weights);
                Ok(true)
            }
            Command::Dataset => {
                self.show_dataset(dataset);
                Ok(true)
            }
            Command::Reset => {
                session.reset();
                println!("{}", "Session reset. Assessment history cleared.".yellow());
                Ok(true)
            }
            Command::Verbose { enable } => {
                self.verbose = enable;
                let status = if enable { "enabled" } else { "disabled" };
                println!("{}", format!("Verbose mode {}", status).cyan());
                Ok(true)
            }
            Command::Clear => {
                display.clear_screen()?;
                Ok(true)
            }
            Command::Unknown { input } => {
                println!("{}", format!("Unknown command: {}", input).red());
                println!("Type {} for available commands", "/help".cyan());
                Ok(true)
            }
        }
    }

    fn show_help(&self) {
        println!("\n{}", "Available Commands:".bold().cyan());
        println!("{}", "=".repeat(60).cyan());

        let commands = vec![
            ("/help, /h", "Show this help message"),
            ("/history [n]", "Show last n assessments (default: 10)"),
            ("/status", "Show session statistics"),
            ("/weights", "Show the active matcher weight vector"),
            ("/dataset, /data", "Show reference dataset summary"),
            ("/reset", "Clear assessment history"),
            ("/verbose [on|off]", "Toggle matched-profile details"),
            ("/clear, /cls", "Clear screen"),
            ("/exit, /quit, /q", "Exit"),
        ];

        for (cmd, desc) in commands {
            println!("  {:<20} {}", cmd.green(), desc);
        }

        println!("\n{}", "Usage:".bold());
        println!("  - Press Enter (or type anything else) to start an assessment");
        println!("  - Press {} or {} to exit", "Ctrl-D".cyan(), "/exit".cyan());
        println!();
    }

    fn show_history(&self, session: &SessionManager, limit: usize) {
        let history = session.recent(limit);

        if history.is_empty() {
            println!("{}", "No assessments in this session yet.".yellow());
            return;
        }

        println!("\n{}", "Recent Assessments:".bold().cyan());
        for (idx, record) in history.iter().enumerate() {
            println!(
                "  {}. [{}] BMI {:.1}, {}, {} -> {}",
                idx + 1,
                record.timestamp.format("%H:%M:%S"),
                record.bmi,
                record.gender,
                record.activity,
                record.risk
            );
        }
        println!();
    }

    fn show_status(&self, session: &SessionManager, dataset: &Dataset) {
        let (low, medium, high) = session.risk_breakdown();

        println!("\n{}", "Session Status:".bold().cyan());
        println!("  Assessments run:    {}", session.assessment_count());
        println!("  Low risk results:   {}", low);
        println!("  Medium risk results: {}", medium);
        println!("  High risk results:  {}", high);
        println!("  Reference profiles: {}", dataset.len());
        println!();
    }

    fn show_weights(&self, weights: &MatchWeights) {
        println!("\n{}", "Matcher Weights:".bold().cyan());
        println!("  bmi:         {:.2}", weights.bmi);
        println!("  gender:      {:.2}", weights.gender);
        println!("  activity:    {:.2}", weights.activity);
        println!("  rice:        {:.2}", weights.rice);
        println!("  beans:       {:.2}", weights.beans);
        println!("  soft drinks: {:.2}", weights.soft_drinks);
        println!("  snacks:      {:.2}", weights.snacks);
        println!("  fruits:      {:.2}", weights.fruits);
        println!("  vegetables:  {:.2}", weights.vegetables);
        println!();
    }

    fn show_dataset(&self, dataset: &Dataset) {
        let summary = dataset.summary();

        println!("\n{}", "Reference Dataset:".bold().cyan());
        println!("  Profiles:    {}", summary.rows);
        println!(
            "  Risk levels: {} low / {} medium / {} high",
            summary.low_risk, summary.medium_risk, summary.high_risk
        );
        println!("  BMI range:   {:.1} - {:.1}", summary.bmi_min, summary.bmi_max);
        if summary.missing_advice > 0 {
            println!(
                "  {}",
                format!("{} profiles have no advice text", summary.missing_advice).yellow()
            );
        }
        println!();
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
