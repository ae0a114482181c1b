//! Interactive session module
//!
//! Provides the guided assessment form, built-in slash commands, colored
//! result display, and in-memory session history.

pub mod commands;
pub mod display;
pub mod form;
pub mod input;
pub mod session;

use anyhow::Result;
use std::path::PathBuf;

use crate::dataset::Dataset;
use crate::matcher::MatchWeights;
pub use crate::repl::commands::{is_command, Command, CommandHandler};
pub use crate::repl::display::DisplayManager;
pub use crate::repl::form::AssessmentForm;
pub use crate::repl::input::InputHandler;
pub use crate::repl::session::{AssessmentRecord, SessionManager};

/// Interactive session coordinator
///
/// Owns input handling, command processing, session state, and display.
pub struct ReplSession {
    input_handler: InputHandler,
    command_handler: CommandHandler,
    session_manager: SessionManager,
    display_manager: DisplayManager,
}

impl ReplSession {
    /// Create new session
    pub fn new() -> Result<Self> {
        Ok(ReplSession {
            input_handler: InputHandler::new()?,
            command_handler: CommandHandler::new(),
            session_manager: SessionManager::new(),
            display_manager: DisplayManager::new(),
        })
    }

    /// Create session with persistent input history
    pub fn with_history(history_path: PathBuf) -> Result<Self> {
        Ok(ReplSession {
            input_handler: InputHandler::with_history(history_path)?,
            command_handler: CommandHandler::new(),
            session_manager: SessionManager::new(),
            display_manager: DisplayManager::new(),
        })
    }

    /// Default history file location, when a home directory exists
    pub fn default_history_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".nutriadvisor_history"))
    }

    /// Show welcome banner
    pub fn show_welcome(&self, version: &str, dataset: &Dataset) {
        self.display_manager.show_banner(version, dataset.len());
    }

    /// Read a line at the main prompt
    pub fn read_input(&mut self) -> Result<Option<String>> {
        self.input_handler.read_line()
    }

    /// Handle a slash command
    ///
    /// Returns true if the session should continue, false to exit
    pub fn handle_command(
        &mut self,
        input: &str,
        dataset: &Dataset,
        weights: &MatchWeights,
    ) -> Result<bool> {
        let command = self.command_handler.parse(input);
        self.command_handler.execute(
            command,
            &mut self.session_manager,
            dataset,
            weights,
            &self.display_manager,
        )
    }

    /// Record a completed assessment
    pub fn record_assessment(&mut self, record: AssessmentRecord) {
        self.session_manager.record_assessment(record);
    }

    /// Get session manager (immutable)
    pub fn session(&self) -> &SessionManager {
        &self.session_manager
    }

    /// Get display manager
    pub fn display(&self) -> &DisplayManager {
        &self.display_manager
    }

    /// Get display manager (mutable)
    pub fn display_mut(&mut self) -> &mut DisplayManager {
        &mut self.display_manager
    }

    /// Get input handler (mutable), used by the form
    pub fn input_mut(&mut self) -> &mut InputHandler {
        &mut self.input_handler
    }

    /// Check if matched-profile details are enabled
    pub fn is_verbose(&self) -> bool {
        self.command_handler.is_verbose()
    }

    /// Enable or disable matched-profile details
    pub fn set_verbose(&mut self, enable: bool) {
        self.command_handler.set_verbose(enable);
    }

    /// Save input history on graceful shutdown
    pub fn save(&mut self) -> Result<()> {
        self.input_handler.save_history()
    }

    /// Get assessment count
    pub fn assessment_count(&self) -> usize {
        self.session_manager.assessment_count()
    }
}
