//! Session manager for assessment history
//!
//! Tracks the assessments made during one interactive session. Nothing is
//! persisted; the reference dataset is the only durable input.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;

use crate::dataset::{ActivityLevel, Gender, RiskLevel};

/// Maximum number of assessments to keep in history
const MAX_HISTORY_SIZE: usize = 100;

/// Record of one completed assessment
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentRecord {
    pub timestamp: DateTime<Utc>,
    pub bmi: f64,
    pub gender: Gender,
    pub activity: ActivityLevel,
    pub risk: RiskLevel,
    pub advice: String,
    pub score: f64,
}

/// Session manager maintaining in-memory assessment history
pub struct SessionManager {
    history: VecDeque<AssessmentRecord>,
}

impl SessionManager {
    pub fn new() -> Self {
        SessionManager {
            history: VecDeque::new(),
        }
    }

    /// Record a completed assessment, evicting the oldest past the cap
    pub fn record_assessment(&mut self, record: AssessmentRecord) {
        if self.history.len() >= MAX_HISTORY_SIZE {
            self.history.pop_front();
        }
        self.history.push_back(record);
    }

    /// Most recent assessments, oldest first, up to `limit`
    pub fn recent(&self, limit: usize) -> Vec<&AssessmentRecord> {
        let skip = self.history.len().saturating_sub(limit);
        self.history.iter().skip(skip).collect()
    }

    pub fn assessment_count(&self) -> usize {
        self.history.len()
    }

    pub fn has_history(&self) -> bool {
        !self.history.is_empty()
    }

    /// Counts of (low, medium, high) risk results this session
    pub fn risk_breakdown(&self) -> (usize, usize, usize) {
        let mut counts = (0, 0, 0);
        for record in &self.history {
            match record.risk {
                RiskLevel::Low => counts.0 += 1,
                RiskLevel::Medium => counts.1 += 1,
                RiskLevel::High => counts.2 += 1,
            }
        }
        counts
    }

    /// Clear all session history
    pub fn reset(&mut self) {
        self.history.clear();
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
