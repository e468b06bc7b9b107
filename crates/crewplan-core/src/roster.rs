//! Roster persistence: JSON load/save for team and task lists.
//!
//! Validation happens here at the boundary so the engine proper never sees
//! records with missing identifiers.

use crate::error::{CrewplanError, Result};
use crate::types::{Task, TeamMember};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A caller-supplied team plus its task backlog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    /// Team members in assignment-priority order
    #[serde(default)]
    pub team: Vec<TeamMember>,
    /// Tasks in processing order
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Roster {
    /// Load a roster from a JSON file and validate identifiers.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let roster: Self = serde_json::from_str(&content)?;
        roster.validate()?;
        Ok(roster)
    }

    /// Save the roster as pretty-printed JSON.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject records with empty identifiers.
    pub fn validate(&self) -> Result<()> {
        if let Some(pos) = self.team.iter().position(|m| m.id.is_empty()) {
            return Err(CrewplanError::InvalidInput(format!(
                "team member at position {pos} has an empty id"
            )));
        }
        if let Some(pos) = self.tasks.iter().position(|t| t.id.is_empty()) {
            return Err(CrewplanError::InvalidInput(format!(
                "task at position {pos} has an empty id"
            )));
        }
        Ok(())
    }
}
