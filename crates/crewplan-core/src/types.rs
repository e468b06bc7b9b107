//! Core record types for Crewplan
//!
//! This module defines the records exchanged with callers:
//! - Team members and their declared role capabilities
//! - Tasks tagged with a required role and an optional methodology
//! - Assignment records produced by the generator

use serde::{Deserialize, Serialize};
use std::fmt;

/// A person who can receive tasks.
///
/// `roles` is the member's own declaration order; it may be empty, in which
/// case the member never receives assignments. The record is read-only to
/// the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Unique member identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Role capability strings, e.g. "Project Manager"
    #[serde(default)]
    pub roles: Vec<String>,
}

impl TeamMember {
    /// Create a member with the given id, name, and roles.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        roles: Vec<impl Into<String>>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }
}

/// A unit of work to be assigned.
///
/// `role` is matched against the role index verbatim: case-sensitive, no
/// trimming or normalization. A task with no role (or a role nobody holds)
/// simply produces no assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier
    pub id: String,
    /// Role required to work this task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Methodology classifier, e.g. "Quant" or "Qual"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub methodology: Option<String>,
}

impl Task {
    /// Create a task requiring the given role.
    pub fn new(id: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Some(role.into()),
            methodology: None,
        }
    }

    /// Create a task with no role requirement.
    pub fn unassigned(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: None,
            methodology: None,
        }
    }

    /// Set the methodology classifier.
    pub fn with_methodology(mut self, methodology: impl Into<String>) -> Self {
        self.methodology = Some(methodology.into());
        self
    }

    /// The role string, if present and non-empty.
    pub fn effective_role(&self) -> Option<&str> {
        self.role.as_deref().filter(|r| !r.is_empty())
    }
}

/// One (task, member) pairing produced by the generator.
///
/// No uniqueness constraint: the same task id appears once per qualified
/// member (fan-out), and a member id may appear across many tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Identifier of the assigned task
    pub task_id: String,
    /// Identifier of the member receiving it
    pub assigned_to: String,
    /// The task's original role string, case-preserved
    pub role: String,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.task_id, self.assigned_to, self.role)
    }
}
