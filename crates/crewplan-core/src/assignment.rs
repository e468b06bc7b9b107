//! Task assignment generator and methodology filter.
//!
//! Assignment is a fan-out: every member qualified for a task's role
//! receives that task. It is not a round-robin rotation; one task with
//! three qualified members yields three assignment records.

use crate::error::{CrewplanError, Result};
use crate::index::{build_role_index, RoleIndex};
use crate::types::{Assignment, Task, TeamMember};
use std::collections::HashSet;

/// Generate assignments for `tasks` against `team`.
///
/// Builds the role index once, then walks tasks in input order. Each task
/// whose role is held by at least one member fans out to every qualified
/// member, in index (team-input) order; tasks with an absent, empty, or
/// unmatched role yield nothing. Output is stable: all assignments for a
/// task are contiguous and tasks keep their input order.
///
/// Declared `async` for call-site symmetry with the report pipeline's
/// collaborators; the body never suspends, so the future completes on
/// first poll.
///
/// # Errors
///
/// Fails fast with [`CrewplanError::InvalidInput`] when a task or member
/// has an empty id, or when two members share an id. Unmatched roles are
/// not errors.
pub async fn generate_assignments(tasks: &[Task], team: &[TeamMember]) -> Result<Vec<Assignment>> {
    validate_inputs(tasks, team)?;

    let index = build_role_index(team);
    Ok(assign_against_index(tasks, &index))
}

/// The fan-out core, split out so callers holding a prebuilt index can
/// reuse it across task batches.
pub fn assign_against_index(tasks: &[Task], index: &RoleIndex) -> Vec<Assignment> {
    let mut assignments = Vec::new();

    for task in tasks {
        let Some(role) = task.effective_role() else {
            tracing::warn!(task = %task.id, "task has no role, skipping");
            continue;
        };

        let Some(members) = index.members_for(role) else {
            tracing::warn!(task = %task.id, role, "no member holds role, skipping");
            continue;
        };

        for member_id in members {
            assignments.push(Assignment {
                task_id: task.id.clone(),
                assigned_to: member_id.clone(),
                role: role.to_string(),
            });
        }
    }

    assignments
}

/// Filter `tasks` by methodology classifier.
///
/// An empty classifier is the identity. Otherwise a task is retained when
/// its methodology matches case-insensitively, or when it has no
/// methodology at all; tagged tasks that do not match are dropped.
pub fn filter_tasks_by_methodology(tasks: &[Task], methodology: &str) -> Vec<Task> {
    if methodology.is_empty() {
        return tasks.to_vec();
    }

    let wanted = methodology.to_lowercase();
    tasks
        .iter()
        .filter(|task| match &task.methodology {
            Some(m) => m.to_lowercase() == wanted,
            None => true,
        })
        .cloned()
        .collect()
}

fn validate_inputs(tasks: &[Task], team: &[TeamMember]) -> Result<()> {
    let mut seen = HashSet::new();
    for (pos, member) in team.iter().enumerate() {
        if member.id.is_empty() {
            return Err(CrewplanError::InvalidInput(format!(
                "team member at position {pos} has an empty id"
            )));
        }
        if !seen.insert(member.id.as_str()) {
            return Err(CrewplanError::InvalidInput(format!(
                "duplicate team member id: {}",
                member.id
            )));
        }
    }

    for (pos, task) in tasks.iter().enumerate() {
        if task.id.is_empty() {
            return Err(CrewplanError::InvalidInput(format!(
                "task at position {pos} has an empty id"
            )));
        }
    }

    Ok(())
}
