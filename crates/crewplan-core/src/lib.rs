//! Crewplan Core - Role-based task assignment engine
//!
//! Crewplan Core assigns work items to team members based on declared role
//! capabilities. Three small components, no shared state:
//!
//! 1. **Role Index Builder** (`index`): role name -> ordered qualifying
//!    member ids, built once per run from the team in input order.
//! 2. **Assignment Generator** (`assignment`): walks tasks in input order
//!    and fans each one out to every qualified member.
//! 3. **Methodology Filter** (`assignment`): a pure scope filter over tasks
//!    by classifier ("Quant"/"Qual"), independent of assignment.
//!
//! # Quick Start
//!
//! ```
//! use crewplan_core::{generate_assignments, Task, TeamMember};
//!
//! # tokio_test::block_on(async {
//! let team = vec![
//!     TeamMember::new("m1", "Ada", vec!["PM"]),
//!     TeamMember::new("m2", "Grace", vec!["PM", "Logistics"]),
//! ];
//! let tasks = vec![
//!     Task::new("t1", "PM"),
//!     Task::new("t2", "Logistics"),
//! ];
//!
//! let assignments = generate_assignments(&tasks, &team).await.unwrap();
//! assert_eq!(assignments.len(), 3); // t1 fans out to m1 and m2
//! # });
//! ```
//!
//! # Design Principles
//!
//! 1. **No failure taxonomy**: unmatched roles and role-less members are
//!    normal no-op conditions, never errors.
//! 2. **Deterministic output**: assignment order is fully determined by
//!    task input order and team input order.
//! 3. **Validation at the boundary**: malformed records (empty ids) are
//!    rejected up front instead of propagating into output.

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod assignment;
pub mod error;
pub mod index;
pub mod roster;
pub mod types;

pub use assignment::{assign_against_index, filter_tasks_by_methodology, generate_assignments};
pub use error::{CrewplanError, Result};
pub use index::{build_role_index, RoleIndex};
pub use roster::Roster;
pub use types::{Assignment, Task, TeamMember};
