//! Role index: role name -> ordered qualifying member ids.
//!
//! The index is built once per assignment run by scanning the team in input
//! order. Per-role sequences preserve that order because it determines the
//! enumeration order of the fan-out; the map's own iteration order carries
//! no meaning.

use crate::types::TeamMember;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Precomputed mapping from role name to the member ids holding that role,
/// in team-input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleIndex {
    entries: HashMap<String, Vec<String>>,
}

impl RoleIndex {
    /// Member ids qualified for `role`, in team-input order.
    pub fn members_for(&self, role: &str) -> Option<&[String]> {
        self.entries.get(role).map(Vec::as_slice)
    }

    /// Iterate over all indexed role names (unordered).
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of distinct roles held by at least one member.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no member declared any role.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build a [`RoleIndex`] from an ordered team.
///
/// For each member, in team order, the member's id is appended to the entry
/// of every role in the member's own list order, creating entries on first
/// sight. Members with no roles contribute nothing. A member id lands in a
/// given role's sequence at most once, even if the member declared the role
/// twice.
///
/// Pure function: never fails, never mutates its input.
pub fn build_role_index(team: &[TeamMember]) -> RoleIndex {
    let mut entries: HashMap<String, Vec<String>> = HashMap::new();

    for member in team {
        for role in &member.roles {
            let seq = entries.entry(role.clone()).or_default();
            if !seq.contains(&member.id) {
                seq.push(member.id.clone());
            }
        }
    }

    tracing::debug!(roles = entries.len(), members = team.len(), "role index built");
    RoleIndex { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TeamMember;
    use proptest::prelude::*;

    fn team() -> Vec<TeamMember> {
        vec![
            TeamMember::new("m1", "Ada", vec!["PM"]),
            TeamMember::new("m2", "Grace", vec!["PM", "Logistics"]),
            TeamMember::new("m3", "Edsger", Vec::<String>::new()),
        ]
    }

    #[test]
    fn test_index_preserves_team_order() {
        let index = build_role_index(&team());
        assert_eq!(index.members_for("PM").unwrap(), ["m1", "m2"]);
        assert_eq!(index.members_for("Logistics").unwrap(), ["m2"]);
    }

    #[test]
    fn test_members_without_roles_contribute_nothing() {
        let index = build_role_index(&team());
        assert_eq!(index.len(), 2);
        assert!(index.roles().all(|r| r != ""));
    }

    #[test]
    fn test_unknown_role_is_absent() {
        let index = build_role_index(&team());
        assert!(index.members_for("Catering").is_none());
    }

    #[test]
    fn test_role_matching_is_case_sensitive() {
        let index = build_role_index(&team());
        assert!(index.members_for("pm").is_none());
    }

    #[test]
    fn test_duplicate_role_declaration_indexes_once() {
        let team = vec![TeamMember::new("m1", "Ada", vec!["PM", "PM"])];
        let index = build_role_index(&team);
        assert_eq!(index.members_for("PM").unwrap(), ["m1"]);
    }

    #[test]
    fn test_empty_team_builds_empty_index() {
        let index = build_role_index(&[]);
        assert!(index.is_empty());
    }

    proptest! {
        /// Every id in an index entry belongs to a member declaring that role.
        #[test]
        fn prop_index_membership_is_sound(team in arb_team()) {
            let index = build_role_index(&team);
            for role in index.roles() {
                for id in index.members_for(role).unwrap() {
                    prop_assert!(team
                        .iter()
                        .any(|m| &m.id == id && m.roles.iter().any(|r| r == role)));
                }
            }
        }

        /// Entry order equals team order filtered to holders of the role.
        #[test]
        fn prop_index_order_is_team_order(team in arb_team()) {
            let index = build_role_index(&team);
            for role in index.roles() {
                let expected: Vec<&str> = team
                    .iter()
                    .filter(|m| m.roles.iter().any(|r| r == role))
                    .map(|m| m.id.as_str())
                    .collect();
                let actual: Vec<&str> = index
                    .members_for(role)
                    .unwrap()
                    .iter()
                    .map(String::as_str)
                    .collect();
                prop_assert_eq!(actual, expected);
            }
        }
    }

    /// Teams with unique positional ids and small role vocabularies, so
    /// role collisions across members are common.
    fn arb_team() -> impl Strategy<Value = Vec<TeamMember>> {
        proptest::collection::vec(
            proptest::collection::vec("[A-C][a-z]{0,2}", 0..4),
            0..12,
        )
        .prop_map(|role_lists| {
            role_lists
                .into_iter()
                .enumerate()
                .map(|(i, roles)| TeamMember {
                    id: format!("m{i}"),
                    name: format!("Member {i}"),
                    roles,
                })
                .collect()
        })
    }
}
