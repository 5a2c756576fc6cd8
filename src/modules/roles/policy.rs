//! Promotion/assignment authorization.
//!
//! The single authorization invariant of the hierarchy model: an actor may
//! grant a role iff the target level is strictly below their own. The same
//! check runs in the client as a convenience filter; the checks here, called
//! from request handlers with a database-resolved acting level, are the
//! authoritative ones.

use serde::Serialize;
use utoipa::ToSchema;

use crate::modules::hierarchy::model::HierarchyLabels;
use crate::modules::roles::catalog::{self, MAX_CUSTOM_LEVEL, MIN_CUSTOM_LEVEL, Role};

/// Strict inequality: an actor can never grant their own level or anything
/// more senior.
pub fn can_assign(acting_level: u8, target_level: u8) -> bool {
    acting_level < target_level
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq, ToSchema)]
pub struct AssignableRole {
    pub key: String,
    pub level: u8,
    pub label: String,
}

/// All roles an actor is permitted to grant in this company, most senior
/// first: every level strictly below the acting level that carries a
/// non-empty label. Custom levels without a label are deleted from the
/// company's hierarchy and are never offered.
pub fn assignable_roles(acting_level: u8, labels: &HierarchyLabels) -> Vec<AssignableRole> {
    let mut fixed = vec![Role::CompanyAdmin, Role::Subadmin];
    fixed.extend((MIN_CUSTOM_LEVEL..=MAX_CUSTOM_LEVEL).map(Role::Custom));

    fixed
        .into_iter()
        .filter(|role| can_assign(acting_level, role.level()))
        .filter_map(|role| {
            catalog::label_of(&role, labels).map(|label| AssignableRole {
                key: role.key(),
                level: role.level(),
                label,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_labels() -> HierarchyLabels {
        let mut labels = HierarchyLabels::new();
        labels.set(3, "Sales Director");
        labels.set(5, "Branch Manager");
        labels.set(10, "Agent");
        labels
    }

    #[test]
    fn test_can_assign_strictly_below() {
        for acting in 0..=20u8 {
            for target in 0..=20u8 {
                assert_eq!(can_assign(acting, target), acting < target);
            }
        }
    }

    #[test]
    fn test_can_assign_rejects_own_level() {
        assert!(!can_assign(5, 5));
        assert!(!can_assign(1, 1));
    }

    #[test]
    fn test_assignable_roles_excludes_unlabeled_levels() {
        let roles = assignable_roles(1, &sample_labels());
        let keys: Vec<&str> = roles.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["subadmin", "level_3", "level_5", "level_10"]);
    }

    #[test]
    fn test_assignable_roles_excludes_own_level_and_above() {
        let roles = assignable_roles(5, &sample_labels());
        let keys: Vec<&str> = roles.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["level_10"]);

        for role in &roles {
            assert!(role.level > 5);
            assert!(!role.label.is_empty());
        }
    }

    #[test]
    fn test_assignable_roles_ordered_most_senior_first() {
        let roles = assignable_roles(1, &sample_labels());
        let levels: Vec<u8> = roles.iter().map(|r| r.level).collect();
        let mut sorted = levels.clone();
        sorted.sort_unstable();
        assert_eq!(levels, sorted);
    }

    #[test]
    fn test_assignable_roles_empty_config_offers_only_subadmin() {
        let roles = assignable_roles(1, &HierarchyLabels::new());
        let keys: Vec<&str> = roles.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["subadmin"]);
    }
}
