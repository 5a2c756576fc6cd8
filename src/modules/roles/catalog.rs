//! Role catalog: the total order over permission levels.
//!
//! Levels are ranked 1–20, lower is more senior. Level 1 (Company Admin) and
//! level 2 (Subadmin) are reserved and carry fixed labels; levels 3–20 are
//! customizable per company. A closed set of legacy role names from older
//! tenants maps onto levels 0–12; anything unrecognized ranks as
//! [`UNRANKED_LEVEL`] so unexpected data sorts last instead of failing.

use serde::Serialize;
use utoipa::ToSchema;

use crate::modules::hierarchy::model::HierarchyLabels;

/// Sentinel level for unrecognized role identifiers. Sorts after all real
/// levels.
pub const UNRANKED_LEVEL: u8 = 99;

pub const COMPANY_ADMIN_LEVEL: u8 = 1;
pub const SUBADMIN_LEVEL: u8 = 2;
pub const MIN_CUSTOM_LEVEL: u8 = 3;
pub const MAX_CUSTOM_LEVEL: u8 = 20;

pub const COMPANY_ADMIN_LABEL: &str = "Company Admin";
pub const SUBADMIN_LABEL: &str = "Subadmin";

/// Legacy role names still present in older tenants' data. New assignments
/// use `company`, `subadmin`, or `level_N`.
const LEGACY_ROLES: &[(&str, u8)] = &[
    ("superadmin", 0),
    ("company", 1),
    ("subadmin", 2),
    ("sales_director", 3),
    ("regional_manager", 4),
    ("branch_manager", 5),
    ("team_leader", 6),
    ("senior_closer", 7),
    ("closer", 8),
    ("setter", 9),
    ("agent", 10),
    ("junior_agent", 11),
    ("trainee", 12),
];

/// An assignable role, validated to the catalog's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ToSchema)]
pub enum Role {
    CompanyAdmin,
    Subadmin,
    /// A company-defined level in 3..=20.
    Custom(u8),
}

impl Role {
    /// Parse an assignable role identifier: `company`, `subadmin`, `level_N`
    /// with N in 3..=20, or a legacy name ranking at level 3..=12. Returns
    /// `None` for anything else (including `superadmin`, which is never
    /// assignable through the API).
    pub fn parse(identifier: &str) -> Option<Self> {
        match identifier {
            "company" => return Some(Self::CompanyAdmin),
            "subadmin" => return Some(Self::Subadmin),
            _ => {}
        }

        if let Some(suffix) = identifier.strip_prefix("level_") {
            return match suffix.parse::<u8>() {
                Ok(n) if (MIN_CUSTOM_LEVEL..=MAX_CUSTOM_LEVEL).contains(&n) => {
                    Some(Self::Custom(n))
                }
                _ => None,
            };
        }

        LEGACY_ROLES
            .iter()
            .find(|(name, level)| *name == identifier && *level >= MIN_CUSTOM_LEVEL)
            .map(|(_, level)| Self::Custom(*level))
    }

    pub fn level(&self) -> u8 {
        match self {
            Self::CompanyAdmin => COMPANY_ADMIN_LEVEL,
            Self::Subadmin => SUBADMIN_LEVEL,
            Self::Custom(n) => *n,
        }
    }

    /// Canonical storage key for this role.
    pub fn key(&self) -> String {
        match self {
            Self::CompanyAdmin => "company".to_string(),
            Self::Subadmin => "subadmin".to_string(),
            Self::Custom(n) => format!("level_{}", n),
        }
    }
}

/// Rank any role identifier. Legacy names use the fixed table, `level_N`
/// derives N from the suffix, and everything else degrades to
/// [`UNRANKED_LEVEL`]. Total by design: unexpected data sorts last, it does
/// not fail.
pub fn level_of(identifier: &str) -> u8 {
    if let Some((_, level)) = LEGACY_ROLES.iter().find(|(name, _)| *name == identifier) {
        return *level;
    }

    if let Some(suffix) = identifier.strip_prefix("level_") {
        if let Ok(n) = suffix.parse::<u8>() {
            return n;
        }
    }

    UNRANKED_LEVEL
}

/// Display label for a role within a company. Reserved levels carry fixed
/// labels; custom levels look up the company's configuration. `None` means
/// the level is not offered in this company and must be filtered out of
/// selection lists.
pub fn label_of(role: &Role, labels: &HierarchyLabels) -> Option<String> {
    match role {
        Role::CompanyAdmin => Some(COMPANY_ADMIN_LABEL.to_string()),
        Role::Subadmin => Some(SUBADMIN_LABEL.to_string()),
        Role::Custom(n) => labels.get(*n).map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_of_legacy_roles() {
        assert_eq!(level_of("superadmin"), 0);
        assert_eq!(level_of("company"), 1);
        assert_eq!(level_of("subadmin"), 2);
        assert_eq!(level_of("sales_director"), 3);
        assert_eq!(level_of("regional_manager"), 4);
        assert_eq!(level_of("branch_manager"), 5);
        assert_eq!(level_of("team_leader"), 6);
        assert_eq!(level_of("senior_closer"), 7);
        assert_eq!(level_of("closer"), 8);
        assert_eq!(level_of("setter"), 9);
        assert_eq!(level_of("agent"), 10);
        assert_eq!(level_of("junior_agent"), 11);
        assert_eq!(level_of("trainee"), 12);
    }

    #[test]
    fn test_level_of_pattern_roles() {
        for n in 1..=30u8 {
            assert_eq!(level_of(&format!("level_{}", n)), n);
        }
    }

    #[test]
    fn test_level_of_unrecognized_is_unranked() {
        assert_eq!(level_of(""), UNRANKED_LEVEL);
        assert_eq!(level_of("ceo"), UNRANKED_LEVEL);
        assert_eq!(level_of("level_"), UNRANKED_LEVEL);
        assert_eq!(level_of("level_x"), UNRANKED_LEVEL);
        assert_eq!(level_of("level_999"), UNRANKED_LEVEL);
    }

    #[test]
    fn test_parse_reserved_roles() {
        assert_eq!(Role::parse("company"), Some(Role::CompanyAdmin));
        assert_eq!(Role::parse("subadmin"), Some(Role::Subadmin));
    }

    #[test]
    fn test_parse_custom_levels_bounded() {
        assert_eq!(Role::parse("level_3"), Some(Role::Custom(3)));
        assert_eq!(Role::parse("level_20"), Some(Role::Custom(20)));
        assert_eq!(Role::parse("level_2"), None);
        assert_eq!(Role::parse("level_21"), None);
        assert_eq!(Role::parse("level_abc"), None);
    }

    #[test]
    fn test_parse_legacy_names() {
        assert_eq!(Role::parse("team_leader"), Some(Role::Custom(6)));
        assert_eq!(Role::parse("trainee"), Some(Role::Custom(12)));
        // Reserved-or-senior legacy names are not assignable aliases.
        assert_eq!(Role::parse("superadmin"), None);
    }

    #[test]
    fn test_role_key_round_trip() {
        for role in [Role::CompanyAdmin, Role::Subadmin, Role::Custom(7)] {
            assert_eq!(Role::parse(&role.key()), Some(role));
        }
    }

    #[test]
    fn test_label_of_fixed_levels() {
        let labels = HierarchyLabels::new();
        assert_eq!(
            label_of(&Role::CompanyAdmin, &labels),
            Some("Company Admin".to_string())
        );
        assert_eq!(label_of(&Role::Subadmin, &labels), Some("Subadmin".to_string()));
    }

    #[test]
    fn test_label_of_custom_level_requires_config() {
        let mut labels = HierarchyLabels::new();
        assert_eq!(label_of(&Role::Custom(5), &labels), None);

        labels.set(5, "Branch Manager");
        assert_eq!(
            label_of(&Role::Custom(5), &labels),
            Some("Branch Manager".to_string())
        );
    }
}
