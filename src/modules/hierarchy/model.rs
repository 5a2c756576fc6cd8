use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::roles::catalog::{MAX_CUSTOM_LEVEL, MIN_CUSTOM_LEVEL};

/// Per-company display labels for the customizable hierarchy levels (3–20).
///
/// A level without a label (or with an empty one) is not offered in that
/// company: it must be excluded from assignable-role lists and from the
/// hierarchy legend. Levels 1 and 2 carry fixed labels and are not stored
/// here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyLabels {
    labels: BTreeMap<u8, String>,
}

impl HierarchyLabels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<HierarchyLabelRow>) -> Self {
        let mut labels = Self::new();
        for row in rows {
            if (MIN_CUSTOM_LEVEL..=MAX_CUSTOM_LEVEL).contains(&(row.level as u8)) {
                labels.set(row.level as u8, row.label);
            }
        }
        labels
    }

    /// Set or clear the label for a custom level. An empty label removes the
    /// level from the company's hierarchy.
    pub fn set(&mut self, level: u8, label: impl Into<String>) {
        let label = label.into();
        if label.trim().is_empty() {
            self.labels.remove(&level);
        } else {
            self.labels.insert(level, label);
        }
    }

    /// Returns the label for a custom level, or `None` when the level is not
    /// offered in this company.
    pub fn get(&self, level: u8) -> Option<&str> {
        self.labels.get(&level).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> {
        self.labels.iter().map(|(level, label)| (*level, label.as_str()))
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct HierarchyLabelRow {
    pub level: i16,
    pub label: String,
}

/// DTO for setting or clearing a level label. An empty label deletes the
/// level from the company's hierarchy.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateLabelDto {
    #[validate(range(min = 3, max = 20, message = "Level must be between 3 and 20"))]
    pub level: u8,
    #[validate(length(max = 50, message = "Label must not exceed 50 characters"))]
    pub label: String,
}

/// One entry of the hierarchy legend: every level the company offers, with
/// its role key and display label, most senior first.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LegendEntry {
    pub level: u8,
    pub key: String,
    pub label: String,
}
