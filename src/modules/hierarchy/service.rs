use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::roles::catalog::{
    COMPANY_ADMIN_LABEL, COMPANY_ADMIN_LEVEL, SUBADMIN_LABEL, SUBADMIN_LEVEL,
};
use crate::utils::auth_helpers::Actor;
use crate::utils::errors::AppError;

use super::model::{HierarchyLabelRow, HierarchyLabels, LegendEntry, UpdateLabelDto};

#[instrument(skip(db))]
pub async fn fetch_labels(db: &PgPool, company_id: Uuid) -> Result<HierarchyLabels, AppError> {
    let rows = sqlx::query_as::<_, HierarchyLabelRow>(
        "SELECT level, label FROM hierarchy_labels WHERE company_id = $1 ORDER BY level",
    )
    .bind(company_id)
    .fetch_all(db)
    .await?;

    Ok(HierarchyLabels::from_rows(rows))
}

/// Set or clear a custom level's label. Only a Company Admin may reshape the
/// company's hierarchy; an empty label deletes the level.
#[instrument(skip(db, actor))]
pub async fn update_label(db: &PgPool, actor: &Actor, dto: UpdateLabelDto) -> Result<(), AppError> {
    if actor.level != COMPANY_ADMIN_LEVEL {
        return Err(AppError::forbidden(
            "Only a Company Admin can change hierarchy labels",
        ));
    }

    if dto.label.trim().is_empty() {
        sqlx::query("DELETE FROM hierarchy_labels WHERE company_id = $1 AND level = $2")
            .bind(actor.company_id)
            .bind(dto.level as i16)
            .execute(db)
            .await?;
    } else {
        sqlx::query(
            "INSERT INTO hierarchy_labels (company_id, level, label)
             VALUES ($1, $2, $3)
             ON CONFLICT (company_id, level) DO UPDATE SET label = EXCLUDED.label",
        )
        .bind(actor.company_id)
        .bind(dto.level as i16)
        .bind(dto.label.trim())
        .execute(db)
        .await?;
    }

    Ok(())
}

/// The hierarchy legend: the two reserved levels plus every labeled custom
/// level, most senior first. Unlabeled levels are not offered and do not
/// appear.
#[instrument(skip(db))]
pub async fn legend(db: &PgPool, company_id: Uuid) -> Result<Vec<LegendEntry>, AppError> {
    let labels = fetch_labels(db, company_id).await?;

    let mut entries = vec![
        LegendEntry {
            level: COMPANY_ADMIN_LEVEL,
            key: "company".to_string(),
            label: COMPANY_ADMIN_LABEL.to_string(),
        },
        LegendEntry {
            level: SUBADMIN_LEVEL,
            key: "subadmin".to_string(),
            label: SUBADMIN_LABEL.to_string(),
        },
    ];
    entries.extend(labels.iter().map(|(level, label)| LegendEntry {
        level,
        key: format!("level_{}", level),
        label: label.to_string(),
    }));

    Ok(entries)
}
