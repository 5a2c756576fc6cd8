use sqlx::PgPool;
use uuid::Uuid;

use crate::modules::roles::catalog::Role;
use crate::utils::password::hash_password;

/// Bootstrap a company and its owner from the command line.
///
/// Creates the identity, the company (ownership record), and a Company Admin
/// role row. The owner's member profile is intentionally not created here:
/// the invitation workflow backfills it on first use, the same way it does
/// for owners that predate profile records.
pub async fn create_company_admin(
    db: &PgPool,
    company_name: &str,
    email: &str,
    password: &str,
) -> Result<Uuid, Box<dyn std::error::Error>> {
    let hashed_password =
        hash_password(password).map_err(|e| format!("Failed to hash password: {}", e.message()))?;

    let user: Option<(Uuid,)> = sqlx::query_as(
        "INSERT INTO users (email, password)
         VALUES ($1, $2)
         ON CONFLICT (email) DO NOTHING
         RETURNING id",
    )
    .bind(email)
    .bind(hashed_password)
    .fetch_optional(db)
    .await?;

    let Some((user_id,)) = user else {
        return Err("A user with this email already exists".into());
    };

    sqlx::query("INSERT INTO companies (name, owner_user_id) VALUES ($1, $2)")
        .bind(company_name)
        .bind(user_id)
        .execute(db)
        .await?;

    sqlx::query("INSERT INTO member_roles (user_id, role, assigned_by) VALUES ($1, $2, $1)")
        .bind(user_id)
        .bind(Role::CompanyAdmin.key())
        .execute(db)
        .await?;

    Ok(user_id)
}
