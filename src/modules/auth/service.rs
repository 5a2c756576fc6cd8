use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::metrics;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_access_token;
use crate::utils::password::verify_password;

use super::model::{AuthenticatedUser, LoginRequest, LoginResponse};

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserRecord {
            id: Uuid,
            email: String,
            password: String,
            full_name: Option<String>,
            company_id: Option<Uuid>,
            role: Option<String>,
        }

        let record = sqlx::query_as::<_, UserRecord>(
            "SELECT u.id, u.email, u.password, m.full_name, m.company_id, r.role
             FROM users u
             LEFT JOIN members m ON m.user_id = u.id
             LEFT JOIN member_roles r ON r.user_id = u.id
             WHERE u.email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| {
            metrics::track_login_failure("unknown_email");
            AppError::unauthorized("Invalid email or password")
        })?;

        let is_valid = verify_password(&dto.password, &record.password)?;
        if !is_valid {
            metrics::track_login_failure("bad_password");
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        // A user without a role row still gets a session; their level
        // degrades to unranked and the policy checks deny everything.
        let role = record.role.unwrap_or_else(|| "unranked".to_string());

        // Owners without a member profile (pre-backfill accounts) resolve
        // their company through the ownership record.
        let company_id = match record.company_id {
            Some(id) => Some(id),
            None => {
                sqlx::query_as::<_, (Uuid,)>("SELECT id FROM companies WHERE owner_user_id = $1")
                    .bind(record.id)
                    .fetch_optional(db)
                    .await?
                    .map(|(id,)| id)
            }
        };

        let access_token =
            create_access_token(record.id, &record.email, company_id, &role, jwt_config)?;
        metrics::track_login_success(&role);

        Ok(LoginResponse {
            access_token,
            user: AuthenticatedUser {
                id: record.id,
                email: record.email,
                full_name: record.full_name,
                company_id,
                role,
            },
        })
    }
}
