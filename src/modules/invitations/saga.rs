//! The invitation workflow.
//!
//! Creating a member spans three resources (an identity, a profile, and a
//! role row) and the stores expose no transaction across them. The workflow
//! runs them as explicit forward steps; identity creation is the point of no
//! return, and every later failure issues a compensating delete of the
//! identity before the error is surfaced, so the caller-visible state is
//! always "nothing happened". The compensating delete must be idempotent.
//!
//! The requester's identity comes from the authenticated session, never from
//! the request payload, and their level is re-resolved here even though the
//! client already filters assignable roles: the client check is a
//! convenience mirror, this one is the trust boundary.

use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::roles::catalog::{Role, UNRANKED_LEVEL};
use crate::modules::roles::policy;
use crate::utils::errors::AppError;

use super::model::InviteTeamMemberDto;

#[derive(Debug, Clone)]
pub struct MemberProfile {
    pub user_id: Uuid,
    pub company_id: Uuid,
    pub full_name: String,
}

#[derive(Debug, Clone)]
pub struct CompanyRef {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteOutcome {
    pub user_id: Uuid,
}

/// Account store: creates and deletes login identities.
#[async_trait]
pub trait IdentityService {
    async fn create_identity(&self, email: &str, password: &str) -> Result<Uuid, AppError>;

    /// Compensating action; deleting an identity that no longer exists must
    /// succeed.
    async fn delete_identity(&self, user_id: Uuid) -> Result<(), AppError>;
}

/// Profile and role store for one company directory.
#[async_trait]
pub trait DirectoryStore {
    async fn find_profile(&self, user_id: Uuid) -> Result<Option<MemberProfile>, AppError>;

    /// The company-ownership record, used to synthesize a profile for an
    /// owner that predates profile backfill.
    async fn find_owned_company(&self, owner_id: Uuid) -> Result<Option<CompanyRef>, AppError>;

    async fn upsert_profile(
        &self,
        user_id: Uuid,
        company_id: Uuid,
        full_name: &str,
        manager_id: Option<Uuid>,
    ) -> Result<(), AppError>;

    async fn member_role_level(&self, user_id: Uuid) -> Result<Option<u8>, AppError>;

    /// Clear any existing role rows for the user, then insert exactly one.
    async fn replace_role(
        &self,
        user_id: Uuid,
        role: &Role,
        assigned_by: Uuid,
    ) -> Result<(), AppError>;
}

/// Run the invitation workflow for an authenticated requester.
///
/// Ordering guarantees: the role is parsed and the policy check passes
/// before any mutation is attempted (other than backfilling the requester's
/// own missing profile); the identity is created before the profile and the
/// role row; and a failure in either later step deletes the identity before
/// the error is returned.
pub async fn invite_member<I, D>(
    identity: &I,
    directory: &D,
    requester_id: Uuid,
    invite: &InviteTeamMemberDto,
) -> Result<InviteOutcome, AppError>
where
    I: IdentityService + Sync,
    D: DirectoryStore + Sync,
{
    let role = Role::parse(&invite.role)
        .ok_or_else(|| AppError::bad_request(format!("Unrecognized role: {}", invite.role)))?;

    // Resolve the requester's company. A Company Admin whose profile was
    // never backfilled must not be blocked: synthesize one from the
    // company-ownership record.
    let requester = match directory.find_profile(requester_id).await? {
        Some(profile) => profile,
        None => {
            let company = directory
                .find_owned_company(requester_id)
                .await?
                .ok_or_else(|| {
                    AppError::unauthorized("Your account is not associated with a company")
                })?;
            let full_name = format!("{} Admin", company.name);
            tracing::info!(user_id = %requester_id, company_id = %company.id, "backfilling missing profile for company owner");
            directory
                .upsert_profile(requester_id, company.id, &full_name, None)
                .await?;
            MemberProfile {
                user_id: requester_id,
                company_id: company.id,
                full_name,
            }
        }
    };

    let requester_level = directory
        .member_role_level(requester_id)
        .await?
        .unwrap_or(UNRANKED_LEVEL);
    if !policy::can_assign(requester_level, role.level()) {
        return Err(AppError::forbidden(
            "You can only assign roles below your level",
        ));
    }

    // Point of no return.
    let new_user_id = identity
        .create_identity(&invite.email, &invite.password)
        .await?;

    if let Err(err) = directory
        .upsert_profile(
            new_user_id,
            requester.company_id,
            &invite.full_name,
            Some(requester_id),
        )
        .await
    {
        roll_back_identity(identity, new_user_id).await;
        return Err(err);
    }

    if let Err(err) = directory
        .replace_role(new_user_id, &role, requester_id)
        .await
    {
        roll_back_identity(identity, new_user_id).await;
        return Err(err);
    }

    Ok(InviteOutcome {
        user_id: new_user_id,
    })
}

async fn roll_back_identity<I>(identity: &I, user_id: Uuid)
where
    I: IdentityService + Sync,
{
    if let Err(err) = identity.delete_identity(user_id).await {
        // Nothing left to compensate with; the orphaned identity needs
        // operator attention.
        tracing::error!(
            user_id = %user_id,
            error = %err.message(),
            "failed to roll back identity after partial invitation failure"
        );
    }
}
