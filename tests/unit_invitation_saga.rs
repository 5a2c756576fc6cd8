//! Invitation workflow tests, driven through in-memory stores with failure
//! injection. The workflow must reject before mutating on policy errors and
//! compensate by deleting the identity when a later step fails.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use axum::http::StatusCode;
use uuid::Uuid;

use dealdesk::modules::invitations::model::InviteTeamMemberDto;
use dealdesk::modules::invitations::saga::{
    self, CompanyRef, DirectoryStore, IdentityService, MemberProfile,
};
use dealdesk::modules::roles::catalog::{Role, level_of};
use dealdesk::utils::errors::AppError;

struct FakeIdentityService {
    next_id: Uuid,
    fail_create: bool,
    created: Mutex<Vec<Uuid>>,
    deleted: Mutex<Vec<Uuid>>,
}

impl FakeIdentityService {
    fn new() -> Self {
        Self {
            next_id: Uuid::new_v4(),
            fail_create: false,
            created: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl IdentityService for FakeIdentityService {
    async fn create_identity(&self, _email: &str, _password: &str) -> Result<Uuid, AppError> {
        if self.fail_create {
            return Err(AppError::bad_request("A user with this email already exists"));
        }
        self.created.lock().unwrap().push(self.next_id);
        Ok(self.next_id)
    }

    async fn delete_identity(&self, user_id: Uuid) -> Result<(), AppError> {
        // Idempotent by contract: no existence check.
        self.deleted.lock().unwrap().push(user_id);
        Ok(())
    }
}

#[derive(Default)]
struct FakeDirectoryStore {
    profiles: Mutex<HashMap<Uuid, MemberProfile>>,
    roles: Mutex<HashMap<Uuid, String>>,
    owned_companies: HashMap<Uuid, CompanyRef>,
    fail_upsert_for_new_members: bool,
    fail_replace_role: bool,
}

#[async_trait]
impl DirectoryStore for FakeDirectoryStore {
    async fn find_profile(&self, user_id: Uuid) -> Result<Option<MemberProfile>, AppError> {
        Ok(self.profiles.lock().unwrap().get(&user_id).cloned())
    }

    async fn find_owned_company(&self, owner_id: Uuid) -> Result<Option<CompanyRef>, AppError> {
        Ok(self.owned_companies.get(&owner_id).cloned())
    }

    async fn upsert_profile(
        &self,
        user_id: Uuid,
        company_id: Uuid,
        full_name: &str,
        manager_id: Option<Uuid>,
    ) -> Result<(), AppError> {
        if self.fail_upsert_for_new_members && manager_id.is_some() {
            return Err(AppError::internal_error("profile store unavailable"));
        }
        self.profiles.lock().unwrap().insert(
            user_id,
            MemberProfile {
                user_id,
                company_id,
                full_name: full_name.to_string(),
            },
        );
        Ok(())
    }

    async fn member_role_level(&self, user_id: Uuid) -> Result<Option<u8>, AppError> {
        Ok(self
            .roles
            .lock()
            .unwrap()
            .get(&user_id)
            .map(|role| level_of(role)))
    }

    async fn replace_role(
        &self,
        user_id: Uuid,
        role: &Role,
        _assigned_by: Uuid,
    ) -> Result<(), AppError> {
        if self.fail_replace_role {
            return Err(AppError::internal_error("role store unavailable"));
        }
        self.roles.lock().unwrap().insert(user_id, role.key());
        Ok(())
    }
}

fn requester_with_role(directory: &FakeDirectoryStore, role: &str) -> Uuid {
    let requester_id = Uuid::new_v4();
    let company_id = Uuid::new_v4();
    directory.profiles.lock().unwrap().insert(
        requester_id,
        MemberProfile {
            user_id: requester_id,
            company_id,
            full_name: "Requester".to_string(),
        },
    );
    directory
        .roles
        .lock()
        .unwrap()
        .insert(requester_id, role.to_string());
    requester_id
}

fn invite_dto(role: &str) -> InviteTeamMemberDto {
    InviteTeamMemberDto {
        email: "new.member@acme.test".to_string(),
        full_name: "New Member".to_string(),
        password: "secret1".to_string(),
        role: role.to_string(),
    }
}

#[tokio::test]
async fn test_policy_rejection_happens_before_identity_creation() {
    let identity = FakeIdentityService::new();
    let directory = FakeDirectoryStore::default();
    let requester_id = requester_with_role(&directory, "level_5");

    let err = saga::invite_member(&identity, &directory, requester_id, &invite_dto("level_3"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), StatusCode::FORBIDDEN);
    assert!(identity.created.lock().unwrap().is_empty());
    assert!(identity.deleted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_own_level_is_rejected() {
    let identity = FakeIdentityService::new();
    let directory = FakeDirectoryStore::default();
    let requester_id = requester_with_role(&directory, "level_5");

    let err = saga::invite_member(&identity, &directory, requester_id, &invite_dto("level_5"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), StatusCode::FORBIDDEN);
    assert!(identity.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unrecognized_role_rejected_without_mutation() {
    let identity = FakeIdentityService::new();
    let directory = FakeDirectoryStore::default();
    let requester_id = requester_with_role(&directory, "company");

    let err = saga::invite_member(&identity, &directory, requester_id, &invite_dto("level_25"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert!(identity.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_profile_failure_rolls_back_identity() {
    let identity = FakeIdentityService::new();
    let directory = FakeDirectoryStore {
        fail_upsert_for_new_members: true,
        ..Default::default()
    };
    let requester_id = requester_with_role(&directory, "company");

    let err = saga::invite_member(&identity, &directory, requester_id, &invite_dto("level_10"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let created = identity.created.lock().unwrap().clone();
    let deleted = identity.deleted.lock().unwrap().clone();
    assert_eq!(created.len(), 1);
    assert_eq!(deleted, created);

    // No role row may exist for the attempted id.
    assert!(!directory.roles.lock().unwrap().contains_key(&created[0]));
}

#[tokio::test]
async fn test_role_failure_rolls_back_identity() {
    let identity = FakeIdentityService::new();
    let directory = FakeDirectoryStore {
        fail_replace_role: true,
        ..Default::default()
    };
    let requester_id = requester_with_role(&directory, "company");

    let err = saga::invite_member(&identity, &directory, requester_id, &invite_dto("level_10"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let created = identity.created.lock().unwrap().clone();
    assert_eq!(identity.deleted.lock().unwrap().clone(), created);
}

#[tokio::test]
async fn test_duplicate_email_fails_with_nothing_to_roll_back() {
    let mut identity = FakeIdentityService::new();
    identity.fail_create = true;
    let directory = FakeDirectoryStore::default();
    let requester_id = requester_with_role(&directory, "company");

    let err = saga::invite_member(&identity, &directory, requester_id, &invite_dto("level_10"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert!(identity.deleted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_successful_invite_creates_exactly_one_role_row() {
    let identity = FakeIdentityService::new();
    let directory = FakeDirectoryStore::default();
    let requester_id = requester_with_role(&directory, "company");

    let outcome =
        saga::invite_member(&identity, &directory, requester_id, &invite_dto("level_10"))
            .await
            .unwrap();

    let roles = directory.roles.lock().unwrap();
    assert_eq!(roles.get(&outcome.user_id).map(String::as_str), Some("level_10"));

    let profiles = directory.profiles.lock().unwrap();
    let profile = profiles.get(&outcome.user_id).unwrap();
    assert_eq!(profile.full_name, "New Member");

    assert!(identity.deleted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_owner_without_profile_is_backfilled_and_can_invite() {
    let identity = FakeIdentityService::new();
    let mut directory = FakeDirectoryStore::default();

    let owner_id = Uuid::new_v4();
    let company_id = Uuid::new_v4();
    directory.owned_companies.insert(
        owner_id,
        CompanyRef {
            id: company_id,
            name: "Acme Realty".to_string(),
        },
    );
    directory
        .roles
        .lock()
        .unwrap()
        .insert(owner_id, "company".to_string());

    let outcome = saga::invite_member(&identity, &directory, owner_id, &invite_dto("subadmin"))
        .await
        .unwrap();

    // The owner's missing profile was synthesized from the ownership record.
    let profiles = directory.profiles.lock().unwrap();
    let owner_profile = profiles.get(&owner_id).unwrap();
    assert_eq!(owner_profile.company_id, company_id);

    // The invited member landed in the owner's company, managed by the owner.
    let invited = profiles.get(&outcome.user_id).unwrap();
    assert_eq!(invited.company_id, company_id);
}

#[tokio::test]
async fn test_requester_with_no_company_is_rejected() {
    let identity = FakeIdentityService::new();
    let directory = FakeDirectoryStore::default();

    let err = saga::invite_member(&identity, &directory, Uuid::new_v4(), &invite_dto("subadmin"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    assert!(identity.created.lock().unwrap().is_empty());
}
