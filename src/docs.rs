use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{AuthenticatedUser, LoginRequest, LoginResponse};
use crate::modules::companies::model::{Company, RegisterCompanyDto, RegisterCompanyResponse};
use crate::modules::hierarchy::model::{LegendEntry, UpdateLabelDto};
use crate::modules::hierarchy::tree::{MemberNode, TeamForest, TeamMember};
use crate::modules::invitations::model::{InviteResponse, InviteTeamMemberDto};
use crate::modules::leads::model::{
    AssignLeadDto, CreateLeadDto, Lead, PaginatedLeadsResponse, UpdateLeadStatusDto,
};
use crate::modules::members::model::{ChangeManagerDto, MessageResponse};
use crate::modules::roles::model::{PromoteMemberDto, RoleAssignmentResponse};
use crate::modules::roles::policy::AssignableRole;
use crate::utils::pagination::PaginationMeta;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::get_profile,
        crate::modules::companies::controller::register_company,
        crate::modules::companies::controller::get_my_company,
        crate::modules::members::controller::get_team,
        crate::modules::members::controller::get_members,
        crate::modules::members::controller::change_manager,
        crate::modules::members::controller::delete_member,
        crate::modules::invitations::controller::invite_team_member,
        crate::modules::roles::controller::get_assignable_roles,
        crate::modules::roles::controller::promote_member,
        crate::modules::hierarchy::controller::get_legend,
        crate::modules::hierarchy::controller::update_label,
        crate::modules::leads::controller::create_lead,
        crate::modules::leads::controller::get_leads,
        crate::modules::leads::controller::assign_lead,
        crate::modules::leads::controller::update_lead_status,
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            AuthenticatedUser,
            ErrorResponse,
            Company,
            RegisterCompanyDto,
            RegisterCompanyResponse,
            TeamMember,
            MemberNode,
            TeamForest,
            ChangeManagerDto,
            MessageResponse,
            InviteTeamMemberDto,
            InviteResponse,
            PromoteMemberDto,
            RoleAssignmentResponse,
            AssignableRole,
            LegendEntry,
            UpdateLabelDto,
            Lead,
            CreateLeadDto,
            AssignLeadDto,
            UpdateLeadStatusDto,
            PaginatedLeadsResponse,
            PaginationMeta,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and session endpoints"),
        (name = "Companies", description = "Company registration and details"),
        (name = "Team", description = "Team hierarchy and membership"),
        (name = "Roles", description = "Role assignment and promotion"),
        (name = "Hierarchy", description = "Per-company hierarchy configuration"),
        (name = "Leads", description = "Lead capture and pipeline")
    ),
    info(
        title = "Dealdesk API",
        version = "0.1.0",
        description = "Multi-tenant sales CRM backend: team hierarchy, role management, invitations, and lead capture.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
