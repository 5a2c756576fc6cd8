pub mod auth;
pub mod companies;
pub mod hierarchy;
pub mod invitations;
pub mod leads;
pub mod members;
pub mod roles;
