//! Router-level tests for the request plumbing that runs before any
//! database access: authentication extraction, body validation, and the
//! `{"error": ...}` rejection shape. Backed by a lazy pool, so no Postgres
//! is required.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use dealdesk::router::init_router;

mod common;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_team_requires_authorization_header() {
    let app = init_router(common::test_app_state());

    let response = app
        .oneshot(Request::get("/api/team").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Missing authorization header");
}

#[tokio::test]
async fn test_invite_rejects_garbage_token() {
    let app = init_router(common::test_app_state());

    let response = app
        .oneshot(
            Request::post("/api/team/invite")
                .header(header::AUTHORIZATION, "Bearer not.a.token")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_invite_rejects_non_bearer_scheme() {
    let app = init_router(common::test_app_state());

    let response = app
        .oneshot(
            Request::post("/api/team/invite")
                .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invite_missing_field_rejected_before_any_side_effect() {
    let app = init_router(common::test_app_state());
    let token = common::make_token(Uuid::new_v4(), "company", Some(Uuid::new_v4()));

    let response = app
        .oneshot(
            Request::post("/api/team/invite")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"email":"a@b.test","password":"secret1","role":"subadmin"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "fullName is required");
}

#[tokio::test]
async fn test_invite_malformed_email_rejected() {
    let app = init_router(common::test_app_state());
    let token = common::make_token(Uuid::new_v4(), "company", Some(Uuid::new_v4()));

    let response = app
        .oneshot(
            Request::post("/api/team/invite")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"email":"nope","fullName":"A B","password":"secret1","role":"subadmin"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["error"], "A valid email address is required");
}

#[tokio::test]
async fn test_invite_short_password_rejected() {
    let app = init_router(common::test_app_state());
    let token = common::make_token(Uuid::new_v4(), "company", Some(Uuid::new_v4()));

    let response = app
        .oneshot(
            Request::post("/api/team/invite")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"email":"a@b.test","fullName":"A B","password":"nope","role":"subadmin"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_hierarchy_labels_gated_to_company_admin_sessions() {
    let app = init_router(common::test_app_state());
    let token = common::make_token(Uuid::new_v4(), "level_5", Some(Uuid::new_v4()));

    let response = app
        .oneshot(
            Request::put("/api/hierarchy/labels")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"level":5,"label":"Branch Manager"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Only a Company Admin can access this resource");
}

#[tokio::test]
async fn test_register_company_validates_body_without_auth() {
    let app = init_router(common::test_app_state());

    let response = app
        .oneshot(
            Request::post("/api/companies/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"companyName":"Acme","fullName":"Ada","email":"bad","password":"secret1"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = init_router(common::test_app_state());

    let response = app
        .oneshot(Request::get("/api/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
