//! `POST /token/check` and `POST /password/reset` against a mock database.

mod common;

use std::sync::{Arc, Mutex};

use actix_web::{test, web, App};
use jobboard_backend::auth::claims::TokenContext;
use jobboard_backend::auth::jwt::verify_token;
use jobboard_backend::auth::password::hash_password;
use jobboard_backend::entities::{candidates, employers};
use jobboard_backend::error::AppError;
use jobboard_backend::mail::{PasswordResetMail, ResetMailer};
use jobboard_backend::routes;
use jobboard_backend::state::app_state::AppState;
use sea_orm::{DatabaseBackend, MockDatabase};
use serde_json::{json, Value};
use time::OffsetDateTime;

use common::security;

/// Captures what the reset flow hands to the mail collaborator.
#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<PasswordResetMail>>,
}

impl ResetMailer for RecordingMailer {
    fn send_password_reset(&self, mail: PasswordResetMail) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(mail);
        Ok(())
    }
}

fn candidate_row(id: i64, email: &str, password: &str) -> candidates::Model {
    let now = OffsetDateTime::now_utc();
    candidates::Model {
        id,
        name: "Ada".to_string(),
        phone_number: "+1234567".to_string(),
        email: email.to_string(),
        password_hash: hash_password(password).expect("hash test password"),
        role: "candidate".to_string(),
        status_id: 1,
        created_at: now,
        updated_at: now,
    }
}

#[actix_web::test]
async fn valid_credentials_issue_a_token() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![candidate_row(5, "ada@example.com", "s3cret")]])
        .into_connection();
    let state = AppState::new(db, security());

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/token/check")
        .set_json(json!({ "email": "ada@example.com", "password": "s3cret" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "Ok!");
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["role"], "candidate");
}

#[actix_web::test]
async fn wrong_password_is_401() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![candidate_row(5, "ada@example.com", "s3cret")]])
        .into_connection();
    let state = AppState::new(db, security());

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/token/check")
        .set_json(json!({ "email": "ada@example.com", "password": "wrong" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["info"], "invalid email or password");
}

#[actix_web::test]
async fn unknown_email_is_401() {
    // Both lookups come back empty: candidates first, then employers.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<candidates::Model>::new()])
        .append_query_results([Vec::<employers::Model>::new()])
        .into_connection();
    let state = AppState::new(db, security());

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/token/check")
        .set_json(json!({ "email": "nobody@example.com", "password": "s3cret" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["info"], "invalid email or password");
}

#[actix_web::test]
async fn empty_credentials_are_rejected_before_storage() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let state = AppState::new(db, security());

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/token/check")
        .set_json(json!({ "email": "", "password": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["info"], "email and password are required");
}

#[actix_web::test]
async fn password_reset_replaces_the_stored_hash() {
    let row = candidate_row(5, "ada@example.com", "old-password");
    // find by email, re-fetch for the update, then the updated row.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row.clone()]])
        .append_query_results([vec![row.clone()]])
        .append_query_results([vec![row]])
        .into_connection();
    let state = AppState::new(db, security());

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/password/reset")
        .set_json(json!({ "email": "ada@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "Ok!");
}

#[actix_web::test]
async fn password_reset_hands_the_generated_password_to_the_mailer() {
    let row = candidate_row(5, "ada@example.com", "old-password");
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row.clone()]])
        .append_query_results([vec![row.clone()]])
        .append_query_results([vec![row]])
        .into_connection();
    let mailer = Arc::new(RecordingMailer::default());
    let state = AppState::new(db, security()).with_mailer(mailer.clone());

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/password/reset")
        .set_json(json!({ "email": "ada@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let mail = &sent[0];
    assert_eq!(mail.email, "ada@example.com");
    assert_eq!(mail.new_password.len(), 12);
    assert_ne!(mail.new_password, "old-password");

    // The accompanying token must verify in the reset context for this account.
    let claims = verify_token(&mail.reset_token, TokenContext::PasswordReset, &security())
        .expect("reset token verifies");
    assert_eq!(claims.sub, 5);
    assert_eq!(claims.email, "ada@example.com");
}

#[actix_web::test]
async fn password_reset_for_unknown_email_is_404() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<candidates::Model>::new()])
        .append_query_results([Vec::<employers::Model>::new()])
        .into_connection();
    let state = AppState::new(db, security());

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/password/reset")
        .set_json(json!({ "email": "nobody@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["info"], "no account with that email");
}
