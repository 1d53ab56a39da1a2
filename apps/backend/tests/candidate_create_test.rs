//! `POST /user` against a mock database: happy path and the duplicate
//! email conflict.

mod common;

use actix_web::{test, web, App};
use jobboard_backend::entities::candidates;
use jobboard_backend::routes;
use jobboard_backend::state::app_state::AppState;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, RuntimeErr};
use serde_json::{json, Value};
use time::OffsetDateTime;

use common::security;

fn candidate_row(id: i64, email: &str) -> candidates::Model {
    let now = OffsetDateTime::now_utc();
    candidates::Model {
        id,
        name: "Ada".to_string(),
        phone_number: "+1234567".to_string(),
        email: email.to_string(),
        password_hash: "$2b$12$not.a.real.hash".to_string(),
        role: "candidate".to_string(),
        status_id: 1,
        created_at: now,
        updated_at: now,
    }
}

#[actix_web::test]
async fn create_candidate_returns_token_and_profile() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![candidate_row(77, "ada@example.com")]])
        .into_connection();
    let state = AppState::new(db, security());

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/user")
        .set_json(json!({
            "name": "Ada",
            "phone_number": "+1234567",
            "email": "ada@example.com",
            "password": "s3cret",
            "status_id": 1
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "Ok!");
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["candidate"]["id"], 77);
    assert_eq!(body["candidate"]["email"], "ada@example.com");
    assert_eq!(body["candidate"]["role"], "candidate");
    // The password hash must never appear in a response.
    assert!(body["candidate"].get("password_hash").is_none());
}

#[actix_web::test]
async fn duplicate_email_is_a_409_conflict() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Query(RuntimeErr::Internal(
            "duplicate key value violates unique constraint \"candidates_email_key\""
                .to_string(),
        ))])
        .into_connection();
    let state = AppState::new(db, security());

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/user")
        .set_json(json!({
            "name": "Ada",
            "phone_number": "+1234567",
            "email": "ada@example.com",
            "password": "s3cret",
            "status_id": 1
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 409);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "Err");
    assert_eq!(body["info"], "create candidate");
    assert!(body["error"].as_str().unwrap().contains("duplicate key"));
}

#[actix_web::test]
async fn empty_required_fields_are_rejected_before_storage() {
    // No queued results: any storage call would fail the mock loudly.
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let state = AppState::new(db, security());

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/user")
        .set_json(json!({
            "name": "",
            "phone_number": "+1234567",
            "email": "ada@example.com",
            "password": "s3cret",
            "status_id": 1
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["info"], "name, email and password are required");
}
