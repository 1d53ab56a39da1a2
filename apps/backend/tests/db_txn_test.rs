//! Transaction provider behavior outside the HTTP layer.

mod common;

use jobboard_backend::db::txn::with_txn;
use jobboard_backend::error::AppError;
use jobboard_backend::state::app_state::AppState;
use sea_orm::{DatabaseBackend, MockDatabase};

use common::security;

#[actix_web::test]
async fn with_txn_without_db_is_db_unavailable() {
    let state = AppState::without_db(security());

    let result = with_txn(None, &state, |_txn| Box::pin(async { Ok(()) })).await;

    assert!(matches!(result, Err(AppError::DbUnavailable)));
}

#[actix_web::test]
async fn with_txn_returns_the_closure_value_on_ok() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let state = AppState::new(db, security());

    let result = with_txn(None, &state, |_txn| Box::pin(async { Ok(5_i64) })).await;

    assert_eq!(result.unwrap(), 5);
}

#[actix_web::test]
async fn with_txn_surfaces_the_closure_error_unchanged() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let state = AppState::new(db, security());

    let result: Result<(), AppError> = with_txn(None, &state, |_txn| {
        Box::pin(async { Err(AppError::not_found("vacancy 7 not found")) })
    })
    .await;

    match result {
        Err(AppError::NotFound { info }) => assert_eq!(info, "vacancy 7 not found"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}
