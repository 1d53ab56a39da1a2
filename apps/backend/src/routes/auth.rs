//! Authentication endpoints: token issue and password reset.

use std::time::SystemTime;

use actix_web::{web, HttpRequest, HttpResponse};
use sea_orm::DatabaseTransaction;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::auth::jwt::{mint_access_token, mint_reset_token};
use crate::auth::password::{generate_password, hash_password, verify_password};
use crate::db::txn::with_txn;
use crate::domain::Role;
use crate::error::AppError;
use crate::extractors::parse_json;
use crate::mail::PasswordResetMail;
use crate::repos::{candidates, employers};
use crate::state::app_state::AppState;
use crate::web::envelope;

/// Length and classes for server-generated replacement passwords.
const RESET_PASSWORD_LEN: usize = 12;

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct PasswordResetRequest {
    email: String,
}

/// An account found by email in either table.
enum Account {
    Candidate(candidates::Candidate),
    Employer(employers::Employer),
}

impl Account {
    fn id(&self) -> i64 {
        match self {
            Account::Candidate(c) => c.id,
            Account::Employer(e) => e.id,
        }
    }

    fn role(&self) -> Role {
        match self {
            Account::Candidate(c) => c.role,
            Account::Employer(e) => e.role,
        }
    }

    fn email(&self) -> &str {
        match self {
            Account::Candidate(c) => &c.email,
            Account::Employer(e) => &e.email,
        }
    }

    fn password_hash(&self) -> &str {
        match self {
            Account::Candidate(c) => &c.password_hash,
            Account::Employer(e) => &e.password_hash,
        }
    }
}

/// Candidates are checked first, employers second; emails are unique
/// within each table but the two tables are independent namespaces.
async fn find_account(
    txn: &DatabaseTransaction,
    email: &str,
) -> Result<Option<Account>, AppError> {
    if let Some(candidate) = candidates::find_candidate_by_email(txn, email).await? {
        return Ok(Some(Account::Candidate(candidate)));
    }
    if let Some(employer) = employers::find_employer_by_email(txn, email).await? {
        return Ok(Some(Account::Employer(employer)));
    }
    Ok(None)
}

/// `POST /token/check` — exchange email+password for a fresh access token.
async fn check_credentials(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let login: LoginRequest = parse_json(&body)?;
    if login.email.trim().is_empty() || login.password.is_empty() {
        return Err(AppError::bad_request("email and password are required", None));
    }
    let LoginRequest { email, password } = login;

    let account = with_txn(Some(&req), &state, |txn| Box::pin(async move {
        find_account(txn, &email).await
    }))
    .await?
    .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&password, account.password_hash())? {
        return Err(AppError::invalid_credentials());
    }

    let token = mint_access_token(
        account.id(),
        account.email(),
        account.role(),
        SystemTime::now(),
        &state.security,
    )?;

    Ok(envelope::ok(json!({ "token": token, "role": account.role() })))
}

/// `POST /password/reset` — replace the account password with a freshly
/// generated one and hand it to the mail collaborator.
///
/// This endpoint owns generation and storage only; delivery is the mail
/// collaborator's problem and is reported, not retried.
async fn reset_password(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let reset: PasswordResetRequest = parse_json(&body)?;
    if reset.email.trim().is_empty() {
        return Err(AppError::bad_request("email is required", None));
    }

    let new_password = generate_password(RESET_PASSWORD_LEN, true, true, false);
    let new_hash = hash_password(&new_password)?;

    let security = state.security.clone();
    let account = with_txn(Some(&req), &state, |txn| Box::pin(async move {
        let account = find_account(txn, &reset.email)
            .await?
            .ok_or_else(|| AppError::not_found("no account with that email"))?;

        match &account {
            Account::Candidate(c) => {
                candidates::update_candidate_password(txn, c.id, &new_hash).await?
            }
            Account::Employer(e) => {
                employers::update_employer_password(txn, e.id, &new_hash).await?
            }
        }
        Ok(account)
    }))
    .await?;

    // Short-lived reset token accompanies the generated password in the
    // message so the client can prove the reset came from this flow.
    let reset_token = mint_reset_token(
        account.id(),
        account.email(),
        account.role(),
        SystemTime::now(),
        &security,
    )?;

    state
        .mailer
        .send_password_reset(PasswordResetMail {
            email: account.email().to_string(),
            new_password,
            reset_token,
        })
        .map_err(|e| {
            warn!(account_id = account.id(), error = %e, "password reset message failed");
            AppError::internal("failed to dispatch reset message")
        })?;

    Ok(envelope::ok_empty())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/token/check", web::post().to(check_credentials))
        .route("/password/reset", web::post().to(reset_password));
}
