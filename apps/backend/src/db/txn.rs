//! Request-scoped transaction provider.
//!
//! Every handler runs its storage operations through [`with_txn`], which
//! owns the whole transaction lifecycle: begin, run the closure against a
//! borrowed `&DatabaseTransaction`, then commit on success or roll back on
//! failure. Handlers never commit or roll back themselves, and a request
//! never holds more than one transaction.

use std::sync::Arc;

use actix_web::{HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use sea_orm::{DatabaseTransaction, TransactionTrait};

use super::{require_db, txn_policy};
use crate::error::AppError;
use crate::state::app_state::AppState;

/// A pre-opened transaction injected into request extensions.
///
/// Tests use this to run a whole request against a transaction they
/// control; `with_txn` detects it and neither commits nor rolls back.
#[derive(Clone)]
pub struct SharedTxn(pub Arc<DatabaseTransaction>);

impl SharedTxn {
    pub fn transaction(&self) -> &DatabaseTransaction {
        &self.0
    }

    pub fn from_req(req: &HttpRequest) -> Option<Self> {
        req.extensions().get::<SharedTxn>().cloned()
    }
}

/// Run `f` inside a database transaction.
///
/// 1) A `SharedTxn` in request extensions is used as-is (no commit or
///    rollback here; the injector owns it).
/// 2) Otherwise begin a transaction on the pool, run `f`, and on `Ok`
///    apply the process policy (commit, or rollback under the test
///    policy); on `Err` roll back and surface the original error.
///
/// If the transaction cannot be opened the error propagates before `f`
/// ever runs, so no storage operation observes a half-open request.
pub async fn with_txn<R, F>(
    req: Option<&HttpRequest>,
    state: &AppState,
    f: F,
) -> Result<R, AppError>
where
    F: for<'a> FnOnce(&'a DatabaseTransaction) -> LocalBoxFuture<'a, Result<R, AppError>>,
{
    // Take any SharedTxn out of extensions *before* awaiting so no RefCell
    // borrow is held across a suspension point.
    let shared_txn: Option<SharedTxn> = req.and_then(SharedTxn::from_req);

    if let Some(shared) = shared_txn {
        return f(shared.transaction()).await;
    }

    let txn = require_db(state)?.begin().await?;
    let out = f(&txn).await;

    match out {
        Ok(val) => match txn_policy::current() {
            txn_policy::TxnPolicy::CommitOnOk => {
                txn.commit().await?;
                Ok(val)
            }
            txn_policy::TxnPolicy::RollbackOnOk => {
                txn.rollback().await?;
                Ok(val)
            }
        },
        Err(err) => {
            // Best-effort rollback; the handler's error wins.
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}
