//! API Routes
//!
//! HTTP endpoint definitions. Every operation answers `200` with the
//! `{success, errorCode}` status document; only malformed requests and
//! unknown accounts on lookup become HTTP errors.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::domain::{Account, OperationStatus};
use crate::error::{AppError, AppResult};
use crate::handlers::{
    CreateAccountCommand, CreateAccountHandler, TransferCommand, TransferHandler,
};
use crate::store::AccountStore;

// =========================================================================
// Request types
// =========================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    pub name: String,
    pub balance: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TransferRequest {
    pub from: String,
    pub to: String,
    pub value: i64,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<AccountStore> {
    Router::new()
        // Query-string endpoints
        .route("/createAccount", get(create_account_query))
        .route("/transfer", get(transfer_query))
        // JSON endpoints
        .route("/accounts", post(create_account_json))
        .route("/accounts/:name", get(get_account))
        .route("/transfers", post(transfer_json))
}

// =========================================================================
// Create account
// =========================================================================

/// GET /createAccount?name=..&balance=..
async fn create_account_query(
    State(store): State<AccountStore>,
    query: Result<Query<CreateAccountRequest>, QueryRejection>,
) -> AppResult<Json<OperationStatus>> {
    let Query(request) = query.map_err(|e| AppError::InvalidRequest(e.body_text()))?;
    Ok(Json(create_account(store, request)))
}

/// POST /accounts
async fn create_account_json(
    State(store): State<AccountStore>,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> AppResult<Json<OperationStatus>> {
    let Json(request) = payload.map_err(|e| AppError::InvalidRequest(e.body_text()))?;
    Ok(Json(create_account(store, request)))
}

fn create_account(store: AccountStore, request: CreateAccountRequest) -> OperationStatus {
    let handler = CreateAccountHandler::new(store);
    let result = handler.execute(CreateAccountCommand::new(request.name, request.balance));

    if let Err(e) = &result {
        tracing::debug!(error = %e, code = e.code().as_u16(), "Create account rejected");
    }

    OperationStatus::from(result)
}

// =========================================================================
// Transfer
// =========================================================================

/// GET /transfer?from=..&to=..&value=..
async fn transfer_query(
    State(store): State<AccountStore>,
    query: Result<Query<TransferRequest>, QueryRejection>,
) -> AppResult<Json<OperationStatus>> {
    let Query(request) = query.map_err(|e| AppError::InvalidRequest(e.body_text()))?;
    Ok(Json(transfer(store, request)))
}

/// POST /transfers
async fn transfer_json(
    State(store): State<AccountStore>,
    payload: Result<Json<TransferRequest>, JsonRejection>,
) -> AppResult<Json<OperationStatus>> {
    let Json(request) = payload.map_err(|e| AppError::InvalidRequest(e.body_text()))?;
    Ok(Json(transfer(store, request)))
}

fn transfer(store: AccountStore, request: TransferRequest) -> OperationStatus {
    let handler = TransferHandler::new(store);
    let result = handler.execute(TransferCommand::new(
        request.from,
        request.to,
        request.value,
    ));

    if let Err(e) = &result {
        tracing::debug!(error = %e, code = e.code().as_u16(), "Transfer rejected");
    }

    OperationStatus::from(result)
}

// =========================================================================
// GET /accounts/:name
// =========================================================================

/// Latest committed snapshot of one account
async fn get_account(
    State(store): State<AccountStore>,
    Path(name): Path<String>,
) -> AppResult<Json<Account>> {
    store
        .get(&name)
        .map(Json)
        .ok_or(AppError::AccountNotFound(name))
}
