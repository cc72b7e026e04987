//! API Routes
//!
//! HTTP endpoint definitions. Path segments and bodies are validated here,
//! then each handler makes exactly one call on the account service.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{Method, Uri},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::domain::Account;
use crate::error::{AppError, AppResult};
use crate::storage::SharedAccountService;

/// Width of the `first_name` / `last_name` columns
pub const MAX_NAME_LENGTH: usize = 50;

// =========================================================================
// Request types
// =========================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub first_name: String,
    pub last_name: String,
}

impl CreateAccountRequest {
    fn validate(&self) -> AppResult<()> {
        validate_name("firstName", &self.first_name)?;
        validate_name("lastName", &self.last_name)
    }
}

fn validate_name(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidRequest(format!("'{}' must not be empty", field)));
    }
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::InvalidRequest(format!(
            "'{}' must be at most {} characters",
            field, MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

fn parse_segment(raw: &str, message: &str) -> AppResult<i32> {
    raw.parse()
        .map_err(|_| AppError::InvalidRequest(message.to_string()))
}

// =========================================================================
// API Router
// =========================================================================

/// Create the account router
pub fn create_router() -> Router<SharedAccountService> {
    Router::new()
        .route(
            "/account",
            get(list_accounts).post(create_account).fallback(method_not_allowed),
        )
        .route(
            "/account/:id",
            get(get_account).delete(delete_account).fallback(method_not_allowed),
        )
        .route(
            "/account/:from/:to/:amount",
            get(transfer).fallback(method_not_allowed),
        )
}

/// JSON error for a known path hit with an unsupported method
async fn method_not_allowed(method: Method) -> AppError {
    AppError::MethodNotAllowed(method.to_string())
}

/// JSON error for any path no route matches
pub async fn route_not_found(uri: Uri) -> AppError {
    AppError::RouteNotFound(uri.path().to_string())
}

// =========================================================================
// GET /account
// =========================================================================

async fn list_accounts(State(service): State<SharedAccountService>) -> AppResult<Json<Vec<Account>>> {
    let accounts = service.list_accounts().await?;
    Ok(Json(accounts))
}

// =========================================================================
// POST /account
// =========================================================================

async fn create_account(
    State(service): State<SharedAccountService>,
    payload: Result<Json<CreateAccountRequest>, JsonRejection>,
) -> AppResult<Json<Account>> {
    let Json(request) = payload.map_err(|e| AppError::InvalidRequest(e.body_text()))?;
    request.validate()?;

    let account = service
        .create_account(&request.first_name, &request.last_name)
        .await?;

    tracing::info!("Account {} created", account.id);
    Ok(Json(account))
}

// =========================================================================
// GET /account/:id
// =========================================================================

async fn get_account(
    State(service): State<SharedAccountService>,
    Path(id): Path<String>,
) -> AppResult<Json<Account>> {
    let id = parse_segment(&id, "Invalid account ID format")?;

    let account = service
        .get_account_by_id(id)
        .await?
        .ok_or(AppError::AccountNotFound(id))?;

    Ok(Json(account))
}

// =========================================================================
// DELETE /account/:id
// =========================================================================

async fn delete_account(
    State(service): State<SharedAccountService>,
    Path(id): Path<String>,
) -> AppResult<Json<i32>> {
    let id = parse_segment(&id, "Invalid account ID format")?;

    service.delete_account(id).await?;

    tracing::info!("Account {} deleted", id);
    Ok(Json(id))
}

// =========================================================================
// GET /account/:from/:to/:amount
// =========================================================================

async fn transfer(
    State(service): State<SharedAccountService>,
    Path((from, to, amount)): Path<(String, String, String)>,
) -> AppResult<Json<String>> {
    let from = parse_segment(&from, "Invalid account ID format for 'from'")?;
    let to = parse_segment(&to, "Invalid account ID format for 'to'")?;
    let amount = parse_segment(&amount, "Invalid format for 'amount'")?;

    service.transfer(from, to, amount).await?;

    tracing::info!("Transferred {} from account {} to account {}", amount, from, to);
    Ok(Json(format!(
        "Successfully transferred {} from Account {} to Account {}",
        amount, from, to
    )))
}
