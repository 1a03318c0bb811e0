//! Account service for registration and login
//!
//! # Performance
//!
//! - Password hashing/verification runs on the blocking thread pool
//! - Token service is passed by reference (pre-computed keys)
//! - Database queries use connection pooling

use crate::auth::{PasswordService, TokenService};
use crate::error::ApiError;
use crate::repositories::{AccountRecord, AccountRepository, NewAccount};
use provider_directory_shared::types::{AccountSummary, RegisterRequest};
use provider_directory_shared::validation;
use sqlx::PgPool;
use tracing::info;

/// Account service for authentication operations
pub struct AccountService;

impl AccountService {
    /// Register a new account
    ///
    /// Validation runs before any store access. The password is hashed on
    /// the blocking thread pool.
    pub async fn register(pool: &PgPool, req: &RegisterRequest) -> Result<AccountSummary, ApiError> {
        Self::validate_registration(req)?;

        // Check if email already exists
        if AccountRepository::email_exists(pool, &req.email)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }

        // Hash password on blocking thread pool (CPU-intensive)
        let password_hash = PasswordService::hash_async(req.password.clone())
            .await
            .map_err(ApiError::Internal)?;

        // The pre-check races with concurrent registrations; the unique
        // index on LOWER(email) is the authority, so its violation is still
        // a duplicate, not a server fault.
        let account = AccountRepository::create(
            pool,
            NewAccount {
                email: req.email.clone(),
                password_hash,
                first_name: req.first_name.clone(),
                last_name: req.last_name.clone(),
                phone: req.phone.clone(),
            },
        )
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Conflict("Email already registered".to_string())
            } else {
                ApiError::Internal(e)
            }
        })?;

        info!(account_id = %account.id, "Account registered");

        Ok(Self::summary(&account))
    }

    /// Login with email and password, returning the account and a signed
    /// session token
    ///
    /// Unknown email and wrong password produce the same response, so the
    /// login surface cannot be used to enumerate accounts.
    pub async fn login(
        pool: &PgPool,
        tokens: &TokenService,
        email: &str,
        password: &str,
    ) -> Result<(String, AccountSummary), ApiError> {
        let account = AccountRepository::find_by_email(pool, email)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

        // Verify password on blocking thread pool (CPU-intensive)
        let valid =
            PasswordService::verify_async(password.to_string(), account.password_hash.clone())
                .await
                .map_err(ApiError::Internal)?;

        if !valid {
            return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
        }

        let token = tokens
            .issue(account.id, &account.email)
            .map_err(ApiError::Internal)?;

        info!(account_id = %account.id, "Login successful");

        Ok((token, Self::summary(&account)))
    }

    fn validate_registration(req: &RegisterRequest) -> Result<(), ApiError> {
        validation::validate_required("First name", &req.first_name)
            .map_err(ApiError::Validation)?;
        validation::validate_required("Last name", &req.last_name).map_err(ApiError::Validation)?;
        validation::validate_phone(&req.phone).map_err(ApiError::Validation)?;

        validation::validate_email(&req.email).map_err(ApiError::Validation)?;
        validation::validate_password(&req.password).map_err(ApiError::Validation)?;

        if req.password != req.confirm_password {
            return Err(ApiError::Validation("Passwords do not match".to_string()));
        }
        Ok(())
    }

    fn summary(account: &AccountRecord) -> AccountSummary {
        AccountSummary {
            id: account.id.to_string(),
            email: account.email.clone(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
        }
    }
}

fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}
