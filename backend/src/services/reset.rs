//! Password-reset flow
//!
//! A reset token is single-use and time-boxed. Consumption clears the
//! token in the same statement that stores the new password hash, so
//! there is no window where the old password is gone but the token still
//! works, or the reverse.

use crate::auth::{generate_reset_token, PasswordService};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::mailer::{self, ResetNotifier};
use crate::repositories::AccountRepository;
use chrono::{Duration, Utc};
use provider_directory_shared::validation;
use sqlx::PgPool;
use tracing::info;

/// Password-reset service
pub struct ResetService;

impl ResetService {
    /// Begin a reset flow for the given email
    ///
    /// Unknown email is reported as NotFound, which discloses account
    /// existence. A newer request supersedes any outstanding token.
    pub async fn request_reset(
        pool: &PgPool,
        notifier: &dyn ResetNotifier,
        config: &AppConfig,
        email: &str,
    ) -> Result<(), ApiError> {
        let account = AccountRepository::find_by_email(pool, email)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        let token = generate_reset_token();
        let expiry = Utc::now() + Duration::seconds(config.auth.reset_token_ttl_secs);

        AccountRepository::set_reset_token(pool, account.id, &token, expiry)
            .await
            .map_err(ApiError::Internal)?;

        let url = mailer::reset_url(&config.server.public_url, &token);
        notifier
            .deliver_reset(&account.email, &url)
            .map_err(ApiError::Internal)?;

        info!(account_id = %account.id, "Password reset requested");

        Ok(())
    }

    /// Consume a reset token and set a new password
    ///
    /// Outcomes: unknown token is NotFound; expired token is BadRequest
    /// and is left intact, so retrying it reports expired again and can
    /// never succeed. The update+clear is one conditional statement, so a
    /// token consumed once can never authenticate a second reset even
    /// under concurrent requests.
    pub async fn consume_reset(
        pool: &PgPool,
        token: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        validation::validate_password(new_password).map_err(ApiError::Validation)?;

        let account = AccountRepository::find_by_reset_token(pool, token)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Invalid or expired reset token".to_string()))?;

        match account.reset_token_expiration {
            Some(expiry) if Utc::now() < expiry => {}
            _ => {
                return Err(ApiError::BadRequest(
                    "Reset token has expired".to_string(),
                ));
            }
        }

        let new_hash = PasswordService::hash_async(new_password.to_string())
            .await
            .map_err(ApiError::Internal)?;

        // Conditional update: a concurrent consumer of the same token makes
        // this a no-op, which reports as an invalid token.
        let consumed = AccountRepository::consume_reset_token(pool, token, &new_hash)
            .await
            .map_err(ApiError::Internal)?;

        if !consumed {
            return Err(ApiError::NotFound(
                "Invalid or expired reset token".to_string(),
            ));
        }

        info!(account_id = %account.id, "Password reset completed");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    // Token generation is covered in auth::reset; the request/consume
    // round trips require a database and live in
    // backend/tests/auth_flow_test.rs.
}
