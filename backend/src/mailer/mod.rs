//! Out-of-band delivery of password-reset links
//!
//! The identity core's responsibility ends at producing a deliverable
//! reset URL; the actual transport (SMTP, SES, ...) is an external
//! collaborator behind the `ResetNotifier` trait.

use anyhow::Result;
use tracing::info;

/// Delivers a password-reset link to an account holder
pub trait ResetNotifier: Send + Sync {
    fn deliver_reset(&self, email: &str, reset_url: &str) -> Result<()>;
}

/// Notifier that records delivery through tracing
///
/// Used in development and tests; deployments swap in a real mail
/// transport at AppState construction.
pub struct LogNotifier;

impl ResetNotifier for LogNotifier {
    fn deliver_reset(&self, email: &str, reset_url: &str) -> Result<()> {
        info!(email = %email, url = %reset_url, "Password reset link ready for delivery");
        Ok(())
    }
}

/// Build the reset URL embedded in the delivery
pub fn reset_url(public_url: &str, token: &str) -> String {
    format!("{}/reset-password/{}", public_url.trim_end_matches('/'), token)
}
