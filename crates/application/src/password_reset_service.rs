//! Password reset token issuance and fulfilment.
//!
//! Tokens are random v4 UUIDs stored on the user together with an expiry.
//! Fulfilling a token clears both, so each token is honoured once.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use pagewright_core::{AppError, AppResult, EntityId};
use pagewright_domain::User;

use crate::UserLookup;

/// Default lifetime of an issued reset token.
const DEFAULT_TOKEN_LIFETIME_HOURS: i64 = 24;

/// Reset token policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetPolicy {
    token_lifetime: Duration,
}

impl ResetPolicy {
    /// Creates a policy with the given token lifetime. The lifetime must be positive.
    pub fn new(token_lifetime: Duration) -> AppResult<Self> {
        if token_lifetime <= Duration::zero() {
            return Err(AppError::Validation(
                "reset token lifetime must be greater than zero".to_owned(),
            ));
        }

        Ok(Self { token_lifetime })
    }

    /// Returns the token lifetime.
    #[must_use]
    pub fn token_lifetime(&self) -> Duration {
        self.token_lifetime
    }
}

impl Default for ResetPolicy {
    fn default() -> Self {
        Self {
            token_lifetime: Duration::hours(DEFAULT_TOKEN_LIFETIME_HOURS),
        }
    }
}

/// Issued reset token, handed to whatever delivers the reset link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetTicket {
    /// User the token was issued to.
    pub user_id: EntityId,
    /// Address the reset link should be sent to.
    pub email: String,
    /// Token value.
    pub token: Uuid,
    /// Instant after which the token is no longer honoured.
    pub expires_at: DateTime<Utc>,
}

/// Application service owning reset token mutations.
#[derive(Clone)]
pub struct PasswordResetService {
    user_lookup: UserLookup,
    policy: ResetPolicy,
}

impl PasswordResetService {
    /// Creates a new password reset service.
    #[must_use]
    pub fn new(user_lookup: UserLookup, policy: ResetPolicy) -> Self {
        Self {
            user_lookup,
            policy,
        }
    }

    /// Issues a reset token for the locally stored user with `email`.
    ///
    /// Returns `Ok(None)` when no local user matches. Users known only to an
    /// external source are not stored here and cannot be reset. Any earlier
    /// token for the user is replaced.
    pub async fn request_reset(&self, email: &str) -> AppResult<Option<ResetTicket>> {
        let Some(mut user) = self.user_lookup.find_local_by_email(email).await? else {
            return Ok(None);
        };

        let token = Uuid::new_v4();
        let expires_at = self.user_lookup.clock().now() + self.policy.token_lifetime();
        user.issue_reset_token(token, expires_at);

        let ticket = ResetTicket {
            user_id: user.id,
            email: user.email.clone(),
            token,
            expires_at,
        };
        self.user_lookup.user_repository().update(user).await?;

        info!(
            user_id = %ticket.user_id,
            expires_at = %ticket.expires_at,
            "issued password reset token"
        );
        Ok(Some(ticket))
    }

    /// Consumes a reset token and returns the user it belonged to.
    ///
    /// Returns `Ok(None)` for unknown, expired or already used tokens.
    pub async fn complete_reset(&self, token: Uuid) -> AppResult<Option<User>> {
        let Some(mut user) = self.user_lookup.get_user_by_reset_guid(token).await? else {
            return Ok(None);
        };

        user.clear_reset_token();
        self.user_lookup
            .user_repository()
            .update(user.clone())
            .await?;

        info!(user_id = %user.id, "password reset token consumed");
        Ok(Some(user))
    }
}
