//! User lookup ports and application service.
//!
//! Resolves users by email, by password reset token, and by the identity of
//! the signed-in principal. Lookups never mutate stored users; a miss is an
//! `Ok(None)`, never an error.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use pagewright_core::{AppResult, RequestIdentity};
use pagewright_domain::User;

use crate::{Clock, Repository};

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Pluggable identity provider consulted when no local user matches.
#[async_trait]
pub trait ExternalUserSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Finds a user by email, if this source knows one.
    async fn try_get_by_email(&self, email: &str) -> AppResult<Option<User>>;
}

/// Narrow view of the current request's authenticated principal.
pub trait IdentityAccessor: Send + Sync {
    /// Returns the identity name of the signed-in principal, if any.
    fn identity_name(&self) -> Option<String>;
}

impl IdentityAccessor for RequestIdentity {
    fn identity_name(&self) -> Option<String> {
        RequestIdentity::identity_name(self).map(str::to_owned)
    }
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Application service resolving users from identity inputs.
#[derive(Clone)]
pub struct UserLookup {
    user_repository: Arc<dyn Repository<User>>,
    external_sources: Vec<Arc<dyn ExternalUserSource>>,
    clock: Arc<dyn Clock>,
}

impl UserLookup {
    /// Creates a new user lookup.
    ///
    /// External sources are consulted in the order given.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn Repository<User>>,
        external_sources: Vec<Arc<dyn ExternalUserSource>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repository,
            external_sources,
            clock,
        }
    }

    /// Returns the user whose email matches `email` ignoring case.
    ///
    /// Local users win; otherwise the first external source that knows the
    /// address answers.
    pub async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        if let Some(user) = self.find_local_by_email(email).await? {
            return Ok(Some(user));
        }

        for source in &self.external_sources {
            if let Some(user) = source.try_get_by_email(email).await? {
                debug!(source = source.name(), "resolved user from external source");
                return Ok(Some(user));
            }
        }

        Ok(None)
    }

    /// Returns the stored user whose email matches `email` ignoring case,
    /// without consulting external sources.
    pub async fn find_local_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let matches_email = |user: &User| user.email_matches(email);
        self.user_repository.find_first(&matches_email).await
    }

    /// Returns the user holding the reset token `guid`, if it has not expired.
    ///
    /// The nil guid is rejected without touching storage. Wrong and expired
    /// tokens are indistinguishable to the caller.
    pub async fn get_user_by_reset_guid(&self, guid: Uuid) -> AppResult<Option<User>> {
        if guid.is_nil() {
            return Ok(None);
        }

        let holds_guid = |user: &User| user.reset_password_guid == Some(guid);
        let Some(user) = self.user_repository.find_first(&holds_guid).await? else {
            return Ok(None);
        };

        let now = self.clock.now();
        if !user.has_valid_reset_token(guid, now) {
            debug!(user_id = %user.id, "reset token matched but is expired");
            return Ok(None);
        }

        Ok(Some(user))
    }

    /// Returns the user signed in on the current request.
    pub async fn get_current_user(
        &self,
        identity_accessor: &dyn IdentityAccessor,
    ) -> AppResult<Option<User>> {
        let Some(identity_name) = identity_accessor
            .identity_name()
            .filter(|name| !name.trim().is_empty())
        else {
            return Ok(None);
        };

        self.get_user_by_email(&identity_name).await
    }

    /// Returns the user repository for use by other services.
    #[must_use]
    pub fn user_repository(&self) -> &Arc<dyn Repository<User>> {
        &self.user_repository
    }

    /// Returns the clock for use by other services.
    #[must_use]
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }
}
