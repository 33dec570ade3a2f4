//! User domain type and reset token rules.

use chrono::{DateTime, Utc};
use pagewright_core::{Entity, EntityId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persisted user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Repository-assigned identity.
    #[serde(default)]
    pub id: EntityId,
    /// Email address. Compared case-insensitively.
    pub email: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Outstanding password reset token, if one was issued.
    #[serde(default)]
    pub reset_password_guid: Option<Uuid>,
    /// Instant after which the reset token is no longer honoured.
    #[serde(default)]
    pub reset_password_expiry: Option<DateTime<Utc>>,
}

impl User {
    /// Creates an unsaved user with no outstanding reset token.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: EntityId::UNASSIGNED,
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            reset_password_guid: None,
            reset_password_expiry: None,
        }
    }

    /// Returns `"first last"`, skipping whichever part is blank.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_owned()
    }

    /// Returns whether `candidate` is this user's email, ignoring case.
    ///
    /// This is an exact comparison: no trimming and no substring matching.
    #[must_use]
    pub fn email_matches(&self, candidate: &str) -> bool {
        self.email.to_lowercase() == candidate.to_lowercase()
    }

    /// Returns whether `guid` is this user's reset token and still honoured at `now`.
    ///
    /// The nil guid never matches. A matching guid with an absent expiry, or
    /// an expiry at or before `now`, is rejected.
    #[must_use]
    pub fn has_valid_reset_token(&self, guid: Uuid, now: DateTime<Utc>) -> bool {
        if guid.is_nil() || self.reset_password_guid != Some(guid) {
            return false;
        }

        self.reset_password_expiry
            .is_some_and(|expiry| expiry > now)
    }

    /// Stores a freshly issued reset token.
    pub fn issue_reset_token(&mut self, guid: Uuid, expires_at: DateTime<Utc>) {
        self.reset_password_guid = Some(guid);
        self.reset_password_expiry = Some(expires_at);
    }

    /// Removes any outstanding reset token.
    pub fn clear_reset_token(&mut self) {
        self.reset_password_guid = None;
        self.reset_password_expiry = None;
    }
}

impl Entity for User {
    const KIND: &'static str = "user";

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}
