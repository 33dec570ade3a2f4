//! Shared primitives for all Rust crates in Pagewright.

#![forbid(unsafe_code)]

/// Request identity primitives shared across services.
pub mod auth;

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::{Identity, Principal, RequestIdentity};

/// Result type used across Pagewright crates.
pub type AppResult<T> = Result<T, AppError>;

/// Durable integer identity of a persisted entity.
///
/// Identities are assigned by the repository when an entity is first added;
/// `EntityId::UNASSIGNED` marks an entity that has not been stored yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(i64);

impl EntityId {
    /// Identity carried by entities that have not been persisted.
    pub const UNASSIGNED: Self = Self(0);

    /// Creates an identity from a raw integer value.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying integer value.
    #[must_use]
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Returns whether a repository has assigned this identity.
    #[must_use]
    pub fn is_assigned(&self) -> bool {
        self.0 > 0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::UNASSIGNED
    }
}

impl Display for EntityId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// A persisted domain object with a durable unique identity.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Human-readable entity kind used in error messages and logs.
    const KIND: &'static str;

    /// Returns the entity identity.
    fn id(&self) -> EntityId;

    /// Replaces the entity identity. Only repositories call this.
    fn set_id(&mut self, id: EntityId);
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Write operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// User is not authenticated or not allowed to access a resource.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// User is authenticated but blocked by authorization policy.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}
