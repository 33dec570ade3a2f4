use serde::{Deserialize, Serialize};

/// Identity attached to an authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    name: Option<String>,
}

impl Identity {
    /// Creates an identity carrying the given name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// Creates an identity without a name.
    #[must_use]
    pub fn anonymous() -> Self {
        Self { name: None }
    }

    /// Returns the identity name, conventionally the user's email.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Authenticated principal of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    identity: Option<Identity>,
}

impl Principal {
    /// Creates a principal with an optional identity.
    #[must_use]
    pub fn new(identity: Option<Identity>) -> Self {
        Self { identity }
    }

    /// Returns the identity attached to the principal, if any.
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }
}

/// Per-request view of who is signed in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestIdentity {
    principal: Option<Principal>,
}

impl RequestIdentity {
    /// Creates a request identity for an anonymous request.
    #[must_use]
    pub fn anonymous() -> Self {
        Self { principal: None }
    }

    /// Creates a request identity for a principal.
    #[must_use]
    pub fn for_principal(principal: Principal) -> Self {
        Self {
            principal: Some(principal),
        }
    }

    /// Convenience constructor for a principal whose identity carries `name`.
    #[must_use]
    pub fn signed_in(name: impl Into<String>) -> Self {
        Self::for_principal(Principal::new(Some(Identity::named(name))))
    }

    /// Returns the authenticated principal, if any.
    #[must_use]
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// Returns the non-blank identity name of the principal, if any.
    #[must_use]
    pub fn identity_name(&self) -> Option<&str> {
        self.principal()
            .and_then(Principal::identity)
            .and_then(Identity::name)
            .filter(|name| !name.trim().is_empty())
    }
}
