//! Static external user directory.

use async_trait::async_trait;
use pagewright_application::ExternalUserSource;
use pagewright_core::AppResult;
use pagewright_domain::User;
use tracing::debug;

/// External user source answering from a fixed list of directory entries.
///
/// Stands in for a federated identity provider in development and tests.
#[derive(Debug, Clone)]
pub struct DirectoryUserSource {
    name: String,
    users: Vec<User>,
}

impl DirectoryUserSource {
    /// Creates a directory with the given entries.
    #[must_use]
    pub fn new(name: impl Into<String>, users: Vec<User>) -> Self {
        Self {
            name: name.into(),
            users,
        }
    }
}

#[async_trait]
impl ExternalUserSource for DirectoryUserSource {
    fn name(&self) -> &str {
        self.name.as_str()
    }

    async fn try_get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let found = self
            .users
            .iter()
            .find(|user| user.email_matches(email))
            .cloned();
        debug!(directory = %self.name, found = found.is_some(), "directory lookup");

        Ok(found)
    }
}
