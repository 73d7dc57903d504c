//! Access policy of the completion command.

use std::collections::HashSet;

/// Set of Discord user ids refused by the `ai` command.
///
/// Loaded from the `access.denied_users` configuration, so updating the list
/// only needs a restart.
#[derive(Debug, Default, Clone)]
pub struct AccessPolicy {
    denied_users: HashSet<String>,
}

impl AccessPolicy {
    pub fn new(denied_users: &[String]) -> Self {
        AccessPolicy {
            denied_users: denied_users.iter().cloned().collect(),
        }
    }

    /// Whether `user_id` may use the command.
    pub fn is_allowed(&self, user_id: &str) -> bool {
        !self.denied_users.contains(user_id)
    }
}
