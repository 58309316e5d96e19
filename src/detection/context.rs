//! Per-user running state
//!
//! Tracks, for every user seen so far in a detection pass, the last
//! country, the time of the last login and the current streak of failed
//! attempts. State lives only for one pass and is never persisted.

use std::collections::HashMap;
use chrono::NaiveDateTime;

/// Running state for a single user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserState {
    /// Last observed country (absent until the first event)
    pub last_country: Option<String>,
    /// Time of the last processed event (absent until the first event)
    pub last_seen_at: Option<NaiveDateTime>,
    /// Immediately preceding consecutive failures
    pub consecutive_failures: u32,
}

/// Context holding the running state of every user in a pass
pub struct UserContext {
    users: HashMap<String, UserState>,
}

impl UserContext {
    pub fn new() -> Self {
        UserContext {
            users: HashMap::new(),
        }
    }

    /// Get the state for a user, creating an empty one on first sight
    pub fn state_mut(&mut self, user: &str) -> &mut UserState {
        if !self.users.contains_key(user) {
            log::debug!("First event for user '{}'", user);
        }
        self.users.entry(user.to_string()).or_default()
    }

    /// Get the state for a user, if any event for them was processed
    pub fn get_state(&self, user: &str) -> Option<&UserState> {
        self.users.get(user)
    }

    /// Number of distinct users tracked
    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

impl Default for UserContext {
    fn default() -> Self {
        Self::new()
    }
}
