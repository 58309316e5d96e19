//! Consecutive failed login detection
//!
//! Counts the streak of failed attempts per user. Any non-failure result
//! (including unrecognized values) resets the streak.

use crate::detection::context::UserState;
use crate::models::{AnomalyReason, LoginEvent};

/// How many failed logins in a row before the streak is suspicious
pub const MAX_FAILED_ATTEMPTS: u32 = 3;

/// Advance the user's failure streak and report it once it reaches the threshold
///
/// Every further failure past the threshold is reported again with the
/// growing count.
pub fn check_consecutive_failures(state: &mut UserState, event: &LoginEvent) -> Option<AnomalyReason> {
    if event.login_result.is_failure() {
        state.consecutive_failures += 1;
    } else {
        state.consecutive_failures = 0;
    }

    if state.consecutive_failures >= MAX_FAILED_ATTEMPTS {
        Some(AnomalyReason::ConsecutiveFailures {
            count: state.consecutive_failures,
        })
    } else {
        None
    }
}
