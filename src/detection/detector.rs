//! Anomaly detection pass over a login history
//!
//! Events are put in timestamp order, then run one by one through the
//! failed-login, country-change and unusual-hour rules. Each rule reads the
//! user's state as left by that user's earlier events and advances it
//! before the next event is looked at.

use crate::detection::context::UserContext;
use crate::detection::rule_failed_logins::check_consecutive_failures;
use crate::detection::rule_geo_velocity::check_country_change;
use crate::detection::rule_unusual_hour::check_unusual_hour;
use crate::models::{FlaggedEvent, LoginEvent};

/// Stateful detector for a single pass over chronologically ordered events
pub struct AnomalyDetector {
    context: UserContext,
}

impl AnomalyDetector {
    pub fn new() -> Self {
        AnomalyDetector {
            context: UserContext::new(),
        }
    }

    /// Run every rule against one event and advance the user's state
    ///
    /// Events must be fed in timestamp order. Returns the flagged event when
    /// at least one rule fired.
    pub fn process_event(&mut self, event: &LoginEvent) -> Option<FlaggedEvent> {
        let state = self.context.state_mut(&event.user_id);
        let mut reasons = Vec::new();

        reasons.extend(check_consecutive_failures(state, event));
        reasons.extend(check_country_change(state, event));
        reasons.extend(check_unusual_hour(event));

        if reasons.is_empty() {
            return None;
        }

        for reason in &reasons {
            log::warn!(
                "ANOMALY DETECTED: [{}] {} - Login: {}, User: {}",
                reason.rule_name(),
                reason,
                event.login_id,
                event.user_id
            );
        }

        Some(FlaggedEvent::from_event(
            event,
            reasons.iter().map(ToString::to_string).collect(),
        ))
    }

    /// Running state accumulated so far
    pub fn context(&self) -> &UserContext {
        &self.context
    }
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Flag suspicious events in a login history
///
/// Input order does not matter: events are stable-sorted by timestamp, so
/// events sharing a timestamp keep their relative input order. Output is in
/// that same chronological order. State starts empty on every call.
pub fn detect(events: &[LoginEvent]) -> Vec<FlaggedEvent> {
    let mut ordered: Vec<&LoginEvent> = events.iter().collect();
    ordered.sort_by_key(|event| event.timestamp);

    let mut detector = AnomalyDetector::new();
    let flagged: Vec<FlaggedEvent> = ordered
        .into_iter()
        .filter_map(|event| detector.process_event(event))
        .collect();

    log::info!(
        "Flagged {} of {} event(s) across {} user(s)",
        flagged.len(),
        events.len(),
        detector.context().user_count()
    );

    flagged
}
