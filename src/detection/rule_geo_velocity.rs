use crate::detection::context::UserState;
use crate::models::{AnomalyReason, LoginEvent};

/// Country changes faster than this many hours are treated as impossible travel
pub const IMPOSSIBLE_TRAVEL_HOURS: f64 = 4.0;

/// Check whether the user switched country, and whether they did so too quickly
///
/// The first event for a user only records a baseline. A country change
/// always yields a new-country reason and, if it happened less than
/// [`IMPOSSIBLE_TRAVEL_HOURS`] after the previous login, an impossible
/// travel reason as well.
pub fn check_country_change(state: &mut UserState, event: &LoginEvent) -> Vec<AnomalyReason> {
    let mut reasons = Vec::new();

    match state.last_country.as_deref() {
        None => {}
        Some(previous) if previous == event.country => {}
        Some(previous) => {
            reasons.push(AnomalyReason::NewCountry {
                country: event.country.clone(),
                previous: previous.to_string(),
            });

            if let Some(last_seen_at) = state.last_seen_at {
                let time_diff_hours = elapsed_hours(last_seen_at, event.timestamp);
                if time_diff_hours < IMPOSSIBLE_TRAVEL_HOURS {
                    reasons.push(AnomalyReason::ImpossibleTravel {
                        from: previous.to_string(),
                        to: event.country.clone(),
                        elapsed_hours: time_diff_hours,
                    });
                }
            }
        }
    }

    // Update the user's last known country and login time
    state.last_country = Some(event.country.clone());
    state.last_seen_at = Some(event.timestamp);

    reasons
}

fn elapsed_hours(from: chrono::NaiveDateTime, to: chrono::NaiveDateTime) -> f64 {
    (to - from).num_seconds() as f64 / 3600.0
}
