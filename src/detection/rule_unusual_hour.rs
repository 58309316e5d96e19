use chrono::Timelike;
use crate::models::{AnomalyReason, LoginEvent};

/// First hour of the unusual window (inclusive)
pub const UNUSUAL_HOUR_START: u32 = 2;
/// End of the unusual window (exclusive)
pub const UNUSUAL_HOUR_END: u32 = 4;

/// Check whether the login happened inside the unusual hour window
///
/// Uses the clock time carried by the event; no timezone conversion.
pub fn check_unusual_hour(event: &LoginEvent) -> Option<AnomalyReason> {
    let hour = event.timestamp.hour();
    if (UNUSUAL_HOUR_START..UNUSUAL_HOUR_END).contains(&hour) {
        Some(AnomalyReason::UnusualHour {
            time: event.timestamp.format("%H:%M:%S").to_string(),
        })
    } else {
        None
    }
}
