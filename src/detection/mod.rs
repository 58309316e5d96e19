pub mod context;
pub mod detector;
pub mod rule_failed_logins;
pub mod rule_geo_velocity;
pub mod rule_unusual_hour;

pub use context::{UserContext, UserState};
pub use detector::{detect, AnomalyDetector};
pub use rule_failed_logins::{check_consecutive_failures, MAX_FAILED_ATTEMPTS};
pub use rule_geo_velocity::{check_country_change, IMPOSSIBLE_TRAVEL_HOURS};
pub use rule_unusual_hour::{check_unusual_hour, UNUSUAL_HOUR_END, UNUSUAL_HOUR_START};
