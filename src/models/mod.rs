pub mod event;
pub mod reason;

pub use event::{parse_timestamp, EventError, FlaggedEvent, LoginEvent, LoginResult, TIMESTAMP_FORMAT};
pub use reason::AnomalyReason;
