pub mod config;
pub mod detection;
pub mod input;
pub mod models;
pub mod output;

// Re-export commonly used types
pub use detection::{detect, AnomalyDetector, UserContext, UserState};
pub use input::{CsvLoginSource, InputError};
pub use models::{AnomalyReason, FlaggedEvent, LoginEvent, LoginResult};
pub use output::{OutputFormat, OutputHandler};
