use std::fmt;

/// Why a login event was flagged
#[derive(Debug, Clone, PartialEq)]
pub enum AnomalyReason {
    /// Streak of failed attempts at or above the threshold
    ConsecutiveFailures { count: u32 },
    /// The user logged in from a different country than last time
    NewCountry { country: String, previous: String },
    /// Country change faster than plausible travel
    ImpossibleTravel {
        from: String,
        to: String,
        elapsed_hours: f64,
    },
    /// Login inside the unusual hour window
    UnusualHour { time: String },
}

impl AnomalyReason {
    pub fn rule_name(&self) -> &'static str {
        match self {
            AnomalyReason::ConsecutiveFailures { .. } => "Consecutive Failed Logins",
            AnomalyReason::NewCountry { .. } => "New Country",
            AnomalyReason::ImpossibleTravel { .. } => "Impossible Travel",
            AnomalyReason::UnusualHour { .. } => "Unusual Login Hour",
        }
    }
}

impl fmt::Display for AnomalyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnomalyReason::ConsecutiveFailures { count } => {
                write!(f, "{} failed logins in a row", count)
            }
            AnomalyReason::NewCountry { country, previous } => {
                write!(f, "New country for this user: {} (previous: {})", country, previous)
            }
            AnomalyReason::ImpossibleTravel { from, to, elapsed_hours } => write!(
                f,
                "Possible impossible travel: {} -> {} in {:.2} hours",
                from, to, elapsed_hours
            ),
            AnomalyReason::UnusualHour { time } => write!(f, "Login at unusual hour: {}", time),
        }
    }
}
