//! Error type shared by every stage of the NPV model

use thiserror::Error;

/// Errors raised while validating assumptions or building the projection
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NpvError {
    #[error("invalid input: {field} = {value} ({reason})")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error(
        "horizon mismatch: n_years = {n_years} but market penetration spans {penetration_years} years \
         (lead time {lead_time_years} + patent exclusivity {patent_exclusive_years} + post-patent {post_patent_years})"
    )]
    HorizonMismatch {
        n_years: u32,
        penetration_years: u32,
        lead_time_years: u32,
        patent_exclusive_years: u32,
        post_patent_years: u32,
    },

    #[error("development cost schedule spans {schedule_years} years but the horizon is only {n_years} years")]
    ScheduleExceedsHorizon { schedule_years: usize, n_years: usize },

    #[error("failed to parse assumptions: {0}")]
    Parse(String),
}

/// Result type for all model operations
pub type NpvResult<T> = Result<T, NpvError>;

impl From<serde_json::Error> for NpvError {
    fn from(e: serde_json::Error) -> Self {
        NpvError::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizon_mismatch_message_names_lengths() {
        let err = NpvError::HorizonMismatch {
            n_years: 30,
            penetration_years: 31,
            lead_time_years: 6,
            patent_exclusive_years: 20,
            post_patent_years: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains("n_years = 30"), "{}", msg);
        assert!(msg.contains("spans 31 years"), "{}", msg);
    }

    #[test]
    fn test_parse_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: NpvError = json_err.into();
        assert!(matches!(err, NpvError::Parse(_)));
    }
}
