/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be within [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        min: f32,
        max: f32,
        value: f32,
    },

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("radius range is inverted: min {min} > max {max}")]
    InvertedRadius { min: f32, max: f32 },

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("invalid config JSON: {0}")]
    Parse(String),
}
