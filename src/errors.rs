/// Domain-specific error types for the pricer.
/// Every variant is fatal to the operation that raised it:
/// - Construction rejects invalid parameters up front
/// - The binary logs and exits instead of falling back to defaults
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricerError {
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("division error: {0}")]
    Division(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("output error: {0}")]
    Output(String),
}

impl PricerError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        PricerError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for PricerError {
    fn from(e: serde_json::Error) -> Self {
        PricerError::Output(format!("json: {e}"))
    }
}

impl From<std::io::Error> for PricerError {
    fn from(e: std::io::Error) -> Self {
        PricerError::Output(e.to_string())
    }
}

pub type PricerResult<T> = Result<T, PricerError>;
