use thiserror::Error;

/// Failures surfaced by the loan application handlers.
///
/// Every variant is terminal for the call that produced it; nothing in this
/// crate retries. The host decides whether to resubmit the whole transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChaincodeError {
    #[error("{0}")]
    InvalidArguments(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Loan application {0} not found")]
    NotFound(String),

    #[error("{username} with role {role} does not have access to {action}")]
    AccessDenied {
        username: String,
        role: String,
        action: &'static str,
    },

    #[error("Couldn't get attribute {attribute}. Error: {reason}")]
    Credential { attribute: String, reason: String },

    #[error("Could not decode loan application {key}: {reason}")]
    Decode { key: String, reason: String },

    #[error("Could not encode loan application {key}: {reason}")]
    Encode { key: String, reason: String },

    #[error("Could not emit event on channel {channel}: {reason}")]
    Event { channel: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ChaincodeError>;
