use thiserror::Error;

/// Why an amount typed by the operator was refused.
///
/// Callers only ever see "invalid amount"; the cause is kept for tests and logs.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountRejection {
    #[error("empty")]
    Empty,
    #[error("not a number")]
    NotANumber,
    #[error("not positive")]
    NotPositive,
    #[error("too many decimal places")]
    TooManyDecimals,
    #[error("too many digits")]
    TooLarge,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no shopper selected")]
    NoShopperSelected,
    #[error("invalid amount")]
    InvalidAmount(AmountRejection),
    #[error("card expired")]
    CardExpired,
}

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("gateway error: {0}")]
    Gateway(String),
    #[error("not found: {0}")]
    NotFound(String),
}

impl From<reqwest::Error> for PaymentError {
    fn from(err: reqwest::Error) -> Self {
        PaymentError::Gateway(err.to_string())
    }
}

impl PaymentError {
    pub fn unauthenticated() -> Self {
        PaymentError::Auth("not logged in".to_string())
    }
}

pub type Result<T> = std::result::Result<T, PaymentError>;
