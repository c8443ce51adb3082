use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error("Other: {0}")]
    Other(String),
}

/// Reasons a swap cannot be submitted. Shown inline, never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Enter an amount")]
    MissingAmount,

    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    #[error("Amount is too large")]
    AmountTooLarge,

    #[error("Source and target tokens must differ")]
    SameToken,

    #[error("No exchange rate available")]
    NoExchangeRate,
}

/// Rejected form interactions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Invalid amount input: {0:?}")]
    InvalidAmountInput(String),

    #[error("No token picker is open")]
    PickerClosed,

    #[error("Unknown token: {0}")]
    UnknownToken(String),

    #[error("Token {0} is already selected on the other side")]
    TokenDisabled(String),

    #[error("A swap is already in progress")]
    Busy,
}
