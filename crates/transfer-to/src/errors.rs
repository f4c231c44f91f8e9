use thiserror::Error;

/// Message shown to the user when a recipient resolves to an empty address.
pub const NO_ADDRESS_MESSAGE: &str = "Error - no address found";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PickerError {
    #[error("wallet not found: {0}")]
    WalletNotFound(String),

    #[error("unknown coin: {0}")]
    UnknownCoin(String),

    #[error("no recipient matches: {0}")]
    RecipientNotFound(String),

    #[error("no recipient was selected")]
    NothingSelected,
}
