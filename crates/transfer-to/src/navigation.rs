use crate::{
    coin::{Coin, Network},
    recipient::{Recipient, RecipientKind},
};
use serde::Serialize;

/// Everything the amount view needs once a recipient has been picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmountRequest {
    pub recipient_type: RecipientKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
    pub to_address: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub coin: Coin,
    pub network: Network,
    pub use_as_modal: bool,
}

impl AmountRequest {
    pub fn for_recipient(
        recipient: &Recipient,
        to_address: String,
        amount: Option<u64>,
        use_as_modal: bool,
    ) -> Self {
        Self {
            recipient_type: recipient.kind(),
            amount,
            to_address,
            name: recipient.name().to_owned(),
            email: recipient.email().map(str::to_owned),
            color: recipient.color().map(str::to_owned),
            coin: recipient.coin(),
            network: recipient.network(),
            use_as_modal,
        }
    }
}

pub trait Navigator {
    fn push_amount(&mut self, request: AmountRequest);
}

pub trait ErrorPresenter {
    fn alert(&mut self, message: &str);
}

/// Outcome of picking a recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Navigated,
    /// The address resolved to nothing; the user was alerted.
    NoAddress,
    /// Address resolution failed; logged only.
    Failed,
}
