//! Recipient picker view model and fiat amount formatting for wallet front ends.
//!
//! [`aggregator::RecipientAggregator`] turns a wallet store and an address book into the
//! lists a "transfer to" screen renders: wallets and contacts eligible for the source
//! wallet, search matches, and a paginated contact slice. [`fiat::FiatAmountFormatter`]
//! renders fiat amounts in native coin units.

pub mod address_book;
pub mod aggregator;
pub mod coin;
pub mod config;
pub mod errors;
pub mod fiat;
pub mod navigation;
pub mod paths;
pub mod profile;
pub mod recipient;
pub mod resolver;
pub mod store;
pub mod wallet;

pub use aggregator::{RecipientAggregator, RecipientView};
pub use coin::{Coin, Network};
pub use fiat::FiatAmountFormatter;
pub use recipient::Recipient;
