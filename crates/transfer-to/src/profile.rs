//! JSON-file backed wallet and address-book stores for the host shell.

use crate::{
    address_book::{AddressBookEntry, AddressBookStore},
    coin::Coin,
    errors::PickerError,
    wallet::{Wallet, WalletStore},
};
use async_trait::async_trait;
use eyre::Context as _;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileWallet {
    #[serde(flatten)]
    pub wallet: Wallet,
    /// Cached receive address. Missing means the wallet cannot offer one yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receive_address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileFile {
    pub wallets: Vec<ProfileWallet>,
    /// `[address, entry]` pairs in book order.
    pub address_book: Vec<(String, AddressBookEntry)>,
}

impl ProfileFile {
    /// Load a profile; a missing file is an empty profile.
    pub fn load(path: &Path) -> eyre::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read profile {}", path.display()))?;
        serde_json::from_str(&s).with_context(|| format!("parse profile {}", path.display()))
    }

    pub fn find_wallet(&self, name_or_id: &str) -> Option<&Wallet> {
        let needle = name_or_id.trim();
        self.wallets
            .iter()
            .map(|w| &w.wallet)
            .find(|w| w.id == needle || w.name == needle)
    }
}

#[async_trait]
impl WalletStore for ProfileFile {
    fn wallets(&self, coin: Coin) -> Vec<Wallet> {
        self.wallets
            .iter()
            .filter(|w| w.wallet.coin == coin)
            .map(|w| w.wallet.clone())
            .collect()
    }

    async fn receive_address(&self, wallet_id: &str) -> eyre::Result<String> {
        let w = self
            .wallets
            .iter()
            .find(|w| w.wallet.id == wallet_id)
            .ok_or_else(|| PickerError::WalletNotFound(wallet_id.to_owned()))?;
        Ok(w.receive_address.clone().unwrap_or_default())
    }
}

#[async_trait]
impl AddressBookStore for ProfileFile {
    async fn list(&self) -> eyre::Result<Vec<(String, AddressBookEntry)>> {
        Ok(self.address_book.clone())
    }
}
