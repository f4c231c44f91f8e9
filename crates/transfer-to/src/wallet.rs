use crate::coin::{Coin, Network};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: String,
    pub coin: Coin,
    pub network: Network,
    #[serde(default = "one")]
    pub m: u32,
    #[serde(default = "one")]
    pub n: u32,
    #[serde(default = "complete_by_default")]
    pub complete: bool,
    #[serde(default)]
    pub needs_backup: bool,
}

const fn one() -> u32 {
    1
}

const fn complete_by_default() -> bool {
    true
}

impl Wallet {
    /// True when `coin` and `network` match this wallet's.
    pub fn accepts(&self, coin: Coin, network: Network) -> bool {
        self.coin == coin && self.network == network
    }
}

/// Source of wallets, grouped by coin, plus their receive addresses.
#[async_trait]
pub trait WalletStore: Send + Sync {
    /// Wallets for `coin`, in the store's own order. Empty when there are none.
    fn wallets(&self, coin: Coin) -> Vec<Wallet>;

    /// Resolve a receive address for the wallet with `wallet_id`.
    ///
    /// An empty string means the wallet has no address to offer.
    async fn receive_address(&self, wallet_id: &str) -> eyre::Result<String>;
}

/// Display-only projection of a [`Wallet`] used as a transfer recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatWallet {
    pub wallet_id: String,
    pub color: String,
    pub name: String,
    pub coin: Coin,
    pub network: Network,
    pub m: u32,
    pub n: u32,
    pub is_complete: bool,
    pub needs_backup: bool,
}

impl From<&Wallet> for FlatWallet {
    fn from(w: &Wallet) -> Self {
        Self {
            wallet_id: w.id.clone(),
            color: w.color.clone(),
            name: w.name.clone(),
            coin: w.coin,
            network: w.network,
            m: w.m,
            n: w.n,
            is_complete: w.complete,
            needs_backup: w.needs_backup,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_defaults_fill_single_sig_complete_wallet() -> eyre::Result<()> {
        let w: Wallet = serde_json::from_str(
            r#"{"id":"w1","name":"Spending","coin":"btc","network":"livenet"}"#,
        )?;
        assert_eq!((w.m, w.n), (1, 1));
        assert!(w.complete, "wallet should default to complete");
        assert!(!w.needs_backup, "wallet should default to backed up");
        assert!(w.accepts(Coin::Btc, Network::Livenet), "same coin/network");
        assert!(!w.accepts(Coin::Btc, Network::Testnet), "other network");
        Ok(())
    }

    #[test]
    fn flattening_copies_display_fields() {
        let w = Wallet {
            id: "w2".to_owned(),
            name: "Shared".to_owned(),
            color: "#ff0000".to_owned(),
            coin: Coin::Bch,
            network: Network::Testnet,
            m: 2,
            n: 3,
            complete: false,
            needs_backup: true,
        };
        let flat = FlatWallet::from(&w);
        assert_eq!(flat.wallet_id, "w2");
        assert_eq!(flat.color, "#ff0000");
        assert_eq!((flat.m, flat.n), (2, 3));
        assert!(!flat.is_complete, "completeness should carry over");
        assert!(flat.needs_backup, "backup flag should carry over");
    }
}
