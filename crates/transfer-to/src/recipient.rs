use crate::{
    address_book::Contact,
    coin::{Coin, Network},
    wallet::{FlatWallet, Wallet, WalletStore},
};
use serde::Serialize;

/// Eligible when there is no source wallet, or coin and network both match it.
pub fn is_eligible(source: Option<&Wallet>, coin: Coin, network: Network) -> bool {
    source.is_none_or(|w| w.accepts(coin, network))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientKind {
    Wallet,
    Contact,
}

/// A transfer destination: one of the user's own wallets or an address-book contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "recipient_type", rename_all = "lowercase")]
pub enum Recipient {
    Wallet(FlatWallet),
    Contact(Contact),
}

impl Recipient {
    pub const fn kind(&self) -> RecipientKind {
        match self {
            Self::Wallet(_) => RecipientKind::Wallet,
            Self::Contact(_) => RecipientKind::Contact,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Wallet(w) => &w.name,
            Self::Contact(c) => &c.name,
        }
    }

    pub const fn coin(&self) -> Coin {
        match self {
            Self::Wallet(w) => w.coin,
            Self::Contact(c) => c.coin,
        }
    }

    pub const fn network(&self) -> Network {
        match self {
            Self::Wallet(w) => w.network,
            Self::Contact(c) => c.network,
        }
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            Self::Wallet(_) => None,
            Self::Contact(c) => c.email.as_deref(),
        }
    }

    pub fn color(&self) -> Option<&str> {
        match self {
            Self::Wallet(w) => Some(w.color.as_str()).filter(|s| !s.is_empty()),
            Self::Contact(_) => None,
        }
    }

    /// Resolve the address funds should be sent to.
    ///
    /// Contacts resolve to their own address; wallets ask the store.
    pub async fn address<S>(&self, store: &S) -> eyre::Result<String>
    where
        S: WalletStore + ?Sized,
    {
        match self {
            Self::Wallet(w) => store.receive_address(&w.wallet_id).await,
            Self::Contact(c) => Ok(c.address.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(coin: Coin, network: Network) -> Recipient {
        Recipient::Contact(Contact {
            name: "Bob".to_owned(),
            address: "addr-bob".to_owned(),
            coin,
            network,
            email: Some("bob@example.com".to_owned()),
        })
    }

    fn source(coin: Coin, network: Network) -> Wallet {
        Wallet {
            id: "src".to_owned(),
            name: "Source".to_owned(),
            color: String::new(),
            coin,
            network,
            m: 1,
            n: 1,
            complete: true,
            needs_backup: false,
        }
    }

    #[test]
    fn eligibility_requires_matching_coin_and_network() {
        let (coin, net) = (Coin::Btc, Network::Livenet);
        assert!(is_eligible(None, coin, net), "everything is eligible without a source");
        assert!(
            is_eligible(Some(&source(Coin::Btc, Network::Livenet)), coin, net),
            "same coin and network"
        );
        assert!(
            !is_eligible(Some(&source(Coin::Btc, Network::Testnet)), coin, net),
            "network mismatch"
        );
        assert!(
            !is_eligible(Some(&source(Coin::Bch, Network::Livenet)), coin, net),
            "coin mismatch"
        );
    }

    #[test]
    fn serializes_with_recipient_type_tag() -> eyre::Result<()> {
        let v = serde_json::to_value(contact(Coin::Eth, Network::Livenet))?;
        assert_eq!(
            v.get("recipient_type").and_then(serde_json::Value::as_str),
            Some("contact")
        );
        assert_eq!(v.get("coin").and_then(serde_json::Value::as_str), Some("eth"));
        Ok(())
    }

    #[test]
    fn contact_accessors() {
        let r = contact(Coin::Btc, Network::Livenet);
        assert_eq!(r.kind(), RecipientKind::Contact);
        assert_eq!(r.name(), "Bob");
        assert_eq!(r.email(), Some("bob@example.com"));
        assert_eq!(r.color(), None);
    }
}
