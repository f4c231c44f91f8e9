use crate::{
    address_book::AddressResolver,
    coin::{Coin, Network},
};
use bitcoin::address::{Address, NetworkUnchecked};

/// Classifies addresses by coin and network from their encoding.
///
/// Bitcoin addresses go through the `bitcoin` parser; the rest are recognised by prefix and
/// payload shape. This is classification only, not full validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressClassifier;

fn classify_bitcoin(s: &str) -> Option<Network> {
    let addr = s.parse::<Address<NetworkUnchecked>>().ok()?;
    if addr.is_valid_for_network(bitcoin::Network::Bitcoin) {
        Some(Network::Livenet)
    } else if addr.is_valid_for_network(bitcoin::Network::Testnet)
        || addr.is_valid_for_network(bitcoin::Network::Regtest)
    {
        Some(Network::Testnet)
    } else {
        None
    }
}

fn classify_bitcoin_cash(s: &str) -> Option<Network> {
    let lower = s.to_ascii_lowercase();
    if lower.strip_prefix("bitcoincash:").is_some_and(|r| !r.is_empty()) {
        Some(Network::Livenet)
    } else if lower.strip_prefix("bchtest:").is_some_and(|r| !r.is_empty()) {
        Some(Network::Testnet)
    } else {
        None
    }
}

fn is_ethereum(s: &str) -> bool {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .is_some_and(|hex_part| hex_part.len() == 40 && hex::decode(hex_part).is_ok())
}

/// Base58 payload of a legacy version-byte + hash160 + checksum address.
fn is_base58_payload(s: &str, alphabet: &bs58::Alphabet) -> bool {
    bs58::decode(s)
        .with_alphabet(alphabet)
        .into_vec()
        .is_ok_and(|bytes| bytes.len() == 25)
}

fn classify_litecoin(s: &str) -> Option<Network> {
    let lower = s.to_ascii_lowercase();
    if lower.starts_with("ltc1") {
        Some(Network::Livenet)
    } else if lower.starts_with("tltc1") {
        Some(Network::Testnet)
    } else if (s.starts_with('L') || s.starts_with('M'))
        && is_base58_payload(s, bs58::Alphabet::BITCOIN)
    {
        Some(Network::Livenet)
    } else {
        None
    }
}

impl AddressResolver for AddressClassifier {
    fn coin_and_network(&self, address: &str) -> Option<(Coin, Network)> {
        let s = address.trim();
        if s.is_empty() {
            return None;
        }
        if let Some(net) = classify_bitcoin_cash(s) {
            return Some((Coin::Bch, net));
        }
        if is_ethereum(s) {
            return Some((Coin::Eth, Network::Livenet));
        }
        if let Some(net) = classify_bitcoin(s) {
            return Some((Coin::Btc, net));
        }
        if let Some(net) = classify_litecoin(s) {
            return Some((Coin::Ltc, net));
        }
        if s.starts_with('D') && is_base58_payload(s, bs58::Alphabet::BITCOIN) {
            return Some((Coin::Doge, Network::Livenet));
        }
        if s.starts_with('r') && is_base58_payload(s, bs58::Alphabet::RIPPLE) {
            return Some((Coin::Xrp, Network::Livenet));
        }
        None
    }
}
