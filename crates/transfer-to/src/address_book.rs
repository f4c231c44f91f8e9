use crate::coin::{Coin, Network};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// An address-book value. Older books store only a name; newer ones carry an email too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AddressBookEntry {
    Name(String),
    Detailed {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        email: Option<String>,
    },
}

impl AddressBookEntry {
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Detailed { name, .. } => name,
        }
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            Self::Name(_) => None,
            Self::Detailed { email, .. } => email.as_deref(),
        }
    }
}

#[async_trait]
pub trait AddressBookStore: Send + Sync {
    /// All entries keyed by address, in book order.
    async fn list(&self) -> eyre::Result<Vec<(String, AddressBookEntry)>>;
}

pub trait AddressResolver: Send + Sync {
    /// Classify an address, or `None` when it belongs to no known coin.
    fn coin_and_network(&self, address: &str) -> Option<(Coin, Network)>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub name: String,
    pub address: String,
    pub coin: Coin,
    pub network: Network,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Turn raw book entries into contacts sorted by name (case-insensitive, stable).
///
/// Entries whose address cannot be classified are dropped.
pub fn contacts_from_book<R>(entries: Vec<(String, AddressBookEntry)>, resolver: &R) -> Vec<Contact>
where
    R: AddressResolver + ?Sized,
{
    let mut contacts: Vec<Contact> = entries
        .into_iter()
        .filter_map(|(address, entry)| {
            let Some((coin, network)) = resolver.coin_and_network(&address) else {
                debug!(%address, "skipping address book entry with unknown coin");
                return None;
            };
            let email = entry.email().map(str::to_owned);
            let name = match entry {
                AddressBookEntry::Name(name) | AddressBookEntry::Detailed { name, .. } => name,
            };
            Some(Contact {
                name,
                address,
                coin,
                network,
                email,
            })
        })
        .collect();
    contacts.sort_by_cached_key(|c| c.name.to_lowercase());
    contacts
}
