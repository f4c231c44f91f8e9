//! View model for the "transfer to" screen.
//!
//! The aggregator owns every derived list the screen renders. Each user event maps to one
//! method that recomputes the affected lists from the stores.

use crate::{
    address_book::{contacts_from_book, AddressBookStore, AddressResolver, Contact},
    coin::Coin,
    config::CONTACTS_SHOW_LIMIT,
    errors::NO_ADDRESS_MESSAGE,
    navigation::{AmountRequest, ErrorPresenter, Navigator, Selection},
    recipient::{is_eligible, Recipient},
    wallet::{FlatWallet, Wallet, WalletStore},
};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, error, warn};

/// Serializable picture of what the screen currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipientView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_wallet: Option<String>,
    pub search: String,
    pub page_index: usize,
    pub has_wallets: BTreeMap<Coin, bool>,
    pub wallet_list: BTreeMap<Coin, Vec<FlatWallet>>,
    pub has_contacts: bool,
    pub has_more: bool,
    pub has_results: bool,
    pub filtered_wallets: Vec<FlatWallet>,
    pub filtered_contacts: Vec<Contact>,
}

pub struct RecipientAggregator<S, B, R> {
    wallet_store: S,
    address_book: B,
    resolver: R,
    page_size: usize,
    amount: Option<u64>,
    use_as_modal: bool,

    source_wallet: Option<Wallet>,
    search: String,
    page_index: usize,

    raw_wallets: BTreeMap<Coin, Vec<Wallet>>,
    wallet_list: BTreeMap<Coin, Vec<FlatWallet>>,
    contacts: Vec<Contact>,
    visible_contacts: Vec<Contact>,
    search_contacts: Vec<Contact>,
    filtered_wallets: Vec<FlatWallet>,
    has_contacts: bool,
    has_more: bool,
    contacts_loaded: bool,
}

fn name_matches(name: &str, needle_lower: &str) -> bool {
    name.to_lowercase().contains(needle_lower)
}

impl<S, B, R> RecipientAggregator<S, B, R>
where
    S: WalletStore,
    B: AddressBookStore,
    R: AddressResolver,
{
    /// Snapshot the wallet store for every known coin. Starts unscoped.
    ///
    /// Contacts are loaded by the first event that needs them.
    pub fn new(wallet_store: S, address_book: B, resolver: R) -> Self {
        let raw_wallets: BTreeMap<Coin, Vec<Wallet>> = Coin::ALL
            .iter()
            .map(|&coin| (coin, wallet_store.wallets(coin)))
            .collect();
        let wallet_list: BTreeMap<Coin, Vec<FlatWallet>> = raw_wallets
            .iter()
            .map(|(&coin, ws)| (coin, ws.iter().map(FlatWallet::from).collect()))
            .collect();
        Self {
            wallet_store,
            address_book,
            resolver,
            page_size: CONTACTS_SHOW_LIMIT,
            amount: None,
            use_as_modal: false,
            source_wallet: None,
            search: String::new(),
            page_index: 0,
            raw_wallets,
            wallet_list,
            contacts: Vec::new(),
            visible_contacts: Vec::new(),
            search_contacts: Vec::new(),
            filtered_wallets: Vec::new(),
            has_contacts: false,
            has_more: false,
            contacts_loaded: false,
        }
    }

    /// Contacts revealed per page; zero falls back to the default.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = if page_size == 0 {
            CONTACTS_SHOW_LIMIT
        } else {
            page_size
        };
        self
    }

    /// Amount (smallest units) forwarded to the amount view on selection.
    #[must_use]
    pub const fn with_amount(mut self, amount: Option<u64>) -> Self {
        self.amount = amount;
        self
    }

    pub fn set_use_as_modal(&mut self, use_as_modal: bool) {
        self.use_as_modal = use_as_modal;
    }

    pub const fn use_as_modal(&self) -> bool {
        self.use_as_modal
    }

    pub const fn available_coins() -> &'static [Coin] {
        Coin::ALL
    }

    pub const fn coin_name(coin: Coin) -> &'static str {
        coin.name()
    }

    pub fn has_wallets(&self, coin: Coin) -> bool {
        self.raw_wallets.get(&coin).is_some_and(|ws| !ws.is_empty())
    }

    pub fn wallet_list(&self, coin: Coin) -> &[FlatWallet] {
        self.wallet_list
            .get(&coin)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub const fn source_wallet(&self) -> Option<&Wallet> {
        self.source_wallet.as_ref()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub const fn page_index(&self) -> usize {
        self.page_index
    }

    /// Every eligible contact, sorted by name.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// The paginated slice shown while browsing.
    pub fn visible_contacts(&self) -> &[Contact] {
        &self.visible_contacts
    }

    /// Contacts currently on screen: search matches while searching, the page otherwise.
    pub fn filtered_contacts(&self) -> &[Contact] {
        if self.search.is_empty() {
            &self.visible_contacts
        } else {
            &self.search_contacts
        }
    }

    pub fn filtered_wallets(&self) -> &[FlatWallet] {
        &self.filtered_wallets
    }

    pub const fn has_contacts(&self) -> bool {
        self.has_contacts
    }

    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn has_results(&self) -> bool {
        !self.filtered_contacts().is_empty() || !self.filtered_wallets.is_empty()
    }

    /// Recipients on screen: matching wallets first, then contacts.
    pub fn recipients(&self) -> Vec<Recipient> {
        self.filtered_wallets
            .iter()
            .cloned()
            .map(Recipient::Wallet)
            .chain(self.filtered_contacts().iter().cloned().map(Recipient::Contact))
            .collect()
    }

    /// Scope recipients to `wallet`'s coin and network, or lift scoping with `None`.
    pub async fn set_source_wallet(&mut self, wallet: Option<Wallet>) {
        self.source_wallet = wallet;
        self.wallet_list = Coin::ALL
            .iter()
            .map(|&coin| (coin, self.relevant_wallets(coin)))
            .collect();
        self.page_index = 0;
        self.update_contacts().await;
        if !self.search.is_empty() {
            self.refresh_matches();
        }
    }

    /// Store the trimmed search text and recompute matches.
    pub async fn set_search(&mut self, text: &str) {
        text.trim().clone_into(&mut self.search);
        if self.search.is_empty() {
            self.search_contacts.clear();
            self.filtered_wallets.clear();
            self.update_contacts().await;
            return;
        }
        if !self.contacts_loaded {
            self.update_contacts().await;
        }
        self.refresh_matches();
    }

    /// Reveal the next page of contacts.
    pub async fn show_more(&mut self) {
        if !self.contacts_loaded {
            self.update_contacts().await;
        }
        // Stop advancing once everything is visible so the slice stays put.
        if !self.has_more {
            return;
        }
        self.page_index = self.page_index.saturating_add(1);
        self.update_contacts().await;
    }

    /// Resolve `recipient`'s address and hand the amount view its payload.
    pub async fn resolve_and_select<N, P>(
        &self,
        recipient: &Recipient,
        navigator: &mut N,
        presenter: &mut P,
    ) -> Selection
    where
        N: Navigator + ?Sized,
        P: ErrorPresenter + ?Sized,
    {
        match recipient.address(&self.wallet_store).await {
            Ok(addr) if addr.trim().is_empty() => {
                presenter.alert(NO_ADDRESS_MESSAGE);
                Selection::NoAddress
            }
            Ok(addr) => {
                debug!(address = %addr, name = %recipient.name(), "got recipient address");
                navigator.push_amount(AmountRequest::for_recipient(
                    recipient,
                    addr,
                    self.amount,
                    self.use_as_modal,
                ));
                Selection::Navigated
            }
            Err(e) => {
                error!(error = %e, name = %recipient.name(), "could not get recipient address");
                Selection::Failed
            }
        }
    }

    pub fn snapshot(&self) -> RecipientView {
        RecipientView {
            source_wallet: self.source_wallet.as_ref().map(|w| w.name.clone()),
            search: self.search.clone(),
            page_index: self.page_index,
            has_wallets: Coin::ALL
                .iter()
                .map(|&c| (c, self.has_wallets(c)))
                .collect(),
            wallet_list: self.wallet_list.clone(),
            has_contacts: self.has_contacts,
            has_more: self.has_more,
            has_results: self.has_results(),
            filtered_wallets: self.filtered_wallets.clone(),
            filtered_contacts: self.filtered_contacts().to_vec(),
        }
    }

    /// Recompute search matches against the current scope.
    fn refresh_matches(&mut self) {
        let needle = self.search.to_lowercase();
        self.filtered_wallets = self.search_wallets(&needle);
        self.search_contacts = self
            .contacts
            .iter()
            .filter(|c| name_matches(&c.name, &needle))
            .cloned()
            .collect();
    }

    fn relevant_wallets(&self, coin: Coin) -> Vec<FlatWallet> {
        let source = self.source_wallet.as_ref();
        self.raw_wallets
            .get(&coin)
            .map(|ws| {
                ws.iter()
                    .map(FlatWallet::from)
                    .filter(|w| is_eligible(source, w.coin, w.network))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn search_wallets(&self, needle_lower: &str) -> Vec<FlatWallet> {
        let candidates: Vec<&FlatWallet> = match &self.source_wallet {
            Some(w) => self.wallet_list(w.coin).iter().collect(),
            None => Coin::ALL
                .iter()
                .flat_map(|&c| self.wallet_list(c).iter())
                .collect(),
        };
        candidates
            .into_iter()
            .filter(|w| name_matches(&w.name, needle_lower))
            .cloned()
            .collect()
    }

    async fn update_contacts(&mut self) {
        let book = match self.address_book.list().await {
            Ok(book) => book,
            Err(e) => {
                warn!(error = %e, "address book unavailable; showing no contacts");
                Vec::new()
            }
        };
        self.contacts_loaded = true;
        self.has_contacts = !book.is_empty();
        let all = contacts_from_book(book, &self.resolver);
        let source = self.source_wallet.as_ref();
        self.contacts = all
            .into_iter()
            .filter(|c| is_eligible(source, c.coin, c.network))
            .collect();

        let shown = self
            .page_index
            .saturating_add(1)
            .saturating_mul(self.page_size)
            .min(self.contacts.len());
        self.visible_contacts = self.contacts.iter().take(shown).cloned().collect();
        self.has_more = self.contacts.len() > self.visible_contacts.len();
    }
}
