use crate::fiat::RateTable;
use serde::{Deserialize, Serialize};

/// Number of contacts shown per "show more" page.
pub const CONTACTS_SHOW_LIMIT: usize = 10;

/// Read-only display settings handed to formatters as a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletSettings {
    /// ISO code of the user's fiat display currency.
    pub alternative_iso_code: String,
    pub alternative_name: String,
}

impl Default for WalletSettings {
    fn default() -> Self {
        Self {
            alternative_iso_code: "USD".into(),
            alternative_name: "US Dollar".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub wallet: WalletSettings,
    /// Contacts revealed per page in the recipient list.
    pub contacts_page_size: usize,
    /// Optional override for the profile file location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_path: Option<std::path::PathBuf>,
    /// Static fiat prices used by `fiat` formatting.
    pub rates: RateTable,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            wallet: WalletSettings::default(),
            contacts_page_size: CONTACTS_SHOW_LIMIT,
            profile_path: None,
            rates: RateTable::default(),
        }
    }
}

impl PickerConfig {
    /// Page size with zero treated as "use the default".
    pub const fn effective_page_size(&self) -> usize {
        if self.contacts_page_size == 0 {
            CONTACTS_SHOW_LIMIT
        } else {
            self.contacts_page_size
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coin::Coin;

    #[test]
    fn empty_toml_yields_defaults() -> eyre::Result<()> {
        let cfg: PickerConfig = toml::from_str("")?;
        assert_eq!(cfg, PickerConfig::default());
        assert_eq!(cfg.wallet.alternative_iso_code, "USD");
        assert_eq!(cfg.effective_page_size(), CONTACTS_SHOW_LIMIT);
        assert!(cfg.rates.is_empty(), "no rates configured by default");
        Ok(())
    }

    #[test]
    fn partial_toml_keeps_other_defaults() -> eyre::Result<()> {
        let cfg: PickerConfig = toml::from_str(
            "contacts_page_size = 0\n\n[wallet]\nalternative_iso_code = \"EUR\"\n\n[rates.eth]\nEUR = \"2500\"\n",
        )?;
        assert_eq!(cfg.wallet.alternative_iso_code, "EUR");
        assert_eq!(cfg.wallet.alternative_name, "US Dollar");
        assert_eq!(cfg.effective_page_size(), CONTACTS_SHOW_LIMIT);
        assert!(cfg.rates.price(Coin::Eth, "eur").is_some(), "eth/eur rate parsed");
        Ok(())
    }
}
