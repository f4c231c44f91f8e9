use crate::errors::PickerError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coin {
    Btc,
    Bch,
    Eth,
    Xrp,
    Doge,
    Ltc,
}

impl Coin {
    /// Every coin the picker knows about, in display order.
    pub const ALL: &'static [Self] = &[
        Self::Btc,
        Self::Bch,
        Self::Eth,
        Self::Xrp,
        Self::Doge,
        Self::Ltc,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            Self::Btc => "btc",
            Self::Bch => "bch",
            Self::Eth => "eth",
            Self::Xrp => "xrp",
            Self::Doge => "doge",
            Self::Ltc => "ltc",
        }
    }

    pub const fn ticker(self) -> &'static str {
        match self {
            Self::Btc => "BTC",
            Self::Bch => "BCH",
            Self::Eth => "ETH",
            Self::Xrp => "XRP",
            Self::Doge => "DOGE",
            Self::Ltc => "LTC",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Btc => "Bitcoin",
            Self::Bch => "Bitcoin Cash",
            Self::Eth => "Ethereum",
            Self::Xrp => "XRP",
            Self::Doge => "Dogecoin",
            Self::Ltc => "Litecoin",
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Coin {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.code().eq_ignore_ascii_case(t))
            .ok_or_else(|| PickerError::UnknownCoin(t.to_owned()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Testnet,
    Livenet,
}

impl Network {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Testnet => "testnet",
            Self::Livenet => "livenet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relationship between a coin's display unit and its indivisible base unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinPrecision {
    pub unit_code: &'static str,
    pub unit_decimals: u32,
    /// Base units per whole unit (e.g. 100000000 satoshi per BTC).
    pub unit_to_smallest_unit: u64,
}

pub trait PrecisionLookup {
    fn precision(&self, coin: Coin) -> CoinPrecision;
}

/// Fixed precision table for the built-in coins.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinPrecision;

impl PrecisionLookup for BuiltinPrecision {
    fn precision(&self, coin: Coin) -> CoinPrecision {
        let (unit_code, unit_decimals, unit_to_smallest_unit) = match coin {
            Coin::Btc => ("btc", 8, 100_000_000),
            Coin::Bch => ("bch", 8, 100_000_000),
            Coin::Eth => ("eth", 18, 1_000_000_000_000_000_000),
            Coin::Xrp => ("xrp", 6, 1_000_000),
            Coin::Doge => ("doge", 8, 100_000_000),
            Coin::Ltc => ("ltc", 8, 100_000_000),
        };
        CoinPrecision {
            unit_code,
            unit_decimals,
            unit_to_smallest_unit,
        }
    }
}
