//! Fiat-to-coin conversion and display formatting.
//!
//! All arithmetic stays in `rust_decimal` fixed point so that display strings never pick
//! up binary float artifacts.

use crate::{
    coin::{BuiltinPrecision, Coin, CoinPrecision, PrecisionLookup},
    config::WalletSettings,
};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

pub const MIN_FRACTION_DIGITS: u32 = 2;
pub const MAX_FRACTION_DIGITS: u32 = 8;

pub trait RateConverter {
    /// Convert a fiat amount into smallest units of `coin`, as counted by `precision`.
    ///
    /// `None` when no usable rate is known or the result does not fit.
    fn from_fiat(
        &self,
        amount: Decimal,
        fiat_code: &str,
        coin: Coin,
        precision: &CoinPrecision,
    ) -> Option<Decimal>;
}

/// Static price table: coin code -> fiat code -> price of one whole coin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable {
    prices: BTreeMap<String, BTreeMap<String, Decimal>>,
}

impl RateTable {
    pub fn with_price(mut self, coin: Coin, fiat_code: &str, price: Decimal) -> Self {
        self.prices
            .entry(coin.code().to_owned())
            .or_default()
            .insert(fiat_code.trim().to_uppercase(), price);
        self
    }

    pub fn price(&self, coin: Coin, fiat_code: &str) -> Option<Decimal> {
        let by_fiat = self
            .prices
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(coin.code()))
            .map(|(_, v)| v)?;
        let code = fiat_code.trim();
        by_fiat
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(code))
            .map(|(_, p)| *p)
    }

    pub fn is_empty(&self) -> bool {
        self.prices.values().all(BTreeMap::is_empty)
    }
}

impl RateConverter for RateTable {
    fn from_fiat(
        &self,
        amount: Decimal,
        fiat_code: &str,
        coin: Coin,
        precision: &CoinPrecision,
    ) -> Option<Decimal> {
        let price = self.price(coin, fiat_code)?;
        let Some(whole) = amount.checked_div(price) else {
            debug!(%coin, fiat_code, %price, "unusable fiat price");
            return None;
        };
        let smallest = whole.checked_mul(Decimal::from(precision.unit_to_smallest_unit));
        if smallest.is_none() {
            debug!(%coin, fiat_code, %amount, unit = precision.unit_code, "fiat conversion overflowed");
        }
        smallest
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format `value` with between `min_frac` and `max_frac` fraction digits and `,` grouping.
///
/// Rounds half away from zero at `max_frac` digits, then trims trailing zeros down to
/// `min_frac`.
///
/// Examples:
/// - 5, 2..=8 => "5.00"
/// - 1234567.891, 2..=8 => "1,234,567.891"
pub fn format_decimal(value: Decimal, min_frac: u32, max_frac: u32) -> String {
    let min_frac = min_frac.min(max_frac);
    let rounded = value
        .round_dp_with_strategy(max_frac, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let s = rounded.abs().to_string();
    let (whole, frac) = s.split_once('.').unwrap_or((s.as_str(), ""));

    let mut frac_s = frac.to_owned();
    while frac_s.len() < min_frac as usize {
        frac_s.push('0');
    }

    let sign = if negative { "-" } else { "" };
    let whole = group_thousands(whole);
    if frac_s.is_empty() {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{frac_s}")
    }
}

/// Renders fiat amounts as native coin amounts, e.g. `10` USD -> `"0.0005 BTC"`.
#[derive(Debug, Clone)]
pub struct FiatAmountFormatter<'a, R, P = BuiltinPrecision> {
    settings: WalletSettings,
    rates: &'a R,
    precision: P,
}

impl<'a, R: RateConverter> FiatAmountFormatter<'a, R> {
    pub const fn new(settings: WalletSettings, rates: &'a R) -> Self {
        Self {
            settings,
            rates,
            precision: BuiltinPrecision,
        }
    }
}

impl<'a, R: RateConverter, P: PrecisionLookup> FiatAmountFormatter<'a, R, P> {
    pub const fn with_precision(settings: WalletSettings, rates: &'a R, precision: P) -> Self {
        Self {
            settings,
            rates,
            precision,
        }
    }

    /// Amount in whole coin units, or zero when the rate or precision is unusable.
    pub fn to_units(&self, fiat_amount: Decimal, coin: Coin, alternative: Option<&str>) -> Decimal {
        let code = alternative
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(self.settings.alternative_iso_code.as_str());
        let precision = self.precision.precision(coin);
        let Some(smallest) = self.rates.from_fiat(fiat_amount, code, coin, &precision) else {
            return Decimal::ZERO;
        };
        smallest
            .checked_div(Decimal::from(precision.unit_to_smallest_unit))
            .unwrap_or(Decimal::ZERO)
    }

    pub fn format(&self, fiat_amount: Decimal, coin: Coin, alternative: Option<&str>) -> String {
        let units = self.to_units(fiat_amount, coin, alternative);
        format!(
            "{} {}",
            format_decimal(units, MIN_FRACTION_DIGITS, MAX_FRACTION_DIGITS),
            coin.ticker()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr as _;

    fn dec(s: &str) -> eyre::Result<Decimal> {
        Ok(Decimal::from_str(s)?)
    }

    fn settings(code: &str) -> WalletSettings {
        WalletSettings {
            alternative_iso_code: code.to_owned(),
            ..WalletSettings::default()
        }
    }

    struct ZeroPrecision;

    impl PrecisionLookup for ZeroPrecision {
        fn precision(&self, _coin: Coin) -> CoinPrecision {
            CoinPrecision {
                unit_code: "none",
                unit_decimals: 0,
                unit_to_smallest_unit: 0,
            }
        }
    }

    #[test]
    fn format_decimal_pads_groups_and_rounds() -> eyre::Result<()> {
        assert_eq!(format_decimal(dec("5")?, 2, 8), "5.00");
        assert_eq!(format_decimal(dec("0.5")?, 2, 8), "0.50");
        assert_eq!(format_decimal(dec("1234567.891")?, 2, 8), "1,234,567.891");
        assert_eq!(format_decimal(dec("0.123456785")?, 2, 8), "0.12345679");
        assert_eq!(format_decimal(dec("-1000.5")?, 2, 8), "-1,000.50");
        assert_eq!(format_decimal(dec("-0.000000001")?, 2, 8), "0.00");
        assert_eq!(format_decimal(dec("999")?, 0, 0), "999");
        Ok(())
    }

    #[test]
    fn fiat_to_btc_display() -> eyre::Result<()> {
        let rates = RateTable::default().with_price(Coin::Btc, "USD", dec("20000")?);
        let f = FiatAmountFormatter::new(settings("EUR"), &rates);
        let s = f.format(dec("10")?, Coin::Btc, Some("usd"));
        assert_eq!(s, "0.0005 BTC");
        assert!(s.ends_with(" BTC"), "ticker suffix missing: {s}");
        Ok(())
    }

    #[test]
    fn omitted_code_uses_settings_default() -> eyre::Result<()> {
        let rates = RateTable::default()
            .with_price(Coin::Eth, "EUR", dec("2500")?)
            .with_price(Coin::Eth, "USD", dec("3000")?);
        let f = FiatAmountFormatter::new(settings("EUR"), &rates);
        assert_eq!(f.format(dec("25")?, Coin::Eth, None), "0.01 ETH");
        assert_eq!(f.format(dec("36")?, Coin::Eth, Some("  ")), "0.0144 ETH");
        Ok(())
    }

    #[test]
    fn missing_rate_or_zero_divisor_formats_as_zero() -> eyre::Result<()> {
        let rates = RateTable::default().with_price(Coin::Btc, "USD", dec("20000")?);
        let f = FiatAmountFormatter::new(settings("USD"), &rates);
        assert_eq!(f.format(dec("10")?, Coin::Xrp, None), "0.00 XRP");

        let broken = FiatAmountFormatter::with_precision(settings("USD"), &rates, ZeroPrecision);
        assert_eq!(broken.format(dec("10")?, Coin::Btc, None), "0.00 BTC");
        Ok(())
    }

    /// Counts BTC in "mBTC-like" units of 1000 per coin.
    struct ThousandthPrecision;

    impl PrecisionLookup for ThousandthPrecision {
        fn precision(&self, _coin: Coin) -> CoinPrecision {
            CoinPrecision {
                unit_code: "milli",
                unit_decimals: 3,
                unit_to_smallest_unit: 1_000,
            }
        }
    }

    #[test]
    fn zero_price_is_treated_as_missing() -> eyre::Result<()> {
        let rates = RateTable::default().with_price(Coin::Ltc, "USD", Decimal::ZERO);
        let p = BuiltinPrecision.precision(Coin::Ltc);
        assert_eq!(rates.from_fiat(dec("1")?, "USD", Coin::Ltc, &p), None);
        Ok(())
    }

    #[test]
    fn injected_precision_drives_both_conversion_steps() -> eyre::Result<()> {
        let rates = RateTable::default().with_price(Coin::Btc, "USD", dec("20000")?);
        let custom = FiatAmountFormatter::with_precision(settings("USD"), &rates, ThousandthPrecision);
        assert_eq!(
            rates.from_fiat(dec("10")?, "USD", Coin::Btc, &ThousandthPrecision.precision(Coin::Btc)),
            Some(dec("0.5")?)
        );
        assert_eq!(custom.to_units(dec("10")?, Coin::Btc, None), dec("0.0005")?);
        assert_eq!(custom.format(dec("10")?, Coin::Btc, None), "0.0005 BTC");
        Ok(())
    }

    #[test]
    fn overflowing_conversion_yields_none_and_zero_display() -> eyre::Result<()> {
        let rates = RateTable::default().with_price(Coin::Eth, "USD", dec("1")?);
        let p = BuiltinPrecision.precision(Coin::Eth);
        let huge = dec("1000000000000")?;
        assert_eq!(rates.from_fiat(huge, "USD", Coin::Eth, &p), None);
        let f = FiatAmountFormatter::new(settings("USD"), &rates);
        assert_eq!(f.format(huge, Coin::Eth, None), "0.00 ETH");
        Ok(())
    }

    #[test]
    fn rate_table_reads_from_toml() -> eyre::Result<()> {
        #[derive(Deserialize)]
        struct Wrapper {
            rates: RateTable,
        }
        let w: Wrapper = toml::from_str("[rates.btc]\nUSD = \"20000\"\neur = \"18000.5\"\n")?;
        assert_eq!(w.rates.price(Coin::Btc, "usd"), Some(dec("20000")?));
        assert_eq!(w.rates.price(Coin::Btc, "EUR"), Some(dec("18000.5")?));
        assert_eq!(w.rates.price(Coin::Eth, "USD"), None);
        Ok(())
    }
}
