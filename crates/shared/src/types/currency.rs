//! Currency metadata and the currency registry.
//!
//! The registry maps a currency code to its display symbol and the number of
//! fractional digits its amounts carry. It is built once, explicitly, and then
//! only read. `Money` keeps a `'static` reference to its registry record, so
//! the registry is consulted at construction time only.

use std::collections::BTreeMap;

use once_cell::sync::OnceCell;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::CurrencySettings;
use crate::error::{MoneyError, MoneyResult};

/// Largest number of fractional digits a `Decimal` can hold.
pub const MAX_DECIMALS: u32 = 28;

/// Built-in currency table: code, symbol, fractional digits.
const BUILTIN: [(&str, &str, u32); 5] = [
    ("USD", "$", 2),
    ("EUR", "€", 2),
    ("IDR", "Rp", 2),
    ("SGD", "S$", 2),
    ("JPY", "¥", 0),
];

static GLOBAL: OnceCell<CurrencyRegistry> = OnceCell::new();

/// A registry record: one supported currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Currency {
    code: String,
    symbol: String,
    decimals: u32,
}

impl Currency {
    /// ISO 4217 style code, always upper-case (e.g. "USD").
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Display symbol (e.g. "$").
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Number of fractional digits of an amount in this currency.
    #[must_use]
    pub const fn decimals(&self) -> u32 {
        self.decimals
    }

    /// The smallest denomination, e.g. `0.01` for USD and `1` for JPY.
    #[must_use]
    pub fn minor_unit(&self) -> Decimal {
        Decimal::new(1, self.decimals)
    }

    /// How many minor units make one major unit (`10^decimals`).
    #[must_use]
    pub fn minor_units_per_major(&self) -> Decimal {
        Decimal::from_i128_with_scale(10i128.pow(self.decimals), 0)
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.code)
    }
}

/// Normalizes user input into a registry key.
fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Immutable mapping from currency code to `Currency`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyRegistry {
    currencies: BTreeMap<String, Currency>,
}

impl CurrencyRegistry {
    /// Starts building a registry from scratch.
    #[must_use]
    pub fn builder() -> CurrencyRegistryBuilder {
        CurrencyRegistryBuilder::default()
    }

    /// The built-in table (USD, EUR, IDR, SGD, JPY).
    #[must_use]
    pub fn builtin() -> Self {
        let currencies = BUILTIN
            .iter()
            .map(|(code, symbol, decimals)| {
                (
                    (*code).to_string(),
                    Currency {
                        code: (*code).to_string(),
                        symbol: (*symbol).to_string(),
                        decimals: *decimals,
                    },
                )
            })
            .collect();
        Self { currencies }
    }

    /// Builds a registry from configuration.
    ///
    /// Configured entries replace built-in entries with the same code.
    pub fn from_config(settings: &CurrencySettings) -> MoneyResult<Self> {
        let mut builder = Self::builder();
        if settings.include_builtin {
            let overridden: Vec<String> = settings
                .extra
                .iter()
                .map(|entry| normalize_code(&entry.code))
                .collect();
            for (code, symbol, decimals) in BUILTIN {
                if !overridden.iter().any(|c| c.as_str() == code) {
                    builder = builder.currency(code, symbol, decimals);
                }
            }
        }
        for entry in &settings.extra {
            builder = builder.currency(&entry.code, &entry.symbol, entry.decimals);
        }
        builder.build()
    }

    /// Looks up a currency by code (case-insensitive, surrounding whitespace ignored).
    pub fn lookup(&self, code: &str) -> MoneyResult<&Currency> {
        self.currencies
            .get(&normalize_code(code))
            .ok_or_else(|| MoneyError::InvalidCurrency(code.to_string()))
    }

    /// Returns true if the code is supported.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.currencies.contains_key(&normalize_code(code))
    }

    /// Supported codes in sorted order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.currencies.keys().map(String::as_str)
    }

    /// Number of supported currencies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    /// Returns true if no currency is supported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }

    /// Promotes the registry to process lifetime.
    ///
    /// For registries that are passed around explicitly instead of being
    /// installed as the global one. The memory is never reclaimed.
    #[must_use]
    pub fn leak(self) -> &'static Self {
        Box::leak(Box::new(self))
    }
}

/// Builder for `CurrencyRegistry`.
#[derive(Debug, Default)]
pub struct CurrencyRegistryBuilder {
    entries: Vec<(String, String, u32)>,
}

impl CurrencyRegistryBuilder {
    /// Adds a currency.
    #[must_use]
    pub fn currency(mut self, code: &str, symbol: &str, decimals: u32) -> Self {
        self.entries
            .push((code.to_string(), symbol.to_string(), decimals));
        self
    }

    /// Validates the entries and builds the registry.
    ///
    /// # Errors
    ///
    /// - `InvalidCurrency` if a code is empty or not alphabetic.
    /// - `InvalidArgument` if a code is repeated or `decimals` exceeds
    ///   [`MAX_DECIMALS`].
    pub fn build(self) -> MoneyResult<CurrencyRegistry> {
        let mut currencies = BTreeMap::new();
        for (raw_code, symbol, decimals) in self.entries {
            let code = normalize_code(&raw_code);
            if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(MoneyError::InvalidCurrency(raw_code));
            }
            if decimals > MAX_DECIMALS {
                return Err(MoneyError::InvalidArgument(format!(
                    "{code} has {decimals} decimals, at most {MAX_DECIMALS} are supported"
                )));
            }
            if currencies.contains_key(&code) {
                return Err(MoneyError::InvalidArgument(format!(
                    "duplicate currency code: {code}"
                )));
            }
            currencies.insert(
                code.clone(),
                Currency {
                    code,
                    symbol,
                    decimals,
                },
            );
        }
        debug!(count = currencies.len(), "currency registry built");
        Ok(CurrencyRegistry { currencies })
    }
}

/// Installs the process-wide registry.
///
/// Must run before the first `Money` is constructed through [`global`];
/// the registry can be installed only once.
///
/// # Errors
///
/// Returns `InvalidArgument` if a registry is already in place (installed
/// earlier, or the built-in one was initialized lazily by [`global`]).
pub fn install(registry: CurrencyRegistry) -> MoneyResult<&'static CurrencyRegistry> {
    let count = registry.len();
    GLOBAL.set(registry).map_err(|_| {
        MoneyError::InvalidArgument("currency registry is already installed".to_string())
    })?;
    info!(count, "currency registry installed");
    Ok(global())
}

/// The process-wide registry, falling back to the built-in table.
pub fn global() -> &'static CurrencyRegistry {
    GLOBAL.get_or_init(CurrencyRegistry::builtin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CurrencyEntry;
    use rust_decimal_macros::dec;

    #[test]
    fn test_builtin_lookup() {
        let registry = CurrencyRegistry::builtin();
        let usd = registry.lookup("USD").unwrap();
        assert_eq!(usd.code(), "USD");
        assert_eq!(usd.symbol(), "$");
        assert_eq!(usd.decimals(), 2);

        let jpy = registry.lookup("JPY").unwrap();
        assert_eq!(jpy.decimals(), 0);
        assert_eq!(jpy.minor_unit(), dec!(1));
    }

    #[test]
    fn test_lookup_normalizes_code() {
        let registry = CurrencyRegistry::builtin();
        assert_eq!(registry.lookup(" eur ").unwrap().code(), "EUR");
        assert!(registry.contains("usd"));
    }

    #[test]
    fn test_lookup_unknown_code() {
        let registry = CurrencyRegistry::builtin();
        assert_eq!(
            registry.lookup("XXX").unwrap_err(),
            MoneyError::InvalidCurrency("XXX".to_string())
        );
        assert!(registry.lookup("").is_err());
    }

    #[test]
    fn test_codes_sorted() {
        let registry = CurrencyRegistry::builtin();
        let codes: Vec<&str> = registry.codes().collect();
        assert_eq!(codes, vec!["EUR", "IDR", "JPY", "SGD", "USD"]);
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn test_minor_units_per_major() {
        let registry = CurrencyRegistry::builder()
            .currency("BHD", "BD", 3)
            .currency("JPY", "¥", 0)
            .build()
            .unwrap();
        assert_eq!(
            registry.lookup("BHD").unwrap().minor_units_per_major(),
            dec!(1000)
        );
        assert_eq!(
            registry.lookup("BHD").unwrap().minor_unit(),
            dec!(0.001)
        );
        assert_eq!(
            registry.lookup("JPY").unwrap().minor_units_per_major(),
            dec!(1)
        );
    }

    #[test]
    fn test_builder_rejects_bad_codes() {
        let err = CurrencyRegistry::builder()
            .currency("U5D", "$", 2)
            .build()
            .unwrap_err();
        assert_eq!(err, MoneyError::InvalidCurrency("U5D".to_string()));

        let err = CurrencyRegistry::builder()
            .currency("  ", "$", 2)
            .build()
            .unwrap_err();
        assert!(matches!(err, MoneyError::InvalidCurrency(_)));
    }

    #[test]
    fn test_builder_rejects_duplicates() {
        let err = CurrencyRegistry::builder()
            .currency("USD", "$", 2)
            .currency("usd", "US$", 2)
            .build()
            .unwrap_err();
        assert!(matches!(err, MoneyError::InvalidArgument(_)));
    }

    #[test]
    fn test_builder_rejects_excess_decimals() {
        let err = CurrencyRegistry::builder()
            .currency("XAU", "oz", 29)
            .build()
            .unwrap_err();
        assert!(matches!(err, MoneyError::InvalidArgument(_)));
    }

    #[test]
    fn test_from_config_extends_and_overrides_builtin() {
        let settings = CurrencySettings {
            include_builtin: true,
            extra: vec![
                CurrencyEntry {
                    code: "gbp".to_string(),
                    symbol: "£".to_string(),
                    decimals: 2,
                },
                CurrencyEntry {
                    code: "IDR".to_string(),
                    symbol: "Rp".to_string(),
                    decimals: 0,
                },
            ],
        };
        let registry = CurrencyRegistry::from_config(&settings).unwrap();
        assert_eq!(registry.len(), 6);
        assert_eq!(registry.lookup("GBP").unwrap().symbol(), "£");
        assert_eq!(registry.lookup("IDR").unwrap().decimals(), 0);
    }

    #[test]
    fn test_from_config_without_builtin() {
        let settings = CurrencySettings {
            include_builtin: false,
            extra: vec![CurrencyEntry {
                code: "CHF".to_string(),
                symbol: "Fr.".to_string(),
                decimals: 2,
            }],
        };
        let registry = CurrencyRegistry::from_config(&settings).unwrap();
        assert_eq!(registry.codes().collect::<Vec<_>>(), vec!["CHF"]);
        assert!(registry.lookup("USD").is_err());
    }

    #[test]
    fn test_install_after_global_fails() {
        // Forces lazy initialization so a later install cannot succeed.
        assert!(global().contains("USD"));
        let err = install(CurrencyRegistry::builtin()).unwrap_err();
        assert!(matches!(err, MoneyError::InvalidArgument(_)));
    }
}
