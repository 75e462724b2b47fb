//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Currency registry configuration.
    #[serde(default)]
    pub currencies: CurrencySettings,
    /// Demo binary configuration.
    #[serde(default)]
    pub demo: DemoSettings,
}

/// Currency registry configuration.
///
/// Supporting a new currency is a matter of adding an `extra` entry:
///
/// ```toml
/// [[currencies.extra]]
/// code = "GBP"
/// symbol = "£"
/// decimals = 2
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencySettings {
    /// Start from the built-in table.
    #[serde(default = "default_include_builtin")]
    pub include_builtin: bool,
    /// Additional currencies; an entry replaces a built-in one with the same code.
    #[serde(default)]
    pub extra: Vec<CurrencyEntry>,
}

impl Default for CurrencySettings {
    fn default() -> Self {
        Self {
            include_builtin: default_include_builtin(),
            extra: Vec::new(),
        }
    }
}

fn default_include_builtin() -> bool {
    true
}

/// One configured currency.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyEntry {
    /// Currency code, e.g. "GBP".
    pub code: String,
    /// Display symbol, e.g. "£".
    pub symbol: String,
    /// Fractional digits.
    pub decimals: u32,
}

/// Demo binary configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DemoSettings {
    /// Currency used by the walkthrough.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Log filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            log_filter: default_log_filter(),
        }
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_log_filter() -> String {
    "coinage=info".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `COINAGE__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("COINAGE").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Parses configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed.
    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
