//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Document numbering configuration.
    #[serde(default)]
    pub documents: DocumentConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Document numbering configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentConfig {
    /// How many candidate codes are tried before giving up.
    #[serde(default = "default_code_max_attempts")]
    pub code_max_attempts: u32,
    /// Code prefixes per document kind.
    #[serde(default)]
    pub prefixes: CodePrefixConfig,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            code_max_attempts: default_code_max_attempts(),
            prefixes: CodePrefixConfig::default(),
        }
    }
}

fn default_code_max_attempts() -> u32 {
    100
}

/// Code prefixes per document kind.
#[derive(Debug, Clone, Deserialize)]
pub struct CodePrefixConfig {
    /// Prefix for purchase receipts.
    #[serde(default = "default_purchase_receipt_prefix")]
    pub purchase_receipt: String,
    /// Prefix for sales receipts.
    #[serde(default = "default_sales_receipt_prefix")]
    pub sales_receipt: String,
    /// Prefix for payment vouchers.
    #[serde(default = "default_payment_voucher_prefix")]
    pub payment_voucher: String,
    /// Prefix for receipt vouchers.
    #[serde(default = "default_receipt_voucher_prefix")]
    pub receipt_voucher: String,
}

impl Default for CodePrefixConfig {
    fn default() -> Self {
        Self {
            purchase_receipt: default_purchase_receipt_prefix(),
            sales_receipt: default_sales_receipt_prefix(),
            payment_voucher: default_payment_voucher_prefix(),
            receipt_voucher: default_receipt_voucher_prefix(),
        }
    }
}

fn default_purchase_receipt_prefix() -> String {
    "PR".to_string()
}

fn default_sales_receipt_prefix() -> String {
    "SR".to_string()
}

fn default_payment_voucher_prefix() -> String {
    "PV".to_string()
}

fn default_receipt_voucher_prefix() -> String {
    "RV".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_log_filter() -> String {
    "ledgerline=debug,sea_orm=info".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones overriding earlier ones:
    /// `config/default`, `config/{RUN_MODE}`, then `LEDGERLINE__*` variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("LEDGERLINE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_environment_with_defaults() {
        temp_env::with_vars(
            [
                ("LEDGERLINE__DATABASE__URL", Some("postgres://localhost/ledgerline")),
                ("RUN_MODE", Some("test-no-such-file")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.database.url, "postgres://localhost/ledgerline");
                assert_eq!(config.database.max_connections, 10);
                assert_eq!(config.documents.code_max_attempts, 100);
                assert_eq!(config.documents.prefixes.purchase_receipt, "PR");
                assert_eq!(config.documents.prefixes.receipt_voucher, "RV");
                assert!(!config.logging.json);
            },
        );
    }

    #[test]
    fn test_environment_overrides_nested_values() {
        temp_env::with_vars(
            [
                ("LEDGERLINE__DATABASE__URL", Some("postgres://db/erp")),
                ("LEDGERLINE__DOCUMENTS__CODE_MAX_ATTEMPTS", Some("5")),
                ("LEDGERLINE__DOCUMENTS__PREFIXES__SALES_RECEIPT", Some("INV")),
                ("LEDGERLINE__LOGGING__JSON", Some("true")),
                ("RUN_MODE", Some("test-no-such-file")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.documents.code_max_attempts, 5);
                assert_eq!(config.documents.prefixes.sales_receipt, "INV");
                assert_eq!(config.documents.prefixes.purchase_receipt, "PR");
                assert!(config.logging.json);
            },
        );
    }

    #[test]
    fn test_missing_database_url_fails() {
        temp_env::with_vars(
            [
                ("LEDGERLINE__DATABASE__URL", None::<&str>),
                ("RUN_MODE", Some("test-no-such-file")),
            ],
            || {
                assert!(AppConfig::load().is_err());
            },
        );
    }
}
