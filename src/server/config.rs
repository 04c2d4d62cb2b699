//! Application configuration loaded from environment variables.

/// Runtime configuration read once at startup.
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub admin_token: String,
    /// Whether bulk imports may open database transactions
    pub transactions: bool,
    /// Brand names the seed ingester recognizes inside free-form labels
    pub known_brands: Vec<String>,
}

impl Config {
    /// Reads the configuration from the environment.
    ///
    /// `DATABASE_URL` and `ADMIN_TOKEN` are required. `LISTEN_ADDR` defaults
    /// to `0.0.0.0:8080`, `IMPORT_TRANSACTIONS` is enabled unless set to
    /// `false`, and `KNOWN_BRANDS` is a comma-separated list overriding the
    /// built-in one.
    pub fn from_env() -> Result<Self, std::env::VarError> {
        let transactions = std::env::var("IMPORT_TRANSACTIONS")
            .map(|value| value != "false")
            .unwrap_or(true);

        let known_brands = std::env::var("KNOWN_BRANDS")
            .map(|value| parse_brand_list(&value))
            .unwrap_or_else(|_| default_known_brands());

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")?,
            listen_addr: std::env::var("LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            admin_token: std::env::var("ADMIN_TOKEN")?,
            transactions,
            known_brands,
        })
    }
}

/// The brand names recognized when no `KNOWN_BRANDS` override is set.
pub fn default_known_brands() -> Vec<String> {
    [
        "realme", "oppo", "poco", "samsung", "iphone", "vivo", "oneplus",
    ]
    .iter()
    .map(|brand| (*brand).to_string())
    .collect()
}

fn parse_brand_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|brand| !brand.is_empty())
        .map(str::to_string)
        .collect()
}
