//! TOML file configuration structures.
//!
//! These structs directly map to the `coachbook.toml` file format.

use serde::{Deserialize, Serialize};
use url::Url;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub api: ApiConfig,
    pub checkout: CheckoutSection,
}

/// Collaborator API section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Root of the REST API, including its path prefix
    /// (e.g., "https://coach.example/api").
    pub base_url: Url,
    /// Bearer token for admin commands.
    #[serde(default)]
    pub admin_token: Option<String>,
}

/// Checkout section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSection {
    /// Page the payment gateway redirects back to.
    pub callback_url: Url,
    /// Where the pay-later confirmation navigates to.
    #[serde(default = "default_pay_later_redirect")]
    pub pay_later_redirect: String,
    /// Seconds before that navigation happens.
    #[serde(default = "default_pay_later_redirect_secs")]
    pub pay_later_redirect_secs: u64,
}

fn default_pay_later_redirect() -> String {
    "/".to_string()
}

fn default_pay_later_redirect_secs() -> u64 {
    3
}
