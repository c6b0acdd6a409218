//! Runtime configuration for the checkout flow.

use std::time::Duration;

use url::Url;

/// Delay before navigating away from the pay-later confirmation.
pub const DEFAULT_PAY_LATER_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// Page the payment gateway returns to. The order reference is appended
    /// as the `reference` query parameter.
    pub callback_url: Url,
    /// Where to send the user after a pay-later booking.
    pub pay_later_redirect: String,
    pub pay_later_delay: Duration,
}

impl CheckoutConfig {
    pub fn new(callback_url: Url) -> Self {
        Self {
            callback_url,
            pay_later_redirect: "/".to_string(),
            pay_later_delay: DEFAULT_PAY_LATER_DELAY,
        }
    }

    /// Callback URL for a specific order reference, preserving any query
    /// already present on the configured URL.
    pub fn callback_url_for(&self, reference: &str) -> Url {
        let mut url = self.callback_url.clone();
        url.query_pairs_mut().append_pair("reference", reference);
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_url_for_appends_reference() -> Result<(), url::ParseError> {
        let config = CheckoutConfig::new(Url::parse("https://site.example/checkout?src=web")?);
        assert_eq!(
            config.callback_url_for("TXN 1").as_str(),
            "https://site.example/checkout?src=web&reference=TXN+1"
        );
        assert_eq!(config.pay_later_delay, Duration::from_secs(3));
        Ok(())
    }
}
