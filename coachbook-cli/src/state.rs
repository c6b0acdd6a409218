//! Shared CLI state.

use std::sync::Arc;

use coachbook_core::{CartHolder, CheckoutConfig, CheckoutFlow};
use coachbook_sdk::client::{AdminClient, StorefrontClient};

use crate::config::LoadedConfig;

#[derive(Clone)]
pub struct AppState {
    pub storefront: Arc<StorefrontClient>,
    pub admin: Option<AdminClient>,
    pub checkout: CheckoutConfig,
    /// One cart per process run.
    pub cart: CartHolder,
}

impl AppState {
    pub fn new(config: LoadedConfig) -> Self {
        let storefront = StorefrontClient::new(config.api_base.clone());
        let admin = config
            .admin_token
            .map(|token| AdminClient::new(config.api_base, token));
        Self {
            storefront: Arc::new(storefront),
            admin,
            checkout: config.checkout,
            cart: CartHolder::new(),
        }
    }

    pub fn checkout_flow(&self) -> CheckoutFlow<StorefrontClient> {
        CheckoutFlow::new(
            self.storefront.clone(),
            self.cart.clone(),
            self.checkout.clone(),
        )
    }

    pub fn admin(&self) -> anyhow::Result<&AdminClient> {
        self.admin.as_ref().ok_or_else(|| {
            anyhow::anyhow!("admin token missing: set api.admin_token or COACHBOOK_ADMIN_TOKEN")
        })
    }
}
