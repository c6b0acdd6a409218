//! Single-slot cart holder.
//!
//! The site books one service at a time, so the cart holds at most one
//! item. Selecting another service replaces the held one.

use std::sync::Arc;

use coachbook_sdk::objects::Service;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

/// The service currently selected for checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub title: String,
    pub price: Decimal,
}

impl From<&Service> for CartItem {
    fn from(service: &Service) -> Self {
        Self {
            id: service.id.clone(),
            title: service.title.clone(),
            price: service.price,
        }
    }
}

impl From<Service> for CartItem {
    fn from(service: Service) -> Self {
        Self {
            id: service.id,
            title: service.title,
            price: service.price,
        }
    }
}

/// Session-scoped cart state.
///
/// Cloning yields another handle to the same slot. Construct a fresh
/// holder per session (or per test) for isolation.
#[derive(Debug, Clone, Default)]
pub struct CartHolder {
    slot: Arc<RwLock<Option<CartItem>>>,
}

impl CartHolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Holder pre-populated with `item`.
    pub fn with_item(item: impl Into<CartItem>) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Some(item.into()))),
        }
    }

    /// Replace whatever is held with `item`.
    pub async fn add_to_cart(&self, item: impl Into<CartItem>) {
        let item = item.into();
        debug!(service_id = %item.id, "Service added to cart");
        let mut slot = self.slot.write().await;
        *slot = Some(item);
    }

    /// Empty the cart. Clearing an empty cart is a no-op.
    pub async fn clear_cart(&self) {
        let mut slot = self.slot.write().await;
        if slot.take().is_some() {
            debug!("Cart cleared");
        }
    }

    /// Snapshot of the held item.
    pub async fn current(&self) -> Option<CartItem> {
        self.slot.read().await.clone()
    }

    pub async fn is_empty(&self) -> bool {
        self.slot.read().await.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(id: &str, price: i64) -> Service {
        Service {
            id: id.to_string(),
            title: format!("Service {id}"),
            price: Decimal::new(price, 0),
            description: Some("ignored".to_string()),
            duration: None,
            category: None,
        }
    }

    #[tokio::test]
    async fn test_second_selection_replaces_first() {
        let cart = CartHolder::new();
        assert!(cart.is_empty().await);

        cart.add_to_cart(&service("a", 100)).await;
        cart.add_to_cart(service("b", 250)).await;

        let held = cart.current().await;
        assert_eq!(
            held,
            Some(CartItem {
                id: "b".to_string(),
                title: "Service b".to_string(),
                price: Decimal::new(250, 0),
            })
        );
    }

    #[tokio::test]
    async fn test_clear_is_idempotent_and_shared() {
        let cart = CartHolder::with_item(&service("a", 100));
        let other_handle = cart.clone();

        other_handle.clear_cart().await;
        other_handle.clear_cart().await;

        assert!(cart.is_empty().await);
    }
}
