//! Admin API query types.

use serde::{Deserialize, Serialize};

use super::order::PaymentStatus;

const DEFAULT_LIMIT: u32 = 20;
const MAX_LIMIT: u32 = 200;
const MAX_PAGE: u32 = 10_000;

/// Query parameters for listing individual orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrdersQuery {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    /// Matches customer name, email or transaction reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for ListOrdersQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            page: default_page(),
            payment_status: None,
            search: None,
        }
    }
}

impl ListOrdersQuery {
    /// Copy of the query with `limit` and `page` clamped to safe bounds.
    pub fn clamped(&self) -> Self {
        let (limit, page) = clamp_pagination(self.limit, self.page);
        Self {
            limit,
            page,
            ..self.clone()
        }
    }
}

/// Request body for `PATCH /individual-orders/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentStatus {
    pub payment_status: PaymentStatus,
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

fn default_page() -> u32 {
    1
}

/// Clamp limit and page to safe maximums. Pages are 1-based.
pub fn clamp_pagination(limit: u32, page: u32) -> (u32, u32) {
    (limit.clamp(1, MAX_LIMIT), page.clamp(1, MAX_PAGE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_pagination() {
        assert_eq!(clamp_pagination(0, 0), (1, 1));
        assert_eq!(clamp_pagination(50, 3), (50, 3));
        assert_eq!(clamp_pagination(10_000, 1_000_000), (MAX_LIMIT, MAX_PAGE));
    }

    #[test]
    fn test_query_defaults_and_filter_encoding() {
        let query: ListOrdersQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.limit, DEFAULT_LIMIT);
        assert_eq!(query.page, 1);

        let query = ListOrdersQuery {
            payment_status: Some(PaymentStatus::PayLater),
            ..Default::default()
        };
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["paymentStatus"], "pay_later");
        assert!(json.get("search").is_none());
    }
}
