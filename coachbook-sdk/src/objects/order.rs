//! Individual order request and response types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Payment status of an individual order.
///
/// Orders are created as `Pending` (pay now) or `PayLater`. The remaining
/// states are reached through payment verification or an admin update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    PayLater,
    Paid,
    Completed,
    Cancelled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::PayLater => "pay_later",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown payment status: {0}")]
pub struct UnknownPaymentStatus(pub String);

impl std::str::FromStr for PaymentStatus {
    type Err = UnknownPaymentStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(PaymentStatus::Pending),
            "pay_later" | "pay-later" => Ok(PaymentStatus::PayLater),
            "paid" => Ok(PaymentStatus::Paid),
            "completed" => Ok(PaymentStatus::Completed),
            "cancelled" | "canceled" => Ok(PaymentStatus::Cancelled),
            other => Err(UnknownPaymentStatus(other.to_owned())),
        }
    }
}

/// Request body for `POST /individual-orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIndividualOrder {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub challenges: String,
    pub goals: String,
    pub service_id: String,
    pub service_title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub payment_status: PaymentStatus,
}

/// An individual order as persisted by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndividualOrder {
    #[serde(rename = "_id")]
    pub id: String,
    /// Reference minted at creation time, shared with the payment gateway.
    pub transaction_ref: String,
    pub service_id: String,
    pub service_title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub challenges: String,
    #[serde(default)]
    pub goals: String,
    pub payment_status: PaymentStatus,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_create_order_wire_shape() {
        let body = CreateIndividualOrder {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
            challenges: "time".to_string(),
            goals: "focus".to_string(),
            service_id: "svc_1".to_string(),
            service_title: "Coaching".to_string(),
            price: dec!(150.5),
            payment_status: PaymentStatus::PayLater,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["serviceId"], "svc_1");
        assert_eq!(json["serviceTitle"], "Coaching");
        assert_eq!(json["paymentStatus"], "pay_later");
        assert_eq!(json["price"], 150.5);
        assert!(json["phone"].is_null());
    }

    #[test]
    fn test_order_response_parsing() {
        let json = r#"{
            "_id": "665f0c",
            "transactionRef": "TXN-42",
            "serviceId": "svc_1",
            "serviceTitle": "Coaching",
            "price": 200,
            "name": "Ada",
            "email": "ada@example.com",
            "paymentStatus": "pending",
            "createdAt": "2024-05-01T10:00:00.000Z",
            "__v": 0
        }"#;
        let order: IndividualOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, "665f0c");
        assert_eq!(order.transaction_ref, "TXN-42");
        assert_eq!(order.price, dec!(200));
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert!(order.created_at.is_some());
        assert!(order.phone.is_none());
    }

    #[test]
    fn test_payment_status_from_str() {
        assert_eq!("pay-later".parse::<PaymentStatus>().unwrap(), PaymentStatus::PayLater);
        assert_eq!(" Paid ".parse::<PaymentStatus>().unwrap(), PaymentStatus::Paid);
        assert!("refunded".parse::<PaymentStatus>().is_err());
        assert_eq!(PaymentStatus::PayLater.to_string(), "pay_later");
    }
}
