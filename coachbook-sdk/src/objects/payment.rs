//! Payment gateway bridge types.
//!
//! The API proxies a hosted payment page provider. The client asks for a
//! session, redirects the browser to `authorization_url`, and verifies the
//! `reference` once the gateway redirects back.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::order::PaymentStatus;

/// Request body for `POST /payments/initialize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializePayment {
    pub email: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Transaction reference of the order being paid.
    pub reference: String,
    pub callback_url: String,
    pub metadata: PaymentMetadata,
}

/// Free-form metadata forwarded to the gateway with the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMetadata {
    pub order_id: String,
    pub service_title: String,
    pub customer_name: String,
}

/// Hosted payment page session. Used once to redirect the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentSession {
    pub authorization_url: String,
    pub reference: Option<String>,
    pub access_code: Option<String>,
}

#[derive(Deserialize)]
struct FlatSession {
    authorization_url: String,
    #[serde(default)]
    reference: Option<String>,
    #[serde(default)]
    access_code: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SessionRepr {
    Flat(FlatSession),
    Enveloped { data: FlatSession },
}

impl<'de> Deserialize<'de> for PaymentSession {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let flat = match SessionRepr::deserialize(deserializer)? {
            SessionRepr::Flat(flat) => flat,
            SessionRepr::Enveloped { data } => data,
        };
        Ok(Self {
            authorization_url: flat.authorization_url,
            reference: flat.reference,
            access_code: flat.access_code,
        })
    }
}

/// Transaction status reported by `GET /payments/verify/{reference}`.
///
/// Anything the client does not recognise maps to `Unknown`, which is never
/// treated as a successful payment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Success,
    Failure,
    Abandoned,
    Unknown,
}

impl VerificationStatus {
    pub fn from_wire(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "success" | "successful" => VerificationStatus::Success,
            "failure" | "failed" => VerificationStatus::Failure,
            "abandoned" => VerificationStatus::Abandoned,
            _ => VerificationStatus::Unknown,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, VerificationStatus::Success)
    }
}

impl<'de> Deserialize<'de> for VerificationStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&raw))
    }
}

/// Response of `GET /payments/verify/{reference}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentVerification {
    pub status: VerificationStatus,
    #[serde(default)]
    pub order: Option<OrderSummary>,
}

/// Lenient view of the verified order, used for the receipt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    #[serde(default, rename = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub transaction_ref: Option<String>,
    #[serde(default)]
    pub service_title: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_flat_and_enveloped() {
        let flat: PaymentSession =
            serde_json::from_str(r#"{"authorization_url":"https://pay.example/abc"}"#).unwrap();
        assert_eq!(flat.authorization_url, "https://pay.example/abc");
        assert!(flat.reference.is_none());

        let wrapped: PaymentSession = serde_json::from_str(
            r#"{"status":true,"message":"ok","data":{"authorization_url":"https://pay.example/x","access_code":"ac_1","reference":"TXN-1"}}"#,
        )
        .unwrap();
        assert_eq!(wrapped.authorization_url, "https://pay.example/x");
        assert_eq!(wrapped.reference.as_deref(), Some("TXN-1"));
        assert_eq!(wrapped.access_code.as_deref(), Some("ac_1"));
    }

    #[test]
    fn test_verification_status_is_fail_closed() {
        let ok: PaymentVerification = serde_json::from_str(
            r#"{"status":"success","order":{"transactionRef":"txn_123","price":99.5,"paymentStatus":"paid"}}"#,
        )
        .unwrap();
        assert!(ok.status.is_success());
        let order = ok.order.unwrap();
        assert_eq!(order.transaction_ref.as_deref(), Some("txn_123"));
        assert_eq!(order.payment_status, Some(PaymentStatus::Paid));

        for raw in ["failure", "failed", "abandoned", "reversed", ""] {
            assert!(!VerificationStatus::from_wire(raw).is_success(), "{raw}");
        }
        assert_eq!(VerificationStatus::from_wire("reversed"), VerificationStatus::Unknown);
    }

    #[test]
    fn test_initialize_payment_wire_shape() {
        let body = InitializePayment {
            email: "ada@example.com".to_string(),
            amount: Decimal::new(1500, 1),
            reference: "TXN-9".to_string(),
            callback_url: "https://site.example/checkout?reference=TXN-9".to_string(),
            metadata: PaymentMetadata {
                order_id: "665f0c".to_string(),
                service_title: "Coaching".to_string(),
                customer_name: "Ada".to_string(),
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["amount"], 150.0);
        assert_eq!(json["callback_url"], "https://site.example/checkout?reference=TXN-9");
        assert_eq!(json["metadata"]["orderId"], "665f0c");
    }
}
