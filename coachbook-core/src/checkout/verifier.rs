//! Payment callback verification.
//!
//! Verification is a function of the reference alone and may be repeated
//! (the gateway redirect can be reloaded). It fails closed: a transport or
//! API error is reported exactly like a declined payment.

use std::sync::Arc;

use coachbook_sdk::objects::OrderSummary;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::callback::status_hint_is_success;
use crate::api::CheckoutApi;
use crate::cart::CartHolder;

/// Order details shown on the success view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub transaction_ref: String,
    pub order: Option<OrderSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationOutcome {
    Success(Receipt),
    Failure { reference: String },
}

impl VerificationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, VerificationOutcome::Success(_))
    }
}

pub struct PaymentVerifier<A> {
    api: Arc<A>,
    cart: CartHolder,
}

impl<A: CheckoutApi> PaymentVerifier<A> {
    pub fn new(api: Arc<A>, cart: CartHolder) -> Self {
        Self { api, cart }
    }

    /// Verify `reference` with the API.
    ///
    /// Success (reported by the API, or hinted by the gateway's `status`
    /// parameter on a successful response) clears the cart. Any error yields
    /// `Failure` and leaves the cart untouched.
    pub async fn verify(&self, reference: &str, status_hint: Option<&str>) -> VerificationOutcome {
        let verification = match self.api.verify_payment(reference).await {
            Ok(verification) => verification,
            Err(e) => {
                warn!(reference = %reference, error = %e, "Payment verification failed");
                return VerificationOutcome::Failure {
                    reference: reference.to_owned(),
                };
            }
        };

        if verification.status.is_success() || status_hint_is_success(status_hint) {
            self.cart.clear_cart().await;
            info!(reference = %reference, "Payment verified");
            VerificationOutcome::Success(Receipt {
                transaction_ref: verification
                    .order
                    .as_ref()
                    .and_then(|order| order.transaction_ref.clone())
                    .unwrap_or_else(|| reference.to_owned()),
                order: verification.order,
            })
        } else {
            info!(
                reference = %reference,
                status = ?verification.status,
                "Payment not confirmed"
            );
            VerificationOutcome::Failure {
                reference: reference.to_owned(),
            }
        }
    }
}
