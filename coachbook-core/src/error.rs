use coachbook_sdk::client::ClientError;
use thiserror::Error;

use crate::validation::ValidationErrors;

/// Message shown for any network or API failure during submission.
pub const GENERIC_SUBMISSION_ERROR: &str =
    "We couldn't complete your booking. Please try again.";

/// Errors surfaced by the checkout flow.
///
/// Every variant is recoverable: the user can correct the form, retry, or
/// navigate away.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Submission attempted with an empty cart. No request was sent.
    #[error("no service selected")]
    NoServiceSelected,

    /// Client-side validation failed. No request was sent.
    #[error("invalid checkout form: {0}")]
    Validation(ValidationErrors),

    #[error("order creation failed: {0}")]
    OrderCreation(#[source] ClientError),

    /// The order exists server-side in `pending`; the client does not
    /// reconcile it.
    #[error("payment initialization failed for {reference}: {source}")]
    PaymentInitialization {
        reference: String,
        #[source]
        source: ClientError,
    },
}

impl CheckoutError {
    /// Text suitable for showing next to the submit button.
    pub fn user_message(&self) -> String {
        match self {
            CheckoutError::NoServiceSelected => "No service selected".to_string(),
            CheckoutError::Validation(_) => "Please fix the highlighted fields".to_string(),
            CheckoutError::OrderCreation(_) | CheckoutError::PaymentInitialization { .. } => {
                GENERIC_SUBMISSION_ERROR.to_string()
            }
        }
    }
}
