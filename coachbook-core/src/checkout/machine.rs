//! Checkout view state machine.
//!
//! Pure transitions over [`CheckoutState`]. Side effects (network calls,
//! cart mutation) happen in [`CheckoutFlow`](super::CheckoutFlow), which
//! feeds their results back in as [`CheckoutEvent`]s.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::callback::CallbackParams;
use super::submission::Redirect;
use super::verifier::{Receipt, VerificationOutcome};
use crate::cart::CartItem;
use crate::validation::ValidationErrors;

/// Mutually exclusive render targets of the checkout page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CheckoutState {
    /// Nothing to check out.
    Empty,
    Form {
        item: CartItem,
        errors: ValidationErrors,
        /// A submission is in flight; the submit control is disabled.
        submitting: bool,
        submit_error: Option<String>,
    },
    VerifyingPayment {
        reference: String,
    },
    /// Pay-now order created; the browser leaves for the gateway.
    Redirecting {
        authorization_url: String,
        reference: String,
    },
    Success {
        receipt: Receipt,
    },
    Failure {
        reference: Option<String>,
        submitting: bool,
        submit_error: Option<String>,
    },
    PayLaterSuccess {
        transaction_ref: String,
        redirect: Redirect,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutEvent {
    SubmitRequested,
    /// The in-flight submission was dropped before it produced a result.
    SubmitCancelled,
    ValidationFailed(ValidationErrors),
    SubmissionFailed(String),
    /// Submission found the cart empty.
    CartMissing,
    PayLaterConfirmed {
        transaction_ref: String,
        redirect: Redirect,
    },
    GatewayReady {
        authorization_url: String,
        reference: String,
    },
    VerificationCompleted(VerificationOutcome),
    /// Leave `Failure`; `item` is the current cart content.
    Retry {
        item: Option<CartItem>,
    },
}

impl CheckoutState {
    /// Initial state, in priority order: a payment reference means
    /// verification (the cart may already be gone), then an empty cart, then
    /// the form.
    pub fn resolve(cart: Option<CartItem>, callback: &CallbackParams) -> Self {
        if let Some(reference) = callback.reference() {
            return CheckoutState::VerifyingPayment {
                reference: reference.to_owned(),
            };
        }
        match cart {
            None => CheckoutState::Empty,
            Some(item) => CheckoutState::form(item),
        }
    }

    pub fn form(item: CartItem) -> Self {
        CheckoutState::Form {
            item,
            errors: ValidationErrors::default(),
            submitting: false,
            submit_error: None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CheckoutState::Empty => "empty",
            CheckoutState::Form { .. } => "form",
            CheckoutState::VerifyingPayment { .. } => "verifying_payment",
            CheckoutState::Redirecting { .. } => "redirecting",
            CheckoutState::Success { .. } => "success",
            CheckoutState::Failure { .. } => "failure",
            CheckoutState::PayLaterSuccess { .. } => "pay_later_success",
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(
            self,
            CheckoutState::Form {
                submitting: true,
                ..
            } | CheckoutState::Failure {
                submitting: true,
                ..
            }
        )
    }

    /// Apply `event`. Events that make no sense in the current state are
    /// ignored and the state is returned unchanged.
    pub fn apply(self, event: CheckoutEvent) -> Self {
        use CheckoutEvent as E;
        use CheckoutState as S;

        match (self, event) {
            (S::Form { item, .. }, E::SubmitRequested) => S::Form {
                item,
                errors: ValidationErrors::default(),
                submitting: true,
                submit_error: None,
            },
            (S::Failure { reference, .. }, E::SubmitRequested) => S::Failure {
                reference,
                submitting: true,
                submit_error: None,
            },

            (S::Form { item, .. }, E::SubmitCancelled) => S::form(item),
            (S::Failure { reference, .. }, E::SubmitCancelled) => S::Failure {
                reference,
                submitting: false,
                submit_error: None,
            },

            (S::Form { item, .. }, E::ValidationFailed(errors)) => S::Form {
                item,
                errors,
                submitting: false,
                submit_error: None,
            },
            // Failure has no editable form to annotate.
            (S::Failure { reference, .. }, E::ValidationFailed(errors)) => S::Failure {
                reference,
                submitting: false,
                submit_error: Some(errors.to_string()),
            },
            (S::Form { .. }, E::CartMissing) => S::Empty,
            (S::Failure { reference, .. }, E::CartMissing) => S::Failure {
                reference,
                submitting: false,
                submit_error: Some("No service selected".to_string()),
            },

            (S::Form { item, .. }, E::SubmissionFailed(message)) => S::Form {
                item,
                errors: ValidationErrors::default(),
                submitting: false,
                submit_error: Some(message),
            },
            (S::Failure { reference, .. }, E::SubmissionFailed(message)) => S::Failure {
                reference,
                submitting: false,
                submit_error: Some(message),
            },

            (
                S::Form { .. } | S::Failure { .. },
                E::PayLaterConfirmed {
                    transaction_ref,
                    redirect,
                },
            ) => S::PayLaterSuccess {
                transaction_ref,
                redirect,
            },
            (
                S::Form { .. },
                E::GatewayReady {
                    authorization_url,
                    reference,
                },
            ) => S::Redirecting {
                authorization_url,
                reference,
            },

            // Last response wins if a verification is repeated.
            (
                S::VerifyingPayment { .. } | S::Success { .. } | S::Failure { .. },
                E::VerificationCompleted(outcome),
            ) => match outcome {
                VerificationOutcome::Success(receipt) => S::Success { receipt },
                VerificationOutcome::Failure { reference } => S::Failure {
                    reference: Some(reference),
                    submitting: false,
                    submit_error: None,
                },
            },

            (S::Failure { .. }, E::Retry { item }) => match item {
                Some(item) => S::form(item),
                None => S::Empty,
            },

            (state, event) => {
                debug!(state = state.name(), event = ?event, "Ignoring checkout event");
                state
            }
        }
    }
}
