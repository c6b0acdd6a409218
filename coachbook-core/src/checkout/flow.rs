//! Drives the checkout view: runs the side effects and feeds their results
//! into the state machine.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use super::callback::CallbackParams;
use super::machine::{CheckoutEvent, CheckoutState};
use super::submission::{OrderSubmitter, PaymentMode, SubmissionOutcome};
use super::verifier::PaymentVerifier;
use crate::api::CheckoutApi;
use crate::cart::CartHolder;
use crate::config::CheckoutConfig;
use crate::error::CheckoutError;
use crate::validation::CheckoutForm;

/// One checkout page instance.
///
/// Every transition is published on a [`watch`] channel, so a renderer
/// holding a [`subscribe`](Self::subscribe) receiver sees the in-flight
/// states (`VerifyingPayment`, `submitting: true`) while a request is
/// outstanding. A submit while one is marked in flight is ignored.
pub struct CheckoutFlow<A> {
    cart: CartHolder,
    submitter: OrderSubmitter<A>,
    verifier: PaymentVerifier<A>,
    state: watch::Sender<CheckoutState>,
    last_form: Option<CheckoutForm>,
}

impl<A: CheckoutApi> CheckoutFlow<A> {
    pub fn new(api: Arc<A>, cart: CartHolder, config: CheckoutConfig) -> Self {
        let (state, _) = watch::channel(CheckoutState::Empty);
        Self {
            submitter: OrderSubmitter::new(api.clone(), cart.clone(), config),
            verifier: PaymentVerifier::new(api, cart.clone()),
            cart,
            state,
            last_form: None,
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> CheckoutState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every state change, including in-flight ones.
    pub fn subscribe(&self) -> watch::Receiver<CheckoutState> {
        self.state.subscribe()
    }

    pub fn cart(&self) -> &CartHolder {
        &self.cart
    }

    /// Enter the page with the query parameters of its URL.
    ///
    /// With a payment reference present the flow publishes
    /// `VerifyingPayment` and verifies the reference before returning.
    /// Mounting again with the same reference repeats the verification and
    /// lands in the same state.
    pub async fn mount(&mut self, callback: &CallbackParams) -> CheckoutState {
        let resolved = CheckoutState::resolve(self.cart.current().await, callback);
        let pending = match &resolved {
            CheckoutState::VerifyingPayment { reference } => Some(reference.clone()),
            _ => None,
        };
        debug!(state = resolved.name(), "Checkout mounted");
        self.state.send_replace(resolved);

        if let Some(reference) = pending {
            let outcome = self
                .verifier
                .verify(&reference, callback.status.as_deref())
                .await;
            transition(&self.state, CheckoutEvent::VerificationCompleted(outcome));
        }
        self.state()
    }

    /// Submit the form from `Form`, or pay later from `Failure`.
    ///
    /// Dropping the returned future before it completes re-enables the
    /// submit control.
    pub async fn submit(&mut self, form: CheckoutForm, mode: PaymentMode) -> CheckoutState {
        let accepted = match &*self.state.borrow() {
            CheckoutState::Form { submitting, .. } => !submitting,
            CheckoutState::Failure { submitting, .. } => {
                !submitting && mode == PaymentMode::PayLater
            }
            _ => false,
        };
        if !accepted {
            debug!(state = self.state.borrow().name(), mode = ?mode, "Submit ignored");
            return self.state();
        }

        transition(&self.state, CheckoutEvent::SubmitRequested);
        let in_flight = InFlight::new(&self.state);
        let result = self.submitter.submit(&form, mode).await;
        in_flight.disarm();
        self.last_form = Some(form);

        let event = match result {
            Ok(SubmissionOutcome::PayLater { order, redirect }) => {
                self.last_form = None;
                CheckoutEvent::PayLaterConfirmed {
                    transaction_ref: order.transaction_ref,
                    redirect,
                }
            }
            Ok(SubmissionOutcome::RedirectToGateway { order, session }) => {
                CheckoutEvent::GatewayReady {
                    authorization_url: session.authorization_url,
                    reference: order.transaction_ref,
                }
            }
            Err(CheckoutError::Validation(errors)) => CheckoutEvent::ValidationFailed(errors),
            Err(CheckoutError::NoServiceSelected) => CheckoutEvent::CartMissing,
            Err(e) => CheckoutEvent::SubmissionFailed(e.user_message()),
        };
        transition(&self.state, event);
        self.state()
    }

    /// From `Failure`, book with the form entered earlier in this flow and
    /// pay later.
    ///
    /// Only a flow that submitted a form itself remembers one. After a fresh
    /// load on the gateway's return URL there is none, and this goes back to
    /// the form like [`retry`](Self::retry). To pay later straight from
    /// `Failure` in that case, collect the form and call
    /// [`submit`](Self::submit) with [`PaymentMode::PayLater`].
    pub async fn pay_later_instead(&mut self) -> CheckoutState {
        match self.last_form.clone() {
            Some(form) => self.submit(form, PaymentMode::PayLater).await,
            None => {
                info!("No form entered in this checkout, returning to the form");
                self.retry().await
            }
        }
    }

    /// From `Failure`, go back to the form (or `Empty` if the cart is gone).
    pub async fn retry(&mut self) -> CheckoutState {
        let item = self.cart.current().await;
        transition(&self.state, CheckoutEvent::Retry { item });
        self.state()
    }
}

fn transition(state: &watch::Sender<CheckoutState>, event: CheckoutEvent) {
    state.send_modify(|current| {
        let previous = std::mem::replace(current, CheckoutState::Empty);
        *current = previous.apply(event);
    });
}

/// Clears `submitting` if the submission future is dropped mid-request.
struct InFlight<'a> {
    state: Option<&'a watch::Sender<CheckoutState>>,
}

impl<'a> InFlight<'a> {
    fn new(state: &'a watch::Sender<CheckoutState>) -> Self {
        Self { state: Some(state) }
    }

    fn disarm(mut self) {
        self.state = None;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(state) = self.state.take() {
            debug!("Submission dropped before completion");
            transition(state, CheckoutEvent::SubmitCancelled);
        }
    }
}
