//! Turns the cart item and the checkout form into a persisted order.

use std::sync::Arc;
use std::time::Duration;

use coachbook_sdk::objects::{
    CreateIndividualOrder, IndividualOrder, InitializePayment, PaymentMetadata, PaymentSession,
    PaymentStatus,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::CheckoutApi;
use crate::cart::{CartHolder, CartItem};
use crate::config::CheckoutConfig;
use crate::error::CheckoutError;
use crate::validation::{CheckoutForm, validate_form};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    /// Create a `pending` order and go through the payment gateway.
    PayNow,
    /// Create a `pay_later` order; payment is collected out of band.
    PayLater,
}

impl PaymentMode {
    pub fn initial_status(self) -> PaymentStatus {
        match self {
            PaymentMode::PayNow => PaymentStatus::Pending,
            PaymentMode::PayLater => PaymentStatus::PayLater,
        }
    }
}

/// Deferred navigation the rendering layer performs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    pub to: String,
    pub after: Duration,
}

#[derive(Debug, Clone)]
pub enum SubmissionOutcome {
    /// Pay-later order created and the cart cleared.
    PayLater {
        order: IndividualOrder,
        redirect: Redirect,
    },
    /// Pending order created; send the browser to `session.authorization_url`.
    /// The cart is kept until the gateway confirms payment.
    RedirectToGateway {
        order: IndividualOrder,
        session: PaymentSession,
    },
}

impl SubmissionOutcome {
    pub fn order(&self) -> &IndividualOrder {
        match self {
            SubmissionOutcome::PayLater { order, .. }
            | SubmissionOutcome::RedirectToGateway { order, .. } => order,
        }
    }
}

pub struct OrderSubmitter<A> {
    api: Arc<A>,
    cart: CartHolder,
    config: CheckoutConfig,
}

impl<A: CheckoutApi> OrderSubmitter<A> {
    pub fn new(api: Arc<A>, cart: CartHolder, config: CheckoutConfig) -> Self {
        Self { api, cart, config }
    }

    /// Submit the checkout.
    ///
    /// Fails without touching the network when the cart is empty or the
    /// form does not validate.
    pub async fn submit(
        &self,
        form: &CheckoutForm,
        mode: PaymentMode,
    ) -> Result<SubmissionOutcome, CheckoutError> {
        let item = self
            .cart
            .current()
            .await
            .ok_or(CheckoutError::NoServiceSelected)?;
        validate_form(form).map_err(CheckoutError::Validation)?;

        let request = build_order_request(&item, form, mode);
        let order = self
            .api
            .create_order(&request)
            .await
            .map_err(|e| {
                warn!(service_id = %item.id, mode = ?mode, error = %e, "Order creation failed");
                CheckoutError::OrderCreation(e)
            })?;

        info!(
            order_id = %order.id,
            reference = %order.transaction_ref,
            status = %order.payment_status,
            "Order created"
        );

        match mode {
            PaymentMode::PayLater => {
                self.cart.clear_cart().await;
                Ok(SubmissionOutcome::PayLater {
                    order,
                    redirect: Redirect {
                        to: self.config.pay_later_redirect.clone(),
                        after: self.config.pay_later_delay,
                    },
                })
            }
            PaymentMode::PayNow => {
                let payment = InitializePayment {
                    email: request.email.clone(),
                    amount: item.price,
                    reference: order.transaction_ref.clone(),
                    callback_url: self
                        .config
                        .callback_url_for(&order.transaction_ref)
                        .to_string(),
                    metadata: PaymentMetadata {
                        order_id: order.id.clone(),
                        service_title: item.title.clone(),
                        customer_name: request.name.clone(),
                    },
                };
                let session = match self.api.initialize_payment(&payment).await {
                    Ok(session) => session,
                    Err(e) => {
                        // The order stays pending server-side.
                        warn!(
                            reference = %order.transaction_ref,
                            error = %e,
                            "Payment initialization failed"
                        );
                        return Err(CheckoutError::PaymentInitialization {
                            reference: order.transaction_ref,
                            source: e,
                        });
                    }
                };
                info!(reference = %order.transaction_ref, "Redirecting to payment gateway");
                Ok(SubmissionOutcome::RedirectToGateway { order, session })
            }
        }
    }
}

fn build_order_request(
    item: &CartItem,
    form: &CheckoutForm,
    mode: PaymentMode,
) -> CreateIndividualOrder {
    CreateIndividualOrder {
        name: form.name.trim().to_owned(),
        email: form.email.trim().to_owned(),
        phone: form.phone().map(str::to_owned),
        challenges: form.challenges.trim().to_owned(),
        goals: form.goals.trim().to_owned(),
        service_id: item.id.clone(),
        service_title: item.title.clone(),
        price: item.price,
        payment_status: mode.initial_status(),
    }
}
