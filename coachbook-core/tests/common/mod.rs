#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use coachbook_core::{CartItem, CheckoutApi, CheckoutConfig, CheckoutForm};
use coachbook_sdk::client::{ClientError, StatusCode};
use coachbook_sdk::objects::{
    CreateIndividualOrder, IndividualOrder, InitializePayment, OrderSummary, PaymentSession,
    PaymentVerification, VerificationStatus,
};
use rust_decimal_macros::dec;
use tokio::sync::Notify;
use url::Url;
use uuid::Uuid;

/// One recorded request against the fake API.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateOrder(CreateIndividualOrder),
    InitializePayment(InitializePayment),
    VerifyPayment(String),
}

/// In-memory stand-in for the collaborator API.
///
/// Records every call and answers from scripted responses.
pub struct FakeCheckoutApi {
    calls: Mutex<Vec<Call>>,
    fail_create: bool,
    fail_initialize: bool,
    verification: Option<VerificationStatus>,
    gate: Option<Arc<Notify>>,
}

impl FakeCheckoutApi {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_create: false,
            fail_initialize: false,
            verification: Some(VerificationStatus::Success),
            gate: None,
        }
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn failing_initialize(mut self) -> Self {
        self.fail_initialize = true;
        self
    }

    /// `None` makes verification error at the transport level.
    pub fn verifying(mut self, status: Option<VerificationStatus>) -> Self {
        self.verification = status;
        self
    }

    /// Every call waits for one `notify_one` on `gate` before answering.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created_orders(&self) -> Vec<CreateIndividualOrder> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::CreateOrder(order) => Some(order),
                _ => None,
            })
            .collect()
    }

    pub fn initialized_payments(&self) -> Vec<InitializePayment> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::InitializePayment(payment) => Some(payment),
                _ => None,
            })
            .collect()
    }

    async fn pass_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn server_error() -> ClientError {
    ClientError::Api {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: r#"{"message":"boom"}"#.to_string(),
    }
}

#[async_trait]
impl CheckoutApi for FakeCheckoutApi {
    async fn create_order(
        &self,
        order: &CreateIndividualOrder,
    ) -> Result<IndividualOrder, ClientError> {
        self.pass_gate().await;
        self.record(Call::CreateOrder(order.clone()));
        if self.fail_create {
            return Err(server_error());
        }
        Ok(IndividualOrder {
            id: Uuid::new_v4().simple().to_string(),
            transaction_ref: format!("TXN-{}", Uuid::new_v4().simple()),
            service_id: order.service_id.clone(),
            service_title: order.service_title.clone(),
            price: order.price,
            name: order.name.clone(),
            email: order.email.clone(),
            phone: order.phone.clone(),
            challenges: order.challenges.clone(),
            goals: order.goals.clone(),
            payment_status: order.payment_status,
            created_at: None,
        })
    }

    async fn initialize_payment(
        &self,
        payment: &InitializePayment,
    ) -> Result<PaymentSession, ClientError> {
        self.pass_gate().await;
        self.record(Call::InitializePayment(payment.clone()));
        if self.fail_initialize {
            return Err(server_error());
        }
        Ok(PaymentSession {
            authorization_url: format!("https://gateway.example/pay/{}", payment.reference),
            reference: Some(payment.reference.clone()),
            access_code: None,
        })
    }

    async fn verify_payment(&self, reference: &str) -> Result<PaymentVerification, ClientError> {
        self.pass_gate().await;
        self.record(Call::VerifyPayment(reference.to_owned()));
        let Some(status) = self.verification.clone() else {
            return Err(server_error());
        };
        let order = status.is_success().then(|| OrderSummary {
            transaction_ref: Some(reference.to_owned()),
            ..Default::default()
        });
        Ok(PaymentVerification { status, order })
    }
}

pub fn cart_item() -> CartItem {
    CartItem {
        id: "svc_clarity".to_string(),
        title: "Clarity Session".to_string(),
        price: dec!(150.00),
    }
}

pub fn valid_form() -> CheckoutForm {
    CheckoutForm {
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone: Some("+44 20 7946 0958".to_string()),
        challenges: "Scattered priorities".to_string(),
        goals: "A focused quarter".to_string(),
    }
}

pub fn config() -> CheckoutConfig {
    CheckoutConfig::new(Url::parse("https://coach.example/checkout").unwrap())
}
