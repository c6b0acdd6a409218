//! The collaborator API as seen by the checkout flow.
//!
//! [`CheckoutApi`] is the seam between the flow and the network. The
//! production implementation is [`StorefrontClient`]; tests substitute an
//! in-memory fake.

use async_trait::async_trait;
use coachbook_sdk::client::{ClientError, StorefrontClient};
use coachbook_sdk::objects::{
    CreateIndividualOrder, IndividualOrder, InitializePayment, PaymentSession,
    PaymentVerification,
};

#[async_trait]
pub trait CheckoutApi: Send + Sync {
    async fn create_order(
        &self,
        order: &CreateIndividualOrder,
    ) -> Result<IndividualOrder, ClientError>;

    async fn initialize_payment(
        &self,
        payment: &InitializePayment,
    ) -> Result<PaymentSession, ClientError>;

    async fn verify_payment(&self, reference: &str) -> Result<PaymentVerification, ClientError>;
}

#[async_trait]
impl CheckoutApi for StorefrontClient {
    async fn create_order(
        &self,
        order: &CreateIndividualOrder,
    ) -> Result<IndividualOrder, ClientError> {
        StorefrontClient::create_order(self, order).await
    }

    async fn initialize_payment(
        &self,
        payment: &InitializePayment,
    ) -> Result<PaymentSession, ClientError> {
        StorefrontClient::initialize_payment(self, payment).await
    }

    async fn verify_payment(&self, reference: &str) -> Result<PaymentVerification, ClientError> {
        StorefrontClient::verify_payment(self, reference).await
    }
}
