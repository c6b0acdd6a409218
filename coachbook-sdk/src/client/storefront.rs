//! Storefront API client (public site → Coachbook API).
//!
//! Unauthenticated endpoints used by the checkout flow: order creation, the
//! payment gateway bridge and the service catalog.

use reqwest::Client;
use url::Url;

use super::{ClientError, normalize_base, parse_response};
use crate::objects::order::{CreateIndividualOrder, IndividualOrder};
use crate::objects::payment::{InitializePayment, PaymentSession, PaymentVerification};
use crate::objects::service::Service;

/// Typed HTTP client for the public storefront endpoints.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    http: Client,
    base_url: Url,
}

impl StorefrontClient {
    /// Create a new `StorefrontClient`.
    ///
    /// * `api_base` – root of the API, including its path prefix
    ///   (e.g. `https://site.example/api`).
    pub fn new(api_base: Url) -> Self {
        Self {
            http: Client::new(),
            base_url: normalize_base(api_base),
        }
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `POST /individual-orders` – persist a new order.
    pub async fn create_order(
        &self,
        payload: &CreateIndividualOrder,
    ) -> Result<IndividualOrder, ClientError> {
        let url = self.base_url.join("individual-orders")?;

        let resp = self.http.post(url).json(payload).send().await?;

        parse_response(resp).await
    }

    /// `POST /payments/initialize` – request a hosted payment page session.
    pub async fn initialize_payment(
        &self,
        payload: &InitializePayment,
    ) -> Result<PaymentSession, ClientError> {
        let url = self.base_url.join("payments/initialize")?;

        let resp = self.http.post(url).json(payload).send().await?;

        parse_response(resp).await
    }

    /// `GET /payments/verify/{reference}` – ask the API to confirm a
    /// transaction with the gateway.
    pub async fn verify_payment(
        &self,
        reference: &str,
    ) -> Result<PaymentVerification, ClientError> {
        let url = self.base_url.join(&format!(
            "payments/verify/{}",
            urlencoding::encode(reference)
        ))?;

        let resp = self.http.get(url).send().await?;

        parse_response(resp).await
    }

    /// `GET /services` – list the public service catalog.
    pub async fn list_services(&self) -> Result<Vec<Service>, ClientError> {
        let url = self.base_url.join("services")?;

        let resp = self.http.get(url).send().await?;

        parse_response(resp).await
    }

    /// `GET /services/{id}` – fetch a single service.
    pub async fn get_service(&self, id: &str) -> Result<Service, ClientError> {
        let url = self
            .base_url
            .join(&format!("services/{}", urlencoding::encode(id)))?;

        let resp = self.http.get(url).send().await?;

        parse_response(resp).await
    }
}
