//! Admin API client (admin console → Coachbook API).
//!
//! All requests carry the admin session token as a bearer credential.

use reqwest::Client;
use url::Url;

use super::{ClientError, expect_success, normalize_base, parse_response};
use crate::objects::admin::{ListOrdersQuery, UpdatePaymentStatus};
use crate::objects::order::{IndividualOrder, PaymentStatus};

/// Typed HTTP client for individual-order administration.
#[derive(Debug, Clone)]
pub struct AdminClient {
    http: Client,
    base_url: Url,
    token: String,
}

impl AdminClient {
    /// Create a new `AdminClient`.
    ///
    /// * `api_base` – root of the API, including its path prefix.
    /// * `token` – bearer token obtained from the admin login.
    pub fn new(api_base: Url, token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: normalize_base(api_base),
            token: token.into(),
        }
    }

    /// Replace the default `reqwest::Client` with a custom one.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    fn order_url(&self, id: &str) -> Result<Url, ClientError> {
        Ok(self
            .base_url
            .join(&format!("individual-orders/{}", urlencoding::encode(id)))?)
    }

    /// `GET /individual-orders` – list orders with optional filters.
    pub async fn list_orders(
        &self,
        query: &ListOrdersQuery,
    ) -> Result<Vec<IndividualOrder>, ClientError> {
        let url = self.base_url.join("individual-orders")?;

        let resp = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .query(&query.clamped())
            .send()
            .await?;

        parse_response(resp).await
    }

    /// `GET /individual-orders/{id}` – fetch one order.
    pub async fn get_order(&self, id: &str) -> Result<IndividualOrder, ClientError> {
        let resp = self
            .http
            .get(self.order_url(id)?)
            .bearer_auth(&self.token)
            .send()
            .await?;

        parse_response(resp).await
    }

    /// `PATCH /individual-orders/{id}` – change an order's payment status.
    pub async fn update_payment_status(
        &self,
        id: &str,
        payment_status: PaymentStatus,
    ) -> Result<IndividualOrder, ClientError> {
        let resp = self
            .http
            .patch(self.order_url(id)?)
            .bearer_auth(&self.token)
            .json(&UpdatePaymentStatus { payment_status })
            .send()
            .await?;

        parse_response(resp).await
    }

    /// `DELETE /individual-orders/{id}` – remove an order.
    pub async fn delete_order(&self, id: &str) -> Result<(), ClientError> {
        let resp = self
            .http
            .delete(self.order_url(id)?)
            .bearer_auth(&self.token)
            .send()
            .await?;

        expect_success(resp).await
    }
}
