//! HTTP clients for the Coachbook API.
//!
//! Gated behind the `client` cargo feature so downstream crates that only
//! need the shared types do not pull in `reqwest`.

mod admin;
mod storefront;

pub use admin::AdminClient;
pub use reqwest::StatusCode;
pub use storefront::StorefrontClient;

use url::Url;

/// Errors produced by the SDK HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, TLS, connection reset, …).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("api error: status {status}, body: {body}")]
    Api { status: StatusCode, body: String },

    /// Response body could not be deserialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The base URL could not be joined with the endpoint path.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

/// Make sure relative endpoint paths join *under* the API base path.
///
/// `https://site.example/api` would otherwise lose its `api` segment on
/// `join("individual-orders")`.
fn normalize_base(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Api { status, body });
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ClientError::Json)
}

async fn expect_success(resp: reqwest::Response) -> Result<(), ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Api { status, body });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_keeps_api_prefix() {
        let base = normalize_base(Url::parse("https://site.example/api").unwrap());
        assert_eq!(
            base.join("individual-orders").unwrap().as_str(),
            "https://site.example/api/individual-orders"
        );

        let base = normalize_base(Url::parse("https://site.example/api/").unwrap());
        assert_eq!(
            base.join("payments/verify/T%201").unwrap().as_str(),
            "https://site.example/api/payments/verify/T%201"
        );
    }
}
