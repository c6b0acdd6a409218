//! Query parameters set by the payment gateway on its redirect back.

use serde::{Deserialize, Serialize};
use url::Url;

/// What the checkout page learns from its own URL.
///
/// The gateway may name the reference either `reference` or `trxref`; both
/// are accepted, `reference` first. Blank values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackParams {
    pub reference: Option<String>,
    /// Gateway status hint. Advisory only.
    pub status: Option<String>,
}

impl CallbackParams {
    pub fn from_url(url: &Url) -> Self {
        Self::from_pairs(url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())))
    }

    /// Parse a raw query string, with or without the leading `?`.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_pairs(
            url::form_urlencoded::parse(query.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned())),
        )
    }

    fn from_pairs(pairs: impl Iterator<Item = (String, String)>) -> Self {
        let mut reference = None;
        let mut trxref = None;
        let mut status = None;
        for (key, value) in pairs {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                "reference" if reference.is_none() => reference = Some(value.to_owned()),
                "trxref" if trxref.is_none() => trxref = Some(value.to_owned()),
                "status" if status.is_none() => status = Some(value.to_owned()),
                _ => {}
            }
        }
        Self {
            reference: reference.or(trxref),
            status,
        }
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn has_reference(&self) -> bool {
        self.reference.is_some()
    }

    /// Whether the gateway's own status hint reports success.
    pub fn status_hint_is_success(&self) -> bool {
        status_hint_is_success(self.status.as_deref())
    }
}

pub(crate) fn status_hint_is_success(hint: Option<&str>) -> bool {
    hint.is_some_and(|status| {
        status.eq_ignore_ascii_case("success") || status.eq_ignore_ascii_case("successful")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_and_trxref_are_interchangeable() {
        let a = CallbackParams::from_query("?reference=txn_123");
        let b = CallbackParams::from_query("trxref=txn_123");
        assert_eq!(a.reference(), Some("txn_123"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_reference_wins_over_trxref() {
        let params = CallbackParams::from_query("trxref=old&reference=new&status=success");
        assert_eq!(params.reference(), Some("new"));
        assert!(params.status_hint_is_success());
    }

    #[test]
    fn test_blank_reference_is_absent() {
        let params = CallbackParams::from_query("reference=%20&status=failed");
        assert!(!params.has_reference());
        assert!(!params.status_hint_is_success());
        assert_eq!(CallbackParams::from_query(""), CallbackParams::default());
    }

    #[test]
    fn test_from_url() -> Result<(), url::ParseError> {
        let url = Url::parse("https://site.example/checkout?trxref=T%2F9&reference=T%2F9")?;
        let params = CallbackParams::from_url(&url);
        assert_eq!(params.reference(), Some("T/9"));
        assert!(params.status.is_none());
        Ok(())
    }
}
