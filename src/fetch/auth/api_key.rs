use crate::fetch::client::HttpClient;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};

/// An [`HttpClient`] wrapper that injects an API key as an HTTP header.
///
/// Header name and value are validated once at construction, so request
/// execution itself cannot fail on a malformed credential.
pub struct ApiKey<C> {
    inner: C,
    header_name: HeaderName,
    value: HeaderValue,
}

impl<C> ApiKey<C> {
    /// Wraps `inner` so that every outgoing request carries
    /// `<header_name>: <key>`.
    pub fn named(inner: C, header_name: &str, key: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(header_name.as_bytes())
            .with_context(|| format!("invalid API key header name `{header_name}`"))?;
        let value = HeaderValue::from_str(key)
            .context("API key contains bytes not allowed in an HTTP header value")?;
        Ok(Self {
            inner,
            header_name: name,
            value,
        })
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for ApiKey<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.headers_mut()
            .insert(self.header_name.clone(), self.value.clone());
        self.inner.execute(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::BasicClient;

    #[test]
    fn test_named_accepts_plain_key() {
        let wrapped = ApiKey::named(BasicClient::new(), "apiKey", "secret-123");
        assert!(wrapped.is_ok());
    }

    #[test]
    fn test_named_rejects_invalid_header_name() {
        let wrapped = ApiKey::named(BasicClient::new(), "api key", "secret");
        assert!(wrapped.is_err());
    }

    #[test]
    fn test_named_rejects_control_bytes_in_key() {
        let wrapped = ApiKey::named(BasicClient::new(), "apiKey", "bad\nkey");
        assert!(wrapped.is_err());
    }
}
