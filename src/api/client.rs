use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::CourseApi;
use super::error::ApiError;
use super::types::{CoursePage, EnrollmentPage};
use crate::fetch::auth::ApiKey;
use crate::fetch::{BasicClient, HttpClient};

pub const DEFAULT_BASE_URL: &str = "https://developers.teachable.com";

/// Header the Teachable API expects the key in.
const API_KEY_HEADER: &str = "apiKey";

/// Every call filters to enrollments created in the last 30 days.
const LOOKBACK_DAYS: i64 = 30;

/// HTTP-backed implementation of [`CourseApi`].
///
/// The API key is passed in explicitly at construction; the client never
/// reads ambient process state. The `enrolled_in_after` cutoff is computed
/// once per client, so all requests of a run share the same filter.
pub struct TeachableClient<C> {
    http: C,
    base_url: String,
    enrolled_in_after: String,
}

impl TeachableClient<ApiKey<BasicClient>> {
    /// Production client against [`DEFAULT_BASE_URL`], keyed with `api_key`.
    pub fn new(api_key: &str) -> Result<Self> {
        let http = ApiKey::named(BasicClient::new(), API_KEY_HEADER, api_key)?;
        Ok(Self::with_client(http, DEFAULT_BASE_URL, Utc::now()))
    }
}

impl<C: HttpClient> TeachableClient<C> {
    /// Builds a client over an arbitrary transport and base URL, anchoring
    /// the 30-day lookback window at `now`.
    pub fn with_client(http: C, base_url: &str, now: DateTime<Utc>) -> Self {
        let cutoff = now - Duration::days(LOOKBACK_DAYS);
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            // Millisecond precision with a `Z` suffix, the same shape the
            // API documents for timestamps.
            enrolled_in_after: cutoff.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    fn page_url(&self, endpoint: &str, page: u32) -> String {
        format!(
            "{}/v1/{}?page={}&enrolled_in_after={}",
            self.base_url, endpoint, page, self.enrolled_in_after
        )
    }

    /// Fetches one page of `endpoint` and deserializes the body.
    ///
    /// Status handling: 401/403 become [`ApiError::Auth`], any other
    /// non-success status becomes [`ApiError::Http`] with the returned body.
    /// Successful bodies that fail validation become [`ApiError::Parse`].
    async fn fetch_page<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        page: u32,
    ) -> Result<T, ApiError> {
        let url = self.page_url(endpoint, page);
        debug!(%url, "API request");

        let parsed = reqwest::Url::parse(&url).map_err(|e| ApiError::InvalidUrl {
            url: url.clone(),
            message: e.to_string(),
        })?;

        let mut req = reqwest::Request::new(reqwest::Method::GET, parsed);
        req.headers_mut()
            .insert(ACCEPT, HeaderValue::from_static("application/json"));

        let resp = self
            .http
            .execute(req)
            .await
            .map_err(|source| ApiError::Network {
                url: url.clone(),
                source,
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|source| ApiError::Network {
            url: url.clone(),
            source,
        })?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::Auth { status });
        }
        if !status.is_success() {
            return Err(ApiError::Http { status, body });
        }

        serde_json::from_str(&body).map_err(|source| ApiError::Parse { url, source })
    }
}

#[async_trait]
impl<C: HttpClient> CourseApi for TeachableClient<C> {
    async fn course_page(&self, page: u32) -> Result<CoursePage, ApiError> {
        self.fetch_page("courses", page).await
    }

    async fn enrollment_page(
        &self,
        course_id: u64,
        page: u32,
    ) -> Result<EnrollmentPage, ApiError> {
        self.fetch_page(&format!("courses/{course_id}/enrollments"), page)
            .await
    }
}
