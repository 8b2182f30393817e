// Hand-crafted async HTTP client for the Masthead client API.
//
// Base path: /clientApi/
// Auth: X-API-TOKEN header

use std::future::Future;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::Error;
use crate::model::{ApiErrorDetail, Envelope, ListEnvelope, Pagination};

/// Hard upper bound on sequential page fetches, in case a misbehaving
/// server keeps reporting a total it never delivers.
const MAX_PAGES: u32 = 1000;

/// Probe shape for responses where no payload is expected (delete). Only
/// the error fields matter; anything else is ignored.
#[derive(serde::Deserialize)]
struct ErrorProbe {
    #[serde(default)]
    error: Option<ApiErrorDetail>,
    #[serde(default)]
    message: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the Masthead client API.
///
/// Holds an immutable base URL and a `reqwest::Client` carrying the
/// `X-API-TOKEN` default header and the fixed request timeout. One call
/// maps to one request: no retries, no backoff, no caching. Safe to share
/// across tasks; nothing here serializes access beyond what reqwest does.
pub struct MastheadClient {
    http: reqwest::Client,
    base_url: Url,
}

impl MastheadClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client from an explicit configuration.
    ///
    /// Injects `X-API-TOKEN` as a sensitive default header on every
    /// request. `Content-Type: application/json` is set per-request on
    /// bodied calls.
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut token_value = HeaderValue::from_str(config.token.expose_secret()).map_err(|e| {
            Error::Authentication {
                message: format!("invalid API token header value: {e}"),
            }
        })?;
        token_value.set_sensitive(true);
        headers.insert("X-API-TOKEN", token_value);

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("masthead-api/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        let base_url = Self::normalize_base_url(&config.base_url);

        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &Url, http: reqwest::Client) -> Self {
        let base_url = Self::normalize_base_url(base_url);
        Self { http, base_url }
    }

    /// Ensure the base URL ends with a single trailing slash so relative
    /// joins of `clientApi/...` paths behave.
    fn normalize_base_url(raw: &Url) -> Url {
        let mut url = raw.clone();
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        url
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"clientApi/user/list"`) onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Self::handle_value(resp).await
    }

    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<(Vec<T>, Option<Pagination>), Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        Self::handle_list(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        Self::handle_value(resp).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        Self::handle_value(resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        Self::handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    /// Status gate: exactly 200 passes. The service uses 200 for every
    /// successful operation; the rest of the 2xx range is not accepted.
    /// Anything else carries the raw body verbatim.
    async fn read_ok_body(resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();
        let body = resp.text().await?;

        if status != reqwest::StatusCode::OK {
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }

    /// Decode a single-value envelope. Two gates, in order: the body must
    /// parse as the envelope shape, then the envelope's own error field
    /// must be empty.
    async fn handle_value<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let body = Self::read_ok_body(resp).await?;

        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body,
            })?;

        envelope.into_result()
    }

    /// Decode a collection envelope; same two gates, list shape.
    async fn handle_list<T: DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<(Vec<T>, Option<Pagination>), Error> {
        let body = Self::read_ok_body(resp).await?;

        let envelope: ListEnvelope<T> =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body,
            })?;

        envelope.into_result()
    }

    /// Handle a response with no expected payload. Success is "no content
    /// required" -- but if the body happens to be an envelope carrying an
    /// error, that error is still surfaced.
    async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
        let body = Self::read_ok_body(resp).await?;

        if let Ok(ErrorProbe {
            error: Some(detail),
            message,
        }) = serde_json::from_str::<ErrorProbe>(&body)
        {
            return Err(Error::Api {
                message: detail
                    .message
                    .or(message)
                    .unwrap_or_else(|| "unspecified error".to_owned()),
                code: detail.code,
            });
        }

        Ok(())
    }

    // ── Pagination aggregator ────────────────────────────────────────

    /// Collect all pages of a list endpoint into a single `Vec<T>`.
    ///
    /// Pages are fetched sequentially starting at 1. Aggregation stops
    /// when a page comes back empty (the backstop), when the accumulated
    /// count reaches the server-reported total, or at [`MAX_PAGES`].
    /// Item order is the server's page order.
    pub(crate) async fn paginate_all<T, F, Fut>(&self, fetch: F) -> Result<Vec<T>, Error>
    where
        F: Fn(u32) -> Fut,
        Fut: Future<Output = Result<(Vec<T>, Option<Pagination>), Error>>,
    {
        let mut all = Vec::new();

        for page in 1..=MAX_PAGES {
            let (items, pagination) = fetch(page).await?;
            if items.is_empty() {
                break;
            }
            all.extend(items);

            // A missing pagination block means a single-page response.
            let total = pagination.map_or(0, |p| p.total);
            if all.len() >= total {
                break;
            }
        }

        Ok(all)
    }
}
