use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client, StatusCode};
use shared::{
    domain::{PageResult, Photo},
    error::FetchError,
    protocol::{ApiErrorBody, ApiPhoto, SearchPhotosResponse},
};
use tracing::{debug, warn};
use url::Url;

use crate::source::PhotoSource;

pub const DEFAULT_API_BASE_URL: &str = "https://api.unsplash.com/";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

const ACCEPT_VERSION_HEADER: &str = "Accept-Version";
const ACCEPT_VERSION: &str = "v1";
const TOTAL_COUNT_HEADER: &str = "x-total";
const RATE_LIMIT_MARKER: &str = "rate limit";
const MAX_ERROR_DETAIL_CHARS: usize = 200;

#[derive(Debug, Clone)]
pub struct HttpPhotoSourceConfig {
    pub base_url: String,
    pub access_key: Option<String>,
    pub request_timeout: Duration,
}

impl Default for HttpPhotoSourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            access_key: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    Search,
    Listing,
}

impl Endpoint {
    fn for_query(query: &str) -> Self {
        if query.is_empty() {
            Endpoint::Listing
        } else {
            Endpoint::Search
        }
    }

    fn path(&self) -> &'static str {
        match self {
            Endpoint::Search => "search/photos",
            Endpoint::Listing => "photos",
        }
    }
}

/// [`PhotoSource`] backed by the remote photo API over HTTPS.
///
/// A blank query lists curated photos; anything else goes to keyword search.
/// The access key is only checked when a page is requested, so a client can
/// be built before credentials are known.
pub struct HttpPhotoSource {
    http: Client,
    base_url: Url,
    access_key: Option<String>,
}

impl HttpPhotoSource {
    pub fn new(config: HttpPhotoSourceConfig) -> Result<Self> {
        let mut raw_base = config.base_url.trim().to_string();
        if !raw_base.ends_with('/') {
            raw_base.push('/');
        }
        let base_url = Url::parse(&raw_base)
            .with_context(|| format!("invalid photo API base url '{}'", config.base_url))?;
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("failed to build photo API http client")?;

        Ok(Self {
            http,
            base_url,
            access_key: config.access_key,
        })
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, FetchError> {
        self.base_url.join(endpoint.path()).map_err(|e| {
            FetchError::unknown_with_source(
                format!("failed to build {} url", endpoint.path()),
                e,
            )
        })
    }
}

#[async_trait]
impl PhotoSource for HttpPhotoSource {
    async fn fetch_page(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<PageResult, FetchError> {
        if page == 0 || page_size == 0 {
            return Err(FetchError::unknown(format!(
                "invalid pagination: page {page}, page size {page_size}"
            )));
        }
        let Some(access_key) = self
            .access_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
        else {
            warn!("photo api: no access key configured");
            return Err(FetchError::Unauthorized);
        };

        let query = query.trim();
        let endpoint = Endpoint::for_query(query);
        let url = self.endpoint_url(endpoint)?;
        debug!(endpoint = endpoint.path(), query, page, page_size, "photo api: fetching page");

        let mut request = self
            .http
            .get(url)
            .header(AUTHORIZATION, format!("Client-ID {access_key}"))
            .header(ACCEPT_VERSION_HEADER, ACCEPT_VERSION)
            .query(&[("page", page), ("per_page", page_size)]);
        if endpoint == Endpoint::Search {
            request = request.query(&[("query", query)]);
        }

        let response = request.send().await.map_err(classify_transport_error)?;
        let status = response.status();
        let total_count = response
            .headers()
            .get(TOTAL_COUNT_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok());
        let body = response.text().await.map_err(classify_transport_error)?;

        if !status.is_success() {
            let err = classify_status(status, &body);
            warn!(status = status.as_u16(), query, page, kind = err.kind().as_str(), "photo api: request rejected");
            return Err(err);
        }

        let result = match endpoint {
            Endpoint::Search => {
                let parsed: SearchPhotosResponse = serde_json::from_str(&body).map_err(|e| {
                    FetchError::unknown_with_source(format!("malformed search response: {e}"), e)
                })?;
                PageResult {
                    has_more: page < parsed.total_pages,
                    photos: parsed.results.into_iter().map(Photo::from).collect(),
                }
            }
            Endpoint::Listing => {
                let parsed: Vec<ApiPhoto> = serde_json::from_str(&body).map_err(|e| {
                    FetchError::unknown_with_source(format!("malformed listing response: {e}"), e)
                })?;
                PageResult {
                    has_more: listing_has_more(page, page_size, total_count, parsed.is_empty()),
                    photos: parsed.into_iter().map(Photo::from).collect(),
                }
            }
        };

        debug!(
            endpoint = endpoint.path(),
            page,
            returned = result.photos.len(),
            has_more = result.has_more,
            "photo api: page fetched"
        );
        Ok(result)
    }
}

/// The listing endpoint only reports a total through a header. Without it we
/// keep paging until an empty page comes back.
fn listing_has_more(page: u32, page_size: u32, total_count: Option<u64>, empty_page: bool) -> bool {
    if empty_page {
        return false;
    }
    match total_count {
        Some(total) => {
            let total_pages = total.div_ceil(u64::from(page_size));
            u64::from(page) < total_pages
        }
        None => true,
    }
}

/// Maps a non-2xx response onto the error taxonomy.
pub fn classify_status(status: StatusCode, body: &str) -> FetchError {
    match status {
        StatusCode::UNAUTHORIZED => FetchError::Unauthorized,
        StatusCode::TOO_MANY_REQUESTS => FetchError::RateLimited,
        StatusCode::FORBIDDEN if body.to_ascii_lowercase().contains(RATE_LIMIT_MARKER) => {
            FetchError::RateLimited
        }
        _ => FetchError::unknown(format!(
            "photo API returned {status}: {}",
            error_detail(body)
        )),
    }
}

/// Failures that never produced an HTTP response are network problems;
/// everything else is unclassified.
pub fn classify_transport_error(err: reqwest::Error) -> FetchError {
    if err.is_connect() || err.is_timeout() || (err.is_request() && err.status().is_none()) {
        warn!(error = %err, "photo api: no response from server");
        return FetchError::NetworkUnreachable;
    }
    FetchError::unknown_with_source(format!("photo API transport error: {err}"), err)
}

fn error_detail(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        if !parsed.errors.is_empty() {
            return parsed.errors.join("; ");
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    trimmed.chars().take(MAX_ERROR_DETAIL_CHARS).collect()
}

#[cfg(test)]
#[path = "tests/http_source_tests.rs"]
mod tests;
