//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::{AdvertsApi, AuthApi, DonationsApi, PostsApi, SubscriptionsApi};
use crate::error::{ApiError, ApiResult};
use crate::tokens::{FileTokenStore, MemoryTokenStore, TokenStore};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, warn, Span};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// Query string pairs; repeated keys are sent as separate pairs
pub type Query = Vec<(&'static str, String)>;

/// Percent-encode one caller-supplied path segment
///
/// Slashes, `?`, `#` and `%` are escaped so an ID can never reach another
/// route. Empty, `.` and `..` IDs are rejected.
pub(crate) fn path_segment(id: &str) -> ApiResult<String> {
    if id.is_empty() || id == "." || id == ".." {
        return Err(ApiError::validation(format!("Invalid identifier: {id:?}")));
    }
    let mut url = Url::parse("http://segment.invalid/").map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| ApiError::InvalidUrl("URL cannot carry a path".into()))?
        .clear()
        .push(id);
    Ok(url.path().trim_start_matches('/').to_string())
}

/// Advertboard API client
///
/// Wraps one configured `reqwest` client and the token store. Every request
/// carries the stored access token as a bearer credential when one exists.
/// Failures are never retried.
#[derive(Clone)]
pub struct AdvertboardClient {
    inner: Client,
    config: Arc<ClientConfig>,
    tokens: Arc<dyn TokenStore>,
}

impl AdvertboardClient {
    /// Create a new client with configuration from the environment
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client, persisting tokens where the configuration says
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        let tokens: Arc<dyn TokenStore> = match config.token_file {
            Some(ref path) => Arc::new(FileTokenStore::new(path)),
            None => Arc::new(MemoryTokenStore::new()),
        };
        Self::with_store(config, tokens)
    }

    /// Create a new client over an explicit token store
    pub fn with_store(config: ClientConfig, tokens: Arc<dyn TokenStore>) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("advertboard-api-client/", env!("CARGO_PKG_VERSION"))),
        );

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        Ok(Self {
            inner,
            config: Arc::new(config),
            tokens,
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Token store shared with the session
    #[must_use]
    pub fn tokens(&self) -> Arc<dyn TokenStore> {
        Arc::clone(&self.tokens)
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access advert endpoints
    #[must_use]
    pub fn adverts(&self) -> AdvertsApi {
        AdvertsApi::new(self.clone())
    }

    /// Access advert endpoints through the post shape
    #[must_use]
    pub fn posts(&self) -> PostsApi {
        PostsApi::new(self.clone())
    }

    /// Access authentication endpoints
    #[must_use]
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.clone())
    }

    /// Access subscription endpoints
    #[must_use]
    pub fn subscriptions(&self) -> SubscriptionsApi {
        SubscriptionsApi::new(self.clone())
    }

    /// Access donation endpoints
    #[must_use]
    pub fn donations(&self) -> DonationsApi {
        DonationsApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Low-level HTTP methods
    // -------------------------------------------------------------------------

    /// Perform a GET request
    #[instrument(skip(self), fields(request_id))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request(Method::GET, path, &[], Option::<&()>::None).await
    }

    /// Perform a GET request with query parameters
    #[instrument(skip(self, query), fields(request_id))]
    pub async fn get_with_query<T: DeserializeOwned>(&self, path: &str, query: &Query) -> ApiResult<T> {
        self.request(Method::GET, path, query, Option::<&()>::None).await
    }

    /// Perform a POST request with a JSON body
    #[instrument(skip(self, body), fields(request_id))]
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ApiResult<T> {
        self.request(Method::POST, path, &[], Some(body)).await
    }

    /// Perform a POST request without a body
    #[instrument(skip(self), fields(request_id))]
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request(Method::POST, path, &[], Option::<&()>::None).await
    }

    /// Perform a PUT request with a JSON body
    #[instrument(skip(self, body), fields(request_id))]
    pub async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ApiResult<T> {
        self.request(Method::PUT, path, &[], Some(body)).await
    }

    /// Perform a DELETE request
    #[instrument(skip(self), fields(request_id))]
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request(Method::DELETE, path, &[], Option::<&()>::None).await
    }

    /// Resolve a backend path against the base URL
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Execute exactly one request
    async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<&B>,
    ) -> ApiResult<T> {
        let request_id = Uuid::new_v4().to_string();
        Span::current().record("request_id", request_id.as_str());
        let url = self.url(path);

        let mut request = self
            .inner
            .request(method.clone(), &url)
            .header(X_REQUEST_ID, &request_id);

        match self.tokens.access_token() {
            Ok(Some(token)) => {
                request = request.header(AUTHORIZATION, format!("Bearer {token}"));
            }
            Ok(None) => {}
            Err(e) => {
                warn!(request_id = %request_id, error = %e, "Token store unreadable, sending without credentials");
            }
        }

        if !query.is_empty() {
            request = request.query(query);
        }

        if let Some(b) = body {
            request = request.json(b);
        }

        let start = Instant::now();
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    request_id = %request_id,
                    method = %method,
                    url = %url,
                    error = %e,
                    "Request failed without a response"
                );
                return Err(ApiError::Request(e));
            }
        };

        let result = self.handle_response(response).await;
        debug!(
            request_id = %request_id,
            method = %method,
            url = %url,
            elapsed_ms = start.elapsed().as_millis(),
            ok = result.is_ok(),
            "Request completed"
        );
        result
    }

    /// Handle HTTP response and deserialize
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> ApiResult<T> {
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            let body = if text.trim().is_empty() { "null" } else { text.as_str() };
            Ok(serde_json::from_str(body)?)
        } else {
            let error = ApiError::from_response(status.as_u16(), &text);
            debug!(status = status.as_u16(), kind = %error.kind(), "Backend reported failure");
            Err(error)
        }
    }
}

impl std::fmt::Debug for AdvertboardClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdvertboardClient")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}
