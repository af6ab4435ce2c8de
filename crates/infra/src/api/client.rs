//! API client with retry and envelope handling
//!
//! Every call goes through the fixed-delay retry helper. Only transport
//! failures, timeouts, 5xx and 429 are retried; envelope validation happens
//! once, after the retry loop.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use greenloop_common::resilience::policies::RetryClassified;
use greenloop_common::{ApiError, ApiResult, RetryConfig, RetryExecutor, RetryNotifier};
use greenloop_domain::constants::UPLOAD_FIELD_NAME;
use greenloop_domain::{Config, ImageFile};
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};
use url::Url;

use super::auth::AccessTokenProvider;
use super::errors::{from_status, parse_envelope, require_data};
use crate::http::HttpClient;

/// Configuration for API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for API (e.g., "https://api.greenloop.app")
    pub base_url: String,
    /// Timeout for each HTTP attempt
    pub timeout: Duration,
    pub user_agent: Option<String>,
    pub retry: RetryConfig,
}

impl ApiClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(greenloop_domain::constants::DEFAULT_TIMEOUT_SECS),
            user_agent: None,
            retry: RetryConfig::default(),
        }
    }
}

impl TryFrom<&Config> for ApiClientConfig {
    type Error = ApiError;

    fn try_from(config: &Config) -> ApiResult<Self> {
        config.validate().map_err(|err| ApiError::config(err.to_string()))?;
        let retry = RetryConfig::builder()
            .max_retries(config.retry.max_retries)
            .delay(config.retry.delay())
            .notify(config.retry.notify)
            .build()
            .map_err(|err| ApiError::config(err.to_string()))?;

        Ok(Self {
            base_url: config.api.base_url.clone(),
            timeout: config.api.timeout(),
            user_agent: Some(config.api.user_agent.clone()),
            retry,
        })
    }
}

/// Whether a call carries the bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Public,
    Bearer,
}

/// Request body variants; rebuilt for every attempt
enum Payload<'a> {
    Empty,
    Json(serde_json::Value),
    Image(&'a ImageFile),
}

/// API client shared by every feature gateway
pub struct ApiClient {
    http: HttpClient,
    base_url: Url,
    auth: Arc<dyn AccessTokenProvider>,
    retry: RetryExecutor<RetryClassified>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("retry", self.retry.config())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the base URL is invalid or the HTTP
    /// client cannot be created
    pub fn new(config: ApiClientConfig, auth: Arc<dyn AccessTokenProvider>) -> ApiResult<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        config.retry.validate().map_err(|err| ApiError::config(err.to_string()))?;

        let mut http = HttpClient::builder().timeout(config.timeout);
        if let Some(agent) = config.user_agent {
            http = http.user_agent(agent);
        }

        Ok(Self {
            http: http.build()?,
            base_url,
            auth,
            retry: RetryExecutor::new(config.retry, RetryClassified),
        })
    }

    /// Route retry events to `notifier` (only used when retry notify is on)
    pub fn with_notifier(self, notifier: Arc<dyn RetryNotifier>) -> Self {
        Self { retry: self.retry.with_notifier(notifier), ..self }
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET` returning `data`
    #[instrument(skip(self, query), fields(path = %path))]
    pub async fn get<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        auth: AuthMode,
        default_message: &str,
    ) -> ApiResult<R> {
        let (status, body) = self.call(Method::GET, path, query, Payload::Empty, auth).await?;
        require_data(parse_envelope(status, &body, default_message)?, status)
    }

    /// `POST` a JSON body, returning `data`
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
        auth: AuthMode,
        default_message: &str,
    ) -> ApiResult<R> {
        let payload = Payload::Json(encode(body)?);
        let (status, body) = self.call(Method::POST, path, &[], payload, auth).await?;
        require_data(parse_envelope(status, &body, default_message)?, status)
    }

    /// `PUT` a JSON body, returning `data`
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn put<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &T,
        auth: AuthMode,
        default_message: &str,
    ) -> ApiResult<R> {
        let payload = Payload::Json(encode(body)?);
        let (status, body) = self.call(Method::PUT, path, &[], payload, auth).await?;
        require_data(parse_envelope(status, &body, default_message)?, status)
    }

    /// `PUT` whose response carries no meaningful `data`
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn put_ack<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
        auth: AuthMode,
        default_message: &str,
    ) -> ApiResult<()> {
        let payload = Payload::Json(encode(body)?);
        let (status, body) = self.call(Method::PUT, path, &[], payload, auth).await?;
        acknowledge(status, &body, default_message)
    }

    /// `DELETE`; an empty 2xx body counts as success
    #[instrument(skip(self), fields(path = %path))]
    pub async fn delete(&self, path: &str, auth: AuthMode, default_message: &str) -> ApiResult<()> {
        let (status, body) = self.call(Method::DELETE, path, &[], Payload::Empty, auth).await?;
        acknowledge(status, &body, default_message)
    }

    /// Multipart upload of one image under the `image` field
    #[instrument(skip(self, image), fields(path = %path, file = %image.file_name, bytes = image.bytes.len()))]
    pub async fn upload<R: DeserializeOwned>(
        &self,
        path: &str,
        image: &ImageFile,
        auth: AuthMode,
        default_message: &str,
    ) -> ApiResult<R> {
        let (status, body) = self.call(Method::POST, path, &[], Payload::Image(image), auth).await?;
        require_data(parse_envelope(status, &body, default_message)?, status)
    }

    /// Run one logical request through the retry helper
    ///
    /// Returns the 2xx status and body; any other status is normalized into
    /// an error inside the loop so it can be classified for retry.
    async fn call(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        payload: Payload<'_>,
        auth: AuthMode,
    ) -> ApiResult<(u16, String)> {
        let token = match auth {
            AuthMode::Bearer => Some(self.auth.access_token().await?),
            AuthMode::Public => None,
        };
        let url = self.url(path, query)?;
        debug!(%method, url = %url.path(), "API request");

        let result = self
            .retry
            .execute(|| {
                let request = self.build_request(&method, &url, token.as_deref(), &payload);
                async move {
                    let response = self.http.send(request?).await?;
                    let status = response.status().as_u16();
                    let body = response
                        .text()
                        .await
                        .map_err(|err| body_read_error(&err, self.http.timeout()))?;

                    if (200..300).contains(&status) {
                        Ok((status, body))
                    } else {
                        Err(from_status(status, &body))
                    }
                }
            })
            .await;

        result.map_err(|err| {
            let err = err.into_source();
            debug!(error_code = %err.code, status = err.status, message = %err.message, "API request failed");
            err
        })
    }

    fn build_request(
        &self,
        method: &Method,
        url: &Url,
        token: Option<&str>,
        payload: &Payload<'_>,
    ) -> ApiResult<RequestBuilder> {
        let mut request = self.http.request(method.clone(), url.clone());
        if let Some(token) = token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        Ok(match payload {
            Payload::Empty => request,
            Payload::Json(body) => request.json(body),
            Payload::Image(image) => {
                let part = Part::bytes(image.bytes.clone())
                    .file_name(image.file_name.clone())
                    .mime_str(&image.mime_type)
                    .map_err(|err| ApiError::config(format!("Invalid image type: {err}")))?;
                request.multipart(Form::new().part(UPLOAD_FIELD_NAME, part))
            }
        })
    }

    /// Join `path` onto the base URL and append non-empty query pairs
    fn url(&self, path: &str, query: &[(&str, String)]) -> ApiResult<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}{path}"))
            .map_err(|err| ApiError::config(format!("Invalid request URL for {path}: {err}")))?;

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

fn parse_base_url(raw: &str) -> ApiResult<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|err| ApiError::config(format!("Invalid base URL '{raw}': {err}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ApiError::config(format!("Unsupported URL scheme '{other}' in base URL"))),
    }
}

fn encode<T: Serialize + ?Sized>(body: &T) -> ApiResult<serde_json::Value> {
    serde_json::to_value(body)
        .map_err(|err| ApiError::unknown(format!("Failed to serialize request body: {err}")))
}

/// A deadline hit while streaming the body is still a timeout
fn body_read_error(err: &reqwest::Error, timeout: Duration) -> ApiError {
    if err.is_timeout() {
        ApiError::timeout(timeout)
    } else {
        ApiError::network(format!("Failed to read response: {err}"))
    }
}

fn acknowledge(status: u16, body: &str, default_message: &str) -> ApiResult<()> {
    if body.trim().is_empty() {
        return Ok(());
    }
    parse_envelope::<serde_json::Value>(status, body, default_message).map(|_| ())
}

/// Percent-encode an id for use as a path segment
pub fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

/// Builder for API client
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiClientConfig>,
    auth: Option<Arc<dyn AccessTokenProvider>>,
    notifier: Option<Arc<dyn RetryNotifier>>,
}

impl ApiClientBuilder {
    /// Set the API configuration
    pub fn config(mut self, config: ApiClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the authentication provider
    pub fn auth(mut self, auth: Arc<dyn AccessTokenProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Receive retry and give-up events (only when retry notify is on)
    pub fn notifier(mut self, notifier: Arc<dyn RetryNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns error if required fields are missing or client creation fails
    pub fn build(self) -> ApiResult<ApiClient> {
        let config =
            self.config.ok_or_else(|| ApiError::config("API configuration not set"))?;
        let auth = self.auth.ok_or_else(|| ApiError::config("Auth provider not set"))?;

        let client = ApiClient::new(config, auth)?;
        Ok(match self.notifier {
            Some(notifier) => client.with_notifier(notifier),
            None => client,
        })
    }
}
