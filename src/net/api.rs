//! Authenticated REST gateway.
//!
//! Every call the client makes goes through `ApiClient`: relative `/api/...`
//! paths are joined onto the configured backend origin, and the stored
//! session token rides along as `Authorization: Bearer <token>`.
//!
//! ERROR HANDLING
//! ==============
//! No retries, no timeouts, no backoff. A dead connection surfaces as
//! `ApiError::Network`; any non-2xx answer surfaces as `ApiError::Status`
//! with the server's `detail` string when it sent one.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use reqwest::cookie::Jar;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::{ClientConfig, normalize_origin};
use crate::error::{ApiError, parse_detail};
use crate::state::store::{TOKEN_KEY, TokenStore};

/// Query string pairs, encoded by reqwest.
pub type Query<'a> = &'a [(&'a str, String)];

/// Join `url` onto `origin` when it is a rooted path; pass absolute URLs
/// through untouched.
///
/// # Errors
///
/// Returns `ApiError::InvalidUrl` for anything else (bare relative paths,
/// other schemes).
pub fn resolve_url(origin: &str, url: &str) -> Result<String, ApiError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        return Ok(url.to_owned());
    }
    if url.starts_with('/') {
        return Ok(format!("{}{url}", origin.trim_end_matches('/')));
    }
    Err(ApiError::InvalidUrl(url.to_owned()))
}

/// `Bearer <token>` header value.
///
/// # Errors
///
/// Returns an error if the token contains bytes illegal in a header.
pub fn bearer_header(token: &str) -> Result<HeaderValue, ApiError> {
    let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
    value.set_sensitive(true);
    Ok(value)
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    origin: String,
    store: Arc<dyn TokenStore>,
    jar: Option<Arc<Jar>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").field("origin", &self.origin).finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Build a gateway for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ClientConfig, store: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        let jar = config.send_cookies.then(|| Arc::new(Jar::default()));
        let mut builder = reqwest::Client::builder();
        if let Some(jar) = &jar {
            builder = builder.cookie_provider(Arc::clone(jar));
        }
        let http = builder.build().map_err(ApiError::HttpClientBuild)?;
        Ok(Self { http, origin: normalize_origin(&config.backend_url), store, jar })
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    /// Drop the stored token and expire any `session_token` cookie the jar
    /// picked up, so neither credential reaches the next request.
    ///
    /// # Errors
    ///
    /// Returns an error if the token store cannot be written, or if the
    /// origin is not a URL while a cookie jar is in use.
    pub fn clear_session(&self) -> Result<(), ApiError> {
        self.store.clear()?;
        if let Some(jar) = &self.jar {
            let origin = Url::parse(&self.origin).map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", self.origin)))?;
            jar.add_cookie_str(&format!("{TOKEN_KEY}=; Max-Age=0; Path=/"), &origin);
        }
        Ok(())
    }

    /// Current session token, if one is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the token store cannot be read.
    pub fn token(&self) -> Result<Option<String>, ApiError> {
        Ok(self.store.load()?)
    }

    /// Start a request with the origin and auth header already applied.
    ///
    /// # Errors
    ///
    /// Returns an error for an unresolvable URL, an unreadable token store,
    /// or a token that is not a valid header value.
    pub fn builder(&self, method: Method, url: &str) -> Result<RequestBuilder, ApiError> {
        let resolved = resolve_url(&self.origin, url)?;
        let token = self.token()?;
        tracing::debug!(%method, url = %resolved, authenticated = token.is_some(), "api request");

        let builder = self.http.request(method, resolved);
        Ok(match token {
            Some(token) => builder.header(AUTHORIZATION, bearer_header(&token)?),
            None => builder,
        })
    }

    /// Build a complete request without sending it.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::builder`]; also fails if the body cannot be encoded.
    pub fn prepare<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        query: Query<'_>,
        body: Option<&B>,
    ) -> Result<reqwest::Request, ApiError> {
        let mut builder = self.builder(method, url)?;
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        builder.build().map_err(ApiError::RequestBuild)
    }

    /// Send a prepared builder, returning the raw response whatever its
    /// status.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Network` if no response arrived.
    pub async fn execute(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let request = builder.build().map_err(ApiError::RequestBuild)?;
        self.dispatch(request).await
    }

    /// Send a request and return the raw response whatever its status.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built or sent.
    pub async fn send_raw<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        let request = self.prepare(method, url, &[], body)?;
        self.dispatch(request).await
    }

    /// Send a request and decode a successful JSON body.
    ///
    /// An empty success body decodes as `null`.
    ///
    /// # Errors
    ///
    /// Returns `Network` if no response arrived, `Status` for a non-2xx
    /// answer, or `Decode` if the body is not the expected JSON.
    pub async fn call<B, T>(&self, method: Method, url: &str, query: Query<'_>, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.prepare(method, url, query, body)?;
        let response = self.dispatch(request).await?;
        read_json(response).await
    }

    /// `GET url`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        self.call::<Value, T>(Method::GET, url, &[], None).await
    }

    /// `GET url?query`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn get_query<T: DeserializeOwned>(&self, url: &str, query: Query<'_>) -> Result<T, ApiError> {
        self.call::<Value, T>(Method::GET, url, query, None).await
    }

    /// `POST url` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call(Method::POST, url, &[], Some(body)).await
    }

    /// `POST url` without a body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn post_empty<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        self.call::<Value, T>(Method::POST, url, &[], None).await
    }

    /// `POST url?query` without a body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn post_query<T: DeserializeOwned>(&self, url: &str, query: Query<'_>) -> Result<T, ApiError> {
        self.call::<Value, T>(Method::POST, url, query, None).await
    }

    /// `PUT url` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn put_json<B, T>(&self, url: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call(Method::PUT, url, &[], Some(body)).await
    }

    /// `DELETE url`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn delete_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        self.call::<Value, T>(Method::DELETE, url, &[], None).await
    }

    async fn dispatch(&self, request: reqwest::Request) -> Result<Response, ApiError> {
        self.http.execute(request).await.map_err(|e| {
            tracing::warn!(error = %e, "api request failed to reach server");
            ApiError::Network(e)
        })
    }
}

/// Turn a response into decoded JSON, mapping non-2xx to `ApiError::Status`.
///
/// # Errors
///
/// Returns `Status` for a non-2xx answer, `Network` if the body cannot be
/// read, or `Decode` if it is not the expected JSON.
pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let url = response.url().path().to_owned();
    let text = response.text().await.map_err(ApiError::Network)?;

    if !status.is_success() {
        let detail = parse_detail(&text);
        tracing::warn!(status = status.as_u16(), %url, detail = ?detail, "api request rejected");
        return Err(ApiError::Status { status: status.as_u16(), detail });
    }

    if text.trim().is_empty() {
        return Ok(serde_json::from_value(Value::Null)?);
    }
    Ok(serde_json::from_str(&text)?)
}

/// Encode a path segment supplied by a caller (ids, periods).
pub(crate) fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}
