//! A small JSON client for the transaction API.
//!
//! Failed requests are logged and reported as `None` rather than as errors, so callers only
//! have to decide what an absent response means for them.

use std::time::Duration;

use reqwest::{
    Method, StatusCode,
    header::{CONTENT_TYPE, HeaderName, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    Error, TransactionId, TransactionPage, TransactionPatch, TransactionPayload,
    endpoints::{self, format_endpoint},
    transaction::{Category, Transaction},
};

/// How long a request may take before it is abandoned.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The content type sent when a call does not set one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// The options of a single request.
#[derive(Debug, Clone, PartialEq)]
pub struct RestCallParams {
    /// A path relative to the base URL, or an absolute `http(s)://` URL.
    pub url: String,
    /// The JSON body, if any.
    pub payload: Option<serde_json::Value>,
    /// The value of the `Content-Type` header.
    pub content_type: String,
    /// Query string parameters.
    pub params: Vec<(String, String)>,
    /// Extra request headers.
    pub headers: Vec<(String, String)>,
}

impl RestCallParams {
    /// A request to `url` with no body, query or extra headers.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            payload: None,
            content_type: DEFAULT_CONTENT_TYPE.to_owned(),
            params: Vec::new(),
            headers: Vec::new(),
        }
    }

    /// Set the JSON body.
    ///
    /// If `payload` cannot be converted to JSON the request is sent without a body.
    pub fn payload<T: Serialize>(mut self, payload: &T) -> Self {
        match serde_json::to_value(payload) {
            Ok(value) => self.payload = Some(value),
            Err(error) => tracing::warn!("could not serialize payload for {}: {error}", self.url),
        }
        self
    }

    /// Set the `Content-Type` header.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Add a query string parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Add a request header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// A successful response and its decoded body.
#[derive(Debug, Clone, PartialEq)]
pub struct RestResponse<T> {
    /// The HTTP status of the response.
    pub status: StatusCode,
    /// The decoded body. An empty body decodes as JSON `null`.
    pub data: T,
}

/// Sends JSON requests relative to a base URL.
#[derive(Debug, Clone)]
pub struct RestClient {
    base_url: String,
    client: reqwest::Client,
}

impl RestClient {
    /// Create a client for the API at `base_url`.
    ///
    /// # Errors
    /// Returns [Error::HttpClient] if the underlying HTTP client cannot be created.
    pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|error| Error::HttpClient(error.to_string()))?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// The URL that relative request URLs are joined to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The absolute URL for `url`.
    ///
    /// `url` is returned unchanged if the base URL is empty or `url` is already absolute.
    /// Otherwise the two are joined with exactly one `/`.
    pub fn full_url(&self, url: &str) -> String {
        if self.base_url.is_empty() || url.starts_with("http://") || url.starts_with("https://") {
            return url.to_owned();
        }

        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            url.trim_start_matches('/')
        )
    }

    /// Send a `GET` request.
    pub async fn get<T: DeserializeOwned>(&self, params: RestCallParams) -> Option<RestResponse<T>> {
        self.call(Method::GET, params).await
    }

    /// Send a `POST` request.
    pub async fn post<T: DeserializeOwned>(&self, params: RestCallParams) -> Option<RestResponse<T>> {
        self.call(Method::POST, params).await
    }

    /// Send a `PUT` request.
    pub async fn put<T: DeserializeOwned>(&self, params: RestCallParams) -> Option<RestResponse<T>> {
        self.call(Method::PUT, params).await
    }

    /// Send a `PATCH` request.
    pub async fn patch<T: DeserializeOwned>(&self, params: RestCallParams) -> Option<RestResponse<T>> {
        self.call(Method::PATCH, params).await
    }

    /// Send a `DELETE` request.
    pub async fn delete<T: DeserializeOwned>(&self, params: RestCallParams) -> Option<RestResponse<T>> {
        self.call(Method::DELETE, params).await
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        params: RestCallParams,
    ) -> Option<RestResponse<T>> {
        let url = self.full_url(&params.url);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .query(&params.params);

        match HeaderValue::from_str(&params.content_type) {
            Ok(content_type) => request = request.header(CONTENT_TYPE, content_type),
            Err(error) => tracing::warn!("invalid content type for {method} {url}: {error}"),
        }

        for (name, value) in &params.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => request = request.header(name, value),
                _ => tracing::warn!("skipping invalid header {name:?} for {method} {url}"),
            }
        }

        if let Some(payload) = &params.payload {
            match serde_json::to_vec(payload) {
                Ok(body) => request = request.body(body),
                Err(error) => tracing::warn!("could not encode body for {method} {url}: {error}"),
            }
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!("{method} {url} failed: {error}");
                return None;
            }
        };

        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!("{method} {url} failed: {error}");
                return None;
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(error) => {
                tracing::warn!("could not read the response to {method} {url}: {error}");
                return None;
            }
        };

        let body: &[u8] = if body.is_empty() { b"null" } else { &body };

        match serde_json::from_slice(body) {
            Ok(data) => Some(RestResponse { status, data }),
            Err(error) => {
                tracing::warn!("could not decode the response to {method} {url}: {error}");
                None
            }
        }
    }
}

/// The number of transactions requested per page when fetching every transaction.
const FETCH_ALL_PAGE_SIZE: u32 = 100;

/// A [RestClient] bound to the transaction API.
#[derive(Debug, Clone)]
pub struct TransactionRestClient {
    client: RestClient,
}

impl TransactionRestClient {
    /// Create a client for the API at `base_url`, e.g. "http://127.0.0.1:3000/api".
    ///
    /// # Errors
    /// Returns [Error::HttpClient] if the underlying HTTP client cannot be created.
    pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        Ok(Self {
            client: RestClient::new(base_url)?,
        })
    }

    /// The generic client, for requests this type does not wrap.
    pub fn rest_client(&self) -> &RestClient {
        &self.client
    }

    /// The absolute URL of an API route, e.g. "/api/transactions/1".
    pub fn url_for(&self, endpoint: &str) -> String {
        self.client
            .full_url(endpoint.trim_start_matches("/api"))
    }

    /// Get one page of transactions.
    pub async fn list(
        &self,
        category: Option<Category>,
        title: Option<&str>,
        limit: u32,
        skip: u32,
    ) -> Option<TransactionPage> {
        let mut params = RestCallParams::new(self.url_for(endpoints::TRANSACTIONS_API))
            .param("limit", limit)
            .param("skip", skip);
        if let Some(category) = category {
            params = params.param("category", category);
        }
        if let Some(title) = title {
            params = params.param("title", title);
        }

        self.client.get(params).await.map(|response| response.data)
    }

    /// Get every transaction, a page at a time.
    pub async fn list_all(&self) -> Option<Vec<Transaction>> {
        let mut transactions = Vec::new();

        loop {
            let skip = u32::try_from(transactions.len()).unwrap_or(u32::MAX);
            let page = self.list(None, None, FETCH_ALL_PAGE_SIZE, skip).await?;
            let page_len = page.data.len();
            transactions.extend(page.data);

            if page_len == 0 || transactions.len() as u64 >= page.pagination.count {
                return Some(transactions);
            }
        }
    }

    /// Get a single transaction.
    pub async fn get(&self, id: TransactionId) -> Option<Transaction> {
        let url = self.url_for(&format_endpoint(endpoints::TRANSACTION_API, id));

        self.client
            .get(RestCallParams::new(url))
            .await
            .map(|response| response.data)
    }

    /// Register a transaction.
    pub async fn create(&self, payload: &TransactionPayload) -> Option<Transaction> {
        let url = self.url_for(endpoints::TRANSACTIONS_API);

        self.client
            .post(RestCallParams::new(url).payload(payload))
            .await
            .map(|response| response.data)
    }

    /// Replace every field of a transaction.
    pub async fn replace(&self, id: TransactionId, payload: &TransactionPayload) -> Option<Transaction> {
        let url = self.url_for(&format_endpoint(endpoints::TRANSACTION_API, id));

        self.client
            .put(RestCallParams::new(url).payload(payload))
            .await
            .map(|response| response.data)
    }

    /// Change some fields of a transaction.
    pub async fn patch(&self, id: TransactionId, patch: &TransactionPatch) -> Option<Transaction> {
        let url = self.url_for(&format_endpoint(endpoints::TRANSACTION_API, id));

        self.client
            .patch(RestCallParams::new(url).payload(patch))
            .await
            .map(|response| response.data)
    }

    /// Delete a transaction, returns whether the server confirmed the deletion.
    pub async fn delete(&self, id: TransactionId) -> bool {
        let url = self.url_for(&format_endpoint(endpoints::TRANSACTION_API, id));

        self.client
            .delete::<()>(RestCallParams::new(url))
            .await
            .is_some()
    }
}
