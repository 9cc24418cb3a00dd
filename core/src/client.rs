//! Stateless HTTP request builder and response parser for the remote API.
//!
//! # Design
//! `RemoteClient` holds only the normalized base URL and the authorization
//! header value, and carries no mutable state between calls. Each operation
//! is split into a `build_*` method that produces an `HttpRequest` and a
//! `parse_*` method that consumes an `HttpResponse`. The facades in
//! `blocking` and `asynchronous` run the round-trip in between.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::config::{ClientConfig, Credentials};
use crate::endpoint::{build_url, normalize_base, Params};
use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Query keys that control pagination or rendering. They are removed from
/// record-list filters before the request is built.
pub const PAGINATION_KEYS: [&str; 4] = ["page", "page_size", "format", "_fields"];

/// `page_size` value asking the server for the whole collection at once.
pub const UNPAGINATED_PAGE_SIZE: &str = "0";

const APPLICATION_JSON: &str = "application/json";

/// Synchronous, stateless client core for the remote API.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    base_url: String,
    authorization: String,
}

impl RemoteClient {
    pub fn new(base_url: &str, credentials: &Credentials) -> Self {
        Self {
            base_url: normalize_base(base_url).to_string(),
            authorization: credentials.authorization(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url, &config.credentials())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str, params: &Params) -> String {
        build_url(&self.base_url, path, params)
    }

    fn request(&self, method: HttpMethod, path: &str, params: &Params) -> HttpRequest {
        HttpRequest {
            method,
            url: self.url(path, params),
            headers: vec![
                ("Accept".to_string(), APPLICATION_JSON.to_string()),
                ("Authorization".to_string(), self.authorization.clone()),
            ],
            body: None,
        }
    }

    pub fn build_retrieve(&self, path: &str, params: &Params) -> HttpRequest {
        self.request(HttpMethod::Get, path, params)
    }

    pub fn build_submit<P: Serialize + ?Sized>(
        &self,
        path: &str,
        params: &Params,
        payload: &P,
    ) -> Result<HttpRequest, ClientError> {
        let mut req = self.request(HttpMethod::Post, path, params);
        let body = serde_json::to_string(payload).map_err(|e| ClientError::Encode {
            url: req.url.clone(),
            cause: e.to_string(),
        })?;
        req.headers
            .push(("Content-Type".to_string(), APPLICATION_JSON.to_string()));
        req.body = Some(body);
        Ok(req)
    }

    pub fn build_remove(&self, path: &str, params: &Params) -> HttpRequest {
        self.request(HttpMethod::Delete, path, params)
    }

    /// GET `path` with pagination controls replaced by the unpaginated
    /// sentinel. See [`record_params`].
    pub fn build_records(&self, path: &str, filters: &Params) -> HttpRequest {
        self.build_retrieve(path, &record_params(filters))
    }

    pub fn build_version(&self) -> HttpRequest {
        self.build_retrieve("version", &Params::new())
    }

    pub fn build_currencies(&self) -> HttpRequest {
        let mut params = Params::new();
        params.insert("universe".to_string(), "1".to_string());
        self.build_retrieve("currencies", &params)
    }

    pub fn parse_retrieve<T: DeserializeOwned>(
        &self,
        url: &str,
        response: HttpResponse,
    ) -> Result<T, ClientError> {
        check_status(url, &response)?;
        serde_json::from_slice(&response.body).map_err(|e| ClientError::Decode {
            url: url.to_string(),
            cause: e.to_string(),
            body: Some(response.text()),
        })
    }

    pub fn parse_submit<T: DeserializeOwned>(
        &self,
        url: &str,
        response: HttpResponse,
    ) -> Result<T, ClientError> {
        self.parse_retrieve(url, response)
    }

    /// Only the status is checked; the body is never read.
    pub fn parse_remove(&self, url: &str, response: HttpResponse) -> Result<(), ClientError> {
        check_status(url, &response)
    }
}

/// Drop the pagination and format controls from `filters` and force
/// `page_size` to [`UNPAGINATED_PAGE_SIZE`].
pub fn record_params(filters: &Params) -> Params {
    let mut params: Params = filters
        .iter()
        .filter(|(key, _)| !PAGINATION_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    params.insert("page_size".to_string(), UNPAGINATED_PAGE_SIZE.to_string());
    params
}

/// Log a failed operation. The error itself still goes to the caller.
pub(crate) fn report_failure(err: &ClientError) {
    warn!(url = err.url(), status = ?err.status(), error = %err, "remote call failed");
}

/// Map non-success status codes to `ClientError::Transport`.
fn check_status(url: &str, response: &HttpResponse) -> Result<(), ClientError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ClientError::Transport {
        url: url.to_string(),
        status: Some(response.status),
        cause: response.text(),
    })
}
