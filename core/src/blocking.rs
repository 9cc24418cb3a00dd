//! Typed operations over a blocking transport.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::client::{report_failure, RemoteClient};
use crate::endpoint::Params;
use crate::error::ClientError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Currency, Record, Version};

/// Runs each `RemoteClient` operation as one blocking round-trip.
///
/// Holds no per-call state, so a shared instance can serve concurrent
/// callers as long as the transport can.
#[derive(Debug, Clone)]
pub struct BlockingClient<T> {
    core: RemoteClient,
    transport: T,
}

impl<T: Transport> BlockingClient<T> {
    pub fn new(core: RemoteClient, transport: T) -> Self {
        Self { core, transport }
    }

    pub fn core(&self) -> &RemoteClient {
        &self.core
    }

    fn exchange(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        debug!(method = request.method.as_str(), url = %request.url, "dispatching request");
        let url = request.url.clone();
        self.transport
            .execute(request)
            .map_err(|e| ClientError::Transport {
                url,
                status: None,
                cause: e.to_string(),
            })
            .inspect_err(report_failure)
    }

    fn fetch<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<R, ClientError> {
        let url = request.url.clone();
        let response = self.exchange(request)?;
        self.core
            .parse_retrieve(&url, response)
            .inspect_err(report_failure)
    }

    pub fn retrieve<R: DeserializeOwned>(&self, path: &str) -> Result<R, ClientError> {
        self.retrieve_with(path, &Params::new())
    }

    pub fn retrieve_with<R: DeserializeOwned>(
        &self,
        path: &str,
        params: &Params,
    ) -> Result<R, ClientError> {
        self.fetch(self.core.build_retrieve(path, params))
    }

    pub fn submit<P, R>(&self, path: &str, payload: &P) -> Result<R, ClientError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.submit_with(path, &Params::new(), payload)
    }

    pub fn submit_with<P, R>(&self, path: &str, params: &Params, payload: &P) -> Result<R, ClientError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self
            .core
            .build_submit(path, params, payload)
            .inspect_err(report_failure)?;
        let url = request.url.clone();
        let response = self.exchange(request)?;
        self.core
            .parse_submit(&url, response)
            .inspect_err(report_failure)
    }

    pub fn remove(&self, path: &str) -> Result<(), ClientError> {
        self.remove_with(path, &Params::new())
    }

    pub fn remove_with(&self, path: &str, params: &Params) -> Result<(), ClientError> {
        let request = self.core.build_remove(path, params);
        let url = request.url.clone();
        let response = self.exchange(request)?;
        self.core
            .parse_remove(&url, response)
            .inspect_err(report_failure)
    }

    /// Fetch the whole collection at `path` in one request. Pagination keys
    /// in `filters` are ignored.
    pub fn get_records<A>(&self, path: &str, filters: &Params) -> Result<Vec<A>, ClientError>
    where
        A: Record + DeserializeOwned,
    {
        self.fetch(self.core.build_records(path, filters))
    }

    pub fn version(&self) -> Result<Version, ClientError> {
        self.fetch(self.core.build_version())
    }

    pub fn currencies(&self) -> Result<Vec<Currency>, ClientError> {
        self.fetch(self.core.build_currencies())
    }
}
