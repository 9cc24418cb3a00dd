//! Typed operations over an async transport.
//!
//! Mirrors `blocking::BlockingClient` operation for operation; only the
//! execution model differs.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::client::{report_failure, RemoteClient};
use crate::endpoint::Params;
use crate::error::ClientError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::AsyncTransport;
use crate::types::{Currency, Record, Version};

/// Runs each `RemoteClient` operation as one awaited round-trip.
///
/// No cancellation or deadline is applied; wrap calls in
/// `tokio::time::timeout` or similar when bounded latency matters.
#[derive(Debug, Clone)]
pub struct AsyncClient<T> {
    core: RemoteClient,
    transport: T,
}

impl<T: AsyncTransport> AsyncClient<T> {
    pub fn new(core: RemoteClient, transport: T) -> Self {
        Self { core, transport }
    }

    pub fn core(&self) -> &RemoteClient {
        &self.core
    }

    async fn exchange(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        debug!(method = request.method.as_str(), url = %request.url, "dispatching request");
        let url = request.url.clone();
        self.transport
            .execute(request)
            .await
            .map_err(|e| ClientError::Transport {
                url,
                status: None,
                cause: e.to_string(),
            })
            .inspect_err(report_failure)
    }

    async fn fetch<R: DeserializeOwned>(&self, request: HttpRequest) -> Result<R, ClientError> {
        let url = request.url.clone();
        let response = self.exchange(request).await?;
        self.core
            .parse_retrieve(&url, response)
            .inspect_err(report_failure)
    }

    pub async fn retrieve<R: DeserializeOwned>(&self, path: &str) -> Result<R, ClientError> {
        self.retrieve_with(path, &Params::new()).await
    }

    pub async fn retrieve_with<R: DeserializeOwned>(
        &self,
        path: &str,
        params: &Params,
    ) -> Result<R, ClientError> {
        self.fetch(self.core.build_retrieve(path, params)).await
    }

    pub async fn submit<P, R>(&self, path: &str, payload: &P) -> Result<R, ClientError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.submit_with(path, &Params::new(), payload).await
    }

    pub async fn submit_with<P, R>(
        &self,
        path: &str,
        params: &Params,
        payload: &P,
    ) -> Result<R, ClientError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self
            .core
            .build_submit(path, params, payload)
            .inspect_err(report_failure)?;
        let url = request.url.clone();
        let response = self.exchange(request).await?;
        self.core
            .parse_submit(&url, response)
            .inspect_err(report_failure)
    }

    pub async fn remove(&self, path: &str) -> Result<(), ClientError> {
        self.remove_with(path, &Params::new()).await
    }

    pub async fn remove_with(&self, path: &str, params: &Params) -> Result<(), ClientError> {
        let request = self.core.build_remove(path, params);
        let url = request.url.clone();
        let response = self.exchange(request).await?;
        self.core
            .parse_remove(&url, response)
            .inspect_err(report_failure)
    }

    /// Fetch the whole collection at `path` in one request. Pagination keys
    /// in `filters` are ignored.
    pub async fn get_records<A>(&self, path: &str, filters: &Params) -> Result<Vec<A>, ClientError>
    where
        A: Record + DeserializeOwned,
    {
        self.fetch(self.core.build_records(path, filters)).await
    }

    pub async fn version(&self) -> Result<Version, ClientError> {
        self.fetch(self.core.build_version()).await
    }

    pub async fn currencies(&self) -> Result<Vec<Currency>, ClientError> {
        self.fetch(self.core.build_currencies()).await
    }
}
