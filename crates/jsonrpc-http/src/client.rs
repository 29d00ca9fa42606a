//! JSON-RPC 2.0 client over HTTP POST.
//!
//! One call is one POST: build a request envelope with a fresh id, send it,
//! require `200 OK`, decode the response envelope, check the echoed id, and
//! decode the result into the caller's type. Nothing is retried or cached.

use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::config::{default_transport, ClientConfig};
use crate::context::CallContext;
use crate::error::{Result, RpcClientError};
use crate::options::CallOptions;
use crate::rpc::{JsonRpcRequest, JsonRpcResponse};

/// Content type sent with every request.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Pass as `params` to omit the field from the request envelope.
pub const NO_PARAMS: Option<&'static ()> = None;

/// JSON-RPC 2.0 client.
///
/// Holds nothing but an optional transport, so it is cheap to clone and safe
/// to share between concurrent calls.
///
/// # Usage
///
/// ```ignore
/// let client = Client::new();
/// let height: u64 = client
///     .call(&CallContext::background(), url, "getblockcount", NO_PARAMS, &CallOptions::new())
///     .await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Client {
    transport: Option<reqwest::Client>,
}

impl Client {
    /// Client backed by the process-wide [`default_transport`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Client that always uses `transport`.
    pub fn with_transport(transport: reqwest::Client) -> Self {
        Self {
            transport: Some(transport),
        }
    }

    /// Client with a dedicated transport built from `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::with_transport(config.build_transport()?))
    }

    /// The transport every call goes through.
    pub fn transport(&self) -> &reqwest::Client {
        self.transport.as_ref().unwrap_or_else(|| default_transport())
    }

    pub fn uses_default_transport(&self) -> bool {
        self.transport.is_none()
    }

    /// Call `method` on `url` and decode the result as `R`.
    ///
    /// `params` of `None` omits the field; `Some` of an empty map still sends
    /// `{}`. A server-reported error comes back as [`RpcClientError::Server`].
    pub async fn call<P, R>(
        &self,
        ctx: &CallContext,
        url: &str,
        method: &str,
        params: Option<&P>,
        opts: &CallOptions,
    ) -> Result<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        if method.is_empty() {
            return Err(RpcClientError::EmptyMethod);
        }

        let request = JsonRpcRequest::new(method, params);
        let id = request.id;
        let body = serde_json::to_vec(&request).map_err(RpcClientError::Serialize)?;
        let endpoint = reqwest::Url::parse(url).map_err(|e| RpcClientError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        if let Some(err) = ctx.err() {
            return Err(err);
        }

        tracing::debug!("[JsonRpcClient] -> {} id={} url={}", method, id, url);

        let response = tokio::select! {
            biased;
            err = ctx.done() => {
                tracing::debug!("[JsonRpcClient] {} id={} aborted: {}", method, id, err);
                return Err(err);
            }
            res = self.exchange(endpoint, body, opts) => res?,
        };

        decode_response(response, &id)
    }

    /// Like [`Client::call`], but writes the result into `out`.
    ///
    /// `out` is left untouched on any error.
    pub async fn call_into<P, R>(
        &self,
        ctx: &CallContext,
        url: &str,
        method: &str,
        params: Option<&P>,
        out: &mut R,
        opts: &CallOptions,
    ) -> Result<()>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        *out = self.call(ctx, url, method, params, opts).await?;
        Ok(())
    }

    /// POST the serialized envelope and read back the response envelope.
    ///
    /// The body is read to the end before the status is judged, so the
    /// connection can go back to the pool on every path.
    async fn exchange(
        &self,
        url: reqwest::Url,
        body: Vec<u8>,
        opts: &CallOptions,
    ) -> Result<JsonRpcResponse> {
        let mut builder = self
            .transport()
            .post(url.clone())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE);
        if let Some(headers) = &opts.headers {
            for (name, value) in headers {
                builder = builder.header(name.clone(), value.clone());
            }
        }

        let resp = builder
            .body(body)
            .send()
            .await
            .map_err(RpcClientError::Request)?;

        let status = resp.status();
        let bytes = resp.bytes().await;

        if status != StatusCode::OK {
            tracing::warn!("[JsonRpcClient] {} responded {}", url, status);
            return Err(RpcClientError::Status(status));
        }

        let bytes = bytes.map_err(RpcClientError::Request)?;
        serde_json::from_slice(&bytes).map_err(RpcClientError::DecodeResponse)
    }
}

fn decode_response<R: DeserializeOwned>(response: JsonRpcResponse, id: &Uuid) -> Result<R> {
    if let Some(err) = response.error {
        tracing::debug!("[JsonRpcClient] id={} server error: {}", id, err);
        return Err(RpcClientError::Server(err));
    }

    if !response.id_matches(id) {
        let actual = match &response.id {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "null".to_string(),
        };
        tracing::warn!(
            "[JsonRpcClient] Response id {} does not match request id {}",
            actual,
            id
        );
        return Err(RpcClientError::IdMismatch {
            expected: id.to_string(),
            actual,
        });
    }

    serde_json::from_value(response.result).map_err(RpcClientError::DecodeResult)
}
