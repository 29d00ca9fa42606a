//! jsonrpc-http — a minimal JSON-RPC 2.0 client over HTTP.
//!
//! Each call sends exactly one `POST` carrying a request envelope with a
//! fresh UUID id, and decodes the response envelope into a caller-chosen
//! type. There is no batching, no notifications, and no retry logic; the
//! caller owns any retry policy.
//!
//! # Example
//!
//! ```ignore
//! use jsonrpc_http::{CallContext, CallOptions, Client};
//! use std::time::Duration;
//!
//! let client = Client::new();
//! let ctx = CallContext::background().with_timeout(Duration::from_secs(5));
//! let opts = CallOptions::new().with_header("Authorization", "Bearer token")?;
//!
//! let sum: i64 = client
//!     .call(&ctx, "https://example.com/rpc", "add", Some(&[1, 2]), &opts)
//!     .await?;
//! ```
//!
//! # Errors
//!
//! Every failure is an [`RpcClientError`]. Errors reported by the server keep
//! their code, message and data in [`RpcClientError::Server`].

pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod options;
pub mod rpc;

// Convenience re-exports
pub use client::{Client, NO_PARAMS};
pub use config::{default_transport, ClientConfig};
pub use context::{CallContext, CancelHandle};
pub use error::{Result, RpcClientError};
pub use options::CallOptions;
pub use rpc::{ErrorCode, JsonRpcError, JSONRPC_VERSION};
