//! JSON-RPC 2.0 envelope types.
//!
//! These types are defined standalone (not tied to reqwest or any HTTP
//! framework) so they can be serialized/deserialized in any transport context.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::JsonRpcError;

/// Protocol version carried by every envelope.
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC 2.0 request object.
///
/// Borrows its method and params; a request only lives for the duration of
/// one call.
#[derive(Debug, Serialize)]
pub struct JsonRpcRequest<'a, P: ?Sized> {
    /// Always "2.0".
    pub jsonrpc: &'static str,
    /// Method name, e.g. `"eth_blockNumber"`.
    pub method: &'a str,
    /// Method parameters. `None` omits the field entirely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<&'a P>,
    /// Fresh identifier, echoed back by the server.
    pub id: Uuid,
}

impl<'a, P: ?Sized> JsonRpcRequest<'a, P> {
    /// Build a request with a newly generated identifier.
    pub fn new(method: &'a str, params: Option<&'a P>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method,
            params,
            id: Uuid::new_v4(),
        }
    }
}

/// JSON-RPC 2.0 response object as received from the server.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub jsonrpc: String,
    /// Untyped result payload. A missing field reads as `null`.
    #[serde(default)]
    pub result: serde_json::Value,
    /// Error on failure.
    #[serde(default)]
    pub error: Option<JsonRpcError>,
    /// Echoed from the request.
    #[serde(default)]
    pub id: Option<serde_json::Value>,
}

impl JsonRpcResponse {
    /// Whether the echoed id is the string form of `id`.
    pub fn id_matches(&self, id: &Uuid) -> bool {
        match &self.id {
            Some(serde_json::Value::String(s)) => s
                .parse::<Uuid>()
                .map(|parsed| parsed == *id)
                .unwrap_or(false),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_request_omits_absent_params() {
        let req = JsonRpcRequest::<()>::new("ping", None);
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["method"], "ping");
        assert!(value.get("params").is_none());
        assert_eq!(value["id"], req.id.to_string());
    }

    #[test]
    fn test_request_keeps_empty_params_object() {
        let params: HashMap<String, i32> = HashMap::new();
        let req = JsonRpcRequest::new("ping", Some(&params));
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["params"], json!({}));
    }

    #[test]
    fn test_request_ids_are_fresh() {
        let a = JsonRpcRequest::<()>::new("ping", None);
        let b = JsonRpcRequest::<()>::new("ping", None);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_response_with_error() {
        let raw = r#"{"jsonrpc":"2.0","result":null,"error":{"code":-32601,"message":"Method not found","data":null},"id":"x"}"#;
        let resp: JsonRpcResponse = serde_json::from_str(raw).unwrap();
        let err = resp.error.unwrap();
        assert_eq!(err.code.0, -32601);
        assert_eq!(err.message, "Method not found");
        assert!(err.data.is_none());
    }

    #[test]
    fn test_response_missing_result_reads_as_null() {
        let resp: JsonRpcResponse =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":"x"}"#).unwrap();
        assert!(resp.result.is_null());
        assert!(resp.error.is_none());
    }

    #[test]
    fn test_id_matches() {
        let id = Uuid::new_v4();
        let mut resp = JsonRpcResponse {
            jsonrpc: JSONRPC_VERSION.into(),
            result: json!(1),
            error: None,
            id: Some(json!(id.to_string())),
        };
        assert!(resp.id_matches(&id));

        resp.id = Some(json!(Uuid::new_v4().to_string()));
        assert!(!resp.id_matches(&id));

        resp.id = Some(json!(1));
        assert!(!resp.id_matches(&id));

        resp.id = None;
        assert!(!resp.id_matches(&id));
    }
}
