//! Request and response shapes for the setup protocol exchange

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ProtocolError;
use crate::Result;

/// Opaque token issued by the backend when the protocol document was generated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProtocolId {
    Number(u64),
    Text(String),
}

impl std::fmt::Display for ProtocolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtocolId::Number(n) => write!(f, "{}", n),
            ProtocolId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl std::str::FromStr for ProtocolId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Protocol id must not be empty".to_string());
        }

        if s.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = s.parse::<u64>() {
                return Ok(ProtocolId::Number(n));
            }
        }

        Ok(ProtocolId::Text(s.to_string()))
    }
}

impl From<u64> for ProtocolId {
    fn from(id: u64) -> Self {
        ProtocolId::Number(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSetupProtocolRequest {
    pub setup_protocol_id: ProtocolId,
}

impl GetSetupProtocolRequest {
    pub const METHOD: &'static str = "getSetupProtocol";

    pub fn new(setup_protocol_id: ProtocolId) -> Self {
        Self { setup_protocol_id }
    }

    /// Wrap the request in a JSON-RPC 2.0 envelope
    pub(crate) fn to_json_rpc(&self, id: Uuid) -> Result<JsonRpcRequest> {
        Ok(JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id,
            method: Self::METHOD.to_string(),
            params: serde_json::to_value(self)?,
        })
    }
}

/// Result object of a request answered with a base64 encoded file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Base64PayloadResponse {
    /// May contain line breaks and other whitespace
    pub payload: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: Uuid,
    pub method: String,
    pub params: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct JsonRpcResponse {
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn into_result<T: DeserializeOwned>(self) -> Result<T> {
        if let Some(error) = self.error {
            return Err(ProtocolError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        let result = self
            .result
            .ok_or_else(|| ProtocolError::MalformedResponse("missing result".to_string()))?;

        serde_json::from_value(result).map_err(|e| ProtocolError::MalformedResponse(e.to_string()))
    }
}
