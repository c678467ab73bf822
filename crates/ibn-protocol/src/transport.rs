//! Outbound request to the backend

use std::future::Future;
use url::Url;
use uuid::Uuid;

use crate::error::ProtocolError;
use crate::request::{Base64PayloadResponse, GetSetupProtocolRequest, JsonRpcResponse};
use crate::Result;

/// Backend operation answering a setup protocol request
pub trait ProtocolService: Send + Sync {
    fn get_setup_protocol(
        &self,
        request: &GetSetupProtocolRequest,
    ) -> impl Future<Output = Result<Base64PayloadResponse>> + Send;
}

/// JSON-RPC 2.0 over HTTP POST
#[derive(Debug, Clone)]
pub struct HttpProtocolService {
    client: reqwest::Client,
    endpoint: Url,
    credentials: Option<(String, String)>,
}

impl HttpProtocolService {
    pub fn new(endpoint: Url) -> Result<Self> {
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ProtocolError::InvalidEndpoint(endpoint.to_string()));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
            credentials: None,
        })
    }

    pub fn with_basic_auth(mut self, username: String, password: String) -> Self {
        self.credentials = Some((username, password));
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl ProtocolService for HttpProtocolService {
    async fn get_setup_protocol(
        &self,
        request: &GetSetupProtocolRequest,
    ) -> Result<Base64PayloadResponse> {
        let envelope = request.to_json_rpc(Uuid::new_v4())?;

        tracing::debug!(
            request_id = %envelope.id,
            method = %envelope.method,
            setup_protocol_id = %request.setup_protocol_id,
            endpoint = %self.endpoint,
            "Sending request"
        );

        let mut builder = self.client.post(self.endpoint.clone()).json(&envelope);
        if let Some((username, password)) = &self.credentials {
            builder = builder.basic_auth(username, Some(password));
        }

        let response = builder.send().await?;
        if !response.status().is_success() {
            return Err(ProtocolError::HttpStatus(response.status().as_u16()));
        }

        let rpc: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| ProtocolError::MalformedResponse(e.to_string()))?;

        rpc.into_result()
    }
}
