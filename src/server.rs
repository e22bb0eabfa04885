//! Dispatch server
//!
//! Ties the catalog and the dispatch table together behind the JSON-RPC
//! surface, and hosts them on a stdio line transport: one request per line on
//! stdin, one response per line on stdout, logs on stderr.
//!
//! Transport-level rejections (unparseable input, wrong protocol version) are
//! distinct from tool-level failures: the former produce no response envelope
//! at all, the latter always produce a well-formed error envelope.

use std::io::{BufRead, Write};

use serde_json::json;

use crate::catalog::{Registry, ToolDescriptor};
use crate::dispatch::Dispatcher;
use crate::error::{Error, Result};
use crate::protocol::{JSONRPC_VERSION, JsonRpcRequest, JsonRpcResponse};

/// Reserved method answering discovery over the JSON-RPC surface
const TOOLS_LIST_METHOD: &str = "tools/list";

/// JSON-RPC tool dispatch server.
///
/// Both fields are built once before serving and never mutated, so the server
/// can be shared by reference across any number of concurrent requests.
pub struct McpServer {
    registry: Registry,
    dispatcher: Dispatcher,
}

impl McpServer {
    pub fn new(registry: Registry, dispatcher: Dispatcher) -> Self {
        Self { registry, dispatcher }
    }

    /// The discovery surface: every catalog descriptor, in catalog order,
    /// with all metadata fields intact. Always answers, possibly with an
    /// empty list if the catalog failed to load.
    pub fn catalog(&self) -> &[ToolDescriptor] {
        self.registry.list()
    }

    /// Handle a single request.
    ///
    /// Returns `Err` only for the transport-level version rejection; every
    /// dispatch outcome, success or failure, becomes a response envelope with
    /// the correlation id echoed.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Result<JsonRpcResponse> {
        if request.jsonrpc != JSONRPC_VERSION {
            return Err(Error::VersionMismatch);
        }

        if request.method == TOOLS_LIST_METHOD {
            return Ok(JsonRpcResponse::success(
                request.id,
                json!({"tools": self.catalog()}),
            ));
        }

        match self
            .dispatcher
            .dispatch(&self.registry, &request.method, request.params)
            .await
        {
            Ok(result) => Ok(JsonRpcResponse::success(request.id, result)),
            Err(e) => {
                tracing::warn!(method = %request.method, error = %e, "Tool call failed");
                Ok(JsonRpcResponse::error(request.id, e.rpc_code(), e.to_string()))
            }
        }
    }

    /// Parse, handle, and serialize one raw message.
    pub async fn handle_message(&self, message: &str) -> Result<String> {
        let request: JsonRpcRequest = serde_json::from_str(message)?;
        let response = self.handle_request(request).await?;
        serde_json::to_string(&response).map_err(Error::from)
    }

    /// Serve requests line-by-line over stdio.
    ///
    /// Rejected requests (bad JSON, wrong version) are logged and dropped
    /// without a response line.
    pub async fn run(&self) -> Result<()> {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();

        tracing::info!(tools = self.registry.len(), "Dispatch server ready, listening on stdio");

        for line in stdin.lock().lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }

            tracing::debug!(request = %line, "Received message");

            match self.handle_message(&line).await {
                Ok(response) => {
                    writeln!(stdout, "{}", response)?;
                    stdout.flush()?;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Rejected request");
                }
            }
        }

        Ok(())
    }
}
