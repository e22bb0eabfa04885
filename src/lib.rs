//! JSON-RPC tool dispatch server
//!
//! This crate exposes a fixed catalog of named tools over a JSON-RPC 2.0
//! request/response surface, plus a discovery listing of the catalog.
//!
//! # Architecture
//!
//! ```text
//! [ Client ]
//!     | (JSON-RPC 2.0, one request per line)
//!     v
//! [ McpServer ]
//!     |-- Registry   (tools.json -> name -> ToolDescriptor)
//!     |-- Dispatcher (handler table, keyed by derived handler id)
//!     v
//! [ tool handlers ] (stubs: slack, mail, gha, sql, chart)
//! ```
//!
//! The catalog is loaded once at startup and the handler table is populated
//! by explicit registration; both are immutable while serving. Tool names in
//! the catalog map to handlers through a fixed transform (`slack.post` ->
//! `tool_slack_post`), so advertising a tool and implementing it stay in
//! lockstep.
//!
//! # Failure policy
//!
//! - A catalog that fails to load degrades to an empty registry; discovery
//!   always answers.
//! - Unknown and unimplemented tools answer with the method-not-found code
//!   (`-32601`); everything else that fails during dispatch answers with
//!   the internal-error code (`-32603`). No dispatch failure ever reaches
//!   the transport uncaught.
//! - A request with the wrong `jsonrpc` version is rejected before dispatch
//!   and never receives an error envelope.

pub mod catalog;
pub mod dispatch;
pub mod error;
pub mod protocol;
pub mod server;
pub mod tools;

pub use catalog::{Registry, ToolDescriptor};
pub use dispatch::{Dispatcher, handler_id};
pub use error::{Error, Result};
pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use server::McpServer;
