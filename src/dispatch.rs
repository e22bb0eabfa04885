//! Tool dispatch engine
//!
//! The dispatcher owns a table from handler id to handler function, populated
//! by explicit registration at startup. Dispatching a call resolves the tool
//! name against the catalog, derives the handler id, and invokes the handler
//! with the caller's parameter bag. Every failure surfaces as a typed
//! [`Error`](crate::Error); nothing escapes to the transport uncaught.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use serde_json::{Map, Value};

use crate::catalog::Registry;
use crate::error::{Error, Result};

/// Prefix applied to every derived handler id
const HANDLER_PREFIX: &str = "tool_";

/// Derive the handler id for a tool name.
///
/// Every `.` in the name becomes `_`, then the `tool_` prefix is applied:
/// `slack.post` maps to `tool_slack_post`. This transform is the only
/// coupling between catalog entries and registered handlers, so tool names
/// and registrations must stay in lockstep.
pub fn handler_id(name: &str) -> String {
    format!("{}{}", HANDLER_PREFIX, name.replace('.', "_"))
}

type HandlerFuture = Pin<Box<dyn Future<Output = Result<Value>> + Send>>;

/// A dispatch target: takes the parameter bag as a JSON object, returns a
/// result value or a typed failure.
type Handler = Box<dyn Fn(Value) -> HandlerFuture + Send + Sync>;

/// Dispatch table from handler id to handler function.
///
/// Built once at process initialization and immutable while serving, so it is
/// safe to share across concurrent requests. A catalog entry with no
/// registered handler is not a startup error; the gap surfaces per request as
/// [`Error::NotImplemented`], so a catalog can advertise tools ahead of their
/// implementation.
#[derive(Default)]
pub struct Dispatcher {
    handlers: HashMap<String, Handler>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for a tool name. The table key is the derived
    /// handler id; registering the same name twice replaces the handler.
    pub fn register<F, Fut>(&mut self, name: &str, handler: F)
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        self.handlers
            .insert(handler_id(name), Box::new(move |args| Box::pin(handler(args))));
    }

    /// Names of all registered handler ids, for diagnostics.
    pub(crate) fn handler_ids(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }

    /// Dispatch a tool call.
    ///
    /// Resolution order: catalog lookup, then handler lookup, then a single
    /// invocation with the parameter bag bound as keyword arguments (an
    /// absent bag is identical to an empty one). No retries; idempotence is
    /// the handler's concern.
    pub async fn dispatch(
        &self,
        registry: &Registry,
        method: &str,
        params: Option<Map<String, Value>>,
    ) -> Result<Value> {
        if registry.lookup(method).is_none() {
            return Err(Error::UnknownTool(method.to_string()));
        }

        // Error messages carry the name the caller used, never the derived id
        let handler = self
            .handlers
            .get(&handler_id(method))
            .ok_or_else(|| Error::NotImplemented(method.to_string()))?;

        let args = Value::Object(params.unwrap_or_default());
        handler(args).await
    }
}
