//! Stub tool handlers
//!
//! One handler per catalog entry, registered under the tool's name in
//! [`builtin_dispatcher`]. Each handler binds its parameter bag into a typed
//! argument struct (unknown keys and missing required keys are rejected) and
//! currently logs the call and returns a canned payload. Replace the bodies
//! with real integrations; the argument structs and return shapes are the
//! contract.
//!
//! Handlers with side effects (`mail.send`, `gha.run`) honor a `dry_run`
//! flag themselves. The dispatcher never retries and never rolls back, so
//! policy checks for irreversible actions belong here, not upstream.

use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::dispatch::Dispatcher;
use crate::error::{Error, Result};

/// Build the dispatch table for all built-in tools.
pub fn builtin_dispatcher() -> Dispatcher {
    let mut dispatcher = Dispatcher::new();
    dispatcher.register("slack.post", slack_post);
    dispatcher.register("mail.draft", mail_draft);
    dispatcher.register("mail.send", mail_send);
    dispatcher.register("gha.run", gha_run);
    dispatcher.register("gha.status", gha_status);
    dispatcher.register("sql.query", sql_query);
    dispatcher.register("chart.bar", chart_bar);
    dispatcher
}

/// Bind the parameter bag into a handler's typed argument struct.
fn bind_args<T: for<'de> Deserialize<'de>>(args: Value) -> Result<T> {
    serde_json::from_value(args).map_err(|e| Error::InvalidParams(e.to_string()))
}

// ============================================================================
// slack.post
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SlackPostArgs {
    channel: String,
    text: String,
    #[serde(default)]
    thread_ts: Option<String>,
}

/// Post a message to a Slack channel (stub).
async fn slack_post(args: Value) -> Result<Value> {
    let args: SlackPostArgs = bind_args(args)?;
    tracing::info!(channel = %args.channel, text = %args.text, thread_ts = ?args.thread_ts, "[slack.post]");
    Ok(json!({
        "status": "ok",
        "channel": args.channel,
        "message": args.text,
        "thread_ts": args.thread_ts,
    }))
}

// ============================================================================
// mail.draft / mail.send
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MailDraftArgs {
    to: String,
    subject: String,
    #[allow(dead_code)]
    body_md: String,
}

/// Create an email draft (stub).
async fn mail_draft(args: Value) -> Result<Value> {
    let args: MailDraftArgs = bind_args(args)?;
    tracing::info!(to = %args.to, subject = %args.subject, "[mail.draft]");
    Ok(json!({
        "draft_id": "draft_12345",
        "to": args.to,
        "subject": args.subject,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MailSendArgs {
    draft_id: String,
    #[serde(default)]
    dry_run: bool,
}

/// Send a previously created draft (stub). `dry_run` previews the payload
/// without sending.
async fn mail_send(args: Value) -> Result<Value> {
    let args: MailSendArgs = bind_args(args)?;
    tracing::info!(draft_id = %args.draft_id, dry_run = args.dry_run, "[mail.send]");
    if args.dry_run {
        return Ok(json!({"dry_run": true, "draft_id": args.draft_id}));
    }
    Ok(json!({"status": "sent", "draft_id": args.draft_id}))
}

// ============================================================================
// gha.run / gha.status
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GhaRunArgs {
    owner: String,
    repo: String,
    workflow_id: String,
    #[serde(rename = "ref")]
    git_ref: String,
    #[serde(default)]
    inputs: Option<Map<String, Value>>,
    #[serde(default)]
    dry_run: bool,
}

/// Trigger a GitHub Actions workflow (stub).
async fn gha_run(args: Value) -> Result<Value> {
    let args: GhaRunArgs = bind_args(args)?;
    tracing::info!(
        owner = %args.owner,
        repo = %args.repo,
        workflow_id = %args.workflow_id,
        git_ref = %args.git_ref,
        dry_run = args.dry_run,
        "[gha.run]"
    );
    if args.dry_run {
        return Ok(json!({
            "dry_run": true,
            "workflow_id": args.workflow_id,
            "ref": args.git_ref,
            "inputs": args.inputs.unwrap_or_default(),
        }));
    }
    Ok(json!({"status": "queued", "workflow_id": args.workflow_id}))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GhaStatusArgs {
    run_id: String,
}

/// Look up the status of a GitHub Actions run (stub).
async fn gha_status(args: Value) -> Result<Value> {
    let args: GhaStatusArgs = bind_args(args)?;
    tracing::info!(run_id = %args.run_id, "[gha.status]");
    Ok(json!({"run_id": args.run_id, "status": "unknown"}))
}

// ============================================================================
// sql.query
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SqlQueryArgs {
    name: String,
    text_sql: String,
    #[serde(default)]
    #[allow(dead_code)]
    params: Option<Vec<Value>>,
}

/// Execute a read-only SQL query (stub).
async fn sql_query(args: Value) -> Result<Value> {
    let args: SqlQueryArgs = bind_args(args)?;
    tracing::info!(name = %args.name, sql = %args.text_sql, "[sql.query]");
    Ok(json!({"name": args.name, "rows": [], "columns": []}))
}

// ============================================================================
// chart.bar
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ChartBarArgs {
    json_data: Value,
}

/// Render a bar chart from JSON data (stub).
async fn chart_bar(args: Value) -> Result<Value> {
    let args: ChartBarArgs = bind_args(args)?;
    tracing::info!(data = %args.json_data, "[chart.bar]");
    Ok(json!({"url": "https://example.com/chart.png"}))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn slack_post_echoes_channel_and_text() {
        let result = slack_post(json!({"channel": "#ops", "text": "deploy done"}))
            .await
            .unwrap();
        assert_eq!(result["status"], "ok");
        assert_eq!(result["channel"], "#ops");
        assert_eq!(result["message"], "deploy done");
        assert_eq!(result["thread_ts"], Value::Null);
    }

    #[tokio::test]
    async fn slack_post_rejects_unknown_key() {
        let err = slack_post(json!({"channel": "#ops", "text": "hi", "emoji": ":x:"}))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParams(_)));
    }

    #[tokio::test]
    async fn slack_post_rejects_missing_required_key() {
        let err = slack_post(json!({"channel": "#ops"})).await.unwrap_err();
        assert!(matches!(err, Error::InvalidParams(ref msg) if msg.contains("text")));
    }

    #[tokio::test]
    async fn mail_draft_returns_draft_id() {
        let result = mail_draft(json!({
            "to": "a@example.com",
            "subject": "Weekly report",
            "body_md": "# Report"
        }))
        .await
        .unwrap();
        assert_eq!(result["draft_id"], "draft_12345");
        assert_eq!(result["to"], "a@example.com");
    }

    #[tokio::test]
    async fn mail_send_dry_run_does_not_send() {
        let result = mail_send(json!({"draft_id": "draft_12345", "dry_run": true}))
            .await
            .unwrap();
        assert_eq!(result["dry_run"], true);
        assert!(result.get("status").is_none());
    }

    #[tokio::test]
    async fn mail_send_defaults_to_sending() {
        let result = mail_send(json!({"draft_id": "draft_12345"})).await.unwrap();
        assert_eq!(result["status"], "sent");
        assert_eq!(result["draft_id"], "draft_12345");
    }

    #[tokio::test]
    async fn gha_run_dry_run_previews_payload() {
        let result = gha_run(json!({
            "owner": "acme",
            "repo": "widgets",
            "workflow_id": "ci.yml",
            "ref": "main",
            "dry_run": true
        }))
        .await
        .unwrap();
        assert_eq!(result["dry_run"], true);
        assert_eq!(result["ref"], "main");
        assert_eq!(result["inputs"], json!({}));
    }

    #[tokio::test]
    async fn gha_run_queues_by_default() {
        let result = gha_run(json!({
            "owner": "acme",
            "repo": "widgets",
            "workflow_id": "ci.yml",
            "ref": "main"
        }))
        .await
        .unwrap();
        assert_eq!(result["status"], "queued");
        assert_eq!(result["workflow_id"], "ci.yml");
    }

    #[tokio::test]
    async fn gha_status_is_unknown_stub() {
        let result = gha_status(json!({"run_id": "98765"})).await.unwrap();
        assert_eq!(result["run_id"], "98765");
        assert_eq!(result["status"], "unknown");
    }

    #[tokio::test]
    async fn sql_query_returns_empty_result_set() {
        let result = sql_query(json!({
            "name": "orders",
            "text_sql": "select * from orders limit 1",
            "params": []
        }))
        .await
        .unwrap();
        assert_eq!(result["name"], "orders");
        assert_eq!(result["rows"], json!([]));
        assert_eq!(result["columns"], json!([]));
    }

    #[tokio::test]
    async fn chart_bar_returns_url() {
        let result = chart_bar(json!({"json_data": {"a": 1, "b": 2}})).await.unwrap();
        assert_eq!(result["url"], "https://example.com/chart.png");
    }

    #[test]
    fn builtin_dispatcher_covers_all_seven_tools() {
        let dispatcher = builtin_dispatcher();
        let ids = dispatcher.handler_ids();
        assert_eq!(ids.len(), 7);
        for id in [
            "tool_slack_post",
            "tool_mail_draft",
            "tool_mail_send",
            "tool_gha_run",
            "tool_gha_status",
            "tool_sql_query",
            "tool_chart_bar",
        ] {
            assert!(ids.contains(&id), "missing handler {id}");
        }
    }
}
