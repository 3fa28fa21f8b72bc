//! Remote invocation boundary backed by ToolRegistry.
//!
//! [`ToolInvoker`] turns a tool name plus JSON arguments into an
//! [`InvocationResponse`] envelope. Every failure, including malformed
//! arguments, timeouts and panics inside a tool, comes back as a structured
//! error rather than propagating to the host.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::error::ToolError;
use crate::tool::ToolOutput;
use crate::ToolRegistry;

/// A request to invoke a tool by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInvocationRequest {
    pub tool_name: String,
    #[serde(default)]
    pub arguments: HashMap<String, Value>,
}

impl ToolInvocationRequest {
    pub fn new(tool_name: impl Into<String>, arguments: HashMap<String, Value>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments,
        }
    }
}

/// Error half of the envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolFailure {
    pub kind: String,
    pub message: String,
}

impl From<&ToolError> for ToolFailure {
    fn from(error: &ToolError) -> Self {
        Self {
            kind: error.kind().to_string(),
            message: error.to_string(),
        }
    }
}

/// Envelope returned by every remote invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationResponse {
    pub tool: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolFailure>,
}

impl InvocationResponse {
    pub fn success(tool: impl Into<String>, output: ToolOutput) -> Self {
        Self {
            tool: tool.into(),
            ok: true,
            result: Some(output.content),
            error: None,
        }
    }

    pub fn failure(tool: impl Into<String>, error: &ToolError) -> Self {
        Self {
            tool: tool.into(),
            ok: false,
            result: None,
            error: Some(error.into()),
        }
    }

    /// Kind of the failure, if any.
    pub fn error_kind(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.kind.as_str())
    }
}

/// Limits applied on the remote path.
#[derive(Debug, Clone, Default)]
pub struct ToolPolicy {
    pub timeout: Option<Duration>,
}

impl ToolPolicy {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

pub struct ToolInvoker {
    registry: Arc<ToolRegistry>,
    policy: ToolPolicy,
}

impl ToolInvoker {
    pub fn new(registry: ToolRegistry) -> Self {
        Self::with_policy(Arc::new(registry), ToolPolicy::default())
    }

    pub fn with_policy(registry: Arc<ToolRegistry>, policy: ToolPolicy) -> Self {
        Self { registry, policy }
    }

    pub fn registry(&self) -> &ToolRegistry {
        self.registry.as_ref()
    }

    pub fn policy(&self) -> &ToolPolicy {
        &self.policy
    }

    /// Invoke a tool, always producing an envelope.
    pub async fn invoke(&self, request: ToolInvocationRequest) -> InvocationResponse {
        let name = request.tool_name;
        info!(tool = %name, "Invoking tool");

        match self.run(&name, request.arguments).await {
            Ok(output) => InvocationResponse::success(name, output),
            Err(error) => {
                warn!(tool = %name, kind = error.kind(), error = %error, "Tool invocation failed");
                InvocationResponse::failure(name, &error)
            }
        }
    }

    /// Invoke a tool with a raw JSON arguments body.
    ///
    /// An empty body counts as no arguments.
    pub async fn invoke_json(&self, name: &str, body: &str) -> InvocationResponse {
        let arguments = if body.trim().is_empty() {
            Ok(HashMap::new())
        } else {
            serde_json::from_str::<HashMap<String, Value>>(body)
        };

        match arguments {
            Ok(arguments) => self.invoke(ToolInvocationRequest::new(name, arguments)).await,
            Err(error) => {
                let error = ToolError::from(error);
                warn!(tool = %name, error = %error, "Malformed tool arguments");
                InvocationResponse::failure(name, &error)
            }
        }
    }

    async fn run(&self, name: &str, arguments: HashMap<String, Value>) -> Result<ToolOutput, ToolError> {
        let (tool, args) = self.registry.prepare(name, arguments)?;

        // A panicking tool only takes down its own task.
        let mut handle = tokio::spawn(async move { tool.execute(args).await });

        let joined = match self.policy.timeout {
            Some(timeout_duration) => match timeout(timeout_duration, &mut handle).await {
                Ok(joined) => joined,
                Err(_) => {
                    // Dropping the handle would only detach the task.
                    handle.abort();
                    return Err(ToolError::TimedOut);
                }
            },
            None => handle.await,
        };

        match joined {
            Ok(result) => result,
            Err(join_error) if join_error.is_panic() => Err(ToolError::ExecutionFailed(
                "tool panicked during execution".to_string(),
            )),
            Err(join_error) => Err(ToolError::ExecutionFailed(join_error.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ParamKind, ParamSpec, ToolSchema};
    use crate::{Tool, ToolArgs};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct DoubleTool;

    #[async_trait]
    impl Tool for DoubleTool {
        fn name(&self) -> &str {
            "double"
        }

        fn description(&self) -> &str {
            "Doubles a number"
        }

        fn parameters(&self) -> ToolSchema {
            ToolSchema::new().param(ParamSpec::required("value", ParamKind::Number, "Input"))
        }

        async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
            let value = args.get_f64("value")?;
            if value < 0.0 {
                return Err(ToolError::ExecutionFailed("negative input".into()));
            }
            Ok(ToolOutput::number(value * 2.0))
        }
    }

    struct PanicTool;

    #[async_trait]
    impl Tool for PanicTool {
        fn name(&self) -> &str {
            "panic"
        }

        fn description(&self) -> &str {
            "Always panics"
        }

        fn parameters(&self) -> ToolSchema {
            ToolSchema::new()
        }

        async fn execute(&self, _args: ToolArgs) -> Result<ToolOutput, ToolError> {
            panic!("boom");
        }
    }

    struct SlowTool;

    #[async_trait]
    impl Tool for SlowTool {
        fn name(&self) -> &str {
            "slow"
        }

        fn description(&self) -> &str {
            "Sleeps for a while"
        }

        fn parameters(&self) -> ToolSchema {
            ToolSchema::new()
        }

        async fn execute(&self, _args: ToolArgs) -> Result<ToolOutput, ToolError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(ToolOutput::text("done"))
        }
    }

    struct LateWriteTool {
        finished: Arc<AtomicBool>,
    }

    #[async_trait]
    impl Tool for LateWriteTool {
        fn name(&self) -> &str {
            "late_write"
        }

        fn description(&self) -> &str {
            "Sets a flag after a short sleep"
        }

        fn parameters(&self) -> ToolSchema {
            ToolSchema::new()
        }

        async fn execute(&self, _args: ToolArgs) -> Result<ToolOutput, ToolError> {
            tokio::time::sleep(Duration::from_millis(200)).await;
            self.finished.store(true, Ordering::SeqCst);
            Ok(ToolOutput::text("finished"))
        }
    }

    fn invoker(policy: ToolPolicy) -> ToolInvoker {
        let mut registry = ToolRegistry::new();
        registry.register(DoubleTool);
        registry.register(PanicTool);
        registry.register(SlowTool);
        ToolInvoker::with_policy(Arc::new(registry), policy)
    }

    #[tokio::test]
    async fn test_success_envelope() {
        let response = invoker(ToolPolicy::default())
            .invoke_json("double", r#"{"value": 21}"#)
            .await;
        assert!(response.ok);
        assert_eq!(response.result, Some(json!(42.0)));
        assert!(response.error.is_none());
    }

    #[tokio::test]
    async fn test_tool_error_is_structured() {
        let response = invoker(ToolPolicy::default())
            .invoke_json("double", r#"{"value": -1}"#)
            .await;
        assert!(!response.ok);
        assert_eq!(response.error_kind(), Some("internal"));
        assert!(response.error.unwrap().message.contains("negative input"));
    }

    #[tokio::test]
    async fn test_schema_mismatch() {
        let invoker = invoker(ToolPolicy::default());

        let response = invoker.invoke_json("double", r#"{"value": "x"}"#).await;
        assert_eq!(response.error_kind(), Some("argument_schema_mismatch"));

        let response = invoker.invoke_json("double", "[1, 2]").await;
        assert_eq!(response.error_kind(), Some("argument_schema_mismatch"));

        let response = invoker.invoke_json("double", "").await;
        assert_eq!(response.error_kind(), Some("argument_schema_mismatch"));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let response = invoker(ToolPolicy::default())
            .invoke(ToolInvocationRequest::new("missing", HashMap::new()))
            .await;
        assert_eq!(response.error_kind(), Some("tool_not_found"));
        assert_eq!(response.tool, "missing");
    }

    #[tokio::test]
    async fn test_panic_is_contained() {
        let response = invoker(ToolPolicy::default()).invoke_json("panic", "{}").await;
        assert!(!response.ok);
        assert_eq!(response.error_kind(), Some("internal"));
    }

    #[tokio::test]
    async fn test_timeout() {
        let policy = ToolPolicy::default().with_timeout(Duration::from_millis(50));
        let response = invoker(policy).invoke_json("slow", "").await;
        assert_eq!(response.error_kind(), Some("timeout"));
    }

    #[tokio::test]
    async fn test_timeout_cancels_tool() {
        let finished = Arc::new(AtomicBool::new(false));
        let mut registry = ToolRegistry::new();
        registry.register(LateWriteTool {
            finished: finished.clone(),
        });
        let policy = ToolPolicy::default().with_timeout(Duration::from_millis(20));
        let invoker = ToolInvoker::with_policy(Arc::new(registry), policy);

        let response = invoker.invoke_json("late_write", "").await;
        assert_eq!(response.error_kind(), Some("timeout"));

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(!finished.load(Ordering::SeqCst));
    }

    #[test]
    fn test_envelope_serialization() {
        let ok = InvocationResponse::success("double", ToolOutput::number(2.0));
        let value = serde_json::to_value(&ok).unwrap();
        assert_eq!(value, json!({"tool": "double", "ok": true, "result": 2.0}));

        let failed = InvocationResponse::failure("calc", &ToolError::DivisionByZero);
        let value = serde_json::to_value(&failed).unwrap();
        assert_eq!(value["error"]["kind"], "division_by_zero");
        assert!(value.get("result").is_none());
    }

    #[test]
    fn test_request_arguments_default_to_empty() {
        let request: ToolInvocationRequest =
            serde_json::from_str(r#"{"tool_name": "noop"}"#).unwrap();
        assert!(request.arguments.is_empty());
    }
}
