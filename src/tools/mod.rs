//! Agent tools.
//!
//! Each tool is a narrow, best-effort capability offered to the language
//! model. Tool failures are reported as ordinary strings so a bad lookup
//! never aborts a planning run.

mod calendar;
mod maps;
mod search;
mod weather;

use async_trait::async_trait;
use serde_json::Value;

pub use calendar::CreateCalendarEvent;
pub use maps::{GetDirections, LocatePlace};
pub use search::SearchWeb;
pub use weather::GetForecast;

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn parameters_schema(&self) -> Value;
    async fn execute(&self, args: Value) -> anyhow::Result<String>;
}

/// The set of tools offered to the model for one planning run.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tool: Box<dyn Tool>) {
        self.tools.push(tool);
    }

    pub fn has(&self, name: &str) -> bool {
        self.tools.iter().any(|tool| tool.name() == name)
    }

    /// Function schemas in the chat-completions `tools` format.
    pub fn schemas(&self) -> Vec<Value> {
        self.tools
            .iter()
            .map(|tool| {
                serde_json::json!({
                    "type": "function",
                    "function": {
                        "name": tool.name(),
                        "description": tool.description(),
                        "parameters": tool.parameters_schema(),
                    }
                })
            })
            .collect()
    }

    /// Execute a named tool. An unknown name is an error; the caller
    /// folds it into the conversation as a tool-result string.
    pub async fn execute(&self, name: &str, args: Value) -> anyhow::Result<String> {
        let tool = self
            .tools
            .iter()
            .find(|tool| tool.name() == name)
            .ok_or_else(|| anyhow::anyhow!("Unknown tool: {}", name))?;

        tool.execute(args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schemas_use_the_function_wrapper() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(SearchWeb::new("key".to_string())));

        let schemas = registry.schemas();
        assert_eq!(schemas.len(), 1);
        assert_eq!(schemas[0]["type"], "function");
        assert_eq!(schemas[0]["function"]["name"], "search_web");
        assert_eq!(schemas[0]["function"]["parameters"]["type"], "object");
    }

    #[tokio::test]
    async fn unknown_tool_is_an_error() {
        let registry = ToolRegistry::new();
        let result = registry.execute("no_such_tool", Value::Null).await;
        assert!(result.is_err());
    }

    #[test]
    fn has_reports_registered_names() {
        let mut registry = ToolRegistry::new();
        assert!(!registry.has("search_web"));
        registry.register(Box::new(SearchWeb::new("key".to_string())));
        assert!(registry.has("search_web"));
    }
}
