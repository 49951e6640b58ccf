//! The planning loop: model replies in, tool results out, until the
//! model hands back the finished itinerary.

use anyhow::Result;

use itinera_core::trip::TripRequest;

use crate::llm::{ChatMessage, OpenAiClient, ToolCall};
use crate::tools::ToolRegistry;

use super::prompt;

const MAX_ITERATIONS: usize = 20;

pub struct Planner {
    llm: OpenAiClient,
    tools: ToolRegistry,
}

impl Planner {
    pub fn new(llm: OpenAiClient, tools: ToolRegistry) -> Self {
        Planner { llm, tools }
    }

    /// Run the agent to completion and return the itinerary text.
    pub async fn plan(&self, trip: &TripRequest) -> Result<String> {
        let schemas = self.tools.schemas();
        let has_calendar = self.tools.has("create_calendar_event");

        let mut messages = vec![
            ChatMessage::system(prompt::system_prompt(has_calendar)),
            ChatMessage::user(prompt::trip_prompt(trip)),
        ];

        for _ in 0..MAX_ITERATIONS {
            let reply = self.llm.chat_completion(&messages, &schemas).await?;

            let tool_calls = reply.tool_calls.unwrap_or_default();
            if tool_calls.is_empty() {
                // No tool calls - this is the final itinerary
                return reply
                    .content
                    .ok_or_else(|| anyhow::anyhow!("The model returned an empty reply"));
            }

            messages.push(ChatMessage::assistant(reply.content, tool_calls.clone()));

            for call in tool_calls {
                let result = self.run_tool(&call).await;
                messages.push(ChatMessage::tool(result, call.id));
            }
        }

        anyhow::bail!(
            "Planning did not finish within {} tool rounds",
            MAX_ITERATIONS
        )
    }

    /// Tool failures are folded into the transcript instead of aborting
    /// the run; the model decides how to carry on.
    async fn run_tool(&self, call: &ToolCall) -> String {
        let args: serde_json::Value =
            serde_json::from_str(&call.function.arguments).unwrap_or(serde_json::Value::Null);

        match self.tools.execute(&call.function.name, args).await {
            Ok(output) => output,
            Err(e) => format!("Error: {}", e),
        }
    }
}
