//! Web search via the Tavily API.

use async_trait::async_trait;
use serde_json::{Value, json};

use super::Tool;

const SEARCH_URL: &str = "https://api.tavily.com/search";

pub struct SearchWeb {
    http: reqwest::Client,
    api_key: String,
}

impl SearchWeb {
    pub fn new(api_key: String) -> Self {
        SearchWeb {
            http: reqwest::Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl Tool for SearchWeb {
    fn name(&self) -> &str {
        "search_web"
    }

    fn description(&self) -> &str {
        "Search the web for current information: attractions, lodging options \
         and prices, restaurants, local tips, safety notes."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                },
                "max_results": {
                    "type": "integer",
                    "description": "Maximum number of results (default 5)"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let query = args["query"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'query' argument"))?;
        let max_results = args["max_results"].as_u64().unwrap_or(5);

        let body: Value = self
            .http
            .post(SEARCH_URL)
            .json(&json!({
                "api_key": self.api_key,
                "query": query,
                "max_results": max_results,
            }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let mut results = Vec::new();
        if let Some(items) = body["results"].as_array() {
            for item in items {
                let title = item["title"].as_str().unwrap_or("(untitled)");
                let url = item["url"].as_str().unwrap_or("");
                let content = item["content"].as_str().unwrap_or("");
                results.push(format!("{}\n{}\n{}", title, url, content));
            }
        }

        if results.is_empty() {
            Ok(format!("No results found for: {}", query))
        } else {
            Ok(results.join("\n\n"))
        }
    }
}
