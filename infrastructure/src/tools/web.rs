//! Web tools: web_fetch and web_search (behind the `web-tools` feature)

use roundtable_domain::core::string::truncate_bytes;
use roundtable_domain::tool::{
    entities::{RiskLevel, ToolCall, ToolDefinition, ToolParameter},
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};
use scraper::{Html, Selector};
use std::time::Instant;

pub const WEB_FETCH: &str = "web_fetch";

/// Maximum extracted text size (256 KB)
const MAX_TEXT_SIZE: usize = 256 * 1024;

pub fn web_fetch_definition() -> ToolDefinition {
    ToolDefinition::new(
        WEB_FETCH,
        "Fetch a URL and return its textual content",
        RiskLevel::Low,
    )
    .with_parameter(ToolParameter::new("url", "URL to fetch", true).with_type("string"))
}

pub async fn execute_web_fetch(client: &reqwest::Client, call: &ToolCall) -> ToolResult {
    let start = Instant::now();

    let url = match call.require_string("url") {
        Ok(u) => u,
        Err(e) => return ToolResult::failure(WEB_FETCH, ToolError::invalid_argument(e)),
    };
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return ToolResult::failure(
            WEB_FETCH,
            ToolError::invalid_argument(format!("Not an http(s) URL: {url}")),
        );
    }

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) if e.is_timeout() => {
            return ToolResult::failure(WEB_FETCH, ToolError::timeout(url));
        }
        Err(e) => {
            return ToolResult::failure(
                WEB_FETCH,
                ToolError::execution_failed(format!("Request failed: {e}")),
            );
        }
    };

    let status = response.status();
    if !status.is_success() {
        return ToolResult::failure(
            WEB_FETCH,
            ToolError::execution_failed(format!("HTTP {status} from {url}")),
        );
    }

    let is_html = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("text/html"))
        .unwrap_or(false);

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            return ToolResult::failure(
                WEB_FETCH,
                ToolError::execution_failed(format!("Cannot read body: {e}")),
            );
        }
    };

    let mut text = if is_html { extract_text(&body) } else { body };
    if text.len() > MAX_TEXT_SIZE {
        truncate_bytes(&mut text, MAX_TEXT_SIZE);
        text.push_str("\n... (content truncated)");
    }

    let bytes = text.len();
    ToolResult::success(WEB_FETCH, text).with_metadata(ToolResultMetadata {
        duration_ms: Some(start.elapsed().as_millis() as u64),
        bytes: Some(bytes),
        ..Default::default()
    })
}

pub const WEB_SEARCH: &str = "web_search";

/// DuckDuckGo Instant Answer API, keyless
const DDG_API_URL: &str = "https://api.duckduckgo.com/";

pub fn web_search_definition() -> ToolDefinition {
    ToolDefinition::new(
        WEB_SEARCH,
        "Search the web using DuckDuckGo. Returns instant answers, abstracts, and related topics.",
        RiskLevel::Low,
    )
    .with_parameter(ToolParameter::new("query", "The search query", true).with_type("string"))
}

pub async fn execute_web_search(client: &reqwest::Client, call: &ToolCall) -> ToolResult {
    let start = Instant::now();

    let query = match call.require_string("query") {
        Ok(q) => q,
        Err(e) => return ToolResult::failure(WEB_SEARCH, ToolError::invalid_argument(e)),
    };

    let response = match client
        .get(DDG_API_URL)
        .query(&[
            ("q", query),
            ("format", "json"),
            ("no_html", "1"),
            ("skip_disambig", "1"),
        ])
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) if e.is_timeout() => {
            return ToolResult::failure(WEB_SEARCH, ToolError::timeout(query));
        }
        Err(e) => {
            return ToolResult::failure(
                WEB_SEARCH,
                ToolError::execution_failed(format!("Search request failed: {e}")),
            );
        }
    };

    if !response.status().is_success() {
        return ToolResult::failure(
            WEB_SEARCH,
            ToolError::execution_failed(format!("Search API returned {}", response.status())),
        );
    }

    let body: serde_json::Value = match response.json().await {
        Ok(body) => body,
        Err(e) => {
            return ToolResult::failure(
                WEB_SEARCH,
                ToolError::execution_failed(format!("Cannot parse search results: {e}")),
            );
        }
    };

    let output = format_search_results(query, &body);
    ToolResult::success(WEB_SEARCH, output).with_metadata(ToolResultMetadata {
        duration_ms: Some(start.elapsed().as_millis() as u64),
        ..Default::default()
    })
}

/// Render the instant-answer payload as markdown sections.
///
/// The API returns abstracts and related links rather than full result
/// listings; personas chase specific URLs with `web_fetch`.
fn format_search_results(query: &str, data: &serde_json::Value) -> String {
    let mut sections = vec![format!("## Search results for: {query}")];

    if let Some(text) = data["AbstractText"].as_str()
        && !text.is_empty()
    {
        let source = data["AbstractSource"].as_str().unwrap_or("Unknown");
        let url = data["AbstractURL"].as_str().unwrap_or("");
        sections.push(format!("### Summary ({source})\n{text}\nSource: {url}"));
    }

    if let Some(answer) = data["Answer"].as_str()
        && !answer.is_empty()
    {
        sections.push(format!("### Instant answer\n{answer}"));
    }

    if let Some(definition) = data["Definition"].as_str()
        && !definition.is_empty()
    {
        let source = data["DefinitionSource"].as_str().unwrap_or("Unknown");
        sections.push(format!("### Definition ({source})\n{definition}"));
    }

    if let Some(topics) = data["RelatedTopics"].as_array() {
        let lines: Vec<String> = topics
            .iter()
            .filter_map(|topic| {
                let text = topic["Text"].as_str().filter(|t| !t.is_empty())?;
                let url = topic["FirstURL"].as_str().unwrap_or("");
                Some(format!("- {text} ({url})"))
            })
            .take(10)
            .collect();
        if !lines.is_empty() {
            sections.push(format!("### Related topics\n{}", lines.join("\n")));
        }
    }

    if sections.len() == 1 {
        sections.push(
            "No instant answer available. Try `web_fetch` on a specific URL instead.".to_string(),
        );
    }

    sections.join("\n\n")
}

/// Strip markup, keeping the visible text of the body.
fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let selector = match Selector::parse("body") {
        Ok(selector) => selector,
        Err(_) => return document.root_element().text().collect(),
    };

    let text: String = document
        .select(&selector)
        .flat_map(|body| body.text())
        .collect::<Vec<_>>()
        .join(" ");

    // Collapse whitespace runs left behind by removed tags
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_strips_markup() {
        let html = "<html><head><title>t</title></head>\
                    <body><h1>Header</h1><p>Some <b>bold</b> text.</p></body></html>";
        let text = extract_text(html);
        assert_eq!(text, "Header Some bold text.");
    }

    #[tokio::test]
    async fn test_web_fetch_rejects_non_http() {
        let client = reqwest::Client::new();
        let call = ToolCall::new(WEB_FETCH).with_arg("url", "file:///etc/passwd");
        let result = execute_web_fetch(&client, &call).await;
        assert_eq!(result.error().unwrap().code, "INVALID_ARGUMENT");
    }

    #[test]
    fn test_format_search_results_with_abstract() {
        let data = serde_json::json!({
            "AbstractText": "Rust is a systems programming language.",
            "AbstractSource": "Wikipedia",
            "AbstractURL": "https://en.wikipedia.org/wiki/Rust_(programming_language)",
        });

        let output = format_search_results("Rust", &data);
        assert!(output.contains("systems programming language"));
        assert!(output.contains("Wikipedia"));
    }

    #[test]
    fn test_format_search_results_empty_payload() {
        let output = format_search_results("obscure", &serde_json::json!({}));
        assert!(output.contains("No instant answer available"));
    }

    #[test]
    fn test_format_search_results_caps_related_topics() {
        let topics: Vec<_> = (0..15)
            .map(|i| serde_json::json!({"Text": format!("topic {i}"), "FirstURL": ""}))
            .collect();
        let output = format_search_results("t", &serde_json::json!({"RelatedTopics": topics}));
        assert!(output.contains("topic 9"));
        assert!(!output.contains("topic 10"));
    }
}
