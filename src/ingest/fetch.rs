use reqwest::Client;
use scraper::{Html, Node};

use crate::errors::PipelineError;

/// Some sites refuse requests without a browser-like identity.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0";

/// Fetches a URL and reduces the markup to visible text.
#[derive(Clone)]
pub struct ContentFetcher {
    client: Client,
}

impl ContentFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// HTTP GET plus text extraction. Network failures and non-2xx
    /// responses surface as `FetchFailed`; nothing is retried.
    pub async fn fetch(&self, url: &str) -> Result<String, PipelineError> {
        let res = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await
            .map_err(|e| PipelineError::FetchFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        if !res.status().is_success() {
            return Err(PipelineError::FetchFailed {
                url: url.to_string(),
                reason: format!("status {}", res.status()),
            });
        }

        let body = res.text().await.map_err(|e| PipelineError::FetchFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(extract_text(&body))
    }
}

impl Default for ContentFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts the visible text of an HTML document, skipping `script` and
/// `style` content, with text nodes joined by single spaces.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut parts: Vec<String> = Vec::new();

    for node in document.tree.nodes() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| match ancestor.value() {
            Node::Element(el) => matches!(el.name(), "script" | "style"),
            _ => false,
        });
        if hidden {
            continue;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed.to_string());
        }
    }

    parts.join(" ")
}
