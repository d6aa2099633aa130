//! Posting Fetcher — best-effort text extraction from a job posting URL.
//!
//! Scraping is never fatal: blocked pages, JS-rendered content, transport
//! errors, and empty extractions all degrade to `ScrapedPosting::Unavailable`
//! and the pipeline proceeds with an explicit no-context marker. No error
//! from this module ever crosses into the orchestrator.

use std::time::Duration;

use scraper::{Html, Selector};
use tracing::{debug, warn};

const SCRAPE_TIMEOUT: Duration = Duration::from_secs(20);
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Selector cascade tried in order; first hit wins, `body` is the fallback.
const POSTING_SELECTORS: &[&str] = &[
    "article.job-description",
    "div.job-description",
    "section.job-description",
    r#"div[class*="jobDescription"]"#,
    r#"div[id*="jobDescription"]"#,
    "div.job-details-content",
    "div.job-details",
    "div.description",
    "article",
    "main",
];

/// Scraped text is capped to keep prompt token usage bounded.
const MAX_SCRAPED_CHARS: usize = 15_000;

/// Below this length the extraction likely missed dynamically-loaded content.
const SHORT_SCRAPE_CHARS: usize = 200;

/// Outcome of a scrape attempt. `Unavailable` is a valid, non-fatal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapedPosting {
    Text(String),
    Unavailable,
}

/// The job posting under analysis: the URL plus whatever text could be
/// scraped from it.
#[derive(Debug, Clone)]
pub struct JobContext {
    pub url: String,
    pub posting: ScrapedPosting,
}

impl JobContext {
    pub fn unavailable(url: impl Into<String>) -> Self {
        JobContext {
            url: url.into(),
            posting: ScrapedPosting::Unavailable,
        }
    }

    /// Renders the context block threaded into stage prompts. An unavailable
    /// scrape produces an explicit marker rather than an empty section.
    pub fn context_block(&self) -> String {
        match &self.posting {
            ScrapedPosting::Text(text) => format!(
                "Job Posting URL: {}\n\nRelevant Scraped Text:\n```\n{}\n```",
                self.url, text
            ),
            ScrapedPosting::Unavailable => format!(
                "Job Posting URL: {}\n\n(Could not scrape text. Rely on URL access.)",
                self.url
            ),
        }
    }
}

pub struct PostingFetcher {
    client: reqwest::Client,
}

impl PostingFetcher {
    pub fn new() -> Self {
        PostingFetcher {
            client: reqwest::Client::builder()
                .timeout(SCRAPE_TIMEOUT)
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    /// Fetches and extracts posting text. Infallible by contract: every
    /// failure mode degrades to `ScrapedPosting::Unavailable`.
    pub async fn fetch(&self, url: &str) -> JobContext {
        debug!("Attempting to scrape: {url}");

        let response = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("Error fetching {url}: {e}");
                return JobContext::unavailable(url);
            }
        };

        if !response.status().is_success() {
            warn!("Fetch of {url} returned status {}", response.status());
            return JobContext::unavailable(url);
        }

        let html = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Error reading body of {url}: {e}");
                return JobContext::unavailable(url);
            }
        };

        match extract_posting_text(&html) {
            Some(text) => {
                debug!("Scraped content length: {} characters", text.len());
                if text.len() < SHORT_SCRAPE_CHARS {
                    warn!("Scraped text seems short; content may be loaded dynamically");
                }
                JobContext {
                    url: url.to_string(),
                    posting: ScrapedPosting::Text(text),
                }
            }
            None => {
                warn!("No text content scraped from {url}");
                JobContext::unavailable(url)
            }
        }
    }
}

impl Default for PostingFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Pure extraction step: tries the posting selector cascade, falls back to
/// `body`, normalizes whitespace, and truncates oversized results.
pub fn extract_posting_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    let mut text = String::new();
    for selector_str in POSTING_SELECTORS {
        // Selectors are compile-time constants; parse cannot fail.
        let selector = Selector::parse(selector_str).expect("valid posting selector");
        if let Some(container) = document.select(&selector).next() {
            debug!("Scraping using selector: '{selector_str}'");
            text = collect_text(container.text());
            break;
        }
    }

    if text.is_empty() {
        let body = Selector::parse("body").expect("valid body selector");
        if let Some(container) = document.select(&body).next() {
            debug!("Specific selectors failed, falling back to body");
            text = collect_text(container.text());
        }
    }

    if text.is_empty() {
        return None;
    }

    if text.len() > MAX_SCRAPED_CHARS {
        warn!(
            "Truncating scraped text from {} to {MAX_SCRAPED_CHARS} characters",
            text.len()
        );
        let mut end = MAX_SCRAPED_CHARS;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
    }

    Some(text)
}

/// Joins trimmed, non-empty text nodes with single newlines (the equivalent
/// of the blank-line collapsing the extraction needs).
fn collect_text<'a>(nodes: impl Iterator<Item = &'a str>) -> String {
    nodes
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_job_description_container_over_body() {
        let html = r#"
            <html><body>
                <nav>Site navigation noise</nav>
                <div class="job-description">
                    <h1>Senior Rust Engineer</h1>
                    <p>Build distributed systems.</p>
                </div>
                <footer>Footer noise</footer>
            </body></html>
        "#;

        let text = extract_posting_text(html).unwrap();
        assert!(text.contains("Senior Rust Engineer"));
        assert!(text.contains("Build distributed systems."));
        assert!(!text.contains("Site navigation noise"));
        assert!(!text.contains("Footer noise"));
    }

    #[test]
    fn test_class_substring_selector_matches() {
        let html = r#"<html><body>
            <div class="posting-jobDescription-main"><p>Substring match works</p></div>
        </body></html>"#;

        let text = extract_posting_text(html).unwrap();
        assert_eq!(text, "Substring match works");
    }

    #[test]
    fn test_falls_back_to_body_when_no_selector_matches() {
        let html = "<html><body><p>Plain posting text</p></body></html>";
        let text = extract_posting_text(html).unwrap();
        assert_eq!(text, "Plain posting text");
    }

    #[test]
    fn test_empty_document_yields_none() {
        assert_eq!(extract_posting_text("<html><body></body></html>"), None);
        assert_eq!(extract_posting_text(""), None);
    }

    #[test]
    fn test_whitespace_is_normalized_to_single_newlines() {
        let html = "<html><body><article><p>First</p>\n\n\n<p>  Second  </p></article></body></html>";
        let text = extract_posting_text(html).unwrap();
        assert_eq!(text, "First\nSecond");
    }

    #[test]
    fn test_oversized_text_is_truncated() {
        let filler = "word ".repeat(5_000);
        let html = format!("<html><body><main><p>{filler}</p></main></body></html>");
        let text = extract_posting_text(&html).unwrap();
        assert!(text.len() <= MAX_SCRAPED_CHARS);
    }

    #[test]
    fn test_context_block_includes_scraped_text() {
        let job = JobContext {
            url: "https://example.com/jobs/1".to_string(),
            posting: ScrapedPosting::Text("Rust engineer wanted".to_string()),
        };
        let block = job.context_block();
        assert!(block.contains("Job Posting URL: https://example.com/jobs/1"));
        assert!(block.contains("Rust engineer wanted"));
    }

    #[test]
    fn test_context_block_carries_unavailable_marker() {
        let job = JobContext::unavailable("https://example.com/jobs/1");
        let block = job.context_block();
        assert!(block.contains("(Could not scrape text. Rely on URL access.)"));
        assert!(!block.contains("```"));
    }
}
