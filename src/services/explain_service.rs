//! Best-effort topic explanation scraped from web search results.
//!
//! Pipeline: build a query from the topic title, run it through the Google
//! Custom Search JSON API, fetch up to `max_pages` result pages (each under a
//! hard timeout, failures skipped), strip script/style noise, then pick the
//! paragraph with the highest keyword overlap and the first plausible
//! `<pre>/<code>` block. When search is not configured or turns up nothing,
//! a keyword-keyed template snippet stands in. No correctness contract is
//! offered; degradation is silent by design of the source system.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;

use crate::config::{self, SearchConfig};
use crate::error::ApiError;

const SEARCH_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";
const USER_AGENT: &str = "Mozilla/5.0 (compatible; lms-api)";

/// Minimum characters for a paragraph to be considered substantial.
const MIN_PARAGRAPH_LEN: usize = 80;
/// Minimum characters for an extracted code block to be kept.
const MIN_CODE_LEN: usize = 20;

static SCRIPT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").expect("script regex"));
static STYLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").expect("style regex"));
static COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment regex"));
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("tag regex"));
static PRE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<pre[^>]*>(?:\s*<code[^>]*>)?(.*?)(?:</code>\s*)?</pre>").expect("pre regex")
});
static CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<code[^>]*>(.*?)</code>").expect("code regex"));
static PARAGRAPH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<p[^>]*>(.*?)</p>").expect("paragraph regex"));

#[derive(Debug, Serialize)]
pub struct Explanation {
    pub explanation: String,
    pub code: String,
    pub language: String,
    pub sources: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    link: String,
    #[serde(default)]
    snippet: String,
}

/// Run the full pipeline for a topic.
pub async fn explain(http: &Client, title: &str, content: &str) -> Result<Explanation, ApiError> {
    let cfg = &config::config().search;
    let query = build_query(title, content);

    if cfg.google_api_key.is_empty() || cfg.search_engine_id.is_empty() {
        tracing::debug!("search keys not configured, using template fallback");
        return Ok(fallback_explanation(title));
    }

    let items = search(http, cfg, &query).await?;
    if items.is_empty() {
        return Ok(fallback_explanation(title));
    }

    let keywords = query_keywords(&query);
    let mut best: Option<(usize, String, String)> = None; // (score, paragraph, url)
    let mut code: Option<(String, String)> = None; // (code, url)

    for item in items.iter().take(cfg.max_pages) {
        let fetch = fetch_page(http, &item.link);
        let page = match timeout(Duration::from_secs(cfg.page_fetch_timeout_secs), fetch).await {
            Ok(Ok(body)) => body,
            Ok(Err(e)) => {
                tracing::debug!(url = %item.link, error = %e, "page fetch failed, skipping");
                continue;
            }
            Err(_) => {
                tracing::debug!(url = %item.link, "page fetch timed out, skipping");
                continue;
            }
        };

        if let Some((score, para)) = best_relevant_paragraph(&page, &keywords) {
            let better = score >= cfg.relevance_threshold
                && best.as_ref().map_or(true, |(s, _, _)| score > *s);
            if better {
                best = Some((score, para, item.link.clone()));
            }
        }

        if code.is_none() {
            if let Some(block) = extract_code(&page) {
                code = Some((block, item.link.clone()));
            }
        }
    }

    let mut sources = Vec::new();
    let explanation = match best {
        Some((_, para, url)) => {
            sources.push(url);
            para
        }
        // Fall back to the first non-empty search snippet
        None => items
            .iter()
            .map(|i| i.snippet.trim().to_string())
            .find(|s| !s.is_empty())
            .unwrap_or_else(|| fallback_text(title)),
    };

    let (code, language) = match code {
        Some((block, url)) => {
            if !sources.contains(&url) {
                sources.push(url);
            }
            let language = guess_language(&block);
            (block, language)
        }
        None => {
            let fb = fallback_explanation(title);
            (fb.code, fb.language)
        }
    };

    Ok(Explanation {
        explanation,
        code,
        language,
        sources,
    })
}

/// Title plus the first few content words, padded with search hints.
pub fn build_query(title: &str, content: &str) -> String {
    let lead: Vec<&str> = content.split_whitespace().take(8).collect();
    let mut query = title.trim().to_string();
    if !lead.is_empty() {
        query.push(' ');
        query.push_str(&lead.join(" "));
    }
    query.push_str(" explanation example");
    query
}

async fn search(http: &Client, cfg: &SearchConfig, query: &str) -> Result<Vec<SearchItem>, ApiError> {
    let response = http
        .get(SEARCH_ENDPOINT)
        .query(&[
            ("key", cfg.google_api_key.as_str()),
            ("cx", cfg.search_engine_id.as_str()),
            ("q", query),
            ("num", "5"),
        ])
        .send()
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "search request failed");
            ApiError::bad_gateway("search request failed")
        })?;

    if !response.status().is_success() {
        tracing::warn!(status = %response.status(), "search API returned an error");
        return Err(ApiError::bad_gateway(format!(
            "search API returned {}",
            response.status()
        )));
    }

    let parsed: SearchResponse = response
        .json()
        .await
        .map_err(|_| ApiError::bad_gateway("search response was not valid JSON"))?;

    Ok(parsed.items)
}

async fn fetch_page(http: &Client, url: &str) -> Result<String, reqwest::Error> {
    http.get(url)
        .header("user-agent", USER_AGENT)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await
}

/// Drop script/style/comment blocks; tags are stripped later per fragment.
pub fn strip_noise(html: &str) -> String {
    let html = SCRIPT_RE.replace_all(html, " ");
    let html = STYLE_RE.replace_all(&html, " ");
    COMMENT_RE.replace_all(&html, " ").into_owned()
}

fn strip_tags(fragment: &str) -> String {
    let text = TAG_RE.replace_all(fragment, " ");
    collapse_whitespace(&decode_entities(&text))
}

pub fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// All substantial `<p>` paragraphs, tags stripped.
pub fn extract_paragraphs(html: &str) -> Vec<String> {
    let html = strip_noise(html);
    PARAGRAPH_RE
        .captures_iter(&html)
        .map(|c| strip_tags(&c[1]))
        .filter(|p| p.len() >= MIN_PARAGRAPH_LEN)
        .collect()
}

/// Distinct lowercase query words worth matching on.
pub fn query_keywords(query: &str) -> Vec<String> {
    const STOPWORDS: &[&str] = &["the", "and", "for", "with", "what", "how", "why", "are"];
    let mut keywords: Vec<String> = Vec::new();
    for word in query.split_whitespace() {
        let word: String = word
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        if word.len() >= 3 && !STOPWORDS.contains(&word.as_str()) && !keywords.contains(&word) {
            keywords.push(word);
        }
    }
    keywords
}

/// Count distinct keywords appearing in the paragraph.
pub fn relevance(paragraph: &str, keywords: &[String]) -> usize {
    let lower = paragraph.to_lowercase();
    keywords.iter().filter(|k| lower.contains(k.as_str())).count()
}

/// Highest-scoring paragraph of a page, if any.
pub fn best_relevant_paragraph(html: &str, keywords: &[String]) -> Option<(usize, String)> {
    extract_paragraphs(html)
        .into_iter()
        .map(|p| (relevance(&p, keywords), p))
        .max_by_key(|(score, _)| *score)
}

/// First plausible code block: `<pre>` (optionally wrapping `<code>`) wins
/// over bare `<code>` spans, which are usually inline identifiers.
pub fn extract_code(html: &str) -> Option<String> {
    let html = strip_noise(html);

    for caps in PRE_RE.captures_iter(&html) {
        let block = decode_entities(&TAG_RE.replace_all(&caps[1], ""));
        let block = block.trim();
        if block.len() >= MIN_CODE_LEN {
            return Some(block.to_string());
        }
    }

    for caps in CODE_RE.captures_iter(&html) {
        let block = decode_entities(&TAG_RE.replace_all(&caps[1], ""));
        let block = block.trim();
        if block.len() >= MIN_CODE_LEN && block.contains('\n') {
            return Some(block.to_string());
        }
    }

    None
}

/// Crude shape-based language tag.
pub fn guess_language(code: &str) -> String {
    let lang = if code.contains("#include") || code.contains("std::cout") {
        "cpp"
    } else if code.contains("public static void main") || code.contains("System.out") {
        "java"
    } else if code.contains("def ") || code.contains("print(") {
        "python"
    } else if code.contains("fn main") || code.contains("let mut") {
        "rust"
    } else if code.contains("function ")
        || code.contains("console.log")
        || code.contains("=>")
        || code.contains("const ")
    {
        "javascript"
    } else if code.to_uppercase().contains("SELECT ") && code.to_uppercase().contains(" FROM ") {
        "sql"
    } else {
        "text"
    };
    lang.to_string()
}

fn fallback_text(title: &str) -> String {
    format!(
        "{} is a topic from your course materials. A short summary could not be \
         gathered from the web right now; the sample below sketches the usual shape \
         of the concept.",
        title.trim()
    )
}

/// Template answer keyed on crude keyword matching, used when search is
/// unconfigured or comes back empty.
pub fn fallback_explanation(title: &str) -> Explanation {
    let lower = title.to_lowercase();

    let (code, language) = if lower.contains("loop") || lower.contains("iteration") {
        (
            "for i in range(5):\n    print(f\"iteration {i}\")".to_string(),
            "python".to_string(),
        )
    } else if lower.contains("function") || lower.contains("callback") {
        (
            "function greet(name) {\n  return `Hello, ${name}!`;\n}\n\nconsole.log(greet(\"class\"));"
                .to_string(),
            "javascript".to_string(),
        )
    } else if lower.contains("class") || lower.contains("object") {
        (
            "public class Student {\n    private String name;\n\n    public Student(String name) {\n        this.name = name;\n    }\n}"
                .to_string(),
            "java".to_string(),
        )
    } else if lower.contains("array") || lower.contains("list") {
        (
            "numbers = [3, 1, 4, 1, 5]\nnumbers.sort()\nprint(numbers)".to_string(),
            "python".to_string(),
        )
    } else if lower.contains("recursion") || lower.contains("recursive") {
        (
            "def factorial(n):\n    if n <= 1:\n        return 1\n    return n * factorial(n - 1)"
                .to_string(),
            "python".to_string(),
        )
    } else {
        (
            format!("# {}\n# Work through the idea step by step:\nsteps = [\"define\", \"example\", \"practice\"]\nfor step in steps:\n    print(step)", title.trim()),
            "python".to_string(),
        )
    };

    Explanation {
        explanation: fallback_text(title),
        code,
        language,
        sources: Vec::new(),
    }
}
