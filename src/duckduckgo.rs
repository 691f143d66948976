use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

use crate::search_agent::{RawHit, SafeSearch, SearchBackend, SearchError};

pub const DDG_HTML_URL: &str = "https://html.duckduckgo.com/html/";

/// Web search through the DuckDuckGo HTML endpoint.
pub struct DuckDuckGoBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl DuckDuckGoBackend {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, SearchError> {
        Self::with_endpoint(DDG_HTML_URL, timeout, user_agent)
    }

    pub fn with_endpoint(
        endpoint: &str,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }
}

fn safe_search_param(safe_search: SafeSearch) -> &'static str {
    match safe_search {
        SafeSearch::Strict => "1",
        SafeSearch::Moderate => "-1",
        SafeSearch::Off => "-2",
    }
}

#[async_trait]
impl SearchBackend for DuckDuckGoBackend {
    async fn text(
        &self,
        query: &str,
        max_results: usize,
        safe_search: SafeSearch,
    ) -> Result<Vec<RawHit>, SearchError> {
        let res = self
            .client
            .post(&self.endpoint)
            .form(&[("q", query), ("kp", safe_search_param(safe_search))])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(SearchError::Status(status));
        }

        let body = res.text().await?;
        parse_results(&body, max_results)
    }
}

fn selector(css: &str) -> Result<Selector, SearchError> {
    Selector::parse(css).map_err(|e| SearchError::Parse(format!("bad selector {css}: {e:?}")))
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extracts organic hits from a DuckDuckGo HTML results page. Ads and blocks
/// without a title link are skipped.
pub fn parse_results(html: &str, max_results: usize) -> Result<Vec<RawHit>, SearchError> {
    let document = Html::parse_document(html);
    let result_selector = selector("div.result")?;
    let link_selector = selector("a.result__a")?;
    let snippet_selector = selector(".result__snippet")?;

    let mut hits = Vec::new();
    for block in document.select(&result_selector) {
        if hits.len() >= max_results {
            break;
        }
        if block.value().classes().any(|c| c == "result--ad") {
            continue;
        }
        let Some(link) = block.select(&link_selector).next() else {
            continue;
        };
        let Some(href) = link.value().attr("href").and_then(resolve_href) else {
            continue;
        };
        let title = element_text(link);
        if title.is_empty() {
            continue;
        }
        let body = block
            .select(&snippet_selector)
            .next()
            .map(element_text)
            .unwrap_or_default();

        hits.push(RawHit { title, body, href });
    }
    Ok(hits)
}

/// Turns a result href into the target url, unwrapping `/l/?uddg=` redirects.
fn resolve_href(href: &str) -> Option<String> {
    let absolute = if href.starts_with("//") {
        format!("https:{href}")
    } else if href.starts_with('/') {
        format!("https://duckduckgo.com{href}")
    } else {
        href.to_string()
    };

    let url = Url::parse(&absolute).ok()?;
    let is_redirect = url
        .host_str()
        .is_some_and(|h| h.ends_with("duckduckgo.com"))
        && url.path() == "/l/";
    if is_redirect {
        return url
            .query_pairs()
            .find(|(k, _)| k == "uddg")
            .map(|(_, v)| v.into_owned());
    }
    if url.scheme() == "http" || url.scheme() == "https" {
        Some(url.to_string())
    } else {
        None
    }
}
