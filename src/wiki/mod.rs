//! MediaWiki API client: full-text search and wikitext page fetch.
//!
//! This is the page-content boundary of the application. Calls block, so the
//! app runs each one on its own thread and receives the outcome as an event;
//! nothing in here touches application state.

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;
use std::time::Duration;

/// One search result row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub page_id: u64,
    pub snippet: String,
}

/// A fetched page, wikitext included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub page_id: u64,
    pub wikitext: String,
}

/// How to address a page in a fetch request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageRef {
    Id(u64),
    Title(String),
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    query: SearchQuery,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    search: Vec<RawSearchHit>,
}

#[derive(Debug, Deserialize)]
struct RawSearchHit {
    title: String,
    pageid: u64,
    #[serde(default)]
    snippet: String,
}

#[derive(Debug, Deserialize)]
struct ParseResponse {
    parse: RawPage,
}

#[derive(Debug, Deserialize)]
struct RawPage {
    title: String,
    pageid: u64,
    wikitext: String,
}

/// Blocking client for one MediaWiki `api.php` endpoint.
#[derive(Debug, Clone)]
pub struct WikiClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl WikiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("wikivi/", env!("CARGO_PKG_VERSION")))
            .build()
            .wrap_err("failed to build http client")?;
        Ok(Self {
            base_url: base_url.to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full-text search. Snippets come back with HTML highlight markup,
    /// which is stripped before display.
    pub fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        let response: SearchResponse = self
            .http
            .get(&self.base_url)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("formatversion", "2"),
                ("list", "search"),
                ("srprop", "snippet"),
                ("srsearch", query),
            ])
            .send()
            .wrap_err("search request failed")?
            .error_for_status()
            .wrap_err("search request rejected")?
            .json()
            .wrap_err("malformed search response")?;

        Ok(response
            .query
            .search
            .into_iter()
            .map(|hit| SearchHit {
                title: hit.title,
                page_id: hit.pageid,
                snippet: strip_html_tags(&hit.snippet),
            })
            .collect())
    }

    /// Fetch a page's wikitext by title or page id.
    pub fn fetch(&self, page: &PageRef) -> Result<Page> {
        let mut request = self.http.get(&self.base_url).query(&[
            ("action", "parse"),
            ("format", "json"),
            ("formatversion", "2"),
            ("prop", "wikitext"),
            ("redirects", "1"),
        ]);
        request = match page {
            PageRef::Id(id) => request.query(&[("pageid", id.to_string())]),
            PageRef::Title(title) => request.query(&[("page", title.clone())]),
        };

        let response: ParseResponse = request
            .send()
            .wrap_err("page request failed")?
            .error_for_status()
            .wrap_err("page request rejected")?
            .json()
            .wrap_err("malformed page response")?;

        Ok(Page {
            title: response.parse.title,
            page_id: response.parse.pageid,
            wikitext: response.parse.wikitext,
        })
    }
}

/// Remove HTML tags and the few entities MediaWiki emits in search snippets.
pub fn strip_html_tags(snippet: &str) -> String {
    static TAGS: OnceLock<Regex> = OnceLock::new();
    let tags = TAGS.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern"));
    tags.replace_all(snippet, "")
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_search_response() {
        let body = r#"{
            "query": {
                "search": [
                    {"title": "Varrock", "pageid": 44134,
                     "snippet": "<span class=\"searchmatch\">Varrock</span> is a city"},
                    {"title": "Grand Exchange", "pageid": 70}
                ]
            }
        }"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.query.search.len(), 2);
        assert_eq!(response.query.search[0].pageid, 44134);
        assert_eq!(response.query.search[1].snippet, "");
    }

    #[test]
    fn test_deserialize_parse_response() {
        let body = r#"{
            "parse": {
                "title": "Varrock",
                "pageid": 44134,
                "wikitext": "'''Varrock''' is the capital."
            }
        }"#;
        let response: ParseResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.parse.title, "Varrock");
        assert!(response.parse.wikitext.starts_with("'''Varrock'''"));
    }

    #[test]
    fn test_snippet_tags_stripped() {
        let raw = "<span class=\"searchmatch\">Varrock</span> &amp; the &quot;GE&quot;";
        assert_eq!(strip_html_tags(raw), "Varrock & the \"GE\"");
    }
}
