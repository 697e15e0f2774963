//! Decoding of the two MediaWiki response shapes.
//!
//! Forward expansion (`prop=links`) nests the links under the single entry of
//! `query.pages`:
//!
//! ```json
//! {"continue": {"plcontinue": "736|0|Ellipse", "continue": "||"},
//!  "query": {"pages": {"736": {"pageid": 736, "ns": 0, "title": "Albert Einstein",
//!                              "links": [{"ns": 0, "title": "Annus mirabilis"}]}}}}
//! ```
//!
//! Backward expansion (`list=backlinks`) lists them directly:
//!
//! ```json
//! {"continue": {"blcontinue": "0|1234", "continue": "-||"},
//!  "query": {"backlinks": [{"pageid": 12, "ns": 0, "title": "Physics"}]}}
//! ```
//!
//! Both parsers treat absent optional fields as "nothing more" and only fail
//! when the body does not decode at all or the API answered with an `error`
//! object. A link entry missing its `ns` or `title` is dropped and counted as
//! filtered; one whose fields have the wrong type makes the page malformed.

use crate::config::CONTENT_NAMESPACE;
use crate::error::ExpansionCause;
use crate::models::{Direction, LinkPage};
use serde::de::IgnoredAny;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Deserialize)]
struct Response<Q> {
    query: Option<Q>,
    #[serde(rename = "continue")]
    continuation: Option<Continuation>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Continuation {
    plcontinue: Option<String>,
    blcontinue: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Deserialize)]
struct ForwardQuery {
    #[serde(default)]
    pages: BTreeMap<String, PageEntry>,
}

#[derive(Deserialize)]
struct PageEntry {
    missing: Option<IgnoredAny>,
    invalid: Option<IgnoredAny>,
    #[serde(default)]
    links: Vec<LinkEntry>,
}

#[derive(Deserialize)]
struct BackwardQuery {
    #[serde(default)]
    backlinks: Vec<LinkEntry>,
}

#[derive(Deserialize)]
struct LinkEntry {
    #[serde(default)]
    ns: Option<i64>,
    #[serde(default)]
    title: Option<String>,
}

/// Decodes one page in the shape `direction` asks for.
pub fn parse_page(direction: Direction, json_text: &str) -> Result<LinkPage, ExpansionCause> {
    match direction {
        Direction::Forward => parse_forward(json_text),
        Direction::Backward => parse_backward(json_text),
    }
}

pub fn parse_forward(json_text: &str) -> Result<LinkPage, ExpansionCause> {
    let response: Response<ForwardQuery> = serde_json::from_str(json_text)?;
    check_api_error(&response)?;

    let page = response
        .query
        .and_then(|q| q.pages.into_values().next());

    let links = match page {
        Some(entry) if entry.missing.is_none() && entry.invalid.is_none() => entry.links,
        // Nonexistent article: a valid, final, empty page.
        _ => return Ok(LinkPage::default()),
    };

    let next_cursor = response.continuation.and_then(|c| c.plcontinue);
    Ok(filter_links(links, next_cursor))
}

pub fn parse_backward(json_text: &str) -> Result<LinkPage, ExpansionCause> {
    let response: Response<BackwardQuery> = serde_json::from_str(json_text)?;
    check_api_error(&response)?;

    let links = response.query.map(|q| q.backlinks).unwrap_or_default();
    let next_cursor = response.continuation.and_then(|c| c.blcontinue);
    Ok(filter_links(links, next_cursor))
}

fn check_api_error<Q>(response: &Response<Q>) -> Result<(), ExpansionCause> {
    match &response.error {
        Some(e) => Err(ExpansionCause::Remote {
            code: e.code.clone(),
            info: e.info.clone(),
        }),
        None => Ok(()),
    }
}

fn filter_links(links: Vec<LinkEntry>, next_cursor: Option<String>) -> LinkPage {
    let total = links.len();
    let titles: Vec<String> = links
        .into_iter()
        .filter(|l| l.ns == Some(CONTENT_NAMESPACE))
        .filter_map(|l| l.title)
        .collect();

    LinkPage {
        filtered: total - titles.len(),
        titles,
        next_cursor,
    }
}
