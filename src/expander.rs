use crate::error::{Error, ExpansionCause, ExpansionError, Result, TransportError};
use crate::fetch::{FetcherConfig, HttpFetcher, PageFetcher};
use crate::language::WikiLanguage;
use crate::models::{Direction, Edge};
use crate::stats::ExpansionStats;
use crate::{parser, request, title};
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

/// What a graph search needs from the link graph: the neighbors of a node,
/// and whether a node exists at all.
#[async_trait]
pub trait NodeExpander: Send + Sync {
    async fn expand(&self, node: &str) -> Result<Vec<String>>;

    /// A node is valid when it has at least one neighbor. This costs a full
    /// expansion.
    async fn is_valid_node(&self, node: &str) -> Result<bool> {
        Ok(!self.expand(node).await?.is_empty())
    }
}

/// Per-call limits, checked every time a page is fetched.
#[derive(Debug, Clone, Default)]
pub struct ExpandOptions {
    pub deadline: Option<Instant>,
    pub cancel: Option<CancellationToken>,
}

impl ExpandOptions {
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// Expands article nodes in one direction of one language's link graph by
/// walking the API's continuation pages.
///
/// The expander holds no per-call state, so one instance can serve any number
/// of concurrent `expand` calls. Each call either returns every neighbor
/// across all pages, in the order the API returned them, or fails as a whole.
#[derive(Debug, Clone)]
pub struct LinkExpander<F = HttpFetcher> {
    language: WikiLanguage,
    direction: Direction,
    fetcher: F,
}

impl LinkExpander<HttpFetcher> {
    /// Expander for `https://{language_code}.wikipedia.org` using a default
    /// HTTP client. The language code is checked here, before any request.
    pub fn new(language_code: &str, direction: Direction) -> Result<Self> {
        let language = WikiLanguage::new(language_code)?;
        let fetcher = HttpFetcher::new(&FetcherConfig::default())?;
        Ok(Self::from_parts(language, direction, fetcher))
    }
}

impl<F: PageFetcher> LinkExpander<F> {
    pub fn with_fetcher(language_code: &str, direction: Direction, fetcher: F) -> Result<Self> {
        let language = WikiLanguage::new(language_code)?;
        Ok(Self::from_parts(language, direction, fetcher))
    }

    pub fn from_parts(language: WikiLanguage, direction: Direction, fetcher: F) -> Self {
        Self {
            language,
            direction,
            fetcher,
        }
    }

    pub fn language(&self) -> &WikiLanguage {
        &self.language
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub async fn expand(&self, node: &str) -> Result<Vec<String>> {
        self.expand_with(node, &ExpandOptions::default()).await
    }

    pub async fn expand_with(&self, node: &str, options: &ExpandOptions) -> Result<Vec<String>> {
        let (neighbors, _) = self.expand_with_stats(node, options).await?;
        Ok(neighbors)
    }

    /// Same as `expand`, as edges. The source is the canonical node id of
    /// `node`, so `"Big Bang"` and `"Big_Bang"` give identical edges.
    pub async fn expand_edges(&self, node: &str) -> Result<Vec<Edge>> {
        let neighbors = self.expand(node).await?;
        let source = title::encode(node);
        Ok(neighbors
            .into_iter()
            .map(|target| Edge {
                source: source.clone(),
                direction: self.direction,
                target,
            })
            .collect())
    }

    /// Runs the pagination loop: fetch the page for the current cursor,
    /// parse it, append its neighbors, and repeat until a page comes back
    /// without a cursor.
    pub async fn expand_with_stats(
        &self,
        node: &str,
        options: &ExpandOptions,
    ) -> Result<(Vec<String>, ExpansionStats)> {
        let mut neighbors = Vec::new();
        let mut stats = ExpansionStats::new();
        let mut cursor: Option<String> = None;
        let mut page_number: u32 = 1;

        loop {
            let url = request::build(&self.language, self.direction, node, cursor.as_deref());

            let body = self
                .fetch_page(&url, options)
                .await
                .map_err(|cause| self.fail(node, page_number, cause))?;

            let page = parser::parse_page(self.direction, &body)
                .map_err(|cause| self.fail(node, page_number, cause))?;

            stats.record_page(&page);
            debug!(
                node,
                direction = %self.direction,
                page = page_number,
                edges = page.titles.len(),
                filtered = page.filtered,
                cursor = page.next_cursor.as_deref(),
                "Parsed page"
            );

            let code = self.language.code();
            neighbors.extend(
                page.titles
                    .iter()
                    .map(|raw| title::to_article_url(code, &title::encode(raw))),
            );

            match page.next_cursor {
                Some(next) if cursor.as_deref() == Some(next.as_str()) => {
                    return Err(self.fail(
                        node,
                        page_number,
                        ExpansionCause::RepeatedCursor { cursor: next },
                    ));
                }
                Some(next) => {
                    cursor = Some(next);
                    page_number += 1;
                }
                None => break,
            }
        }

        info!(
            node,
            direction = %self.direction,
            pages = stats.pages(),
            neighbors = neighbors.len(),
            "Expansion complete"
        );

        Ok((neighbors, stats))
    }

    async fn fetch_page(
        &self,
        url: &Url,
        options: &ExpandOptions,
    ) -> std::result::Result<String, ExpansionCause> {
        if options.cancel.as_ref().is_some_and(|t| t.is_cancelled()) {
            return Err(ExpansionCause::Cancelled);
        }
        if options.deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(TransportError::Timeout {
                url: url.to_string(),
            }
            .into());
        }

        let fetch = async {
            match options.deadline {
                Some(deadline) => {
                    match tokio::time::timeout_at(deadline, self.fetcher.fetch(url, Some(deadline)))
                        .await
                    {
                        Ok(result) => result,
                        Err(_) => Err(TransportError::Timeout {
                            url: url.to_string(),
                        }),
                    }
                }
                None => self.fetcher.fetch(url, None).await,
            }
        };

        match &options.cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => Err(ExpansionCause::Cancelled),
                result = fetch => result.map_err(ExpansionCause::from),
            },
            None => fetch.await.map_err(ExpansionCause::from),
        }
    }

    fn fail(&self, node: &str, page: u32, cause: ExpansionCause) -> Error {
        warn!(
            node,
            direction = %self.direction,
            page,
            error = %cause,
            "Expansion failed"
        );
        Error::Expansion(ExpansionError {
            node: node.to_string(),
            direction: self.direction,
            page,
            cause,
        })
    }
}

#[async_trait]
impl<F: PageFetcher> NodeExpander for LinkExpander<F> {
    async fn expand(&self, node: &str) -> Result<Vec<String>> {
        LinkExpander::<F>::expand(self, node).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays canned bodies in order and remembers every URL asked for.
    struct Replay {
        bodies: Mutex<VecDeque<String>>,
        seen: Mutex<Vec<Url>>,
    }

    impl Replay {
        fn new(bodies: &[&str]) -> Self {
            Self {
                bodies: Mutex::new(bodies.iter().map(|b| b.to_string()).collect()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn seen(&self) -> Vec<Url> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageFetcher for Replay {
        async fn fetch(
            &self,
            url: &Url,
            _deadline: Option<Instant>,
        ) -> std::result::Result<String, TransportError> {
            self.seen.lock().unwrap().push(url.clone());
            self.bodies
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| TransportError::Status {
                    url: url.to_string(),
                    status: 404,
                })
        }
    }

    fn query_value(url: &Url, key: &str) -> Option<String> {
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    #[tokio::test]
    async fn single_page_forward() {
        let replay = Replay::new(&[r#"{"query": {"pages": {"1": {"links": [
            {"ns": 0, "title": "Big Bang"}, {"ns": 0, "title": "Cosmology"}]}}}}"#]);
        let expander = LinkExpander::with_fetcher("en", Direction::Forward, replay).unwrap();

        let neighbors = expander.expand("Universe").await.unwrap();
        assert_eq!(
            neighbors,
            vec![
                "https://en.wikipedia.org/wiki/Big_Bang",
                "https://en.wikipedia.org/wiki/Cosmology",
            ]
        );
        assert_eq!(expander.fetcher().seen().len(), 1);
    }

    #[tokio::test]
    async fn backward_follows_blcontinue() {
        let replay = Replay::new(&[
            r#"{"continue": {"blcontinue": "0|42"}, "query": {"backlinks": [{"ns": 0, "title": "A"}]}}"#,
            r#"{"query": {"backlinks": [{"ns": 0, "title": "B"}]}}"#,
        ]);
        let expander = LinkExpander::with_fetcher("en", Direction::Backward, replay).unwrap();

        let (neighbors, stats) = expander
            .expand_with_stats("Target", &ExpandOptions::default())
            .await
            .unwrap();
        assert_eq!(neighbors.len(), 2);
        assert_eq!(stats.pages(), 2);

        let seen = expander.fetcher().seen();
        assert_eq!(query_value(&seen[0], "blcontinue"), None);
        assert_eq!(query_value(&seen[1], "blcontinue").as_deref(), Some("0|42"));
        assert_eq!(query_value(&seen[1], "bltitle").as_deref(), Some("Target"));
    }

    #[tokio::test]
    async fn parse_failure_reports_page_number() {
        let replay = Replay::new(&[
            r#"{"continue": {"plcontinue": "X"}, "query": {"pages": {"1": {"links": []}}}}"#,
            "<html>oops</html>",
        ]);
        let expander = LinkExpander::with_fetcher("en", Direction::Forward, replay).unwrap();

        match expander.expand("Node").await {
            Err(Error::Expansion(e)) => {
                assert_eq!(e.page, 2);
                assert_eq!(e.direction, Direction::Forward);
                assert!(matches!(e.cause, ExpansionCause::MalformedResponse(_)));
            }
            other => panic!("expected expansion error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn edges_carry_source_and_direction() {
        let replay = Replay::new(&[r#"{"query": {"backlinks": [{"ns": 0, "title": "Physics"}]}}"#]);
        let expander = LinkExpander::with_fetcher("en", Direction::Backward, replay).unwrap();

        let edges = expander.expand_edges("Big Bang").await.unwrap();
        assert_eq!(
            edges,
            vec![Edge {
                source: "Big_Bang".to_string(),
                direction: Direction::Backward,
                target: "https://en.wikipedia.org/wiki/Physics".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn already_cancelled_token_skips_fetch() {
        let token = CancellationToken::new();
        token.cancel();
        let replay = Replay::new(&[r#"{"query": {"backlinks": []}}"#]);
        let expander = LinkExpander::with_fetcher("en", Direction::Backward, replay).unwrap();

        let err = expander
            .expand_with("Node", &ExpandOptions::default().with_cancellation(token))
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
        assert!(expander.fetcher().seen().is_empty());
    }

    #[tokio::test]
    async fn trait_object_dispatch() {
        let replay = Replay::new(&[r#"{"query": {"backlinks": [{"ns": 0, "title": "X"}]}}"#]);
        let expander: Box<dyn NodeExpander> =
            Box::new(LinkExpander::with_fetcher("en", Direction::Backward, replay).unwrap());
        assert!(expander.is_valid_node("Y").await.unwrap());
    }
}
