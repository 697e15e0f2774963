use crate::error::Result;
use crate::expander::LinkExpander;
use crate::fetch::{FetcherConfig, HttpFetcher, PageFetcher};
use crate::language::WikiLanguage;
use crate::models::Direction;

/// Both directions of one language's link graph, as a bidirectional search
/// consumes them: `forward` grows the frontier from the source, `backward`
/// from the target.
#[derive(Debug, Clone)]
pub struct WikiLinkGraph<F = HttpFetcher> {
    pub forward: LinkExpander<F>,
    pub backward: LinkExpander<F>,
}

impl WikiLinkGraph<HttpFetcher> {
    /// Both expanders share one HTTP connection pool.
    pub fn new(language: WikiLanguage, config: &FetcherConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(config)?;
        Ok(Self::with_fetcher(language, fetcher))
    }
}

impl<F: PageFetcher + Clone> WikiLinkGraph<F> {
    pub fn with_fetcher(language: WikiLanguage, fetcher: F) -> Self {
        Self {
            forward: LinkExpander::from_parts(language.clone(), Direction::Forward, fetcher.clone()),
            backward: LinkExpander::from_parts(language, Direction::Backward, fetcher),
        }
    }

    pub fn expander(&self, direction: Direction) -> &LinkExpander<F> {
        match direction {
            Direction::Forward => &self.forward,
            Direction::Backward => &self.backward,
        }
    }

    pub fn language(&self) -> &WikiLanguage {
        self.forward.language()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions_are_wired() {
        let language = WikiLanguage::new("en").unwrap();
        let graph = WikiLinkGraph::new(language, &FetcherConfig::default()).unwrap();

        assert_eq!(graph.forward.direction(), Direction::Forward);
        assert_eq!(graph.backward.direction(), Direction::Backward);
        assert_eq!(graph.expander(Direction::Backward).direction(), Direction::Backward);
        assert_eq!(graph.language().code(), "en");
        assert_eq!(graph.backward.language().code(), "en");
    }
}
