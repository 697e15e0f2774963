use serde::Serialize;
use std::fmt;

/// Which way an expander walks the link graph.
///
/// `Forward` follows links out of an article (`prop=links`), `Backward`
/// follows them in (`list=backlinks`). The variant picks both the request
/// template and the response shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Query parameter that carries the continuation cursor.
    pub fn continue_param(self) -> &'static str {
        match self {
            Direction::Forward => "plcontinue",
            Direction::Backward => "blcontinue",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One directed link produced by a single expansion call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub source: String,
    pub direction: Direction,
    pub target: String,
}

/// One decoded page of API output: raw titles that survived the namespace
/// filter, plus the cursor for the next page if there is one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPage {
    pub titles: Vec<String>,
    pub next_cursor: Option<String>,
    pub filtered: usize,
}

impl LinkPage {
    pub fn is_last(&self) -> bool {
        self.next_cursor.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continue_param_per_direction() {
        assert_eq!(Direction::Forward.continue_param(), "plcontinue");
        assert_eq!(Direction::Backward.continue_param(), "blcontinue");
    }

    #[test]
    fn direction_display() {
        assert_eq!(Direction::Forward.to_string(), "forward");
        assert_eq!(Direction::Backward.to_string(), "backward");
    }

    #[test]
    fn edge_serializes_lowercase_direction() {
        let edge = Edge {
            source: "Rust".to_string(),
            direction: Direction::Backward,
            target: "https://en.wikipedia.org/wiki/Mozilla".to_string(),
        };
        let json = serde_json::to_string(&edge).unwrap();
        assert!(json.contains(r#""direction":"backward""#));
    }

    #[test]
    fn page_without_cursor_is_last() {
        let page = LinkPage::default();
        assert!(page.is_last());

        let page = LinkPage {
            next_cursor: Some("X".to_string()),
            ..LinkPage::default()
        };
        assert!(!page.is_last());
    }
}
