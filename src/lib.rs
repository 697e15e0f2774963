//! Ariadne: Wikipedia's article link graph as a node expander
//!
//! This crate lets a graph search (typically bidirectional shortest path)
//! treat Wikipedia as if it were an adjacency list. Asking for a node's
//! neighbors turns into one or more MediaWiki API queries:
//!
//! 1. **Forward expansion** -- the articles a node links to
//!    (`action=query&prop=links`)
//! 2. **Backward expansion** -- the articles linking to a node
//!    (`action=query&list=backlinks`)
//!
//! Each expansion follows the API's continuation cursors until the result is
//! exhausted, keeps only main-namespace articles, and returns the neighbors as
//! canonical article URLs.
//!
//! # Key Modules
//!
//! - [`expander`] -- The pagination loop and the [`NodeExpander`] capability
//! - [`request`] -- Per-direction query URL construction
//! - [`parser`] -- Decoding of the two response shapes
//! - [`title`] -- Title canonicalization and article URLs
//! - [`fetch`] -- The [`PageFetcher`] transport seam and its `reqwest` implementation
//! - [`language`] -- Validated language subgraph handles
//! - [`graph`] -- Forward and backward expanders bundled per language
//! - [`stats`] -- Per-call page and edge counters
//! - [`models`] -- Direction, edges, and parsed pages
//! - [`config`] -- Endpoint templates and defaults
//!
//! # Example
//!
//! ```no_run
//! # async fn run() -> ariadne::Result<()> {
//! use ariadne::{Direction, LinkExpander};
//!
//! let expander = LinkExpander::new("en", Direction::Forward)?;
//! for url in expander.expand("Disc_jockey").await? {
//!     println!("{url}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Nothing is cached and nothing is deduplicated: every call goes back to the
//! API, and an article linked twice appears twice.

pub mod config;
pub mod error;
pub mod expander;
pub mod fetch;
pub mod graph;
pub mod language;
pub mod models;
pub mod parser;
pub mod request;
pub mod stats;
pub mod title;

pub use error::{Error, ExpansionCause, ExpansionError, Result, TransportError};
pub use expander::{ExpandOptions, LinkExpander, NodeExpander};
pub use fetch::{FetcherConfig, HttpFetcher, PageFetcher};
pub use graph::WikiLinkGraph;
pub use language::WikiLanguage;
pub use models::{Direction, Edge, LinkPage};
pub use stats::ExpansionStats;
