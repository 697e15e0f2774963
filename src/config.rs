/// MediaWiki API endpoint, `{lang}` is replaced with the language code
pub const API_URL_TEMPLATE: &str = "https://{lang}.wikipedia.org/w/api.php";

/// Article URL prefix, rendered as `{prefix}{node_id}`
pub const ARTICLE_URL_TEMPLATE: &str = "https://{lang}.wikipedia.org/wiki/";

/// Main/content namespace; everything else (talk, user, meta) is filtered out
pub const CONTENT_NAMESPACE: i64 = 0;

/// Page size requested from the API (`pllimit` / `bllimit`)
pub const LINK_LIMIT: &str = "max";

/// Default per-request HTTP timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Wikimedia rejects anonymous clients, so every request carries a user agent
pub const USER_AGENT: &str = concat!(
    "ariadne/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/real-limoges/ariadne)"
);

/// Language used by the CLI when `--lang` is omitted
pub const DEFAULT_LANGUAGE: &str = "en";
