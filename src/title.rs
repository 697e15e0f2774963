use crate::config::ARTICLE_URL_TEMPLATE;

/// Characters MediaWiki escapes in article paths, with their escapes.
const TITLE_ESCAPES: &[(char, &str)] = &[
    ('"', "%22"),
    ('<', "%3C"),
    ('>', "%3E"),
    ('[', "%5B"),
    (']', "%5D"),
    ('{', "%7B"),
    ('}', "%7D"),
    ('|', "%7C"),
    ('?', "%3F"),
];

fn escape_for(c: char) -> Option<&'static str> {
    TITLE_ESCAPES
        .iter()
        .find(|(raw, _)| *raw == c)
        .map(|(_, escaped)| *escaped)
}

/// Canonicalizes a raw article title into a node identifier.
///
/// Spaces become underscores and the characters in the escape table are
/// percent-encoded. Everything else, including non-ASCII text, passes through
/// unchanged, so `"Big Bang"` and `"Big_Bang"` map to the same node.
pub fn encode(raw_title: &str) -> String {
    let mut out = String::with_capacity(raw_title.len());
    for c in raw_title.chars() {
        match c {
            ' ' => out.push('_'),
            _ => match escape_for(c) {
                Some(escaped) => out.push_str(escaped),
                None => out.push(c),
            },
        }
    }
    out
}

/// Full article URL for an already-encoded node identifier.
pub fn to_article_url(language_code: &str, node_id: &str) -> String {
    let prefix = ARTICLE_URL_TEMPLATE.replace("{lang}", language_code);
    let mut url = String::with_capacity(prefix.len() + node_id.len());
    url.push_str(&prefix);
    url.push_str(node_id);
    url
}
