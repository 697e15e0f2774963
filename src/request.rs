use crate::config::LINK_LIMIT;
use crate::language::WikiLanguage;
use crate::models::Direction;
use url::Url;

/// Builds the API query for one page of `node`'s links in `direction`.
///
/// Parameter order is fixed: `action`, the direction's title/list/limit
/// parameters, `format`, then the continuation cursor when there is one.
/// Values are form-encoded, so `"Big Bang"` goes out as `Big+Bang`.
pub fn build(
    language: &WikiLanguage,
    direction: Direction,
    node_id: &str,
    cursor: Option<&str>,
) -> Url {
    let mut url = language.api_url().clone();
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("action", "query");
        match direction {
            Direction::Forward => {
                query
                    .append_pair("titles", node_id)
                    .append_pair("prop", "links")
                    .append_pair("pllimit", LINK_LIMIT);
            }
            Direction::Backward => {
                query
                    .append_pair("list", "backlinks")
                    .append_pair("bltitle", node_id)
                    .append_pair("bllimit", LINK_LIMIT);
            }
        }
        query.append_pair("format", "json");
        if let Some(cursor) = cursor {
            query.append_pair(direction.continue_param(), cursor);
        }
    }
    url
}
