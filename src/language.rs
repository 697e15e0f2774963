use crate::config::API_URL_TEMPLATE;
use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;
use url::Url;

/// ISO 639-1 two-letter language codes.
const ISO_639_1: &[&str] = &[
    "aa", "ab", "ae", "af", "ak", "am", "an", "ar", "as", "av", "ay", "az", "ba", "be", "bg",
    "bh", "bi", "bm", "bn", "bo", "br", "bs", "ca", "ce", "ch", "co", "cr", "cs", "cu", "cv",
    "cy", "da", "de", "dv", "dz", "ee", "el", "en", "eo", "es", "et", "eu", "fa", "ff", "fi",
    "fj", "fo", "fr", "fy", "ga", "gd", "gl", "gn", "gu", "gv", "ha", "he", "hi", "ho", "hr",
    "ht", "hu", "hy", "hz", "ia", "id", "ie", "ig", "ii", "ik", "io", "is", "it", "iu", "ja",
    "jv", "ka", "kg", "ki", "kj", "kk", "kl", "km", "kn", "ko", "kr", "ks", "ku", "kv", "kw",
    "ky", "la", "lb", "lg", "li", "ln", "lo", "lt", "lu", "lv", "mg", "mh", "mi", "mk", "ml",
    "mn", "mr", "ms", "mt", "my", "na", "nb", "nd", "ne", "ng", "nl", "nn", "no", "nr", "nv",
    "ny", "oc", "oj", "om", "or", "os", "pa", "pi", "pl", "ps", "pt", "qu", "rm", "rn", "ro",
    "ru", "rw", "sa", "sc", "sd", "se", "sg", "si", "sk", "sl", "sm", "sn", "so", "sq", "sr",
    "ss", "st", "su", "sv", "sw", "ta", "te", "tg", "th", "ti", "tk", "tl", "tn", "to", "tr",
    "ts", "tt", "tw", "ty", "ug", "uk", "ur", "uz", "ve", "vi", "vo", "wa", "wo", "xh", "yi",
    "yo", "za", "zh", "zu",
];

static LANGUAGE_CODES: Lazy<FxHashSet<&'static str>> =
    Lazy::new(|| ISO_639_1.iter().copied().collect());

pub fn is_known_language(code: &str) -> bool {
    LANGUAGE_CODES.contains(code)
}

/// Handle on one language's article subgraph: the validated language code
/// and the API endpoint queries are sent to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiLanguage {
    code: String,
    api_url: Url,
}

impl WikiLanguage {
    /// Validates `code` and points at `https://{code}.wikipedia.org/w/api.php`.
    pub fn new(code: &str) -> Result<Self> {
        let api_url = API_URL_TEMPLATE.replace("{lang}", code);
        Self::with_api_url(code, &api_url)
    }

    /// Like [`WikiLanguage::new`] but against a custom endpoint (a mirror or a
    /// local test server). Article URLs still use the public template.
    pub fn with_api_url(code: &str, api_url: &str) -> Result<Self> {
        if !is_known_language(code) {
            return Err(Error::InvalidLanguage {
                code: code.to_string(),
            });
        }

        let api_url = Url::parse(api_url).map_err(|e| Error::Configuration {
            message: format!("invalid API URL {api_url:?}: {e}"),
        })?;

        if api_url.cannot_be_a_base() {
            return Err(Error::Configuration {
                message: format!("API URL {api_url} cannot carry query parameters"),
            });
        }

        Ok(Self {
            code: code.to_string(),
            api_url,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_sorted_and_unique() {
        assert!(ISO_639_1.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(LANGUAGE_CODES.len(), ISO_639_1.len());
    }

    #[test]
    fn known_languages() {
        for code in ["en", "de", "fi", "ja", "zh"] {
            assert!(is_known_language(code), "{code} should be known");
        }
    }

    #[test]
    fn unknown_languages() {
        for code in ["zz_invalid", "zz", "EN", "eng", "", "shit"] {
            assert!(!is_known_language(code), "{code} should be rejected");
        }
    }

    #[test]
    fn new_builds_public_endpoint() {
        let lang = WikiLanguage::new("en").unwrap();
        assert_eq!(lang.code(), "en");
        assert_eq!(lang.api_url().as_str(), "https://en.wikipedia.org/w/api.php");
    }

    #[test]
    fn new_rejects_unknown_code() {
        let err = WikiLanguage::new("zz_invalid").unwrap_err();
        assert!(matches!(err, Error::InvalidLanguage { ref code } if code == "zz_invalid"));
    }

    #[test]
    fn custom_endpoint() {
        let lang = WikiLanguage::with_api_url("de", "http://127.0.0.1:8080/w/api.php").unwrap();
        assert_eq!(lang.code(), "de");
        assert_eq!(lang.api_url().port(), Some(8080));
    }

    #[test]
    fn custom_endpoint_must_parse() {
        let err = WikiLanguage::with_api_url("en", "not a url").unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn language_checked_before_endpoint() {
        let err = WikiLanguage::with_api_url("zz", "not a url").unwrap_err();
        assert!(matches!(err, Error::InvalidLanguage { .. }));
    }
}
