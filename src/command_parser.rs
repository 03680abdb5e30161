use crate::language_utils::AUTO_LANGUAGE;

/// Parser for the free-form trailing argument of the translate command.
///
/// The command framework hands over everything after the command name as
/// one raw string; this module pulls an optional language pair off the
/// front and returns the rest as message text.
/// A (source, destination) language selection.
///
/// `to` is always a concrete code; `from` may be the `auto` sentinel,
/// asking the backend to detect the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePair {
    /// Source language code, possibly `auto`
    pub from: String,
    /// Destination language code, never `auto`
    pub to: String,
}

impl LanguagePair {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Pair with a detected source and an explicit destination
    pub fn detect_source(to: impl Into<String>) -> Self {
        Self::new(AUTO_LANGUAGE, to)
    }
}

/// Extract a language pair from the start of a raw argument string.
///
/// Returns the remaining message text and the pair, or the untouched input
/// and `None` when the first token is not a recognized language code. The
/// input is split on single spaces into at most three parts, the third
/// keeping the rest of the input unsplit:
///
/// - one recognized token is a destination: `"en"` -> `("", (auto, en))`
/// - two recognized tokens are an explicit pair: `"fr en text"` ->
///   `("text", (fr, en))`
/// - an unrecognized second token is message text: `"en hello world"` ->
///   `("hello world", (auto, en))`
///
/// Recognition always beats free text: a message starting with a word that
/// doubles as a language code ("es muy bueno") is parsed as a code. That
/// ambiguity is inherent to the syntax, not a failure.
///
/// `is_supported` is normally the active provider's predicate. When no
/// provider is loaded, pass a permissive predicate accepting any token:
/// parsing stays available, and the pair is re-validated before dispatch.
pub fn parse_language_pair<F>(raw: &str, is_supported: F) -> (String, Option<LanguagePair>)
where
    F: Fn(&str) -> bool,
{
    let parts: Vec<&str> = raw.splitn(3, ' ').collect();
    if parts.is_empty() || !is_supported(parts[0]) {
        return (raw.to_string(), None);
    }

    match parts.len() {
        1 => (String::new(), Some(LanguagePair::detect_source(parts[0]))),
        2 => {
            if is_supported(parts[1]) {
                (String::new(), Some(LanguagePair::new(parts[0], parts[1])))
            } else {
                (parts[1].to_string(), Some(LanguagePair::detect_source(parts[0])))
            }
        }
        _ => {
            if is_supported(parts[1]) {
                (parts[2].to_string(), Some(LanguagePair::new(parts[0], parts[1])))
            } else {
                (
                    format!("{} {}", parts[1], parts[2]),
                    Some(LanguagePair::detect_source(parts[0])),
                )
            }
        }
    }
}
