use crate::domain::model::stopwords::is_stop_word;

/// Shortest token kept. Single characters ("c" from "c++") carry no signal.
const MIN_TOKEN_LEN: usize = 2;

/// Lowercased word tokens with stop words removed.
///
/// A token is a maximal run of alphanumeric characters or `_`.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= MIN_TOKEN_LEN)
        .filter(|t| !is_stop_word(t))
        .map(String::from)
        .collect()
}
