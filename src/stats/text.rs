//! Title word frequencies, the input of the word cloud.

use std::collections::HashMap;

/// Default number of words kept for the word cloud.
pub const DEFAULT_MAX_WORDS: usize = 200;

const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "cannot", "could", "couldn't", "did", "didn't", "do", "does",
    "doesn't", "doing", "don't", "down", "during", "each", "else", "ever", "few", "for", "from",
    "further", "get", "had", "hadn't", "has", "hasn't", "have", "haven't", "having", "he", "her",
    "here", "hers", "herself", "him", "himself", "his", "how", "however", "i", "if", "in",
    "into", "is", "isn't", "it", "its", "itself", "just", "let's", "me", "more", "most",
    "mustn't", "my", "myself", "no", "nor", "not", "of", "off", "on", "once", "only", "or",
    "other", "otherwise", "ought", "our", "ours", "ourselves", "out", "over", "own", "same",
    "shall", "she", "should", "shouldn't", "since", "so", "some", "such", "than", "that",
    "the", "their", "theirs", "them", "themselves", "then", "there", "therefore", "these",
    "they", "this", "those", "through", "to", "too", "under", "until", "up", "very", "was",
    "wasn't", "we", "were", "weren't", "what", "when", "where", "which", "while", "who",
    "whom", "why", "with", "won't", "would", "wouldn't", "www", "you", "your", "yours",
    "yourself", "yourselves",
];

/// Word counts over concatenated titles, most frequent first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleWordFrequencies {
    pub words: Vec<(String, usize)>,
}

impl TitleWordFrequencies {
    /// Count words across all titles, keeping at most `max_words`.
    pub fn from_titles<'a>(titles: impl IntoIterator<Item = &'a str>, max_words: usize) -> Self {
        let all_titles = titles.into_iter().collect::<Vec<_>>().join(" ");

        let mut frequency: HashMap<String, usize> = HashMap::new();
        for word in tokenize(&all_titles) {
            *frequency.entry(word).or_insert(0) += 1;
        }

        let mut words: Vec<(String, usize)> = frequency.into_iter().collect();
        words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        words.truncate(max_words);
        Self { words }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn max_count(&self) -> usize {
        self.words.first().map(|(_, c)| *c).unwrap_or(0)
    }
}

/// Lower-cased word tokens of at least two characters, without stop-words,
/// pure numbers or a trailing possessive `'s`.
fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if ch.is_alphanumeric() || (ch == '\'' && !current.is_empty()) {
            current.push(ch);
        } else if !current.is_empty() {
            push_token(&mut tokens, std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        push_token(&mut tokens, current);
    }
    tokens
}

fn push_token(tokens: &mut Vec<String>, raw: String) {
    let lower = raw.to_lowercase();
    if STOPWORDS.contains(&lower.as_str()) {
        return;
    }

    let word = lower.strip_suffix("'s").unwrap_or(&lower).trim_end_matches('\'');
    if word.chars().count() < 2
        || word.chars().all(|c| c.is_numeric())
        || STOPWORDS.contains(&word)
    {
        return;
    }
    tokens.push(word.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_drops_stopwords() {
        let tokens = tokenize("The Spread of COVID-19 in the City");
        assert_eq!(tokens, vec!["spread", "covid", "city"]);
    }

    #[test]
    fn test_tokenize_splits_on_underscore() {
        let tokens = tokenize("sars_cov spread");
        assert_eq!(tokens, vec!["sars", "cov", "spread"]);
    }

    #[test]
    fn test_tokenize_strips_possessive_and_short_tokens() {
        let tokens = tokenize("Wuhan's a b 2020 x-ray (SARS)");
        assert_eq!(tokens, vec!["wuhan", "ray", "sars"]);
    }

    #[test]
    fn test_frequencies_are_ordered_and_truncated() {
        let titles = [
            "Coronavirus transmission",
            "Transmission dynamics of coronavirus",
            "Coronavirus vaccines",
        ];

        let freq = TitleWordFrequencies::from_titles(titles.iter().copied(), 3);

        assert_eq!(
            freq.words,
            vec![
                ("coronavirus".to_string(), 3),
                ("transmission".to_string(), 2),
                ("dynamics".to_string(), 1),
            ]
        );
        assert_eq!(freq.max_count(), 3);
    }

    #[test]
    fn test_empty_titles() {
        let freq = TitleWordFrequencies::from_titles(["", "  "].iter().copied(), 10);
        assert!(freq.is_empty());
        assert_eq!(freq.max_count(), 0);
    }
}
