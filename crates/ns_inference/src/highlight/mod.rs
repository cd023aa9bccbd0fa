//! Picks the sentence of a summary that best represents it.
//!
//! Sentences are found by splitting on `". "`, which is naive: abbreviations,
//! decimals and quotes are mis-segmented. That is accepted for an emphasis hint.

use std::collections::HashMap;

pub const SENTENCE_DELIMITER: &str = ". ";
/// Sentences of this many characters or more are never highlighted.
pub const MAX_SENTENCE_CHARS: usize = 250;

/// Occurrences of each lowercased, whitespace-separated token. Punctuation is kept.
#[derive(Debug, Default, Clone)]
pub struct WordFrequencyTable {
    counts: HashMap<String, usize>,
}

impl WordFrequencyTable {
    pub fn from_text(text: &str) -> Self {
        let mut counts = HashMap::new();
        for word in text.split_whitespace() {
            *counts.entry(word.to_lowercase()).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn count(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Sum of the counts of the sentence's tokens, or `None` when no token is in the table.
    pub fn score(&self, sentence: &str) -> Option<usize> {
        let mut total = None;
        for word in sentence.split_whitespace() {
            if let Some(count) = self.counts.get(&word.to_lowercase()) {
                *total.get_or_insert(0) += count;
            }
        }
        total
    }
}

pub fn split_sentences(summary: &str) -> Vec<&str> {
    summary.split(SENTENCE_DELIMITER).collect()
}

/// Scores in first-seen order. Repeated sentences add up into a single entry.
pub fn score_sentences(summary: &str) -> Vec<(&str, usize)> {
    let table = WordFrequencyTable::from_text(summary);
    let mut scores: Vec<(&str, usize)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for sentence in split_sentences(summary) {
        if sentence.chars().count() >= MAX_SENTENCE_CHARS {
            continue;
        }
        let Some(score) = table.score(sentence) else {
            continue;
        };
        match positions.get(sentence) {
            Some(&pos) => scores[pos].1 += score,
            None => {
                positions.insert(sentence, scores.len());
                scores.push((sentence, score));
            }
        }
    }
    scores
}

/// The highest scoring sentence. Ties go to the earliest one.
pub fn select_highlight(summary: &str) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for (sentence, score) in score_sentences(summary) {
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((sentence, score));
        }
    }
    best.map(|(sentence, _)| sentence.to_string())
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escaped summary with the first exact occurrence of `sentence` wrapped in a highlight span.
pub fn render_highlight_html(summary: &str, sentence: &str) -> String {
    match summary.find(sentence).filter(|_| !sentence.is_empty()) {
        Some(start) => {
            let end = start + sentence.len();
            format!(
                "{}<span class=\"highlight\">{}</span>{}",
                escape_html(&summary[..start]),
                escape_html(sentence),
                escape_html(&summary[end..])
            )
        }
        None => escape_html(summary),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATS: &str = "Cats are great. Dogs are great too. Cats sleep a lot.";

    #[test]
    fn test_frequency_table_keeps_punctuation() {
        let table = WordFrequencyTable::from_text(CATS);
        assert_eq!(table.count("cats"), 2);
        assert_eq!(table.count("are"), 2);
        assert_eq!(table.count("great"), 1);
        assert_eq!(table.count("great."), 1);
        assert_eq!(table.count("Cats"), 0);
    }

    #[test]
    fn test_first_of_tied_sentences_wins() {
        let scores = score_sentences(CATS);
        assert_eq!(
            scores,
            vec![("Cats are great", 5), ("Dogs are great too", 4), ("Cats sleep a lot.", 5)]
        );
        assert_eq!(select_highlight(CATS).as_deref(), Some("Cats are great"));
    }

    #[test]
    fn test_long_sentences_are_excluded() {
        let long = "word ".repeat(60);
        let summary = format!("{}. {}", long.trim(), long.trim());
        assert!(select_highlight(&summary).is_none());

        let summary = format!("{}. Short one", long.trim());
        assert_eq!(select_highlight(&summary).as_deref(), Some("Short one"));
    }

    #[test]
    fn test_empty_summary_has_no_highlight() {
        assert!(select_highlight("").is_none());
        assert!(select_highlight("   ").is_none());
    }

    #[test]
    fn test_repeated_sentences_accumulate() {
        let summary = "Rain today. Sun tomorrow and after. Rain today. End";
        let scores = score_sentences(summary);
        assert_eq!(scores[0], ("Rain today", 4));
        assert_eq!(select_highlight(summary).as_deref(), Some("Rain today"));
    }

    #[test]
    fn test_render_highlight_wraps_first_occurrence() {
        let summary = "A & B. A & B. C";
        let html = render_highlight_html(summary, "A & B");
        assert_eq!(
            html,
            "<span class=\"highlight\">A &amp; B</span>. A &amp; B. C"
        );
    }

    #[test]
    fn test_render_highlight_without_match() {
        assert_eq!(render_highlight_html("<b>x</b>", "missing"), "&lt;b&gt;x&lt;/b&gt;");
        assert_eq!(render_highlight_html("plain", ""), "plain");
    }
}
