// Text statistics.
// Character sampling and case-folded word frequency over plain text.

use std::collections::HashMap;

/// A token and how many times it occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordFrequency {
    pub token: String,
    pub count: usize,
}

/// Every `n`-th non-whitespace character, counting from 1.
///
/// Returns an empty string when fewer than `n` characters remain or `n` is 0.
pub fn sample_every_nth(text: &str, n: usize) -> String {
    if n == 0 {
        return String::new();
    }

    text.chars()
        .filter(|c| !c.is_whitespace())
        .skip(n - 1)
        .step_by(n)
        .collect()
}

/// Count lowercased whitespace-delimited tokens, most frequent first.
///
/// Equal counts keep the order in which each token first appeared, so the
/// result is deterministic for a given input. Empty tokens are never counted.
pub fn word_frequencies(text: &str) -> Vec<WordFrequency> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut entries: Vec<WordFrequency> = Vec::new();

    for token in text.split_whitespace().map(str::to_lowercase) {
        match index.get(&token) {
            Some(&i) => entries[i].count += 1,
            None => {
                index.insert(token.clone(), entries.len());
                entries.push(WordFrequency { token, count: 1 });
            }
        }
    }

    // Stable sort keeps first-occurrence order among ties.
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

/// The `k` most frequent tokens as `token=count` lines, no trailing newline.
pub fn top_word_counts(text: &str, k: usize) -> String {
    word_frequencies(text)
        .iter()
        .take(k)
        .map(|entry| format!("{}={}", entry.token, entry.count))
        .collect::<Vec<_>>()
        .join("\n")
}
