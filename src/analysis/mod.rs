// Text analysis module.
// Turns page markup into plain text and derives the two displayed statistics.

#![allow(unused_imports)]

pub mod html;
pub mod stats;

pub use html::html_to_text;
pub use stats::{WordFrequency, sample_every_nth, top_word_counts, word_frequencies};

/// Parameters for a single analysis pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Keep every n-th non-whitespace character.
    pub sample_stride: usize,
    /// Number of word-count lines to keep.
    pub top_words: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            sample_stride: 10,
            top_words: 100,
        }
    }
}

/// Display-ready results for one piece of text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    pub sampled: String,
    pub word_counts: String,
}

pub fn analyze(text: &str, options: &AnalysisOptions) -> Analysis {
    Analysis {
        sampled: sample_every_nth(text, options.sample_stride),
        word_counts: top_word_counts(text, options.top_words),
    }
}
