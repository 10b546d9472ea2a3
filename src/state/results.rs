// Results tab state.
// Holds the latest report, pane focus, and scroll offsets.

use chrono::{DateTime, Utc};

use crate::pipeline::Report;

/// Loading state for async data.
#[derive(Debug, Clone)]
pub enum LoadingState<T> {
    Idle,
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> Default for LoadingState<T> {
    fn default() -> Self {
        LoadingState::Idle
    }
}

impl<T> LoadingState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadingState::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

/// Which result pane receives scroll input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Sampled,
    WordCounts,
}

impl Pane {
    pub fn toggle(&self) -> Self {
        match self {
            Pane::Sampled => Pane::WordCounts,
            Pane::WordCounts => Pane::Sampled,
        }
    }
}

#[derive(Debug, Default)]
pub struct ResultsState {
    pub report: LoadingState<Report>,
    pub focus: Pane,
    pub sampled_scroll: u16,
    pub words_scroll: u16,
    /// Fetches started but not yet finished.
    pub in_flight: usize,
    pub finished_at: Option<DateTime<Utc>>,
}

impl ResultsState {
    pub fn start_fetch(&mut self) {
        self.in_flight += 1;
        self.report = LoadingState::Loading;
    }

    /// Record a finished run. The latest arrival replaces whatever is shown.
    pub fn finish_fetch(&mut self, result: Result<Report, String>) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.finished_at = Some(Utc::now());
        self.sampled_scroll = 0;
        self.words_scroll = 0;
        self.report = match result {
            Ok(report) => LoadingState::Loaded(report),
            Err(e) => LoadingState::Error(e),
        };
    }

    /// The scroll hint is shown only when there are sampled characters.
    pub fn show_scroll_hint(&self) -> bool {
        self.report
            .data()
            .is_some_and(|report| !report.analysis.sampled.is_empty())
    }

    pub fn scroll_down(&mut self, amount: u16) {
        let max = self.max_scroll();
        let offset = self.focused_scroll_mut();
        *offset = offset.saturating_add(amount).min(max);
    }

    pub fn scroll_up(&mut self, amount: u16) {
        let offset = self.focused_scroll_mut();
        *offset = offset.saturating_sub(amount);
    }

    pub fn scroll_to_top(&mut self) {
        *self.focused_scroll_mut() = 0;
    }

    fn focused_scroll_mut(&mut self) -> &mut u16 {
        match self.focus {
            Pane::Sampled => &mut self.sampled_scroll,
            Pane::WordCounts => &mut self.words_scroll,
        }
    }

    /// Upper bound on scroll for the focused pane. Wrapped sampled text never
    /// has more rows than characters.
    fn max_scroll(&self) -> u16 {
        let Some(report) = self.report.data() else {
            return 0;
        };
        let rows = match self.focus {
            Pane::Sampled => report.analysis.sampled.chars().count(),
            Pane::WordCounts => report.analysis.word_counts.lines().count(),
        };
        u16::try_from(rows.saturating_sub(1)).unwrap_or(u16::MAX)
    }
}
