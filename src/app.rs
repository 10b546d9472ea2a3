// App state and main event loop.
// Manages tabs, fetch triggers, and keyboard input handling.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::prelude::*;
use ratatui::widgets::ListState;
use tokio::sync::mpsc;

use crate::analysis::AnalysisOptions;
use crate::cache::LocalStore;
use crate::pipeline::{self, Report};
use crate::provider::{ContentOrigin, ContentProvider};
use crate::remote::RemoteSource;
use crate::state::{ConsoleLevel, ConsoleLog, ConsoleMessage, ResultsState};
use crate::ui;

/// Result of one background fetch-analyze run, as delivered to the loop.
pub type FetchOutcome = Result<Report, String>;

/// Starts a background run that reports on the given channel.
pub type FetchSpawner = Box<dyn Fn(mpsc::UnboundedSender<FetchOutcome>)>;

/// Build a spawner that runs the pipeline on the tokio runtime.
pub fn fetch_spawner<R, S>(
    provider: Arc<ContentProvider<R, S>>,
    options: AnalysisOptions,
) -> FetchSpawner
where
    R: RemoteSource + 'static,
    S: LocalStore + 'static,
{
    Box::new(move |tx: mpsc::UnboundedSender<FetchOutcome>| {
        let provider = Arc::clone(&provider);
        tokio::spawn(async move {
            let outcome = pipeline::run(&provider, &options)
                .await
                .map_err(|e| e.to_string());
            // The receiver is gone only when the app is shutting down.
            let _ = tx.send(outcome);
        });
    })
}

/// Active tab in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Results,
    Console,
}

impl Tab {
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Results => "Results",
            Tab::Console => "Console",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Results => Tab::Console,
            Tab::Console => Tab::Results,
        }
    }

    pub fn prev(&self) -> Self {
        self.next()
    }
}

/// Main application state.
pub struct App {
    /// Currently active tab.
    pub active_tab: Tab,
    pub results: ResultsState,
    pub console: ConsoleLog,
    pub console_list_state: ListState,
    /// Number of unread console warnings and errors (for badge).
    pub console_unread: usize,
    /// A run finished while the Console tab was showing.
    pub results_unseen: bool,
    /// URL shown in the header.
    pub source_url: String,
    pub show_help: bool,
    /// Whether the app should exit.
    pub should_quit: bool,
    spawn_fetch: FetchSpawner,
    outcome_tx: mpsc::UnboundedSender<FetchOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<FetchOutcome>,
}

impl App {
    pub fn new(source_url: impl Into<String>, spawn_fetch: FetchSpawner) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            active_tab: Tab::default(),
            results: ResultsState::default(),
            console: ConsoleLog::default(),
            console_list_state: ListState::default(),
            console_unread: 0,
            results_unseen: false,
            source_url: source_url.into(),
            show_help: false,
            should_quit: false,
            spawn_fetch,
            outcome_tx,
            outcome_rx,
        }
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        self.log(ConsoleMessage::info(format!(
            "Ready. Press f to fetch {}",
            self.source_url
        )));

        while !self.should_quit {
            self.drain_outcomes();
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard and other events.
    #[allow(clippy::collapsible_if)]
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('f') | KeyCode::Enter => self.trigger_fetch(),
            KeyCode::Tab => self.switch_tab(self.active_tab.next()),
            KeyCode::BackTab => self.switch_tab(self.active_tab.prev()),
            KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l') => {
                self.results.focus = self.results.focus.toggle();
            }
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(1),
            KeyCode::PageDown => self.scroll_down(10),
            KeyCode::PageUp => self.scroll_up(10),
            KeyCode::Home | KeyCode::Char('g') => self.results.scroll_to_top(),
            _ => {}
        }
    }

    /// Start a fetch-analyze run in the background.
    pub fn trigger_fetch(&mut self) {
        self.results.start_fetch();
        self.log(ConsoleMessage::info(format!("Fetching {}", self.source_url)));
        (self.spawn_fetch)(self.outcome_tx.clone());
    }

    /// Apply every run that has finished since the last frame.
    pub fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.apply_outcome(outcome);
        }
    }

    fn apply_outcome(&mut self, outcome: FetchOutcome) {
        let message = match &outcome {
            Ok(report) => match &report.origin {
                ContentOrigin::Fresh => ConsoleMessage::info("Fetched fresh content"),
                ContentOrigin::Cached { .. } => {
                    ConsoleMessage::warn("Fetch failed, showing cached content")
                }
                ContentOrigin::Empty => {
                    ConsoleMessage::warn("Fetch failed and no cached content exists")
                }
            },
            Err(e) => ConsoleMessage::error(format!("Fetch aborted: {}", e)),
        };
        self.log(message);
        self.results.finish_fetch(outcome);
        if self.active_tab != Tab::Results {
            self.results_unseen = true;
        }
    }

    fn switch_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
        match tab {
            Tab::Results => self.results_unseen = false,
            Tab::Console => self.console_unread = 0,
        }
    }

    fn scroll_down(&mut self, amount: u16) {
        match self.active_tab {
            Tab::Results => self.results.scroll_down(amount),
            Tab::Console => {
                let last = self.console.messages().len().saturating_sub(1);
                let next = self
                    .console_list_state
                    .selected()
                    .map_or(0, |i| (i + amount as usize).min(last));
                self.console_list_state.select(Some(next));
            }
        }
    }

    fn scroll_up(&mut self, amount: u16) {
        match self.active_tab {
            Tab::Results => self.results.scroll_up(amount),
            Tab::Console => {
                let prev = self
                    .console_list_state
                    .selected()
                    .map_or(0, |i| i.saturating_sub(amount as usize));
                self.console_list_state.select(Some(prev));
            }
        }
    }

    fn log(&mut self, message: ConsoleMessage) {
        if message.level != ConsoleLevel::Info && self.active_tab != Tab::Console {
            self.console_unread += 1;
        }
        self.console.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Analysis;
    use crate::cache::{CONTENT_KEY, MemoryStore};
    use crate::provider::tests::StubRemote;
    use crossterm::event::KeyModifiers;
    use std::cell::Cell;
    use std::rc::Rc;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn report(origin: ContentOrigin) -> Report {
        Report {
            analysis: Analysis {
                sampled: "xyz".to_string(),
                word_counts: "a=1".to_string(),
            },
            origin,
        }
    }

    /// App whose spawner only counts how often it was called.
    fn counting_app() -> (App, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let app = App::new(
            "https://example.com/about/",
            Box::new(move |_tx: mpsc::UnboundedSender<FetchOutcome>| {
                counter.set(counter.get() + 1)
            }),
        );
        (app, calls)
    }

    #[test]
    fn test_fetch_keys_spawn_runs() {
        let (mut app, calls) = counting_app();

        app.handle_key(press(KeyCode::Char('f')));
        app.handle_key(press(KeyCode::Enter));

        assert_eq!(calls.get(), 2);
        assert_eq!(app.results.in_flight, 2);
        assert!(app.results.report.is_loading());
    }

    #[test]
    fn test_quit_and_help() {
        let (mut app, _) = counting_app();

        app.handle_key(press(KeyCode::Char('?')));
        assert!(app.show_help);
        // q closes help first instead of quitting.
        app.handle_key(press(KeyCode::Char('q')));
        assert!(!app.show_help);
        assert!(!app.should_quit);

        app.handle_key(press(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_fallback_outcome_raises_badge_until_console_viewed() {
        let (mut app, _) = counting_app();

        app.apply_outcome(Ok(report(ContentOrigin::Cached { cached_at: None })));
        app.apply_outcome(Err("disk full".to_string()));
        assert_eq!(app.console_unread, 2);

        app.handle_key(press(KeyCode::Tab));
        assert_eq!(app.active_tab, Tab::Console);
        assert_eq!(app.console_unread, 0);
    }

    #[test]
    fn test_outcome_behind_console_marks_results_unseen() {
        let (mut app, _) = counting_app();

        app.apply_outcome(Ok(report(ContentOrigin::Fresh)));
        assert!(!app.results_unseen);

        app.handle_key(press(KeyCode::Tab));
        app.apply_outcome(Ok(report(ContentOrigin::Fresh)));
        assert!(app.results_unseen);

        app.handle_key(press(KeyCode::BackTab));
        assert_eq!(app.active_tab, Tab::Results);
        assert!(!app.results_unseen);
    }

    #[test]
    fn test_console_selection_is_bounded() {
        let (mut app, _) = counting_app();
        app.log(ConsoleMessage::info("one"));
        app.log(ConsoleMessage::info("two"));
        app.switch_tab(Tab::Console);

        app.handle_key(press(KeyCode::Down));
        app.handle_key(press(KeyCode::PageDown));
        assert_eq!(app.console_list_state.selected(), Some(1));

        app.handle_key(press(KeyCode::PageUp));
        assert_eq!(app.console_list_state.selected(), Some(0));
    }

    #[tokio::test]
    async fn test_spawned_run_reports_through_channel() {
        let provider = Arc::new(ContentProvider::new(
            StubRemote::failing(),
            MemoryStore::with_entry(CONTENT_KEY, "<p>one two two</p>"),
        ));
        let mut app = App::new(
            "https://example.com/about/",
            fetch_spawner(provider, AnalysisOptions::default()),
        );

        app.trigger_fetch();
        let outcome = app.outcome_rx.recv().await.unwrap();
        app.apply_outcome(outcome);

        let report = app.results.report.data().unwrap();
        assert_eq!(report.analysis.word_counts, "two=2\none=1");
        assert_eq!(app.results.in_flight, 0);
    }
}
