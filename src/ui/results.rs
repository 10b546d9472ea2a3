// Results tab rendering.
// Sampled characters and word counts side by side, with the scroll hint.

use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::pipeline::Report;
use crate::state::{LoadingState, Pane};

pub fn draw_results_tab(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    match &app.results.report {
        LoadingState::Idle => draw_placeholder(
            frame,
            "Press f to fetch the page",
            Color::DarkGray,
            chunks[0],
        ),
        LoadingState::Loading => {
            draw_placeholder(frame, "⏳ Fetching page...", Color::Yellow, chunks[0])
        }
        LoadingState::Error(e) => {
            draw_placeholder(frame, &format!("❌ {}", e), Color::Red, chunks[0])
        }
        LoadingState::Loaded(report) => draw_report(frame, app, report, chunks[0]),
    }

    if app.results.show_scroll_hint() {
        let hint = Paragraph::new(Line::from(vec![
            Span::styled("↑↓ j/k", Style::default().fg(Color::Yellow)),
            Span::styled(" scroll  ", Style::default().fg(Color::DarkGray)),
            Span::styled("←→", Style::default().fg(Color::Yellow)),
            Span::styled(" switch pane", Style::default().fg(Color::DarkGray)),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(hint, chunks[1]);
    }
}

fn draw_placeholder(frame: &mut Frame, message: &str, color: Color, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Results ");
    let text = Paragraph::new(message.to_string())
        .alignment(Alignment::Center)
        .style(Style::default().fg(color))
        .block(block);
    frame.render_widget(text, area);
}

fn draw_report(frame: &mut Frame, app: &App, report: &Report, area: Rect) {
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let sampled = Paragraph::new(report.analysis.sampled.as_str())
        .block(pane_block(
            format!(" Sampled characters [{}] ", report.analysis.sampled.chars().count()),
            app.results.focus == Pane::Sampled,
        ))
        .wrap(Wrap { trim: false })
        .scroll((app.results.sampled_scroll, 0));
    frame.render_widget(sampled, panes[0]);

    let word_lines = report.analysis.word_counts.lines().count();
    let words = Paragraph::new(report.analysis.word_counts.as_str())
        .block(pane_block(
            format!(" Top words [{}] ", word_lines),
            app.results.focus == Pane::WordCounts,
        ))
        .scroll((app.results.words_scroll, 0));
    frame.render_widget(words, panes[1]);
}

fn pane_block(title: String, focused: bool) -> Block<'static> {
    let border = if focused { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title)
}
