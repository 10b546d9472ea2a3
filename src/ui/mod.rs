// UI module for rendering the TUI.
// Contains the tab bar, results panes, console, status bar, and help overlay.

mod results;

use chrono::{DateTime, Utc};
use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Tab};
use crate::provider::ContentOrigin;
use crate::state::ConsoleLevel;

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_tab_bar(frame, app, chunks[0]);

    match app.active_tab {
        Tab::Results => results::draw_results_tab(frame, app, chunks[1]),
        Tab::Console => draw_console_tab(frame, app, chunks[1]),
    }

    draw_status_bar(frame, app, chunks[2]);

    // Help overlay (rendered last, on top of everything)
    if app.show_help {
        draw_help_overlay(frame);
    }
}

/// Header with the watched URL and one title per tab.
fn draw_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let header = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Line::from(vec![
            Span::styled(
                " pagestat ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{} ", app.source_url),
                Style::default().fg(Color::DarkGray),
            ),
        ]));

    let selected = match app.active_tab {
        Tab::Results => 0,
        Tab::Console => 1,
    };

    let tabs = Tabs::new([tab_title(app, Tab::Results), tab_title(app, Tab::Console)])
        .block(header)
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

/// Tab label carrying fetch progress, unseen results, or unread warnings.
fn tab_title(app: &App, tab: Tab) -> Line<'static> {
    match tab {
        Tab::Results if app.results.in_flight > 0 => Line::from(vec![
            Span::raw("Results "),
            Span::styled("⏳", Style::default().fg(Color::Yellow)),
        ]),
        Tab::Results if app.results_unseen => Line::from(vec![
            Span::raw("Results "),
            Span::styled("●", Style::default().fg(Color::Green)),
        ]),
        Tab::Console if app.console_unread > 0 => Line::from(Span::styled(
            format!("Console ({})", app.console_unread),
            Style::default().fg(Color::Red),
        )),
        _ => Line::from(tab.title()),
    }
}

/// Format a timestamp as a short relative time.
pub fn format_relative_time(dt: &DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(*dt);

    if duration.num_days() > 0 {
        format!("{}d ago", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{}h ago", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{}m ago", duration.num_minutes())
    } else {
        "just now".to_string()
    }
}

fn draw_console_tab(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Console ");

    if app.console.is_empty() {
        let text = Paragraph::new("No messages")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(text, area);
        return;
    }

    let items: Vec<ListItem> = app
        .console
        .messages()
        .iter()
        .map(|msg| {
            let (icon, color) = match msg.level {
                ConsoleLevel::Error => ("❌", Color::Red),
                ConsoleLevel::Warn => ("⚠️", Color::Yellow),
                ConsoleLevel::Info => ("ℹ️", Color::Cyan),
            };

            ListItem::new(Line::from(vec![
                Span::raw(format!("{} ", icon)),
                Span::styled(
                    msg.timestamp.format("%H:%M:%S").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(" "),
                Span::styled(msg.message.clone(), Style::default().fg(color)),
            ]))
        })
        .collect();

    let list_widget = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list_widget, area, &mut app.console_list_state);
}

/// Short description of where the shown content came from.
fn origin_label(origin: &ContentOrigin) -> (String, Color) {
    match origin {
        ContentOrigin::Fresh => ("fresh".to_string(), Color::Green),
        ContentOrigin::Cached {
            cached_at: Some(at),
        } => (format!("cached {}", format_relative_time(at)), Color::Yellow),
        ContentOrigin::Cached { cached_at: None } => ("cached".to_string(), Color::Yellow),
        ContentOrigin::Empty => ("no content".to_string(), Color::Red),
    }
}

/// Draw the status bar with keybinding hints and content origin.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut hints = vec![
        Span::raw(" f/↵ "),
        Span::styled("Fetch", Style::default().fg(Color::DarkGray)),
        Span::raw("  Tab "),
        Span::styled("Switch", Style::default().fg(Color::DarkGray)),
        Span::raw("  ? "),
        Span::styled("Help", Style::default().fg(Color::DarkGray)),
        Span::raw("  q "),
        Span::styled("Quit", Style::default().fg(Color::DarkGray)),
    ];

    if let Some(report) = app.results.report.data() {
        let (label, color) = origin_label(&report.origin);
        hints.push(Span::styled(
            format!("  Source: {}", label),
            Style::default().fg(color),
        ));
    }

    if app.results.in_flight > 1 {
        hints.push(Span::styled(
            format!("  {} fetches running", app.results.in_flight),
            Style::default().fg(Color::Yellow),
        ));
    }

    let status = Paragraph::new(Line::from(hints));
    frame.render_widget(status, area);
}

/// Draw the help overlay.
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    // Create a centered popup
    let popup_width = 50.min(area.width);
    let popup_height = 15.min(area.height);
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let key = |k: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<14}", k), Style::default().fg(Color::Cyan)),
            Span::raw(desc),
        ])
    };

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        key("f / Enter", "Fetch page and analyze"),
        key("↑/↓ or j/k", "Scroll focused pane"),
        key("PgUp/PgDn", "Page scroll"),
        key("Home or g", "Jump to top"),
        key("←/→ or h/l", "Switch pane"),
        key("Tab", "Switch tabs"),
        key("?", "Show/hide this help"),
        key("q", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" or ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::styled(" to close", Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);
}
