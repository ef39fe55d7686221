//! Student client screens.

mod attempt;
mod result;
mod select;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};

use crate::attempt::AttemptPhase;
use crate::client::state::{Screen, StudentApp};

/// Render the client UI based on the current screen and attempt phase.
pub fn render(frame: &mut Frame, app: &StudentApp) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match &app.screen {
        Screen::Browsing { .. } => select::render(frame, area, app),
        Screen::Taking => match app.attempt.phase() {
            AttemptPhase::Loading => render_loading(frame, area, app),
            AttemptPhase::Ready | AttemptPhase::Submitting => attempt::render(frame, area, app),
            AttemptPhase::Submitted => result::render(frame, area, app),
            AttemptPhase::Failed => render_failed(frame, area, app),
        },
    }
}

fn render_loading(frame: &mut Frame, area: Rect, app: &StudentApp) {
    let chunks = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Length(7),
        Constraint::Percentage(40),
    ])
    .split(area);

    let quiz_id = app.quiz_id.as_deref().unwrap_or("");

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "QUIZ ATTEMPT",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Loading quiz {}...", quiz_id),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}

fn render_failed(frame: &mut Frame, area: Rect, app: &StudentApp) {
    let chunks = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Length(9),
        Constraint::Percentage(40),
    ])
    .split(area);

    let reason = app.attempt.load_error().unwrap_or("Quiz could not be loaded");

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "QUIZ ATTEMPT",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(reason, Style::default().fg(Color::Red).bold())),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Press [R] to try again  ·  [Q] to exit",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}
