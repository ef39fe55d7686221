//! Attempt screen: one question at a time, with answer markers.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use crate::attempt::AttemptPhase;
use crate::client::state::StudentApp;
use crate::models::Question;

/// Render the in-progress attempt.
pub fn render(frame: &mut Frame, area: Rect, app: &StudentApp) {
    let Some(quiz) = app.attempt.quiz() else {
        return;
    };
    let Some(question) = app.attempt.current_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(3), // Progress
        Constraint::Length(7), // Question text
        Constraint::Min(8),    // Options
        Constraint::Length(1), // Status
        Constraint::Length(2), // Controls
    ])
    .margin(1)
    .split(area);

    render_progress(frame, chunks[0], app);
    render_question_text(frame, chunks[1], &quiz.title, &question.text);
    render_options(frame, chunks[2], question, app);
    render_status(frame, chunks[3], app);
    render_controls(frame, chunks[4], app);
}

fn render_progress(frame: &mut Frame, area: Rect, app: &StudentApp) {
    let current = app.attempt.current_index();
    let total = app.attempt.total_questions();

    let heading = format!(
        "Question {} of {}  ·  {} answered",
        current + 1,
        total,
        app.attempt.answered_count()
    );

    // One marker per question: answered, current, or still open.
    let markers: Vec<Span> = app
        .attempt
        .quiz()
        .map(|quiz| {
            quiz.questions
                .iter()
                .enumerate()
                .map(|(i, q)| {
                    let answered = app.attempt.answer_for(&q.id).is_some();
                    let style = if i == current {
                        Style::default().fg(Color::Cyan).bold()
                    } else if answered {
                        Style::default().fg(Color::Green)
                    } else {
                        Style::default().fg(Color::DarkGray)
                    };
                    let symbol = if answered { "[x] " } else { "[ ] " };
                    Span::styled(symbol, style)
                })
                .collect()
        })
        .unwrap_or_default();

    let content = vec![
        Line::from(Span::styled(
            heading,
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(markers),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, title: &str, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" {} ", title))
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        );

    frame.render_widget(widget, area);
}

fn render_options(frame: &mut Frame, area: Rect, question: &Question, app: &StudentApp) {
    let chosen = app.attempt.answer_for(&question.id);

    let lines: Vec<Line> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, (key, text))| {
            let is_highlighted = i == app.option_cursor;
            let is_chosen = chosen == Some(key.as_str());

            let cursor = if is_highlighted { "> " } else { "  " };
            let marker = if is_chosen { "[x] " } else { "[ ] " };

            let style = if is_highlighted {
                Style::default().fg(Color::Yellow).bold()
            } else if is_chosen {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };

            Line::from(vec![
                Span::styled(cursor, style),
                Span::styled(marker, style),
                Span::styled(format!("{}) ", key), style),
                Span::styled(text.clone(), style),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Options ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &StudentApp) {
    let (text, color) = if app.attempt.phase() == AttemptPhase::Submitting {
        ("Submitting answers...".to_string(), Color::Yellow)
    } else if let Some(reason) = app.attempt.submit_error() {
        (format!("Submit failed: {}", reason), Color::Red)
    } else if let Some(status) = &app.status {
        (status.clone(), Color::Red)
    } else if app.attempt.is_complete() {
        (
            "All questions answered  ·  press s to submit".to_string(),
            Color::Green,
        )
    } else {
        (String::new(), Color::DarkGray)
    };

    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(color);
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, app: &StudentApp) {
    if app.attempt.phase() == AttemptPhase::Submitting {
        return;
    }

    let widget =
        Paragraph::new("j/k options  ·  Enter choose  ·  h/l questions  ·  s submit  ·  q quit")
            .alignment(Alignment::Center)
            .fg(Color::DarkGray);

    frame.render_widget(widget, area);
}
