//! Quiz-select screen.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::client::state::{Screen, StudentApp};

/// Render the list of quizzes available to take.
pub fn render(frame: &mut Frame, area: Rect, app: &StudentApp) {
    let Screen::Browsing { quizzes, cursor } = &app.screen else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(8),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    let title = Paragraph::new("Choose a quiz")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).bold());
    frame.render_widget(title, chunks[0]);

    if quizzes.is_empty() {
        let empty = Paragraph::new("No quizzes available")
            .alignment(Alignment::Center)
            .fg(Color::Yellow);
        frame.render_widget(empty, chunks[1]);
    } else {
        render_list(frame, chunks[1], quizzes, *cursor);
    }

    let controls = Paragraph::new("j/k or arrows to select  ·  Enter to start  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(controls, chunks[2]);
}

fn render_list(
    frame: &mut Frame,
    area: Rect,
    quizzes: &[crate::models::QuizSummary],
    cursor: usize,
) {
    let lines: Vec<Line> = quizzes
        .iter()
        .enumerate()
        .map(|(i, summary)| {
            let is_selected = i == cursor;
            let prefix = if is_selected { "> " } else { "  " };

            let style = if is_selected {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default().fg(Color::White)
            };

            Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(summary.title.clone(), style),
                Span::styled(
                    format!("  ({} questions)", summary.question_count),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Quizzes ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );

    frame.render_widget(widget, area);
}
