//! Result screen shown once the attempt is graded.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::client::state::StudentApp;

/// Render the graded score.
pub fn render(frame: &mut Frame, area: Rect, app: &StudentApp) {
    let Some(score) = app.attempt.result() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(11),
        Constraint::Fill(1),
    ])
    .split(area);

    let percentage = score.percentage();
    let grade_color = match percentage as u32 {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    };

    let title = app
        .attempt
        .quiz()
        .map(|q| q.title.clone())
        .unwrap_or_default();

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "SUBMITTED",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(title.fg(Color::DarkGray)),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} / {}  ({:.0}%)", score.score, score.total, percentage),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Press [R] to retake  ·  [Q] to exit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}
