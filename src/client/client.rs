//! Event loop driving the attempt against a quiz service.
//!
//! The loop is a single task: while a fetch or a submission is awaited no
//! input is read, so at most one service call is ever outstanding for an
//! attempt. The controller rejects anything that slips through anyway
//! (e.g. key presses buffered during the await).

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::attempt::AttemptPhase;
use crate::service::QuizService;
use crate::terminal::{self, TerminalGuard};
use crate::AppError;

use super::state::{Screen, StudentApp};
use super::ui;

/// Run the attempt client until the student quits.
///
/// With a quiz id the attempt starts immediately; without one the client
/// first asks the service for its quiz list and lets the student pick.
pub async fn run<S: QuizService>(
    mut service: S,
    quiz_id: Option<String>,
) -> Result<(), AppError> {
    let mut app = match quiz_id {
        Some(id) => StudentApp::taking(id),
        None => {
            let quizzes = service.list_quizzes().await?;
            StudentApp::browsing(quizzes)
        }
    };

    let mut terminal = terminal::init()?;
    run_event_loop(&mut terminal, &mut service, &mut app).await
}

async fn run_event_loop<S: QuizService>(
    terminal: &mut TerminalGuard,
    service: &mut S,
    app: &mut StudentApp,
) -> Result<(), AppError> {
    if let Some(quiz_id) = app.quiz_id.clone() {
        load_quiz(terminal, service, app, &quiz_id).await?;
    }

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if app.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                handle_input(terminal, service, app, key.code).await?;
            }
        }
    }

    Ok(())
}

/// Start (or re-enter) the attempt for a quiz: draw the loading screen,
/// fetch, and feed the outcome to the controller.
async fn load_quiz<S: QuizService>(
    terminal: &mut TerminalGuard,
    service: &mut S,
    app: &mut StudentApp,
    quiz_id: &str,
) -> Result<(), AppError> {
    app.begin_taking(quiz_id);
    terminal.draw(|frame| ui::render(frame, app))?;

    match service.fetch_quiz(quiz_id).await {
        Ok(quiz) => {
            app.attempt.quiz_loaded(quiz);
            app.sync_option_cursor();
        }
        Err(e) => app.attempt.load_failed(e.to_string()),
    }

    Ok(())
}

async fn handle_input<S: QuizService>(
    terminal: &mut TerminalGuard,
    service: &mut S,
    app: &mut StudentApp,
    key: KeyCode,
) -> Result<(), AppError> {
    match &app.screen {
        Screen::Browsing { .. } => handle_browsing_input(terminal, service, app, key).await,
        Screen::Taking => match app.attempt.phase() {
            AttemptPhase::Ready => handle_ready_input(terminal, service, app, key).await,
            AttemptPhase::Submitted | AttemptPhase::Failed => {
                handle_finished_input(terminal, service, app, key).await
            }
            // No input is read while a call is awaited; anything buffered
            // until then is dropped here.
            AttemptPhase::Loading | AttemptPhase::Submitting => Ok(()),
        },
    }
}

async fn handle_browsing_input<S: QuizService>(
    terminal: &mut TerminalGuard,
    service: &mut S,
    app: &mut StudentApp,
    key: KeyCode,
) -> Result<(), AppError> {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.list_cursor_down(),
        KeyCode::Up | KeyCode::Char('k') => app.list_cursor_up(),
        KeyCode::Enter => {
            if let Some(quiz_id) = app.highlighted_quiz().map(str::to_string) {
                load_quiz(terminal, service, app, &quiz_id).await?;
            }
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            app.should_quit = true;
        }
        _ => {}
    }

    Ok(())
}

async fn handle_ready_input<S: QuizService>(
    terminal: &mut TerminalGuard,
    service: &mut S,
    app: &mut StudentApp,
    key: KeyCode,
) -> Result<(), AppError> {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.option_cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => app.option_cursor_down(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            let question_id = app.attempt.current_question().map(|q| q.id.clone());
            if let (Some(question_id), Some(option_key)) = (question_id, app.highlighted_option())
            {
                match app.attempt.select_answer(&question_id, &option_key) {
                    Ok(()) => app.clear_status(),
                    Err(e) => app.set_status(e.to_string()),
                }
            }
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.attempt.go_previous();
            app.sync_option_cursor();
            app.clear_status();
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.attempt.go_next();
            app.sync_option_cursor();
            app.clear_status();
        }
        KeyCode::Char('s') | KeyCode::Char('S') => {
            submit(terminal, service, app).await?;
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.should_quit = true;
        }
        _ => {}
    }

    Ok(())
}

/// Submit the attempt. `begin_submit` validates completeness and marks
/// the submission in flight, so exactly one service call happens per
/// accepted submit.
async fn submit<S: QuizService>(
    terminal: &mut TerminalGuard,
    service: &mut S,
    app: &mut StudentApp,
) -> Result<(), AppError> {
    match app.attempt.begin_submit() {
        Ok(submission) => {
            app.clear_status();
            terminal.draw(|frame| ui::render(frame, app))?;

            match service
                .submit_attempt(&submission.quiz_id, &submission.answers)
                .await
            {
                Ok(score) => app.attempt.submit_succeeded(score),
                Err(e) => app.attempt.submit_failed(e.to_string()),
            }
        }
        Err(e) => app.set_status(e.to_string()),
    }

    Ok(())
}

async fn handle_finished_input<S: QuizService>(
    terminal: &mut TerminalGuard,
    service: &mut S,
    app: &mut StudentApp,
    key: KeyCode,
) -> Result<(), AppError> {
    match key {
        KeyCode::Char('r') | KeyCode::Char('R') => {
            // Fresh attempt for the same quiz, fetched again from scratch.
            if let Some(quiz_id) = app.quiz_id.clone() {
                load_quiz(terminal, service, app, &quiz_id).await?;
            }
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            app.should_quit = true;
        }
        _ => {}
    }

    Ok(())
}
