/* src/tui.rs */

use crate::app::{App, MenuRow, Screen};
use crate::config::Config;
use crate::git::GitService;
use crate::llm::GroqService;
use crate::prompt;
use crate::settings::{DialogKind, SettingsApp, SettingsRow};
use crate::suggestions::CommitSuggestion;
use crate::ui;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const SPINNER_INTERVAL: Duration = Duration::from_millis(80);
const SUCCESS_DISPLAY: Duration = Duration::from_millis(1500);

pub const NO_API_KEY_MESSAGE: &str =
    "Groq API key not configured. Run \"better-commit config\" to set it up.";

/// Runs the commit selection UI. Returns the message to print after the
/// terminal is restored, if any; all exits are status 0.
pub fn run_commit_ui(
    config: Config,
    git: GitService,
    push_after_commit: bool,
) -> Result<Option<String>> {
    // Missing key is a terminal configuration error; no generation is attempted.
    if !config.has_api_key() {
        return Ok(Some(NO_API_KEY_MESSAGE.to_string()));
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, Clear(ClearType::All))?;
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_commit_loop(&mut terminal, config, git, push_after_commit);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_commit_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    config: Config,
    git: GitService,
    push_after_commit: bool,
) -> Result<Option<String>> {
    let staged_files = git.staged_files().unwrap_or_default();
    let mut app = App::new(staged_files, push_after_commit);

    let mut generation_rx = Some(spawn_generation(&config, &git, None));
    let mut last_spinner_tick = Instant::now();
    let mut success_since: Option<Instant> = None;

    loop {
        terminal.draw(|f| ui::render_commit(f, &app))?;

        if app.should_quit {
            return Ok(app.exit_message.clone());
        }

        // Poll the worker without blocking, like shell output in a PTY loop.
        if let Some(rx) = &generation_rx {
            if let Ok(suggestions) = rx.try_recv() {
                app.suggestions_ready(suggestions);
                generation_rx = None;
            }
        }

        if app.screen == Screen::Loading && last_spinner_tick.elapsed() >= SPINNER_INTERVAL {
            app.tick_spinner();
            last_spinner_tick = Instant::now();
        }

        // The "Pushing to remote..." line was drawn above; now run the push.
        if app.push_pending {
            match git.push() {
                Ok(()) => app.push_logs.push("Push successful!".to_string()),
                Err(e) => app.push_logs.push(format!("Failed to push: {e:#}")),
            }
            app.push_pending = false;
        }

        if app.screen == Screen::Success && !app.push_pending {
            let since = success_since.get_or_insert_with(Instant::now);
            if since.elapsed() >= SUCCESS_DISPLAY {
                app.should_quit = true;
            }
        }

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match app.screen {
                    Screen::CustomInput => {
                        handle_custom_input_keys(key, &mut app, &config, &git, &mut generation_rx)
                    }
                    Screen::Browsing => {
                        handle_browsing_keys(key, &mut app, &config, &git, &mut generation_rx)
                    }
                    // Loading and Success still honor the global exit keys.
                    _ => handle_global_keys(key, &mut app),
                }
            }
        }
    }
}

fn is_interrupt(key: event::KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn handle_global_keys(key: event::KeyEvent, app: &mut App) {
    if key.code == KeyCode::Esc || is_interrupt(key) {
        app.cancel();
    }
}

fn handle_browsing_keys(
    key: event::KeyEvent,
    app: &mut App,
    config: &Config,
    git: &GitService,
    generation_rx: &mut Option<Receiver<Vec<CommitSuggestion>>>,
) {
    if key.code == KeyCode::Esc || is_interrupt(key) {
        app.cancel();
        return;
    }

    match key.code {
        KeyCode::Up => app.select_previous(),
        KeyCode::Down => app.select_next(),
        KeyCode::Enter => match app.selected_row() {
            Some(MenuRow::Suggestion(index)) => {
                let message = app.suggestions[index].message.clone();
                match git.commit(&message) {
                    Ok(()) => app.commit_succeeded(message),
                    Err(e) => app.fail(format!("Failed to commit: {e:#}")),
                }
            }
            Some(MenuRow::TryAgain) => {
                app.start_generation();
                *generation_rx = Some(spawn_generation(config, git, None));
            }
            Some(MenuRow::CustomInput) => app.open_custom_input(),
            None => {}
        },
        _ => {}
    }
}

fn handle_custom_input_keys(
    key: event::KeyEvent,
    app: &mut App,
    config: &Config,
    git: &GitService,
    generation_rx: &mut Option<Receiver<Vec<CommitSuggestion>>>,
) {
    match key.code {
        KeyCode::Enter => {
            let intent = app.input.trim().to_string();
            if intent.is_empty() {
                app.cancel_custom_input();
                return;
            }
            app.start_generation();
            *generation_rx = Some(spawn_generation(config, git, Some(intent)));
        }
        // The editor consumes Esc itself; only the editor is cancelled.
        KeyCode::Esc => app.cancel_custom_input(),
        KeyCode::Backspace | KeyCode::Delete => app.delete_char(),
        KeyCode::Left => app.move_cursor_left(),
        KeyCode::Right => app.move_cursor_right(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => app.enter_char(c),
        _ => {}
    }
}

/// Refetches the git context and runs the model call off the UI thread; the
/// result set arrives over the channel. Exactly one request is in flight at
/// a time; an abandoned request's result is simply discarded on exit.
fn spawn_generation(
    config: &Config,
    git: &GitService,
    intent: Option<String>,
) -> Receiver<Vec<CommitSuggestion>> {
    let (tx, rx) = mpsc::channel();
    let config = config.clone();
    let git = git.clone();

    thread::spawn(move || {
        let staged_files = git.staged_files().unwrap_or_default();
        let diff = git.diff();
        let stats = git.diff_stats();
        let recent = git.recent_commits(config.max_history_commits);

        let prompt_text = prompt::build_prompt(
            &staged_files,
            &diff,
            &recent,
            &stats,
            &config,
            intent.as_deref(),
        );
        let groq = GroqService::new(
            config.groq_api_key.clone().unwrap_or_default(),
            config.model.clone(),
        );
        let suggestions = groq.generate(&prompt_text, &staged_files);
        let _ = tx.send(suggestions);
    });

    rx
}

/// Runs the settings editor UI. Returns the message to print after teardown.
pub fn run_config_ui(config: Config) -> Result<Option<String>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, Clear(ClearType::All))?;
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_config_loop(&mut terminal, config);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_config_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    config: Config,
) -> Result<Option<String>> {
    let mut app = SettingsApp::new(config);

    loop {
        terminal.draw(|f| ui::render_settings(f, &app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if app.dialog.is_some() {
                    handle_dialog_keys(key, &mut app);
                } else {
                    handle_menu_keys(key, &mut app);
                }
            }
        }

        if app.should_quit {
            return Ok(app.exit_message.clone());
        }
    }
}

fn handle_menu_keys(key: event::KeyEvent, app: &mut SettingsApp) {
    if key.code == KeyCode::Esc || is_interrupt(key) {
        app.cancel_and_exit();
        return;
    }

    match key.code {
        KeyCode::Up => app.select_previous(),
        KeyCode::Down => app.select_next(),
        KeyCode::Enter => match app.selected_row() {
            SettingsRow::Field(field) => app.open_dialog(field),
            SettingsRow::Save => app.save_and_exit(),
            SettingsRow::Cancel => app.cancel_and_exit(),
        },
        _ => {}
    }
}

fn handle_dialog_keys(key: event::KeyEvent, app: &mut SettingsApp) {
    let Some(dialog) = app.dialog.as_mut() else {
        return;
    };

    // Dialogs own Esc: it closes the dialog, not the settings session.
    if key.code == KeyCode::Esc {
        app.close_dialog();
        return;
    }

    match dialog.kind {
        DialogKind::Select => match key.code {
            KeyCode::Up => dialog.select_previous(),
            KeyCode::Down => dialog.select_next(),
            KeyCode::Enter => app.submit_dialog(),
            _ => {}
        },
        DialogKind::Password => match key.code {
            KeyCode::Enter => app.submit_dialog(),
            KeyCode::Backspace | KeyCode::Delete => dialog.delete_char(),
            KeyCode::Left => dialog.move_cursor_left(),
            KeyCode::Right => dialog.move_cursor_right(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                dialog.enter_char(c)
            }
            _ => {}
        },
        DialogKind::Textarea => match key.code {
            // Enter inserts a newline; Tab submits.
            KeyCode::Enter => dialog.enter_char('\n'),
            KeyCode::Tab => app.submit_dialog(),
            KeyCode::Backspace | KeyCode::Delete => dialog.delete_char(),
            KeyCode::Left => dialog.move_cursor_left(),
            KeyCode::Right => dialog.move_cursor_right(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                dialog.enter_char(c)
            }
            _ => {}
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn run_git(dir: &Path, args: &[&str]) {
        std::process::Command::new("git")
            .arg("-C")
            .arg(dir)
            .args(args)
            .output()
            .unwrap();
    }

    fn init_repo() -> (tempfile::TempDir, GitService) {
        let dir = tempfile::tempdir().unwrap();
        run_git(dir.path(), &["init", "-q"]);
        run_git(dir.path(), &["config", "user.name", "Test User"]);
        run_git(dir.path(), &["config", "user.email", "test@example.com"]);
        let git = GitService::in_dir(dir.path());
        (dir, git)
    }

    fn suggestion(message: &str) -> CommitSuggestion {
        CommitSuggestion {
            message: message.to_string(),
            kind: "feat".to_string(),
            description: message.to_string(),
            is_fallback: false,
        }
    }

    fn enter() -> KeyEvent {
        KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)
    }

    #[test]
    fn enter_commits_the_selected_suggestion_verbatim() {
        let (dir, git) = init_repo();
        std::fs::write(dir.path().join("a.txt"), "hello\n").unwrap();
        git.stage_all().unwrap();

        let mut app = App::new(git.staged_files().unwrap(), false);
        app.suggestions_ready(vec![
            suggestion("feat: add a.txt"),
            suggestion("fix: update a.txt"),
        ]);
        let mut rx = None;
        handle_browsing_keys(enter(), &mut app, &Config::default(), &git, &mut rx);

        assert_eq!(app.screen, Screen::Success);
        assert_eq!(app.success_message, "feat: add a.txt");
        assert_eq!(git.recent_commits(1)[0].message, "feat: add a.txt");
    }

    #[test]
    fn a_failing_commit_reports_the_error_and_quits() {
        let (_dir, git) = init_repo();

        let mut app = App::new(Vec::new(), false);
        app.suggestions_ready(vec![suggestion("feat: nothing staged")]);
        let mut rx = None;
        handle_browsing_keys(enter(), &mut app, &Config::default(), &git, &mut rx);

        assert_eq!(app.screen, Screen::Error);
        assert!(app.should_quit);
        assert!(
            app.exit_message
                .as_deref()
                .unwrap()
                .starts_with("Failed to commit:")
        );
    }

    #[test]
    fn missing_api_key_short_circuits_with_the_fixed_message() {
        let (_dir, git) = init_repo();
        let result = run_commit_ui(Config::default(), git, false).unwrap();
        assert_eq!(result.as_deref(), Some(NO_API_KEY_MESSAGE));
    }
}
