/* src/app.rs */

use crate::git::StagedFile;
use crate::suggestions::CommitSuggestion;

pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Browsing,
    CustomInput,
    Success,
    Error,
}

/// A visible row in the suggestion menu. Suggestion rows come first, followed
/// by the typed action rows, so selection never relies on index arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuRow {
    Suggestion(usize),
    TryAgain,
    CustomInput,
}

pub struct App {
    pub screen: Screen,
    pub staged_files: Vec<StagedFile>,
    pub suggestions: Vec<CommitSuggestion>,
    pub selected: usize,
    pub input: String,
    pub input_cursor: usize,
    pub push_after_commit: bool,
    pub push_pending: bool,
    pub push_logs: Vec<String>,
    pub success_message: String,
    pub error: Option<String>,
    pub exit_message: Option<String>,
    pub spinner_frame: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(staged_files: Vec<StagedFile>, push_after_commit: bool) -> Self {
        App {
            screen: Screen::Loading,
            staged_files,
            suggestions: Vec::new(),
            selected: 0,
            input: String::new(),
            input_cursor: 0,
            push_after_commit,
            push_pending: false,
            push_logs: Vec::new(),
            success_message: String::new(),
            error: None,
            exit_message: None,
            spinner_frame: 0,
            should_quit: false,
        }
    }

    /// Fallback-only lists disable the retry/custom-input affordances; there
    /// is no point retrying without a working key.
    pub fn is_using_fallback(&self) -> bool {
        self.suggestions.iter().any(|s| s.is_fallback)
    }

    pub fn visible_rows(&self) -> Vec<MenuRow> {
        let mut rows: Vec<MenuRow> = (0..self.suggestions.len()).map(MenuRow::Suggestion).collect();
        if !self.suggestions.is_empty() && !self.is_using_fallback() {
            rows.push(MenuRow::TryAgain);
            rows.push(MenuRow::CustomInput);
        }
        rows
    }

    pub fn selected_row(&self) -> Option<MenuRow> {
        self.visible_rows().get(self.selected).copied()
    }

    pub fn select_previous(&mut self) {
        let count = self.visible_rows().len();
        if count == 0 {
            return;
        }
        self.selected = if self.selected == 0 {
            count - 1
        } else {
            self.selected - 1
        };
    }

    pub fn select_next(&mut self) {
        let count = self.visible_rows().len();
        if count == 0 {
            return;
        }
        self.selected = (self.selected + 1) % count;
    }

    pub fn start_generation(&mut self) {
        self.suggestions.clear();
        self.selected = 0;
        self.screen = Screen::Loading;
    }

    pub fn suggestions_ready(&mut self, suggestions: Vec<CommitSuggestion>) {
        self.suggestions = suggestions;
        self.selected = 0;
        self.screen = Screen::Browsing;
    }

    pub fn open_custom_input(&mut self) {
        self.input.clear();
        self.input_cursor = 0;
        self.screen = Screen::CustomInput;
    }

    pub fn cancel_custom_input(&mut self) {
        self.screen = Screen::Browsing;
    }

    pub fn commit_succeeded(&mut self, message: String) {
        self.success_message = message;
        self.screen = Screen::Success;
        if self.push_after_commit {
            self.push_pending = true;
            self.push_logs.push("Pushing to remote...".to_string());
        }
    }

    pub fn fail(&mut self, message: String) {
        self.error = Some(message.clone());
        self.exit_message = Some(message);
        self.screen = Screen::Error;
        self.should_quit = true;
    }

    pub fn cancel(&mut self) {
        self.exit_message = Some("Operation cancelled".to_string());
        self.should_quit = true;
    }

    pub fn tick_spinner(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
    }

    pub fn move_cursor_left(&mut self) {
        self.input_cursor = self.input_cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        self.input_cursor = self
            .input_cursor
            .saturating_add(1)
            .min(self.input.chars().count());
    }

    pub fn enter_char(&mut self, new_char: char) {
        let mut edited: String = self.input.chars().take(self.input_cursor).collect();
        edited.push(new_char);
        edited.extend(self.input.chars().skip(self.input_cursor));
        self.input = edited;
        self.input_cursor += 1;
    }

    pub fn delete_char(&mut self) {
        if self.input_cursor > 0 {
            let mut edited: String = self.input.chars().take(self.input_cursor - 1).collect();
            edited.extend(self.input.chars().skip(self.input_cursor));
            self.input = edited;
            self.move_cursor_left();
        }
    }
}
