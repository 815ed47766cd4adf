/* src/settings.rs */

use crate::config::{CommitStyle, Config};
use strum::IntoEnumIterator;

/// Display label and model id for the select dialog.
pub const MODEL_OPTIONS: &[(&str, &str)] = &[
    ("llama-3.1-8b-instant (fastest)", "llama-3.1-8b-instant"),
    ("llama-3.3-70b-versatile (most capable)", "llama-3.3-70b-versatile"),
    ("openai/gpt-oss-20b (balanced)", "openai/gpt-oss-20b"),
];

pub const CUSTOM_PROMPT_PREVIEW_LEN: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ApiKey,
    Model,
    Style,
    CustomPrompt,
}

pub const FIELDS: &[Field] = &[Field::ApiKey, Field::Model, Field::Style, Field::CustomPrompt];

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::ApiKey => "Groq API Key",
            Field::Model => "AI Model",
            Field::Style => "Commit Style",
            Field::CustomPrompt => "Custom Prompt",
        }
    }

    pub fn dialog_kind(&self) -> DialogKind {
        match self {
            Field::ApiKey => DialogKind::Password,
            Field::Model | Field::Style => DialogKind::Select,
            Field::CustomPrompt => DialogKind::Textarea,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Password,
    Select,
    Textarea,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsRow {
    Field(Field),
    Save,
    Cancel,
}

pub struct Dialog {
    pub field: Field,
    pub kind: DialogKind,
    pub title: String,
    pub options: Vec<String>,
    pub selected: usize,
    pub buffer: String,
    pub cursor: usize,
}

pub struct SettingsApp {
    pub config: Config,
    pub selected: usize,
    pub dialog: Option<Dialog>,
    pub exit_message: Option<String>,
    pub should_quit: bool,
}

impl SettingsApp {
    pub fn new(config: Config) -> Self {
        SettingsApp {
            config,
            selected: 0,
            dialog: None,
            exit_message: None,
            should_quit: false,
        }
    }

    pub fn rows(&self) -> Vec<SettingsRow> {
        FIELDS
            .iter()
            .copied()
            .map(SettingsRow::Field)
            .chain([SettingsRow::Save, SettingsRow::Cancel])
            .collect()
    }

    pub fn selected_row(&self) -> SettingsRow {
        self.rows()[self.selected]
    }

    pub fn select_previous(&mut self) {
        let count = self.rows().len();
        self.selected = if self.selected == 0 {
            count - 1
        } else {
            self.selected - 1
        };
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % self.rows().len();
    }

    /// Menu preview of a field's current value.
    pub fn display_value(&self, field: Field) -> String {
        match field {
            Field::ApiKey => match &self.config.groq_api_key {
                Some(key) if !key.is_empty() => "••••••••".to_string(),
                _ => "(not set)".to_string(),
            },
            Field::Model => self.config.model.clone(),
            Field::Style => self.config.commit_style.to_string(),
            Field::CustomPrompt => {
                if self.config.custom_prompt.is_empty() {
                    "(not set)".to_string()
                } else {
                    let preview: String = self
                        .config
                        .custom_prompt
                        .chars()
                        .take(CUSTOM_PROMPT_PREVIEW_LEN)
                        .collect();
                    if self.config.custom_prompt.chars().count() > CUSTOM_PROMPT_PREVIEW_LEN {
                        format!("{preview}...")
                    } else {
                        preview
                    }
                }
            }
        }
    }

    pub fn open_dialog(&mut self, field: Field) {
        let kind = field.dialog_kind();
        let (options, selected, buffer) = match field {
            Field::ApiKey => (Vec::new(), 0, self.config.groq_api_key.clone().unwrap_or_default()),
            Field::Model => {
                let options: Vec<String> =
                    MODEL_OPTIONS.iter().map(|(label, _)| label.to_string()).collect();
                let selected = MODEL_OPTIONS
                    .iter()
                    .position(|(_, id)| *id == self.config.model)
                    .unwrap_or(0);
                (options, selected, String::new())
            }
            Field::Style => {
                let options: Vec<String> = CommitStyle::iter().map(|s| s.to_string()).collect();
                let selected = CommitStyle::iter()
                    .position(|s| s == self.config.commit_style)
                    .unwrap_or(0);
                (options, selected, String::new())
            }
            Field::CustomPrompt => (Vec::new(), 0, self.config.custom_prompt.clone()),
        };

        let cursor = buffer.chars().count();
        self.dialog = Some(Dialog {
            field,
            kind,
            title: format!("Edit {}", field.label()),
            options,
            selected,
            buffer,
            cursor,
        });
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    /// Applies the open dialog's value to the in-memory config and closes it.
    /// Nothing is persisted until Save & Exit.
    pub fn submit_dialog(&mut self) {
        let Some(dialog) = self.dialog.take() else {
            return;
        };
        match dialog.field {
            Field::ApiKey => {
                let key = dialog.buffer.trim().to_string();
                self.config.groq_api_key = if key.is_empty() { None } else { Some(key) };
            }
            Field::Model => {
                if let Some((_, id)) = MODEL_OPTIONS.get(dialog.selected) {
                    self.config.model = id.to_string();
                }
            }
            Field::Style => {
                if let Some(style) = CommitStyle::iter().nth(dialog.selected) {
                    self.config.commit_style = style;
                }
            }
            Field::CustomPrompt => {
                self.config.custom_prompt = dialog.buffer.trim().to_string();
            }
        }
    }

    pub fn save_and_exit(&mut self) {
        self.exit_message = Some(match self.config.save() {
            Ok(()) => "Configuration saved".to_string(),
            Err(e) => format!("Failed to save configuration: {e:#}"),
        });
        self.should_quit = true;
    }

    pub fn cancel_and_exit(&mut self) {
        self.exit_message = Some("Configuration cancelled".to_string());
        self.should_quit = true;
    }
}

impl Dialog {
    pub fn select_previous(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.selected = if self.selected == 0 {
            self.options.len() - 1
        } else {
            self.selected - 1
        };
    }

    pub fn select_next(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.options.len();
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        self.cursor = self.cursor.saturating_add(1).min(self.buffer.chars().count());
    }

    pub fn enter_char(&mut self, new_char: char) {
        let mut edited: String = self.buffer.chars().take(self.cursor).collect();
        edited.push(new_char);
        edited.extend(self.buffer.chars().skip(self.cursor));
        self.buffer = edited;
        self.cursor += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            let mut edited: String = self.buffer.chars().take(self.cursor - 1).collect();
            edited.extend(self.buffer.chars().skip(self.cursor));
            self.buffer = edited;
            self.cursor -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn menu_lists_fields_then_save_and_cancel() {
        let app = SettingsApp::new(Config::default());
        let rows = app.rows();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0], SettingsRow::Field(Field::ApiKey));
        assert_eq!(rows[4], SettingsRow::Save);
        assert_eq!(rows[5], SettingsRow::Cancel);
    }

    #[test]
    fn menu_selection_wraps() {
        let mut app = SettingsApp::new(Config::default());
        app.select_previous();
        assert_eq!(app.selected_row(), SettingsRow::Cancel);
        app.select_next();
        assert_eq!(app.selected_row(), SettingsRow::Field(Field::ApiKey));
    }

    #[test]
    fn api_key_is_masked_in_the_menu() {
        let mut app = SettingsApp::new(Config::default());
        assert_eq!(app.display_value(Field::ApiKey), "(not set)");
        app.config.groq_api_key = Some("gsk_secret".to_string());
        assert_eq!(app.display_value(Field::ApiKey), "••••••••");
    }

    #[test]
    fn custom_prompt_preview_is_truncated() {
        let mut app = SettingsApp::new(Config::default());
        app.config.custom_prompt = "a".repeat(30);
        assert_eq!(app.display_value(Field::CustomPrompt), format!("{}...", "a".repeat(20)));
    }

    #[test]
    fn model_dialog_opens_on_the_current_model() {
        let mut app = SettingsApp::new(Config {
            model: "openai/gpt-oss-20b".to_string(),
            ..Config::default()
        });
        app.open_dialog(Field::Model);
        let dialog = app.dialog.as_ref().unwrap();
        assert_eq!(dialog.kind, DialogKind::Select);
        assert_eq!(dialog.selected, 2);
    }

    #[test]
    fn model_dialog_maps_the_label_back_to_the_id() {
        let mut app = SettingsApp::new(Config::default());
        app.open_dialog(Field::Model);
        app.dialog.as_mut().unwrap().select_next();
        app.submit_dialog();
        assert_eq!(app.config.model, "llama-3.3-70b-versatile");
        assert!(app.dialog.is_none());
    }

    #[test]
    fn style_dialog_applies_the_selection() {
        let mut app = SettingsApp::new(Config::default());
        app.open_dialog(Field::Style);
        app.dialog.as_mut().unwrap().select_next();
        app.dialog.as_mut().unwrap().select_next();
        app.submit_dialog();
        assert_eq!(app.config.commit_style, CommitStyle::Detailed);
    }

    #[test]
    fn api_key_dialog_trims_and_empties_to_none() {
        let mut app = SettingsApp::new(Config::default());
        app.open_dialog(Field::ApiKey);
        for c in "  gsk_new  ".chars() {
            app.dialog.as_mut().unwrap().enter_char(c);
        }
        app.submit_dialog();
        assert_eq!(app.config.groq_api_key.as_deref(), Some("gsk_new"));

        app.open_dialog(Field::ApiKey);
        app.dialog.as_mut().unwrap().buffer.clear();
        app.dialog.as_mut().unwrap().cursor = 0;
        app.submit_dialog();
        assert_eq!(app.config.groq_api_key, None);
    }

    #[test]
    fn closing_a_dialog_discards_its_edits() {
        let mut app = SettingsApp::new(Config::default());
        app.open_dialog(Field::CustomPrompt);
        app.dialog.as_mut().unwrap().enter_char('x');
        app.close_dialog();
        assert_eq!(app.config.custom_prompt, "");
    }

    #[test]
    fn cancel_sets_the_exit_message_without_saving() {
        let mut app = SettingsApp::new(Config::default());
        app.cancel_and_exit();
        assert!(app.should_quit);
        assert_eq!(app.exit_message.as_deref(), Some("Configuration cancelled"));
    }
}
