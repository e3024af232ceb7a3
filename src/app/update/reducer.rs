use super::Effect;
use super::super::messages::Message;
use super::super::state::{App, Screen, ToastKind};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, warn};

impl App {
    pub(super) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::OpenConverter => self.handle_open_converter(),
            Message::BackToLanding => self.handle_back_to_landing(),
            Message::ToggleTheme => self.handle_toggle_theme(&mut effects),
            Message::ToggleHistoryPanel => self.handle_toggle_history_panel(),
            Message::ImagePathInputChanged(path) => self.image_path_input = path,
            Message::ImagePathSubmitted => self.handle_image_path_submitted(&mut effects),
            Message::ImageDropped(path) => self.handle_image_dropped(path, &mut effects),
            Message::ImageRead { file_name, bytes } => self.handle_image_read(file_name, bytes),
            Message::ImageReadFailed { path, error } => self.handle_image_read_failed(path, error),
            Message::ClearImage => self.handle_clear_image(),
            Message::Convert => self.handle_convert(&mut effects),
            Message::ExtractionFinished { request_id, result } => {
                self.handle_extraction_finished(request_id, result, &mut effects)
            }
            Message::EditorAction(action) => self.handle_editor_action(action),
            Message::ClearText => self.handle_clear_text(),
            Message::CopyText => self.handle_copy_text(&mut effects),
            Message::ExportText => self.handle_export_text(&mut effects),
            Message::ExportFinished { path, error } => self.handle_export_finished(path, error),
            Message::LoadFromHistory(id) => self.handle_load_from_history(id),
            Message::RemoveHistoryItem(id) => self.handle_remove_history_item(id, &mut effects),
            Message::ClearHistory => self.handle_clear_history(&mut effects),
            Message::DismissToast => self.toast = None,
            Message::Tick(now) => self.handle_tick(now),
        }

        effects
    }

    fn handle_open_converter(&mut self) {
        if self.screen != Screen::Converter {
            info!("Opening converter view");
            self.screen = Screen::Converter;
        }
    }

    /// Leaving the converter tears the workflow down: any outstanding
    /// request is cancelled and its late completion is suppressed.
    fn handle_back_to_landing(&mut self) {
        if self.screen == Screen::Landing {
            return;
        }
        if self.workflow.converting {
            info!("Leaving converter with a request outstanding; cancelling it");
        }
        self.workflow.reset();
        self.image_path_input.clear();
        self.history_open = false;
        self.screen = Screen::Landing;
    }

    fn handle_toggle_theme(&mut self, effects: &mut Vec<Effect>) {
        self.theme = self.theme.toggled();
        info!(dark = self.theme.is_dark(), "Toggled theme");
        effects.push(Effect::SaveTheme);
    }

    fn handle_toggle_history_panel(&mut self) {
        self.history_open = !self.history_open;
        debug!(open = self.history_open, "Toggled history panel");
    }

    fn handle_load_from_history(&mut self, id: u64) {
        let Some(item) = self.history.get(id) else {
            debug!(id, "History entry vanished before it could be loaded");
            return;
        };
        let text = item.text.clone();
        self.workflow.set_text(&text);
        self.history_open = false;
        info!(id, "Loaded text from history");
        self.show_toast(ToastKind::Success, "Loaded from history");
    }

    fn handle_remove_history_item(&mut self, id: u64, effects: &mut Vec<Effect>) {
        self.history.remove(id);
        effects.push(Effect::SaveHistory);
        debug!(id, remaining = self.history.len(), "Removed history entry");
    }

    fn handle_clear_history(&mut self, effects: &mut Vec<Effect>) {
        self.history.clear();
        effects.push(Effect::SaveHistory);
        info!("Cleared conversion history");
    }

    fn handle_copy_text(&mut self, effects: &mut Vec<Effect>) {
        if !self.workflow.has_text() {
            return;
        }
        effects.push(Effect::CopyToClipboard(
            self.workflow.current_text().to_string(),
        ));
        self.show_toast(ToastKind::Success, "Copied to clipboard");
    }

    fn handle_export_text(&mut self, effects: &mut Vec<Effect>) {
        if !self.workflow.has_text() {
            return;
        }
        effects.push(Effect::ExportText(
            self.workflow.current_text().to_string(),
        ));
    }

    fn handle_export_finished(&mut self, path: Option<PathBuf>, error: Option<String>) {
        match (path, error) {
            (Some(path), _) => {
                info!(path = %path.display(), "Exported text");
                self.show_toast(ToastKind::Success, format!("Saved to {}", path.display()));
            }
            (None, error) => {
                let reason = error.unwrap_or_else(|| "unknown error".to_string());
                warn!("Export failed: {reason}");
                self.show_toast(ToastKind::Error, "Could not save the file");
            }
        }
    }

    fn handle_tick(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|toast| toast.expired(now)) {
            self.toast = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::Effect;
    use super::super::super::messages::Message;
    use super::super::super::state::{App, Screen, ToastKind};
    use crate::config::AppConfig;
    use crate::history::HistoryStore;
    use crate::theme::ThemeMode;
    use std::time::{Duration, Instant};

    fn test_app() -> App {
        let (app, _task) =
            App::bootstrap(AppConfig::default(), HistoryStore::default(), ThemeMode::default());
        app
    }

    #[test]
    fn theme_double_toggle_restores_value_and_persists_each_step() {
        let mut app = test_app();
        let start = app.theme;

        let effects = app.reduce(Message::ToggleTheme);
        assert_ne!(app.theme, start);
        assert!(effects.iter().any(|e| matches!(e, Effect::SaveTheme)));

        let effects = app.reduce(Message::ToggleTheme);
        assert_eq!(app.theme, start);
        assert!(effects.iter().any(|e| matches!(e, Effect::SaveTheme)));
    }

    #[test]
    fn history_mutations_request_persistence() {
        let mut app = test_app();
        app.history.add("scan.png", "some text");
        let id = app.history.items()[0].id;

        let effects = app.reduce(Message::RemoveHistoryItem(id));
        assert!(app.history.is_empty());
        assert!(effects.iter().any(|e| matches!(e, Effect::SaveHistory)));

        app.history.add("scan.png", "some text");
        let effects = app.reduce(Message::ClearHistory);
        assert!(app.history.is_empty());
        assert!(effects.iter().any(|e| matches!(e, Effect::SaveHistory)));
    }

    #[test]
    fn load_from_history_sets_text_without_touching_the_image() {
        let mut app = test_app();
        app.reduce(Message::OpenConverter);
        app.history.add("old-scan.png", "remembered text");
        let id = app.history.items()[0].id;

        app.reduce(Message::LoadFromHistory(id));
        assert_eq!(app.workflow.current_text(), "remembered text");
        assert!(app.workflow.image.is_none());
    }

    #[test]
    fn load_from_unknown_history_id_is_a_no_op() {
        let mut app = test_app();
        app.reduce(Message::LoadFromHistory(42));
        assert!(!app.workflow.has_text());
        assert!(app.toast.is_none());
    }

    #[test]
    fn copy_and_export_are_ignored_without_text() {
        let mut app = test_app();
        assert!(app.reduce(Message::CopyText).is_empty());
        assert!(app.reduce(Message::ExportText).is_empty());
    }

    #[test]
    fn copy_emits_clipboard_effect_with_the_current_text() {
        let mut app = test_app();
        app.workflow.set_text("Hello world");
        let effects = app.reduce(Message::CopyText);
        assert!(effects
            .iter()
            .any(|e| matches!(e, Effect::CopyToClipboard(text) if text == "Hello world")));
        assert!(matches!(
            app.toast.as_ref().map(|t| t.kind),
            Some(ToastKind::Success)
        ));
    }

    #[test]
    fn expired_toast_is_cleared_on_tick() {
        let mut app = test_app();
        app.show_toast(ToastKind::Info, "hello");
        let later = Instant::now() + Duration::from_secs(120);
        app.reduce(Message::Tick(later));
        assert!(app.toast.is_none());
    }

    #[test]
    fn live_toast_survives_a_tick() {
        let mut app = test_app();
        app.show_toast(ToastKind::Info, "hello");
        app.reduce(Message::Tick(Instant::now()));
        assert!(app.toast.is_some());
    }

    #[test]
    fn back_to_landing_resets_the_converter() {
        let mut app = test_app();
        app.reduce(Message::OpenConverter);
        app.workflow.set_text("draft");
        app.history_open = true;

        app.reduce(Message::BackToLanding);
        assert_eq!(app.screen, Screen::Landing);
        assert!(!app.workflow.has_text());
        assert!(!app.history_open);
    }
}
