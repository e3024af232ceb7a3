use super::Effect;
use super::super::state::{App, Screen, ToastKind, WorkflowPhase};
use crate::cancellation::CancellationToken;
use iced::widget::text_editor;
use std::path::PathBuf;
use tracing::{debug, info, warn};

impl App {
    pub(super) fn handle_image_path_submitted(&mut self, effects: &mut Vec<Effect>) {
        if self.workflow.reading_image || self.workflow.converting {
            return;
        }
        let candidate = PathBuf::from(self.image_path_input.trim());
        if candidate.as_os_str().is_empty() {
            return;
        }
        if !candidate.exists() {
            self.show_toast(ToastKind::Error, "No such file");
            return;
        }
        self.workflow.reading_image = true;
        info!(path = %candidate.display(), "Reading image from path input");
        effects.push(Effect::ReadImage(candidate));
    }

    pub(super) fn handle_image_dropped(&mut self, path: PathBuf, effects: &mut Vec<Effect>) {
        if self.screen != Screen::Converter {
            debug!(path = %path.display(), "Ignoring file drop outside the converter");
            return;
        }
        if self.workflow.converting {
            debug!("Ignoring file drop while a conversion is outstanding");
            self.show_toast(ToastKind::Info, "A conversion is already in progress");
            return;
        }
        if self.workflow.reading_image {
            debug!("Ignoring file drop while another file is being read");
            return;
        }
        self.workflow.reading_image = true;
        info!(path = %path.display(), "Reading dropped file");
        effects.push(Effect::ReadImage(path));
    }

    /// Completion of a file read. The content gate lives here: anything that
    /// does not sniff as an image is rejected before any upload can happen.
    pub(super) fn handle_image_read(&mut self, file_name: String, bytes: Vec<u8>) {
        self.workflow.reading_image = false;
        if image::guess_format(&bytes).is_err() {
            warn!(%file_name, "Rejected non-image upload");
            self.show_toast(
                ToastKind::Error,
                "Please choose an image file (PNG, JPG, or WebP)",
            );
            return;
        }
        info!(%file_name, size = bytes.len(), "Image selected");
        self.workflow.select_image(file_name, bytes);
        self.image_path_input.clear();
    }

    pub(super) fn handle_image_read_failed(&mut self, path: PathBuf, error: String) {
        self.workflow.reading_image = false;
        warn!(path = %path.display(), "Failed to read file: {error}");
        self.show_toast(ToastKind::Error, "Could not read that file");
    }

    pub(super) fn handle_clear_image(&mut self) {
        if self.workflow.converting {
            return;
        }
        if self.workflow.image.take().is_some() {
            debug!("Cleared selected image");
        }
        self.workflow.clear_text();
    }

    pub(super) fn handle_convert(&mut self, effects: &mut Vec<Effect>) {
        if self.workflow.phase() != WorkflowPhase::ImageSelected {
            debug!(phase = ?self.workflow.phase(), "Convert requested outside ImageSelected");
            return;
        }
        let Some((file_name, bytes)) = self
            .workflow
            .image
            .as_ref()
            .map(|image| (image.file_name.clone(), image.bytes.clone()))
        else {
            return;
        };

        let request_id = self.workflow.request_id.wrapping_add(1);
        self.workflow.request_id = request_id;
        let cancel = CancellationToken::new();
        self.workflow.cancel = Some(cancel.clone());
        self.workflow.converting = true;
        info!(file_name = %file_name, request_id, "Starting conversion");
        effects.push(Effect::ExtractText {
            request_id,
            file_name,
            bytes,
            cancel,
        });
    }

    pub(super) fn handle_extraction_finished(
        &mut self,
        request_id: u64,
        result: Result<String, String>,
        effects: &mut Vec<Effect>,
    ) {
        if !self.workflow.converting || request_id != self.workflow.request_id {
            debug!(request_id, "Dropping stale conversion result");
            return;
        }
        self.workflow.converting = false;
        self.workflow.cancel = None;

        match result {
            Ok(text) => {
                let file_name = self
                    .workflow
                    .image
                    .as_ref()
                    .map(|image| image.file_name.clone())
                    .unwrap_or_default();
                self.workflow.set_text(&text);
                self.history.add(&file_name, &text);
                effects.push(Effect::SaveHistory);
                info!(%file_name, chars = text.chars().count(), "Conversion succeeded");
                self.show_toast(ToastKind::Success, "Text extracted successfully");
            }
            Err(error) => {
                warn!(request_id, "Conversion failed: {error}");
                self.show_toast(ToastKind::Error, "Failed to extract text. Please try again.");
            }
        }
    }

    pub(super) fn handle_editor_action(&mut self, action: text_editor::Action) {
        if self.workflow.converting {
            return;
        }
        self.workflow.editor.perform(action);
        // The editor reports a trailing newline even for single-line text;
        // drop it so the mirrored string matches what the user typed.
        let mut text = self.workflow.editor.text();
        if text.ends_with('\n') {
            text.pop();
        }
        self.workflow.text = Some(text);
    }

    pub(super) fn handle_clear_text(&mut self) {
        if self.workflow.converting {
            return;
        }
        self.workflow.clear_text();
        debug!("Cleared extracted text");
    }
}

#[cfg(test)]
mod tests {
    use super::super::Effect;
    use super::super::super::messages::Message;
    use super::super::super::state::{App, ToastKind, WorkflowPhase};
    use crate::config::AppConfig;
    use crate::history::{HISTORY_LIMIT, HistoryStore};
    use crate::theme::ThemeMode;

    fn test_app() -> App {
        let (mut app, _task) =
            App::bootstrap(AppConfig::default(), HistoryStore::default(), ThemeMode::default());
        app.reduce(Message::OpenConverter);
        app
    }

    /// Enough of a PNG for format sniffing to accept it.
    fn png_bytes() -> Vec<u8> {
        let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
        bytes.extend_from_slice(&[0u8; 16]);
        bytes
    }

    fn select_image(app: &mut App, file_name: &str) {
        app.reduce(Message::ImageRead {
            file_name: file_name.to_string(),
            bytes: png_bytes(),
        });
    }

    fn start_conversion(app: &mut App) -> u64 {
        let effects = app.reduce(Message::Convert);
        let request_id = effects
            .iter()
            .find_map(|effect| match effect {
                Effect::ExtractText { request_id, .. } => Some(*request_id),
                _ => None,
            })
            .expect("conversion dispatched");
        request_id
    }

    #[test]
    fn non_image_selection_is_rejected_without_side_effects() {
        let mut app = test_app();
        let effects = app.reduce(Message::ImageRead {
            file_name: "notes.txt".to_string(),
            bytes: b"definitely not an image".to_vec(),
        });

        assert_eq!(app.workflow.phase(), WorkflowPhase::Idle);
        assert!(app.workflow.image.is_none());
        assert!(effects.is_empty());
        assert!(app.history.is_empty());
        assert!(matches!(
            app.toast.as_ref().map(|t| t.kind),
            Some(ToastKind::Error)
        ));
    }

    #[test]
    fn valid_image_enters_image_selected_and_discards_prior_text() {
        let mut app = test_app();
        app.workflow.set_text("stale text");
        select_image(&mut app, "scan.png");

        assert_eq!(app.workflow.phase(), WorkflowPhase::ImageSelected);
        assert!(!app.workflow.has_text());
        assert_eq!(app.workflow.image.as_ref().unwrap().file_name, "scan.png");
    }

    #[test]
    fn successful_conversion_reaches_converted_and_records_history() {
        let mut app = test_app();
        select_image(&mut app, "scan.png");

        let request_id = start_conversion(&mut app);
        assert_eq!(app.workflow.phase(), WorkflowPhase::Converting);

        let effects = app.reduce(Message::ExtractionFinished {
            request_id,
            result: Ok("Hello world".to_string()),
        });

        assert_eq!(app.workflow.phase(), WorkflowPhase::Converted);
        assert_eq!(app.workflow.current_text(), "Hello world");
        assert_eq!(app.history.len(), 1);
        let item = &app.history.items()[0];
        assert_eq!(item.file_name, "scan.png");
        assert_eq!(item.preview, "Hello world");
        assert!(effects.iter().any(|e| matches!(e, Effect::SaveHistory)));
        assert!(matches!(
            app.toast.as_ref().map(|t| t.kind),
            Some(ToastKind::Success)
        ));
    }

    #[test]
    fn failed_conversion_returns_to_image_selected_with_history_untouched() {
        let mut app = test_app();
        select_image(&mut app, "scan.png");
        let request_id = start_conversion(&mut app);

        let effects = app.reduce(Message::ExtractionFinished {
            request_id,
            result: Err("connection refused".to_string()),
        });

        assert_eq!(app.workflow.phase(), WorkflowPhase::ImageSelected);
        assert!(!app.workflow.has_text());
        assert!(app.workflow.image.is_some());
        assert!(app.history.is_empty());
        assert!(effects.is_empty());
        assert!(matches!(
            app.toast.as_ref().map(|t| t.kind),
            Some(ToastKind::Error)
        ));
    }

    #[test]
    fn conversion_with_full_history_evicts_the_oldest() {
        let mut app = test_app();
        for i in 0..HISTORY_LIMIT {
            app.history.add(&format!("old-{i}.png"), "text");
        }
        select_image(&mut app, "fresh.png");
        let request_id = start_conversion(&mut app);
        app.reduce(Message::ExtractionFinished {
            request_id,
            result: Ok("fresh text".to_string()),
        });

        assert_eq!(app.history.len(), HISTORY_LIMIT);
        assert_eq!(app.history.items()[0].file_name, "fresh.png");
        assert!(app
            .history
            .items()
            .iter()
            .all(|item| item.file_name != "old-0.png"));
    }

    #[test]
    fn convert_is_ignored_unless_an_image_awaits_conversion() {
        let mut app = test_app();
        assert!(app.reduce(Message::Convert).is_empty());

        select_image(&mut app, "scan.png");
        let request_id = start_conversion(&mut app);
        // A second press while the request is outstanding does nothing.
        assert!(app.reduce(Message::Convert).is_empty());

        app.reduce(Message::ExtractionFinished {
            request_id,
            result: Ok("done".to_string()),
        });
        // Nor does one after the text arrived.
        assert!(app.reduce(Message::Convert).is_empty());
    }

    #[test]
    fn stale_extraction_results_are_dropped() {
        let mut app = test_app();
        select_image(&mut app, "scan.png");
        let request_id = start_conversion(&mut app);

        app.reduce(Message::BackToLanding);
        let effects = app.reduce(Message::ExtractionFinished {
            request_id,
            result: Ok("too late".to_string()),
        });

        assert!(effects.is_empty());
        assert!(!app.workflow.has_text());
        assert!(app.history.is_empty());
    }

    #[test]
    fn leaving_the_converter_cancels_the_outstanding_request() {
        let mut app = test_app();
        select_image(&mut app, "scan.png");
        let effects = app.reduce(Message::Convert);
        let token = effects
            .iter()
            .find_map(|effect| match effect {
                Effect::ExtractText { cancel, .. } => Some(cancel.clone()),
                _ => None,
            })
            .expect("token attached to the request");

        assert!(!token.is_cancelled());
        app.reduce(Message::BackToLanding);
        assert!(token.is_cancelled());
    }

    #[test]
    fn clear_text_steps_back_to_image_selected() {
        let mut app = test_app();
        select_image(&mut app, "scan.png");
        let request_id = start_conversion(&mut app);
        app.reduce(Message::ExtractionFinished {
            request_id,
            result: Ok("Hello".to_string()),
        });

        app.reduce(Message::ClearText);
        assert_eq!(app.workflow.phase(), WorkflowPhase::ImageSelected);
        assert!(app.workflow.image.is_some());
    }

    #[test]
    fn clear_image_returns_to_idle() {
        let mut app = test_app();
        select_image(&mut app, "scan.png");
        app.reduce(Message::ClearImage);
        assert_eq!(app.workflow.phase(), WorkflowPhase::Idle);
    }

    #[test]
    fn clear_image_is_refused_while_converting() {
        let mut app = test_app();
        select_image(&mut app, "scan.png");
        start_conversion(&mut app);

        app.reduce(Message::ClearImage);
        assert_eq!(app.workflow.phase(), WorkflowPhase::Converting);
        assert!(app.workflow.image.is_some());
    }

    #[test]
    fn drops_are_ignored_while_a_request_is_outstanding() {
        let mut app = test_app();
        select_image(&mut app, "scan.png");
        start_conversion(&mut app);

        let effects = app.reduce(Message::ImageDropped("other.png".into()));
        assert!(effects.is_empty());
        assert_eq!(app.workflow.image.as_ref().unwrap().file_name, "scan.png");
    }

    #[test]
    fn editing_is_refused_while_converting() {
        use iced::widget::text_editor::{Action, Edit};

        let mut app = test_app();
        select_image(&mut app, "scan.png");
        start_conversion(&mut app);

        app.reduce(Message::EditorAction(Action::Edit(Edit::Insert('x'))));
        assert!(!app.workflow.has_text());
    }

    #[test]
    fn editing_overwrites_text_without_touching_history() {
        use iced::widget::text_editor::{Action, Edit};

        let mut app = test_app();
        select_image(&mut app, "scan.png");
        let request_id = start_conversion(&mut app);
        app.reduce(Message::ExtractionFinished {
            request_id,
            result: Ok("Hello".to_string()),
        });
        let recorded = app.history.items()[0].text.clone();

        app.reduce(Message::EditorAction(Action::Edit(Edit::Insert('!'))));
        assert_ne!(app.workflow.current_text(), recorded);
        assert_eq!(app.history.items()[0].text, recorded);
    }
}
