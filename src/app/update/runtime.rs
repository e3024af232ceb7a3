use super::Effect;
use super::super::messages::Message;
use super::super::state::App;
use crate::storage;
use iced::{Event, Task, event, window};
use std::fs;
use tracing::warn;

impl App {
    pub(super) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::SaveHistory => {
                storage::save_history(self.history.items());
                Task::none()
            }
            Effect::SaveTheme => {
                storage::save_theme(self.theme);
                Task::none()
            }
            Effect::ReadImage(path) => Task::perform(
                async move {
                    let file_name = path
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_else(|| "image".to_string());
                    match fs::read(&path) {
                        Ok(bytes) => Message::ImageRead { file_name, bytes },
                        Err(err) => Message::ImageReadFailed {
                            path,
                            error: err.to_string(),
                        },
                    }
                },
                |message| message,
            ),
            Effect::ExtractText {
                request_id,
                file_name,
                bytes,
                cancel,
            } => {
                let client = self.ocr.clone();
                Task::perform(
                    async move {
                        let result = match client.extract_text(bytes, &file_name, &cancel).await {
                            Ok(text) => Ok(text),
                            Err(err) => {
                                warn!(request_id, "OCR request failed: {err}");
                                Err(err.to_string())
                            }
                        };
                        Message::ExtractionFinished { request_id, result }
                    },
                    |message| message,
                )
            }
            Effect::CopyToClipboard(text) => iced::clipboard::write(text),
            Effect::ExportText(text) => Task::perform(
                async move {
                    match storage::export_text(&text) {
                        Ok(path) => Message::ExportFinished {
                            path: Some(path),
                            error: None,
                        },
                        Err(err) => Message::ExportFinished {
                            path: None,
                            error: Some(format!("{err:#}")),
                        },
                    }
                },
                |message| message,
            ),
        }
    }
}

pub(super) fn runtime_event_to_message(
    event: Event,
    status: event::Status,
    _window_id: window::Id,
) -> Option<Message> {
    if status == event::Status::Captured {
        return None;
    }
    match event {
        Event::Window(window::Event::FileDropped(path)) => Some(Message::ImageDropped(path)),
        _ => None,
    }
}
