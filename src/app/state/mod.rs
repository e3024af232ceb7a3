mod toast;
mod workflow;

use crate::config::AppConfig;
use crate::history::HistoryStore;
use crate::ocr::OcrClient;
use crate::theme::ThemeMode;
use iced::Task;

use super::messages::Message;

pub(in crate::app) use toast::{Toast, ToastKind};
pub(in crate::app) use workflow::{WorkflowPhase, WorkflowState};

/// Which of the two top-level views is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(in crate::app) enum Screen {
    Landing,
    Converter,
}

/// Core application state composed of sub-models.
pub struct App {
    pub(super) screen: Screen,
    pub(super) config: AppConfig,
    pub(super) theme: ThemeMode,
    pub(super) workflow: WorkflowState,
    pub(super) history: HistoryStore,
    pub(super) history_open: bool,
    pub(super) image_path_input: String,
    pub(super) toast: Option<Toast>,
    pub(super) ocr: OcrClient,
}

impl App {
    pub(super) fn bootstrap(
        config: AppConfig,
        history: HistoryStore,
        theme: ThemeMode,
    ) -> (App, Task<Message>) {
        let ocr = OcrClient::new(&config.api_base_url);
        tracing::info!(
            entries = history.len(),
            dark = theme.is_dark(),
            "Initialized app state"
        );
        let app = App {
            screen: Screen::Landing,
            config,
            theme,
            workflow: WorkflowState::new(),
            history,
            history_open: false,
            image_path_input: String::new(),
            toast: None,
            ocr,
        };
        (app, Task::none())
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme
    }

    pub(super) fn show_toast(&mut self, kind: ToastKind, text: impl Into<String>) {
        self.toast = Some(Toast::new(kind, text.into(), self.config.toast_secs));
    }
}
