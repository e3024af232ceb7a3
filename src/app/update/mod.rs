mod reducer;
mod runtime;
mod workflow;

use super::messages::Message;
use super::state::App;
use crate::cancellation::CancellationToken;
use iced::{Subscription, Task, event, time};
use std::path::PathBuf;
use std::time::Duration;

/// Describes work that must be performed outside the pure reducer.
pub(super) enum Effect {
    SaveHistory,
    SaveTheme,
    ReadImage(PathBuf),
    ExtractText {
        request_id: u64,
        file_name: String,
        bytes: Vec<u8>,
        cancel: CancellationToken,
    },
    CopyToClipboard(String),
    ExportText(String),
}

impl App {
    pub fn subscription(app: &App) -> Subscription<Message> {
        let mut subscriptions: Vec<Subscription<Message>> =
            vec![event::listen_with(runtime::runtime_event_to_message)];

        if app.toast.is_some() {
            subscriptions.push(time::every(Duration::from_millis(250)).map(Message::Tick));
        }

        Subscription::batch(subscriptions)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let effects = self.reduce(message);
        if effects.is_empty() {
            Task::none()
        } else {
            Task::batch(effects.into_iter().map(|effect| self.run_effect(effect)))
        }
    }
}
