mod messages;
mod state;
mod update;
mod view;

pub use state::App;

use crate::config::AppConfig;
use crate::history::HistoryStore;
use crate::theme::ThemeMode;
use iced::{Size, window};

/// Helper to launch the app with the restored stores.
pub fn run_app(config: AppConfig, history: HistoryStore, theme: ThemeMode) -> iced::Result {
    let window_settings = window::Settings {
        size: Size::new(config.window_width, config.window_height),
        ..window::Settings::default()
    };

    iced::application("Inklift", App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(|app: &App| iced::Theme::from(app.theme_mode()))
        .run_with(move || App::bootstrap(config, history, theme))
}
