use iced::widget::text_editor;
use std::path::PathBuf;
use std::time::Instant;

/// Messages emitted by the UI and by background tasks.
#[derive(Debug, Clone)]
pub enum Message {
    OpenConverter,
    BackToLanding,
    ToggleTheme,
    ToggleHistoryPanel,
    ImagePathInputChanged(String),
    ImagePathSubmitted,
    ImageDropped(PathBuf),
    ImageRead {
        file_name: String,
        bytes: Vec<u8>,
    },
    ImageReadFailed {
        path: PathBuf,
        error: String,
    },
    ClearImage,
    Convert,
    ExtractionFinished {
        request_id: u64,
        result: Result<String, String>,
    },
    EditorAction(text_editor::Action),
    ClearText,
    CopyText,
    ExportText,
    ExportFinished {
        path: Option<PathBuf>,
        error: Option<String>,
    },
    LoadFromHistory(u64),
    RemoveHistoryItem(u64),
    ClearHistory,
    DismissToast,
    Tick(Instant),
}
