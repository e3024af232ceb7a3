use crate::cancellation::CancellationToken;
use iced::widget::image::Handle;
use iced::widget::text_editor;

/// The upload-to-result interaction, one step at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WorkflowPhase {
    /// No image chosen.
    Idle,
    /// An image is chosen but no text has been produced yet.
    ImageSelected,
    /// The OCR request is outstanding.
    Converting,
    /// Extracted (or history-loaded) text is on display.
    Converted,
}

/// The selected upload: raw bytes for the OCR request plus a decoded preview.
pub(crate) struct SelectedImage {
    pub(in crate::app) file_name: String,
    pub(in crate::app) bytes: Vec<u8>,
    pub(in crate::app) preview: Handle,
}

/// Ephemeral conversion state. Nothing here is persisted; leaving the
/// converter view resets it wholesale.
pub(crate) struct WorkflowState {
    pub(in crate::app) image: Option<SelectedImage>,
    pub(in crate::app) text: Option<String>,
    pub(in crate::app) editor: text_editor::Content,
    pub(in crate::app) reading_image: bool,
    pub(in crate::app) converting: bool,
    pub(in crate::app) request_id: u64,
    pub(in crate::app) cancel: Option<CancellationToken>,
}

impl WorkflowState {
    pub(in crate::app) fn new() -> Self {
        WorkflowState {
            image: None,
            text: None,
            editor: text_editor::Content::new(),
            reading_image: false,
            converting: false,
            request_id: 0,
            cancel: None,
        }
    }

    /// The phase is derived from the data rather than stored, so illegal
    /// combinations are unrepresentable.
    pub(in crate::app) fn phase(&self) -> WorkflowPhase {
        if self.converting {
            WorkflowPhase::Converting
        } else if self.has_text() {
            WorkflowPhase::Converted
        } else if self.image.is_some() {
            WorkflowPhase::ImageSelected
        } else {
            WorkflowPhase::Idle
        }
    }

    pub(in crate::app) fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|text| !text.is_empty())
    }

    pub(in crate::app) fn current_text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Replace the text programmatically (extraction result or a history
    /// entry), rebuilding the editor contents to match.
    pub(in crate::app) fn set_text(&mut self, text: &str) {
        self.text = Some(text.to_string());
        self.editor = text_editor::Content::with_text(text);
    }

    pub(in crate::app) fn clear_text(&mut self) {
        self.text = None;
        self.editor = text_editor::Content::new();
    }

    pub(in crate::app) fn select_image(&mut self, file_name: String, bytes: Vec<u8>) {
        let preview = Handle::from_bytes(bytes.clone());
        self.image = Some(SelectedImage {
            file_name,
            bytes,
            preview,
        });
        self.clear_text();
    }

    /// Tear the whole workflow down, cancelling any outstanding request and
    /// bumping the request id so a late response cannot re-enter.
    pub(in crate::app) fn reset(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
        }
        let request_id = self.request_id.wrapping_add(1);
        *self = WorkflowState::new();
        self.request_id = request_id;
    }
}
