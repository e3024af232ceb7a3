use super::messages::Message;
use super::state::{App, Screen, Toast, ToastKind, WorkflowPhase};
use crate::history::HistoryItem;
use chrono::Local;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{
    Column, Row, button, column, container, horizontal_space, image, mouse_area, row, scrollable,
    text, text_editor, text_input, vertical_space,
};
use iced::{Element, Length};

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let body: Element<'_, Message> = match self.screen {
            Screen::Landing => self.landing_view(),
            Screen::Converter => self.converter_view(),
        };

        let mut page: Column<'_, Message> = column![self.header()]
            .spacing(12)
            .padding(16)
            .height(Length::Fill);
        if let Some(toast) = &self.toast {
            page = page.push(self.toast_bar(toast));
        }
        page = page.push(container(body).width(Length::Fill).height(Length::Fill));
        page = page.push(self.footer());
        page.into()
    }

    fn header(&self) -> Element<'_, Message> {
        let theme_label = if self.theme.is_dark() {
            "Day Mode"
        } else {
            "Night Mode"
        };

        let mut bar: Row<'_, Message> = row![text("Inklift").size(22)]
            .spacing(10)
            .align_y(Vertical::Center)
            .width(Length::Fill);
        bar = bar.push(horizontal_space());
        if self.screen == Screen::Converter {
            bar = bar.push(button("Back").on_press(Message::BackToLanding));
        }
        bar = bar.push(button(theme_label).on_press(Message::ToggleTheme));
        bar.into()
    }

    fn footer(&self) -> Element<'_, Message> {
        row![
            horizontal_space(),
            text("Handwritten notes in, editable text out.").size(12),
            horizontal_space(),
        ]
        .into()
    }

    fn toast_bar(&self, toast: &Toast) -> Element<'_, Message> {
        let tag = match toast.kind {
            ToastKind::Success => "Success",
            ToastKind::Error => "Error",
            ToastKind::Info => "Notice",
        };
        container(
            row![
                text(format!("{tag}: {}", toast.text)).size(14),
                horizontal_space(),
                button(text("Dismiss").size(12)).on_press(Message::DismissToast),
            ]
            .spacing(8)
            .align_y(Vertical::Center),
        )
        .padding(10)
        .width(Length::Fill)
        .into()
    }

    fn landing_view(&self) -> Element<'_, Message> {
        let steps = row![
            step_card("Upload", "Select or drop a photo of your notes"),
            step_card("Process", "The OCR service reads the handwriting"),
            step_card("Export", "Edit, copy, or save the result"),
        ]
        .spacing(16);

        column![
            vertical_space(),
            text("Turn handwriting into text").size(34),
            text("Upload a photo of handwritten notes and get editable text back in seconds.")
                .size(16),
            button(text("Get Started").size(18))
                .padding(14)
                .on_press(Message::OpenConverter),
            steps,
            vertical_space(),
        ]
        .spacing(20)
        .align_x(Horizontal::Center)
        .width(Length::Fill)
        .into()
    }

    fn converter_view(&self) -> Element<'_, Message> {
        let history_label = if self.history_open {
            "Hide History"
        } else {
            "History"
        };
        let top = row![button(history_label).on_press(Message::ToggleHistoryPanel)]
            .width(Length::Fill);

        let panels = row![self.upload_panel(), self.result_panel()]
            .spacing(16)
            .height(Length::Fill);

        let content = column![top, panels].spacing(12).height(Length::Fill);

        let mut layout: Row<'_, Message> = row![].spacing(16).height(Length::Fill);
        if self.history_open {
            layout = layout.push(self.history_panel());
        }
        layout.push(container(content).width(Length::Fill)).into()
    }

    fn upload_panel(&self) -> Element<'_, Message> {
        let heading = text("Upload Image").size(20);

        let body: Element<'_, Message> = match &self.workflow.image {
            Some(selected) => {
                let preview = image(selected.preview.clone())
                    .width(Length::Fill)
                    .height(Length::Fill);
                let clear = if self.workflow.converting {
                    button("Clear Image")
                } else {
                    button("Clear Image").on_press(Message::ClearImage)
                };
                column![
                    preview,
                    text(selected.file_name.as_str()).size(14),
                    clear,
                ]
                .spacing(8)
                .align_x(Horizontal::Center)
                .into()
            }
            None => {
                let input = text_input("Path to an image file", &self.image_path_input)
                    .on_input(Message::ImagePathInputChanged)
                    .on_submit(Message::ImagePathSubmitted);
                let load = if self.workflow.reading_image {
                    button("Loading...")
                } else {
                    button("Load").on_press(Message::ImagePathSubmitted)
                };
                column![
                    vertical_space(),
                    text("Drag and drop an image anywhere in this window").size(16),
                    text("or enter a path below").size(14),
                    row![input, load].spacing(8).align_y(Vertical::Center),
                    text("Supported: JPG, PNG, WebP").size(12),
                    vertical_space(),
                ]
                .spacing(10)
                .align_x(Horizontal::Center)
                .into()
            }
        };

        container(column![heading, body].spacing(12))
            .width(Length::FillPortion(1))
            .padding(8)
            .into()
    }

    fn result_panel(&self) -> Element<'_, Message> {
        let heading = text("Converted Text").size(20);

        if self.workflow.converting {
            let notice = column![
                vertical_space(),
                text("Extracting text...").size(18),
                text("This can take a few seconds for dense pages.").size(13),
                vertical_space(),
            ]
            .spacing(8)
            .align_x(Horizontal::Center)
            .width(Length::Fill);
            return container(column![heading, notice].spacing(12))
                .width(Length::FillPortion(1))
                .padding(8)
                .into();
        }

        let editor = text_editor(&self.workflow.editor)
            .placeholder("Your extracted text will appear here...")
            .height(Length::Fill)
            .on_action(Message::EditorAction);

        let current = self.workflow.current_text();
        let words = current.split_whitespace().count();
        let chars = current.chars().count();
        let counters = text(format!("Words: {words}   Characters: {chars}")).size(13);

        let has_text = self.workflow.has_text();
        let copy = if has_text {
            button("Copy").on_press(Message::CopyText)
        } else {
            button("Copy")
        };
        let export = if has_text {
            button("Export").on_press(Message::ExportText)
        } else {
            button("Export")
        };
        let clear = if has_text {
            button("Clear").on_press(Message::ClearText)
        } else {
            button("Clear")
        };
        let actions = row![copy, export, clear].spacing(8);

        let mut panel = column![heading, editor, counters, actions].spacing(12);
        if self.workflow.phase() == WorkflowPhase::ImageSelected {
            panel = panel.push(
                button(text("Convert to Text").size(16))
                    .on_press(Message::Convert)
                    .width(Length::Fill),
            );
        }

        container(panel)
            .width(Length::FillPortion(1))
            .padding(8)
            .into()
    }

    fn history_panel(&self) -> Element<'_, Message> {
        let header = row![
            text("History").size(20),
            horizontal_space(),
            button(text("Close").size(12)).on_press(Message::ToggleHistoryPanel),
        ]
        .align_y(Vertical::Center);

        let body: Element<'_, Message> = if self.history.is_empty() {
            column![
                text("No history yet").size(14),
                text("Your conversions will appear here").size(12),
            ]
            .spacing(4)
            .into()
        } else {
            let mut entries: Column<'_, Message> = Column::new().spacing(10);
            for item in self.history.items() {
                entries = entries.push(self.history_entry(item));
            }
            scrollable(entries).height(Length::Fill).into()
        };

        let mut panel = column![header, body]
            .spacing(12)
            .width(Length::Fixed(300.0))
            .height(Length::Fill);
        if !self.history.is_empty() {
            panel = panel.push(
                button("Clear All")
                    .on_press(Message::ClearHistory)
                    .width(Length::Fill),
            );
        }

        container(panel).padding(12).into()
    }

    fn history_entry<'a>(&'a self, item: &'a HistoryItem) -> Element<'a, Message> {
        let date = item
            .timestamp
            .with_timezone(&Local)
            .format("%b %e, %Y")
            .to_string();
        let details = column![
            text(item.file_name.as_str()).size(14),
            text(item.preview.as_str()).size(12),
            row![
                text(date).size(11),
                horizontal_space(),
                button(text("Remove").size(11)).on_press(Message::RemoveHistoryItem(item.id)),
            ]
            .spacing(8)
            .align_y(Vertical::Center),
        ]
        .spacing(4);

        mouse_area(container(details).padding(8).width(Length::Fill))
            .on_press(Message::LoadFromHistory(item.id))
            .into()
    }
}

fn step_card<'a>(title: &'a str, blurb: &'a str) -> Element<'a, Message> {
    container(
        column![text(title).size(18), text(blurb).size(14)]
            .spacing(6)
            .width(Length::Fixed(220.0)),
    )
    .padding(16)
    .into()
}
