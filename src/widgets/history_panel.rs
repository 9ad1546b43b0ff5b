use iced::widget::{button, column, container, row, scrollable, text};
use iced::{Element, Length};

use retouch_core::Editor;

use crate::app::Message;

const PANEL_WIDTH: f32 = 240.0;

pub fn view(editor: &Editor) -> Element<'_, Message> {
    let controls = row![
        button(text("Undo").size(13))
            .width(Length::Fill)
            .on_press_maybe(editor.can_undo().then_some(Message::Undo)),
        button(text("Redo").size(13))
            .width(Length::Fill)
            .on_press_maybe(editor.can_redo().then_some(Message::Redo)),
    ]
    .spacing(4);

    let rows = editor
        .history_rows()
        .into_iter()
        .fold(column![].spacing(2), |col, entry| {
            let style = if entry.active {
                button::primary
            } else {
                button::text
            };
            col.push(
                button(text(entry.text).size(12))
                    .width(Length::Fill)
                    .style(style)
                    .on_press(Message::JumpHistory(entry.index)),
            )
        });

    container(
        column![
            text("History").size(16),
            controls,
            scrollable(rows).height(Length::Fill),
        ]
        .spacing(12),
    )
    .padding(10)
    .width(PANEL_WIDTH)
    .height(Length::Fill)
    .into()
}
