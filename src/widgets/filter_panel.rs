use iced::widget::{button, column, container, row, slider, text};
use iced::{Element, Length};

use retouch_core::Editor;
use retouch_core::settings::{FilterKind, FlipAxis};

use crate::app::Message;

const PANEL_WIDTH: f32 = 240.0;

pub fn view(editor: &Editor, slider_value: i32) -> Element<'_, Message> {
    let loaded = editor.is_loaded();
    let control = editor.control();
    let enabled = |message: Message| loaded.then_some(message);

    let filters = FilterKind::ALL.iter().fold(column![].spacing(4), |col, &kind| {
        let style = if kind == control.filter {
            button::primary
        } else {
            button::secondary
        };
        col.push(
            button(text(kind.label()).size(13))
                .width(Length::Fill)
                .style(style)
                .on_press_maybe(enabled(Message::SelectFilter(kind))),
        )
    });

    // Rotation accumulates past the slider range, so only the thumb is clamped.
    let thumb = slider_value.clamp(control.min, control.max);
    let adjust = column![
        row![
            text(control.label).size(12).width(Length::Fill),
            text(control.value_text()).size(12),
        ],
        slider(control.min..=control.max, thumb, Message::SliderChanged)
            .step(control.step)
            .on_release(Message::SliderReleased),
    ]
    .spacing(4);

    let transforms = column![
        row![
            action("Rotate Left", enabled(Message::RotateLeft)),
            action("Rotate Right", enabled(Message::RotateRight)),
        ]
        .spacing(4),
        row![
            action(FlipAxis::Horizontal.label(), enabled(Message::FlipHorizontal)),
            action(FlipAxis::Vertical.label(), enabled(Message::FlipVertical)),
        ]
        .spacing(4),
        button(text("Reset Filters").size(13))
            .width(Length::Fill)
            .style(button::danger)
            .on_press_maybe(enabled(Message::Reset)),
    ]
    .spacing(4);

    container(
        column![
            text("Filters").size(16),
            filters,
            adjust,
            text("Rotate & Flip").size(16),
            transforms,
        ]
        .spacing(12),
    )
    .padding(10)
    .width(PANEL_WIDTH)
    .into()
}

fn action(label: &'static str, on_press: Option<Message>) -> Element<'static, Message> {
    button(text(label).size(13))
        .width(Length::Fill)
        .style(button::secondary)
        .on_press_maybe(on_press)
        .into()
}
