use iced::widget::{Space, button, column, container, image, row, text};
use iced::{Alignment, Element, Length};

use super::CANVAS_BG;
use crate::app::{App, Message};
use crate::widgets;

const HINT: &str = "Choose an image to start editing.";

pub fn view(app: &App) -> Element<'_, Message> {
    let editor = app.editor();

    let choose = button(if app.is_decoding() { "Loading..." } else { "Choose Image" })
        .on_press_maybe((!app.is_decoding()).then_some(Message::ChooseImage));
    let save = button("Save Image").on_press_maybe(editor.can_save().then_some(Message::Save));

    let toolbar = row![
        text("Retouch").size(20),
        Space::new().width(Length::Fill),
        choose,
        save,
        button("Archery").on_press(Message::ShowArchery),
    ]
    .spacing(10)
    .padding(10)
    .align_y(Alignment::Center);

    let canvas_style = |_theme: &_| container::Style {
        background: Some(CANVAS_BG.into()),
        ..Default::default()
    };

    let preview = match app.rendered() {
        Some(handle) => container(image(handle.clone())),
        None => container(text(HINT).size(16)),
    }
    .style(canvas_style)
    .width(Length::Fill)
    .height(Length::Fill)
    .center_x(Length::Fill)
    .center_y(Length::Fill);

    let filter_panel = widgets::filter_panel::view(editor, app.slider_value());
    let history_panel = widgets::history_panel::view(editor);

    let content = row![filter_panel, preview, history_panel]
        .spacing(0)
        .width(Length::Fill)
        .height(Length::Fill);

    let status = container(text(app.status_message()).size(12)).padding([4, 10]);

    column![toolbar, content, status]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
