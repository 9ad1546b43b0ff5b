use iced::widget::{Space, button, column, container, row, text};
use iced::{Alignment, Element, Length};

use super::CANVAS_BG;
use crate::app::{App, Message};
use crate::widgets;

pub fn view(app: &App) -> Element<'_, Message> {
    let game = app.game();

    let toolbar = row![
        button("< Editor").on_press(Message::ShowEditor),
        Space::new().width(Length::Fill),
        text("Archery").size(20),
        Space::new().width(Length::Fill),
        button("Start").on_press_maybe((!game.is_running()).then_some(Message::StartGame)),
        button("Reset").on_press(Message::ResetGame),
    ]
    .spacing(10)
    .padding(10)
    .align_y(Alignment::Center);

    let scoreboard = row![
        text(format!("Score: {}", game.score())).size(16),
        text(format!("Time: {}s", game.time_left())).size(16),
        Space::new().width(Length::Fill),
        text(game.message()).size(16),
    ]
    .spacing(20)
    .padding(10)
    .width(Length::Fill);

    let field = container(widgets::archery_field::view(game))
        .style(|_theme: &_| container::Style {
            background: Some(CANVAS_BG.into()),
            ..Default::default()
        })
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill);

    let hint = text("Move the mouse to aim. Click or press Space to shoot.").size(12);

    column![toolbar, scoreboard, field, container(hint).padding(10)]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
