use iced::mouse;
use iced::widget::canvas::{self, Frame};
use iced::widget::mouse_area;
use iced::{Color, Element, Point, Rectangle, Renderer, Size, Theme};

use retouch_archery::game::{AREA_HEIGHT, AREA_WIDTH};
use retouch_archery::{Aabb, Game};

use crate::app::Message;

const FIELD_BG: Color = Color::from_rgb(0.55, 0.78, 0.95);
const BOW_COLOR: Color = Color::from_rgb(0.45, 0.27, 0.1);
const ARROW_COLOR: Color = Color::from_rgb(0.2, 0.2, 0.2);
const TARGET_OUTER: Color = Color::from_rgb(0.85, 0.15, 0.15);
const TARGET_INNER: Color = Color::WHITE;

/// Snapshot of the three sprites for one frame.
struct ArcheryCanvas {
    bow: Aabb,
    arrow: Aabb,
    target: Aabb,
}

fn rect(b: &Aabb) -> (Point, Size) {
    (Point::new(b.left, b.top), Size::new(b.width(), b.height()))
}

impl<Message> canvas::Program<Message> for ArcheryCanvas {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), FIELD_BG);

        let (pos, size) = rect(&self.bow);
        frame.fill_rectangle(pos, size, BOW_COLOR);

        let (pos, size) = rect(&self.target);
        frame.fill_rectangle(pos, size, TARGET_OUTER);
        let inset = size.width / 4.0;
        frame.fill_rectangle(
            Point::new(pos.x + inset, pos.y + inset),
            Size::new(size.width - 2.0 * inset, size.height - 2.0 * inset),
            TARGET_INNER,
        );

        let (pos, size) = rect(&self.arrow);
        frame.fill_rectangle(pos, size, ARROW_COLOR);

        vec![frame.into_geometry()]
    }
}

pub fn view<'a>(game: &Game) -> Element<'a, Message> {
    let field = iced::widget::canvas(ArcheryCanvas {
        bow: game.bow_box(),
        arrow: game.arrow_box(),
        target: game.target_box(),
    })
    .width(AREA_WIDTH)
    .height(AREA_HEIGHT);

    mouse_area(field)
        .on_move(|p| Message::Aim(p.y))
        .on_press(Message::Shoot)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_matches_box_edges() {
        let (pos, size) = rect(&Aabb::new(700.0, 30.0, 50.0, 80.0));
        assert_eq!(pos, Point::new(700.0, 30.0));
        assert_eq!(size, Size::new(50.0, 80.0));
    }
}
