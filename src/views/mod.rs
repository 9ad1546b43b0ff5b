use iced::Color;

pub mod archery;
pub mod editor;

pub const CANVAS_BG: Color = Color::from_rgb(0.08, 0.08, 0.08);
