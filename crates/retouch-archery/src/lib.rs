//! Headless simulation of the archery reflex game.
//!
//! The host drives it with [`game::Game::tick`] every [`game::TICK`] and
//! [`game::Game::second_elapsed`] once per second.

pub mod game;
pub mod geometry;

pub use game::{Game, Phase};
pub use geometry::Aabb;
