use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use crate::geometry::{Aabb, clamp};

/// Interval between simulation steps (about 50 Hz).
pub const TICK: Duration = Duration::from_millis(20);
pub const ROUND_SECONDS: u32 = 30;

pub const AREA_WIDTH: f32 = 900.0;
pub const AREA_HEIGHT: f32 = 400.0;

pub const BOW_X: f32 = 40.0;
pub const BOW_WIDTH: f32 = 40.0;
pub const BOW_HEIGHT: f32 = 110.0;
pub const BOW_DEFAULT_TOP: f32 = 140.0;
const BOW_MIN_TOP: f32 = 10.0;
const BOW_MAX_TOP: f32 = 250.0;
/// Pointer y minus this is the bow top.
const AIM_OFFSET: f32 = 80.0;

pub const ARROW_WIDTH: f32 = 60.0;
pub const ARROW_HEIGHT: f32 = 6.0;
const ARROW_REST_X: f32 = 110.0;
/// Arrow y relative to the bow top.
const ARROW_NOCK_OFFSET: f32 = 50.0;
const ARROW_SPEED: f32 = 12.0;
const ARROW_MAX_X: f32 = 820.0;

pub const TARGET_X: f32 = 700.0;
pub const TARGET_WIDTH: f32 = 50.0;
pub const TARGET_HEIGHT: f32 = 80.0;
const TARGET_SPEED: f32 = 3.0;
const TARGET_MIN_Y: f32 = 20.0;
const TARGET_MAX_Y: f32 = 300.0;
const TARGET_SPAWN_MIN: u32 = 30;
const TARGET_SPAWN_SPAN: u32 = 250;

/// How long "Hit!" stays up, in ticks (200 ms).
const HIT_FLASH_TICKS: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Over,
}

#[derive(Clone, Debug)]
pub struct Game {
    phase: Phase,
    score: u32,
    time_left: u32,
    bow_top: f32,
    arrow_x: f32,
    arrow_y: f32,
    arrow_flying: bool,
    target_y: f32,
    target_dir: f32,
    hit_flash: u32,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        let mut game = Self {
            phase: Phase::Idle,
            score: 0,
            time_left: ROUND_SECONDS,
            bow_top: BOW_DEFAULT_TOP,
            arrow_x: ARROW_REST_X,
            arrow_y: BOW_DEFAULT_TOP + ARROW_NOCK_OFFSET,
            arrow_flying: false,
            target_y: BOW_DEFAULT_TOP,
            target_dir: 1.0,
            hit_flash: 0,
        };
        game.reset();
        game
    }

    /// Begin a fresh round, restarting one already in progress.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.score = 0;
        self.time_left = ROUND_SECONDS;
        self.phase = Phase::Running;
        self.hit_flash = 0;
        self.reset_arrow();
        self.place_target(rng);
        info!("archery round started");
    }

    /// Back to the idle screen with everything in its resting position.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.score = 0;
        self.time_left = ROUND_SECONDS;
        self.bow_top = BOW_DEFAULT_TOP;
        self.target_y = BOW_DEFAULT_TOP;
        self.hit_flash = 0;
        self.reset_arrow();
    }

    /// Release the arrow. Ignored unless running with the arrow at rest.
    pub fn shoot(&mut self) -> bool {
        if self.phase != Phase::Running || self.arrow_flying {
            return false;
        }
        self.arrow_flying = true;
        true
    }

    /// Follow the pointer's y coordinate within the game area.
    pub fn aim(&mut self, pointer_y: f32) {
        if self.phase != Phase::Running {
            return;
        }
        self.bow_top = clamp(pointer_y - AIM_OFFSET, BOW_MIN_TOP, BOW_MAX_TOP);
        if !self.arrow_flying {
            self.reset_arrow();
        }
    }

    /// One simulation step: move the target, fly the arrow, test for a hit.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.phase != Phase::Running {
            return;
        }
        self.hit_flash = self.hit_flash.saturating_sub(1);

        self.target_y += self.target_dir * TARGET_SPEED;
        if self.target_y <= TARGET_MIN_Y {
            self.target_dir = 1.0;
        }
        if self.target_y >= TARGET_MAX_Y {
            self.target_dir = -1.0;
        }

        if !self.arrow_flying {
            return;
        }
        self.arrow_x += ARROW_SPEED;

        if self.arrow_box().overlaps(&self.target_box()) {
            self.score += 1;
            self.hit_flash = HIT_FLASH_TICKS;
            debug!(score = self.score, "hit");
            self.reset_arrow();
            self.place_target(rng);
        }

        if self.arrow_x > ARROW_MAX_X {
            self.reset_arrow();
        }
    }

    /// Countdown step, once per second. Ends the round at zero.
    pub fn second_elapsed(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.end();
        }
    }

    fn end(&mut self) {
        self.phase = Phase::Over;
        self.arrow_flying = false;
        info!(score = self.score, "archery round over");
    }

    fn reset_arrow(&mut self) {
        self.arrow_flying = false;
        self.arrow_x = ARROW_REST_X;
        self.arrow_y = self.bow_top + ARROW_NOCK_OFFSET;
    }

    fn place_target<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let offset = rng.random_range(0..TARGET_SPAWN_SPAN);
        self.target_y = (TARGET_SPAWN_MIN + offset) as f32;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn arrow_flying(&self) -> bool {
        self.arrow_flying
    }

    pub fn message(&self) -> &'static str {
        match self.phase {
            Phase::Idle => "Press Start",
            Phase::Over => "Game over",
            Phase::Running if self.hit_flash > 0 => "Hit!",
            Phase::Running => "Game running",
        }
    }

    pub fn bow_box(&self) -> Aabb {
        Aabb::new(BOW_X, self.bow_top, BOW_WIDTH, BOW_HEIGHT)
    }

    pub fn arrow_box(&self) -> Aabb {
        Aabb::new(self.arrow_x, self.arrow_y, ARROW_WIDTH, ARROW_HEIGHT)
    }

    pub fn target_box(&self) -> Aabb {
        Aabb::new(TARGET_X, self.target_y, TARGET_WIDTH, TARGET_HEIGHT)
    }
}
