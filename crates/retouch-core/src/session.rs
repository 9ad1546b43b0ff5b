//! Interaction controller.
//!
//! The editor is a two-state machine: `NoImage` until a picture has been
//! decoded, then `ImageLoaded` with a [`Session`]. Each event mutates the
//! state and returns the [`Effect`]s the UI layer must carry out. Every event
//! except `LoadImage` is a silent no-op while no image is loaded.

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use crate::config::EditorConfig;
use crate::decode::{self, DecodedImage, DisplayLimits, DisplaySize};
use crate::error::EditorError;
use crate::history::{History, HistoryRow};
use crate::layer::Layer;
use crate::render;
use crate::settings::{FilterKind, FilterSettings, FlipAxis, Step};
use crate::surface::DrawingSurface;

pub const ORIGINAL_LABEL: &str = "Original";
pub const RESET_LABEL: &str = "Reset Filters";

/// Quarter-turn direction for the rotate buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rotation {
    Left,
    Right,
}

impl Rotation {
    fn degrees(self) -> i32 {
        match self {
            Rotation::Left => -90,
            Rotation::Right => 90,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Rotation::Left => "Rotate Left",
            Rotation::Right => "Rotate Right",
        }
    }
}

#[derive(Clone, Debug)]
pub enum Event {
    LoadImage(Arc<DecodedImage>),
    SelectFilter(FilterKind),
    /// Live preview while dragging; stored verbatim, not recorded.
    AdjustContinuous(i32),
    /// End of a drag; snapped and recorded.
    CommitAdjustment(i32),
    RotateBy(Rotation),
    Flip(FlipAxis),
    Reset,
    JumpHistory(usize),
    Undo,
    Redo,
}

/// Follow-up work for the UI after an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Settings or image changed; redraw the surface.
    Render,
    /// The history log or its cursor changed.
    HistoryChanged,
    /// The slider range, step or value changed.
    ControlChanged,
}

/// Slider configuration for the active filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControlState {
    pub filter: FilterKind,
    pub label: &'static str,
    pub min: i32,
    pub max: i32,
    pub step: i32,
    pub value: i32,
}

impl ControlState {
    /// Value with unit, e.g. `152%` or `-90deg`.
    pub fn value_text(&self) -> String {
        self.filter.format_value(self.value)
    }
}

/// Everything that belongs to one loaded picture.
#[derive(Debug)]
pub struct Session {
    image: Arc<DecodedImage>,
    display_size: DisplaySize,
    display_layer: Layer,
    settings: FilterSettings,
    history: History,
    active_filter: FilterKind,
}

impl Session {
    fn new(image: Arc<DecodedImage>, limits: DisplayLimits) -> Self {
        let display_size = image.display_size(limits);
        let display_layer = image.to_display_layer(display_size);
        let settings = FilterSettings::default();
        let mut history = History::new();
        history.push(settings, ORIGINAL_LABEL);
        Self {
            image,
            display_size,
            display_layer,
            settings,
            history,
            active_filter: FilterKind::Brightness,
        }
    }

    pub fn display_size(&self) -> DisplaySize {
        self.display_size
    }

    pub fn settings(&self) -> &FilterSettings {
        &self.settings
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn active_filter(&self) -> FilterKind {
        self.active_filter
    }

    fn apply_snapshot(&mut self, snapshot: Option<FilterSettings>) -> Vec<Effect> {
        match snapshot {
            Some(settings) => {
                self.settings = settings;
                vec![Effect::Render, Effect::ControlChanged, Effect::HistoryChanged]
            }
            None => Vec::new(),
        }
    }
}

#[derive(Debug, Default)]
pub enum EditorState {
    #[default]
    NoImage,
    ImageLoaded(Session),
}

/// The image editor: configuration plus the current state.
#[derive(Debug)]
pub struct Editor {
    step: Step,
    limits: DisplayLimits,
    state: EditorState,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Step::default(), DisplayLimits::default())
    }
}

impl Editor {
    pub fn new(step: Step, limits: DisplayLimits) -> Self {
        Self {
            step,
            limits,
            state: EditorState::NoImage,
        }
    }

    pub fn from_config(config: &EditorConfig) -> Result<Self, EditorError> {
        Ok(Self::new(config.resolve_step()?, config.display_limits()))
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            EditorState::ImageLoaded(session) => Some(session),
            EditorState::NoImage => None,
        }
    }

    fn session_mut(&mut self) -> Option<&mut Session> {
        match &mut self.state {
            EditorState::ImageLoaded(session) => Some(session),
            EditorState::NoImage => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.session().is_some()
    }

    pub fn settings(&self) -> FilterSettings {
        self.session()
            .map(|s| s.settings)
            .unwrap_or_default()
    }

    pub fn active_filter(&self) -> FilterKind {
        self.session()
            .map_or(FilterKind::Brightness, |s| s.active_filter)
    }

    pub fn can_undo(&self) -> bool {
        self.session().is_some_and(|s| s.history.can_undo())
    }

    pub fn can_redo(&self) -> bool {
        self.session().is_some_and(|s| s.history.can_redo())
    }

    pub fn can_save(&self) -> bool {
        self.is_loaded()
    }

    /// Recorded edits, not counting the "Original" entry.
    pub fn edit_count(&self) -> usize {
        self.session()
            .map_or(0, |s| s.history.len().saturating_sub(1))
    }

    pub fn history_rows(&self) -> Vec<HistoryRow> {
        self.session()
            .map(|s| s.history.rows().collect())
            .unwrap_or_default()
    }

    /// Slider configuration for the active filter and current value.
    pub fn control(&self) -> ControlState {
        let filter = self.active_filter();
        let range = filter.range();
        ControlState {
            filter,
            label: filter.label(),
            min: *range.start(),
            max: *range.end(),
            step: self.step.get(),
            value: self.settings().get(filter),
        }
    }

    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::LoadImage(image) => self.load_image(image),
            Event::SelectFilter(kind) => self.select_filter(kind),
            Event::AdjustContinuous(value) => self.adjust_continuous(value),
            Event::CommitAdjustment(value) => self.commit_adjustment(value),
            Event::RotateBy(rotation) => self.rotate_by(rotation),
            Event::Flip(axis) => self.flip(axis),
            Event::Reset => self.reset(),
            Event::JumpHistory(index) => self.jump_history(index),
            Event::Undo => self.undo(),
            Event::Redo => self.redo(),
        }
    }

    /// Replace the whole session with a fresh one for `image`. Prior
    /// history is discarded.
    pub fn load_image(&mut self, image: Arc<DecodedImage>) -> Vec<Effect> {
        let session = Session::new(image, self.limits);
        info!(
            natural_w = session.image.natural_width(),
            natural_h = session.image.natural_height(),
            display_w = session.display_size.width,
            display_h = session.display_size.height,
            "image loaded"
        );
        self.state = EditorState::ImageLoaded(session);
        vec![Effect::Render, Effect::ControlChanged, Effect::HistoryChanged]
    }

    /// Decode `bytes` and load the result. On failure the current state is
    /// left untouched.
    pub fn load_image_bytes(&mut self, bytes: &[u8]) -> Result<Vec<Effect>, EditorError> {
        let image = decode::decode_bytes(bytes)?;
        Ok(self.load_image(Arc::new(image)))
    }

    pub fn select_filter(&mut self, kind: FilterKind) -> Vec<Effect> {
        let Some(session) = self.session_mut() else {
            return Vec::new();
        };
        debug!(filter = %kind, "select filter");
        session.active_filter = kind;
        vec![Effect::ControlChanged]
    }

    pub fn adjust_continuous(&mut self, value: i32) -> Vec<Effect> {
        let Some(session) = self.session_mut() else {
            return Vec::new();
        };
        session.settings.set(session.active_filter, value);
        vec![Effect::Render, Effect::ControlChanged]
    }

    pub fn commit_adjustment(&mut self, value: i32) -> Vec<Effect> {
        let step = self.step;
        let Some(session) = self.session_mut() else {
            return Vec::new();
        };
        let kind = session.active_filter;
        let snapped = step.snap(value);
        session.settings.set(kind, snapped);
        session.history.push(
            session.settings,
            format!("{}: {}", kind.label(), kind.format_value(snapped)),
        );
        vec![Effect::Render, Effect::ControlChanged, Effect::HistoryChanged]
    }

    /// Quarter turn, snapped immediately. The angle accumulates without
    /// wrapping.
    pub fn rotate_by(&mut self, rotation: Rotation) -> Vec<Effect> {
        let step = self.step;
        let Some(session) = self.session_mut() else {
            return Vec::new();
        };
        let rotate = step.snap(session.settings.rotate.saturating_add(rotation.degrees()));
        session.settings.rotate = rotate;
        session
            .history
            .push(session.settings, format!("{}: {rotate}deg", rotation.label()));
        vec![Effect::Render, Effect::ControlChanged, Effect::HistoryChanged]
    }

    pub fn flip(&mut self, axis: FlipAxis) -> Vec<Effect> {
        let Some(session) = self.session_mut() else {
            return Vec::new();
        };
        session.settings.flip(axis);
        session.history.push(session.settings, axis.label());
        vec![Effect::Render, Effect::HistoryChanged]
    }

    /// Restore default settings. History is kept and gains one entry.
    pub fn reset(&mut self) -> Vec<Effect> {
        let Some(session) = self.session_mut() else {
            return Vec::new();
        };
        session.settings = FilterSettings::default();
        session.history.push(session.settings, RESET_LABEL);
        vec![Effect::Render, Effect::ControlChanged, Effect::HistoryChanged]
    }

    pub fn jump_history(&mut self, index: usize) -> Vec<Effect> {
        let Some(session) = self.session_mut() else {
            return Vec::new();
        };
        let snapshot = session.history.jump_to(index);
        session.apply_snapshot(snapshot)
    }

    pub fn undo(&mut self) -> Vec<Effect> {
        let Some(session) = self.session_mut() else {
            return Vec::new();
        };
        let snapshot = session.history.undo();
        session.apply_snapshot(snapshot)
    }

    pub fn redo(&mut self) -> Vec<Effect> {
        let Some(session) = self.session_mut() else {
            return Vec::new();
        };
        let snapshot = session.history.redo();
        session.apply_snapshot(snapshot)
    }

    /// Draw the current session onto `surface`. Does nothing without an image.
    pub fn render_to<S: DrawingSurface>(&self, surface: &mut S) -> Result<()> {
        match self.session() {
            Some(session) => render::render(
                surface,
                Some(&session.display_layer),
                &session.settings,
                session.display_size,
            ),
            None => Ok(()),
        }
    }
}
