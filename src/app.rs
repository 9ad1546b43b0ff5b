use std::path::PathBuf;
use std::sync::Arc;

use iced::{Element, Subscription, Task, Theme};
use tracing::{error, info, warn};

use retouch_archery::game::{self, Game};
use retouch_core::config::EditorConfig;
use retouch_core::decode::{self, DecodedImage};
use retouch_core::export;
use retouch_core::session::{Effect, Event, Rotation};
use retouch_core::settings::{FilterKind, FlipAxis};
use retouch_core::surface::RasterSurface;
use retouch_core::{Editor, EditorError};

use crate::views;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Editor,
    Archery,
}

pub struct App {
    view: View,
    config: EditorConfig,
    editor: Editor,
    surface: RasterSurface,
    rendered: Option<iced::widget::image::Handle>,
    /// Last value reported by the slider, committed on release.
    slider_value: i32,
    decoding: bool,
    game: Game,
    status_message: String,
}

#[derive(Debug, Clone)]
pub enum Message {
    // Navigation
    ShowEditor,
    ShowArchery,

    // Image loading
    ChooseImage,
    ImageDecoded(Option<Result<Arc<DecodedImage>, EditorError>>),

    // Editing
    SelectFilter(FilterKind),
    SliderChanged(i32),
    SliderReleased,
    RotateLeft,
    RotateRight,
    FlipHorizontal,
    FlipVertical,
    Reset,
    Undo,
    Redo,
    JumpHistory(usize),

    // Export
    Save,
    SavePathChosen(Option<PathBuf>),

    // Archery
    StartGame,
    ResetGame,
    Shoot,
    Aim(f32),
    GameTick,
    CountdownTick,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        let config = match EditorConfig::load_default() {
            Ok(config) => config,
            Err(err) => {
                warn!(%err, "falling back to default config");
                EditorConfig::default()
            }
        };
        let editor = match Editor::from_config(&config) {
            Ok(editor) => editor,
            Err(err) => {
                warn!(%err, "invalid step in config, using default");
                Editor::new(Default::default(), config.display_limits())
            }
        };
        info!(step = editor.step().get(), "editor ready");

        let mut app = Self {
            view: View::Editor,
            config,
            editor,
            surface: RasterSurface::default(),
            rendered: None,
            slider_value: 0,
            decoding: false,
            game: Game::new(),
            status_message: String::new(),
        };
        app.slider_value = app.editor.control().value;

        (app, Task::none())
    }

    pub fn title(&self) -> String {
        match self.view {
            View::Editor if self.editor.is_loaded() => {
                format!("Retouch - {} edits", self.editor.edit_count())
            }
            View::Editor => "Retouch".into(),
            View::Archery => format!("Retouch - Archery ({})", self.game.score()),
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ShowEditor => {
                self.view = View::Editor;
                Task::none()
            }
            Message::ShowArchery => {
                self.view = View::Archery;
                Task::none()
            }

            Message::ChooseImage => {
                if self.decoding {
                    return Task::none();
                }
                self.decoding = true;
                Task::perform(pick_image(), Message::ImageDecoded)
            }

            Message::ImageDecoded(result) => {
                self.decoding = false;
                match result {
                    Some(Ok(image)) => {
                        let effects = self.editor.handle(Event::LoadImage(image));
                        self.apply_effects(effects);
                        self.status_message = "Image loaded.".into();
                    }
                    Some(Err(err)) => {
                        error!(%err, "could not load image");
                        self.status_message = format!("Could not load image: {err}");
                    }
                    None => {}
                }
                Task::none()
            }

            Message::SelectFilter(kind) => self.dispatch(Event::SelectFilter(kind)),
            Message::SliderChanged(value) => {
                self.slider_value = value;
                self.dispatch(Event::AdjustContinuous(value))
            }
            Message::SliderReleased => self.dispatch(Event::CommitAdjustment(self.slider_value)),
            Message::RotateLeft => self.dispatch(Event::RotateBy(Rotation::Left)),
            Message::RotateRight => self.dispatch(Event::RotateBy(Rotation::Right)),
            Message::FlipHorizontal => self.dispatch(Event::Flip(FlipAxis::Horizontal)),
            Message::FlipVertical => self.dispatch(Event::Flip(FlipAxis::Vertical)),
            Message::Reset => self.dispatch(Event::Reset),
            Message::Undo => self.dispatch(Event::Undo),
            Message::Redo => self.dispatch(Event::Redo),
            Message::JumpHistory(index) => self.dispatch(Event::JumpHistory(index)),

            Message::Save => {
                if !self.editor.can_save() {
                    return Task::none();
                }
                let file_name = self.config.export_file_name.clone();
                Task::perform(
                    async move {
                        rfd::AsyncFileDialog::new()
                            .set_title("Save edited image")
                            .set_file_name(file_name)
                            .add_filter("PNG", &["png"])
                            .save_file()
                            .await
                            .map(|h| h.path().to_path_buf())
                    },
                    Message::SavePathChosen,
                )
            }
            Message::SavePathChosen(Some(path)) => {
                match export::write_png(&self.surface, &path) {
                    Ok(()) => self.status_message = format!("Saved {}", path.display()),
                    Err(err) => {
                        error!(%err, "save failed");
                        self.status_message = format!("Save failed: {err}");
                    }
                }
                Task::none()
            }
            Message::SavePathChosen(None) => Task::none(),

            Message::StartGame => {
                self.game.start(&mut rand::rng());
                Task::none()
            }
            Message::ResetGame => {
                self.game.reset();
                Task::none()
            }
            Message::Shoot => {
                self.game.shoot();
                Task::none()
            }
            Message::Aim(y) => {
                self.game.aim(y);
                Task::none()
            }
            Message::GameTick => {
                self.game.tick(&mut rand::rng());
                Task::none()
            }
            Message::CountdownTick => {
                self.game.second_elapsed();
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        match self.view {
            View::Editor => views::editor::view(self),
            View::Archery => views::archery::view(self),
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        if self.view != View::Archery || !self.game.is_running() {
            return Subscription::none();
        }
        Subscription::batch([
            iced::time::every(game::TICK).map(|_| Message::GameTick),
            iced::time::every(std::time::Duration::from_secs(1)).map(|_| Message::CountdownTick),
            iced::event::listen_with(|event, _status, _window| match event {
                iced::Event::Keyboard(iced::keyboard::Event::KeyPressed {
                    key: iced::keyboard::Key::Named(iced::keyboard::key::Named::Space),
                    ..
                }) => Some(Message::Shoot),
                _ => None,
            }),
        ])
    }

    fn dispatch(&mut self, event: Event) -> Task<Message> {
        let effects = self.editor.handle(event);
        self.apply_effects(effects);
        Task::none()
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Render => self.redraw(),
                Effect::ControlChanged => self.slider_value = self.editor.control().value,
                // The history panel reads straight from the editor.
                Effect::HistoryChanged => {}
            }
        }
    }

    fn redraw(&mut self) {
        if let Err(err) = self.editor.render_to(&mut self.surface) {
            error!(%err, "render failed");
            return;
        }
        let rgba = self.surface.pixels().to_rgba8();
        let (w, h) = (rgba.width(), rgba.height());
        self.rendered = Some(iced::widget::image::Handle::from_rgba(w, h, rgba.into_raw()));
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn rendered(&self) -> Option<&iced::widget::image::Handle> {
        self.rendered.as_ref()
    }

    pub fn slider_value(&self) -> i32 {
        self.slider_value
    }

    pub fn is_decoding(&self) -> bool {
        self.decoding
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }
}

async fn pick_image() -> Option<Result<Arc<DecodedImage>, EditorError>> {
    let handle = rfd::AsyncFileDialog::new()
        .set_title("Choose an image")
        .add_filter("Images", IMAGE_EXTENSIONS)
        .pick_file()
        .await?;
    let bytes = handle.read().await;
    Some(decode_off_thread(bytes).await)
}

async fn decode_off_thread(bytes: Vec<u8>) -> Result<Arc<DecodedImage>, EditorError> {
    tokio::task::spawn_blocking(move || decode::decode_bytes(&bytes).map(Arc::new))
        .await
        .map_err(|err| EditorError::Decode(err.to_string()))?
}
