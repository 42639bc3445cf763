use iced::keyboard::{self, key, Key, Modifiers};
use iced::widget::{column, container, scrollable, text};
use iced::{Alignment, Element, Length, Subscription, Task, Theme};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod assets;
mod error;
mod manifest;
mod state;
mod ui;

use assets::loader::{self, LoadReport};
use error::{ExportError, LoadError, NavigationError};
use state::session::ReviewSession;
use state::settings::ReviewSettings;
use ui::grid::CardSize;

/// Main application state
struct ImageReview {
    settings: ReviewSettings,
    /// Index, cursor and selection for the loaded directory
    session: ReviewSession,
    /// Contents of the Jump To box
    jump_input: String,
    /// Status message to display to the user
    status: String,
    loading: bool,
    /// Bumped per scan; only the latest scan's result is applied
    load_generation: u64,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked "Open Folder"
    OpenFolder,
    /// Background scan finished (generation, result)
    AssetsLoaded(u64, Result<LoadReport, LoadError>),
    Next,
    Prev,
    JumpInputChanged(String),
    /// "Jump To" button or Enter in the input
    JumpTo,
    /// "Needs Changes" checkbox for one image path
    ToggleFlag(String),
    /// User clicked "Generate File"
    GenerateFile,
    /// Manifest write finished
    ManifestSaved(Result<PathBuf, ExportError>),
}

impl ImageReview {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let settings = load_settings();

        let mut app = ImageReview {
            settings,
            session: ReviewSession::new(),
            jump_input: String::new(),
            status: "Open a folder of bg<N> images to start reviewing.".to_string(),
            loading: false,
            load_generation: 0,
        };

        let task = match app.settings.asset_dir.clone() {
            Some(dir) => app.start_load(dir),
            None => Task::none(),
        };

        (app, task)
    }

    /// Kick off a background scan of `dir`
    fn start_load(&mut self, dir: PathBuf) -> Task<Message> {
        self.status = format!("Loading {}...", dir.display());
        self.loading = true;
        self.load_generation += 1;
        let generation = self.load_generation;
        Task::perform(
            loader::load_assets(dir, self.settings.extensions.clone()),
            move |result| Message::AssetsLoaded(generation, result),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenFolder if self.loading => Task::none(),
            Message::OpenFolder => {
                let mut dialog = FileDialog::new().set_title("Select Folder with Review Images");
                if let Some(dir) = self.session.asset_dir() {
                    dialog = dialog.set_directory(dir);
                }

                if let Some(dir) = dialog.pick_folder() {
                    return self.start_load(dir);
                }
                Task::none()
            }
            Message::AssetsLoaded(generation, _) if generation != self.load_generation => {
                debug!(generation, latest = self.load_generation, "ignoring stale scan");
                Task::none()
            }
            Message::AssetsLoaded(_, Ok(report)) => {
                self.loading = false;
                let dir = report.dir.clone();
                self.session.reload(report, self.settings.start_group.as_deref());

                let index = self.session.index();
                self.status = format!(
                    "Loaded {} images in {} groups from {}.",
                    index.record_count(),
                    index.len(),
                    dir.display()
                );
                let skipped = self.session.skipped();
                if !skipped.is_empty() {
                    self.status.push_str(&format!(" Skipped {} files.", skipped.len()));
                }
                Task::none()
            }
            Message::AssetsLoaded(_, Err(err)) => {
                self.loading = false;
                warn!(%err, "asset load failed");
                self.status = format!("Load failed: {}", err);
                Task::none()
            }
            Message::Next => {
                self.session.next_group();
                Task::none()
            }
            Message::Prev => {
                self.session.prev_group();
                Task::none()
            }
            Message::JumpInputChanged(value) => {
                self.jump_input = value;
                Task::none()
            }
            Message::JumpTo => {
                match self.session.jump_to(&self.jump_input) {
                    Ok(group) => {
                        debug!(%group, "jumped");
                        self.jump_input.clear();
                    }
                    Err(err) => show_navigation_notice(&err),
                }
                Task::none()
            }
            Message::ToggleFlag(path) => {
                let flagged = self.session.toggle_flag(&path);
                debug!(%path, flagged, "needs changes toggled");
                Task::none()
            }
            Message::GenerateFile => {
                let text = self.session.manifest(self.settings.manifest_order);

                let mut dialog = FileDialog::new()
                    .set_title("Save Manifest")
                    .set_file_name(self.settings.manifest_file_name.clone())
                    .add_filter("Text", &["txt"]);
                if let Some(dir) = self.session.asset_dir() {
                    dialog = dialog.set_directory(dir);
                }

                match dialog.save_file() {
                    Some(path) => {
                        info!(flagged = self.session.flagged_count(), "generating manifest");
                        Task::perform(
                            manifest::write_manifest(path, text),
                            Message::ManifestSaved,
                        )
                    }
                    None => Task::none(),
                }
            }
            Message::ManifestSaved(Ok(path)) => {
                self.status = format!(
                    "Saved {} flagged images to {}.",
                    self.session.flagged_count(),
                    path.display()
                );
                Task::none()
            }
            Message::ManifestSaved(Err(err)) => {
                warn!(%err, "manifest not saved");
                self.status = format!("Could not save manifest: {}", err);
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let index = self.session.index();

        let (heading, position) = match self.session.current_group() {
            Some(group) => (
                format!("{} Images", group),
                format!(
                    "Group {} of {} | {} flagged",
                    index.position(group).unwrap_or_default(),
                    index.len(),
                    self.session.flagged_count()
                ),
            ),
            None => ("No images loaded".to_string(), String::new()),
        };

        let body: Element<Message> = if self.loading {
            text("Loading...").size(20).into()
        } else if index.is_empty() {
            text("Nothing to review yet.").size(20).into()
        } else {
            let fallback = self
                .session
                .asset_dir()
                .map(|dir| self.settings.fallback_for(dir))
                .unwrap_or_default();
            let size = CardSize {
                width: self.settings.card_width,
                height: self.settings.card_height,
            };
            scrollable(ui::grid::group_grid(&self.session, &fallback, size))
                .width(Length::Fill)
                .into()
        };

        let content = column![
            text(heading).size(32),
            text(position).size(14),
            container(body).width(Length::Fill).height(Length::Fill),
            ui::controls::navigation_bar(&self.jump_input, !index.is_empty(), !self.loading),
            text(&self.status).size(14),
        ]
        .spacing(16)
        .padding(24)
        .align_x(Alignment::Center);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Arrow keys page through groups when no widget has focus
    fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(handle_key)
    }

    fn title(&self) -> String {
        match self.session.current_group() {
            Some(group) => format!("Image Review - {}", group),
            None => "Image Review".to_string(),
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn handle_key(key: Key, _modifiers: Modifiers) -> Option<Message> {
    match key.as_ref() {
        Key::Named(key::Named::ArrowLeft) => Some(Message::Prev),
        Key::Named(key::Named::ArrowRight) => Some(Message::Next),
        _ => None,
    }
}

/// Blocking notice for a rejected Jump To; the session is left unchanged
fn show_navigation_notice(err: &NavigationError) {
    warn!(%err, "jump rejected");
    MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title("Jump To")
        .set_description(err.to_string())
        .set_buttons(MessageButtons::Ok)
        .show();
}

/// Read settings, falling back to defaults if the file is unusable
fn load_settings() -> ReviewSettings {
    let Some(path) = ReviewSettings::default_path() else {
        return ReviewSettings::default();
    };
    match ReviewSettings::load(&path) {
        Ok(settings) => {
            debug!(path = %path.display(), "settings loaded");
            settings
        }
        Err(err) => {
            warn!(%err, "using default settings");
            ReviewSettings::default()
        }
    }
}

fn main() -> iced::Result {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "image_review=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Image Review");

    iced::application(ImageReview::title, ImageReview::update, ImageReview::view)
        .theme(ImageReview::theme)
        .subscription(ImageReview::subscription)
        .centered()
        .run_with(ImageReview::new)
}
