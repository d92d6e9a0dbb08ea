use iced::keyboard::{self, key::Named, Key};
use iced::widget::image::Handle;
use iced::{window, Element, Size, Subscription, Task, Theme};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

mod api;
mod device;
mod state;
mod ui;

use api::PhotoClient;
use device::workflow::{self, SaveOutcome};
use device::DesktopDevices;
use state::config::Config;
use state::data::Wallpaper;
use state::gallery::{GalleryState, Screen};
use ui::page::{PageView, Preview};
use ui::spring::{self, Spring};

const APP_TITLE: &str = "Wallpapers";

/// Portrait window, roughly a phone held upright
const INITIAL_WINDOW_SIZE: Size = Size::new(480.0, 860.0);

/// Main application state
struct Wallpapers {
    /// Screen state; changed only through its transitions
    gallery: GalleryState,
    /// Focus animation, retargeted on every focus toggle
    scale: Spring,
    /// Decoded previews for the current batch, keyed by wallpaper id
    previews: HashMap<String, Preview>,
    /// Current spinner angle in radians
    spinner_rotation: f32,
    /// Time of the last animation frame, None while idle
    last_frame: Option<Instant>,
    client: PhotoClient,
    devices: Arc<DesktopDevices>,
    share_prefix: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// Action bar refresh: fetch a new batch
    Refresh,
    /// Retry after a failed first load
    Retry,
    /// A batch request finished
    LoadFinished(Result<Vec<Wallpaper>, String>),
    /// Image bytes for a page arrived (or failed)
    PreviewLoaded(String, Result<Vec<u8>, String>),
    /// Tap on the page
    ToggleFocus,
    NextPage,
    PreviousPage,
    Save,
    SaveFinished(SaveOutcome),
    Share,
    ShareFinished(bool),
    /// Animation frame
    Frame(Instant),
}

impl Wallpapers {
    /// Create a new instance of the application and start the first load
    fn new() -> (Self, Task<Message>) {
        Self::with_config(Config::load_or_default())
    }

    fn with_config(config: Config) -> (Self, Task<Message>) {
        // The app cannot do anything without an HTTP client
        let client = PhotoClient::new(&config.api).expect("Failed to initialize HTTP client");
        let devices = DesktopDevices::new(client.http().clone(), &config.library);

        match devices.library_dir() {
            Some(dir) => tracing::info!("🎨 {} saving to {}", APP_TITLE, dir.display()),
            None => tracing::warn!("⚠️  No photo library directory, saving is disabled"),
        }

        let mut app = Wallpapers {
            gallery: GalleryState::new(),
            scale: Spring::default(),
            previews: HashMap::new(),
            spinner_rotation: 0.0,
            last_frame: None,
            client,
            devices: Arc::new(devices),
            share_prefix: config.share.message_prefix,
        };

        let task = app.load();
        (app, task)
    }

    /// Issue one batch request. Overlapping requests are not coalesced;
    /// whichever answers last decides the list.
    fn load(&mut self) -> Task<Message> {
        self.gallery.load_started();
        tracing::info!("🔍 Requesting {} wallpapers", self.client.count());

        let client = self.client.clone();
        Task::perform(
            async move { client.random_photos().await.map_err(|e| e.to_string()) },
            Message::LoadFinished,
        )
    }

    /// Fetch previews for the current page and its neighbour if missing
    fn request_previews(&mut self) -> Task<Message> {
        let wanted: Vec<(String, String)> = self
            .gallery
            .preview_candidates()
            .filter(|w| !self.previews.contains_key(&w.id))
            .map(|w| (w.id.clone(), w.urls.regular.clone()))
            .collect();

        let tasks = wanted.into_iter().map(|(id, url)| {
            self.previews.insert(id.clone(), Preview::Loading);
            let client = self.client.clone();
            Task::perform(
                async move {
                    let bytes = client.fetch_bytes(&url).await.map_err(|e| e.to_string());
                    (id, bytes)
                },
                |(id, bytes)| Message::PreviewLoaded(id, bytes),
            )
        });

        Task::batch(tasks.collect::<Vec<_>>())
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Refresh | Message::Retry => self.load(),
            Message::LoadFinished(result) => {
                tracing::info!("request completed");
                match result {
                    Ok(images) => {
                        tracing::info!("✅ Loaded {} wallpapers", images.len());
                        self.gallery.load_succeeded(images);
                        self.previews.clear();
                        self.request_previews()
                    }
                    Err(e) => {
                        tracing::error!("❌ Failed to load wallpapers: {}", e);
                        self.gallery.load_failed(e);
                        Task::none()
                    }
                }
            }
            Message::PreviewLoaded(id, result) => {
                // Late answers for a batch that has since been replaced
                if !self.gallery.contains(&id) {
                    return Task::none();
                }
                let preview = match result {
                    Ok(bytes) => Preview::Ready(Handle::from_bytes(bytes)),
                    Err(e) => {
                        tracing::warn!("⚠️  Preview for {} failed: {}", id, e);
                        Preview::Failed
                    }
                };
                self.previews.insert(id, preview);
                Task::none()
            }
            Message::ToggleFocus => {
                // Only a page on screen can be focused
                if self.gallery.current().is_none() {
                    return Task::none();
                }
                let focused = self.gallery.toggle_focus();
                self.scale.set_target(spring::focus_scale(focused));
                tracing::debug!("Focus {} -> scale {}", focused, self.scale.target());
                Task::none()
            }
            Message::NextPage => {
                if self.gallery.next_page() {
                    self.request_previews()
                } else {
                    Task::none()
                }
            }
            Message::PreviousPage => {
                if self.gallery.previous_page() {
                    self.request_previews()
                } else {
                    Task::none()
                }
            }
            Message::Save => {
                let Some(wallpaper) = self.gallery.current().cloned() else {
                    return Task::none();
                };
                let devices = Arc::clone(&self.devices);
                Task::perform(
                    async move { workflow::save_wallpaper(devices.as_ref(), &wallpaper).await },
                    Message::SaveFinished,
                )
            }
            Message::SaveFinished(outcome) => {
                tracing::debug!("Save finished: {:?}", outcome);
                Task::none()
            }
            Message::Share => {
                let Some(wallpaper) = self.gallery.current().cloned() else {
                    return Task::none();
                };
                let devices = Arc::clone(&self.devices);
                let prefix = self.share_prefix.clone();
                Task::perform(
                    async move {
                        workflow::share_wallpaper(devices.as_ref(), &prefix, &wallpaper).await
                    },
                    Message::ShareFinished,
                )
            }
            Message::ShareFinished(shared) => {
                tracing::debug!("Share finished: {}", shared);
                Task::none()
            }
            Message::Frame(now) => {
                let elapsed = self
                    .last_frame
                    .map(|last| now.saturating_duration_since(last))
                    .unwrap_or(Duration::from_millis(16));
                self.last_frame = Some(now);

                self.scale.step(elapsed);
                self.spinner_rotation =
                    ui::spinner::advance(self.spinner_rotation, elapsed.as_secs_f32());

                if !self.needs_frames() {
                    self.last_frame = None;
                }
                Task::none()
            }
        }
    }

    /// Something on screen is moving
    fn needs_frames(&self) -> bool {
        if self.scale.is_animating() || self.gallery.is_loading() {
            return true;
        }
        self.gallery
            .current()
            .and_then(|w| self.previews.get(&w.id))
            .map_or(false, Preview::is_loading)
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        match self.gallery.screen() {
            Screen::Loading => {
                ui::loading::view(self.spinner_rotation, self.gallery.last_error())
            }
            Screen::Empty => ui::loading::empty(),
            Screen::Page(wallpaper) => PageView {
                wallpaper,
                preview: self.previews.get(&wallpaper.id),
                gallery: &self.gallery,
                scale: self.scale.value(),
                spinner_rotation: self.spinner_rotation,
            }
            .view(),
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        let keys = keyboard::on_key_press(|key, _modifiers| match key.as_ref() {
            Key::Named(Named::ArrowRight) => Some(Message::NextPage),
            Key::Named(Named::ArrowLeft) => Some(Message::PreviousPage),
            Key::Named(Named::Space) => Some(Message::ToggleFocus),
            _ => None,
        });
        if self.needs_frames() {
            Subscription::batch([keys, window::frames().map(Message::Frame)])
        } else {
            keys
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    iced::application(APP_TITLE, Wallpapers::update, Wallpapers::view)
        .subscription(Wallpapers::subscription)
        .theme(Wallpapers::theme)
        .window_size(INITIAL_WINDOW_SIZE)
        .centered()
        .run_with(Wallpapers::new)
}
