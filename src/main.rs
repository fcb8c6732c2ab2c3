use iced::widget::image::Handle;
use iced::widget::{column, container, scrollable, text};
use iced::{event, mouse, Element, Length, Subscription, Task, Theme};
use rfd::FileDialog;
use std::collections::HashMap;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod source;
mod state;
mod ui;

use config::Config;
use source::ingest::{self, Upload};
use source::loader::{self, ManifestLocation};
use source::thumbnail::{self, Thumbnail};
use source::SourceError;
use state::{Collection, CollectionError, ImageId, ImageRecord};
use ui::drag::DragState;

/// Main application state
struct Gallery {
    config: Config,
    /// The images, in display order
    collection: Collection,
    /// Decoded thumbnails by image id
    thumbnails: HashMap<ImageId, Handle>,
    /// In-progress drag gesture
    drag: DragState,
    /// True until the manifest load completes
    loading: bool,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Background manifest load completed
    ManifestLoaded(Result<Vec<ImageRecord>, SourceError>),
    /// Background thumbnail decode completed
    ThumbnailReady(ImageId, Result<Thumbnail, SourceError>),
    /// User clicked an image checkbox
    ToggleSelected(ImageId),
    /// User clicked the select-all checkbox
    SetAllSelected(bool),
    /// User clicked "Delete"
    DeleteSelected,
    /// Left button pressed on the tile at this index
    DragStarted(usize),
    /// Cursor entered the tile at this index
    DragEntered(usize),
    /// Cursor left the tile at this index
    DragLeft(usize),
    /// Left button released anywhere in the window
    DragReleased,
    /// User clicked the upload tile
    UploadRequested,
    /// Background file read completed
    UploadRead(Result<Upload, SourceError>),
}

impl Gallery {
    /// Create the gallery and start loading the manifest
    fn new(config: Config) -> (Self, Task<Message>) {
        let location = ManifestLocation::parse(&config.gallery.manifest);
        let status = format!("Loading images from {}...", location);

        (
            Gallery {
                config,
                collection: Collection::new(),
                thumbnails: HashMap::new(),
                drag: DragState::default(),
                loading: true,
                status,
            },
            Task::perform(loader::load_manifest(location), Message::ManifestLoaded),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ManifestLoaded(Ok(records)) => {
                // A late load still replaces whatever is on screen
                self.loading = false;
                if let Err(e) = self.collection.load(records) {
                    self.report(e);
                    return Task::none();
                }

                self.thumbnails.clear();
                self.status = format!("{} images loaded.", self.collection.len());
                tracing::info!(count = self.collection.len(), "gallery populated");

                return Task::batch(
                    self.collection
                        .records()
                        .iter()
                        .map(|record| self.request_thumbnail(record)),
                );
            }
            Message::ManifestLoaded(Err(e)) => {
                self.loading = false;
                tracing::error!("manifest load failed: {e}");
                self.status = format!("Could not load images: {e}");
            }
            Message::ThumbnailReady(id, Ok(thumb)) => {
                if self.collection.get(id).is_some() {
                    let handle = Handle::from_rgba(thumb.width, thumb.height, thumb.pixels);
                    self.thumbnails.insert(id, handle);
                } else {
                    tracing::debug!(%id, "dropping thumbnail of a deleted image");
                }
            }
            Message::ThumbnailReady(id, Err(e)) => {
                tracing::warn!(%id, "thumbnail failed: {e}");
            }
            Message::ToggleSelected(id) => {
                if let Err(e) = self.collection.toggle_selected(id) {
                    self.report(e);
                }
            }
            Message::SetAllSelected(value) => {
                self.collection.set_all_selected(value);
            }
            Message::DeleteSelected => {
                let removed = self.collection.delete_selected();
                for record in &removed {
                    self.thumbnails.remove(&record.id);
                }
                if !removed.is_empty() {
                    tracing::info!(count = removed.len(), "deleted selected images");
                    self.status = format!("Deleted {} images.", removed.len());
                }
            }
            Message::DragStarted(index) => {
                self.drag.begin(index);
            }
            Message::DragEntered(index) => {
                self.drag.hover(index);
            }
            Message::DragLeft(index) => {
                self.drag.leave(index);
            }
            Message::DragReleased => {
                if let Some((from, to)) = self.drag.finish() {
                    match self.collection.move_record(from, to) {
                        Ok(()) => tracing::debug!(from, to, "image moved"),
                        Err(e) => self.report(e),
                    }
                }
            }
            Message::UploadRequested => {
                // Show the native file picker dialog
                let files = FileDialog::new()
                    .set_title("Select Images to Upload")
                    .add_filter("Images", ingest::IMAGE_EXTENSIONS)
                    .pick_files();

                if let Some(paths) = files {
                    self.status = format!("Uploading {} files...", paths.len());
                    // Each file is an independent read; they append in completion order
                    return Task::batch(
                        paths
                            .into_iter()
                            .map(|path| Task::perform(ingest::read_upload(path), Message::UploadRead)),
                    );
                }
            }
            Message::UploadRead(Ok(upload)) => {
                let id = match self.collection.allocate_id() {
                    Ok(id) => id,
                    Err(e) => {
                        self.report(e);
                        return Task::none();
                    }
                };
                let record = upload.into_record(id);
                let task = self.request_thumbnail(&record);
                let label = record.label().to_string();

                match self.collection.append(record) {
                    Ok(()) => {
                        tracing::info!(%id, label = %label, "image uploaded");
                        self.status = format!("Added {}.", label);
                        return task;
                    }
                    Err(e) => self.report(e),
                }
            }
            Message::UploadRead(Err(e)) => {
                tracing::warn!("upload failed: {e}");
                self.status = format!("Upload failed: {e}");
            }
        }

        Task::none()
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let body: Element<Message> = if self.loading && self.collection.is_empty() {
            container(text(&self.status).size(18))
                .center(Length::Fill)
                .into()
        } else {
            scrollable(ui::gallery::grid(
                &self.collection,
                &self.thumbnails,
                &self.drag,
                &self.config.gallery,
            ))
            .height(Length::Fill)
            .into()
        };

        column![
            ui::gallery::header(&self.collection),
            body,
            text(&self.status).size(14),
        ]
        .spacing(20)
        .padding(24)
        .into()
    }

    /// Releasing the mouse anywhere completes a drag
    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _window| match event {
            iced::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                Some(Message::DragReleased)
            }
            _ => None,
        })
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }

    /// Start decoding the thumbnail for one record
    fn request_thumbnail(&self, record: &ImageRecord) -> Task<Message> {
        let id = record.id;
        Task::perform(
            thumbnail::load_thumbnail(record.source().clone(), self.config.gallery.thumbnail_size),
            move |result| Message::ThumbnailReady(id, result),
        )
    }

    /// Rejected gestures leave the gallery untouched; just tell the user
    fn report(&mut self, error: CollectionError) {
        tracing::warn!("{error}");
        self.status = error.to_string();
    }
}

/// Install the tracing subscriber. `RUST_LOG` overrides the configured level.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).compact())
        .with(filter)
        .init();
}

fn main() -> iced::Result {
    let loaded = Config::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();
    init_logging(&config.general.log_level);
    match &loaded {
        Ok(_) => {
            if let Err(e) = Config::ensure_exists() {
                tracing::warn!("{e}");
            }
        }
        Err(e) => tracing::warn!("{e}; using default settings"),
    }

    let window_size = iced::Size::new(config.window.width, config.window.height);

    iced::application("Photo Gallery", Gallery::update, Gallery::view)
        .subscription(Gallery::subscription)
        .theme(Gallery::theme)
        .window_size(window_size)
        .centered()
        .run_with(move || Gallery::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use state::ImageSource;
    use std::sync::Arc;

    fn gallery() -> Gallery {
        Gallery {
            config: Config::default(),
            collection: Collection::new(),
            thumbnails: HashMap::new(),
            drag: DragState::default(),
            loading: true,
            status: String::new(),
        }
    }

    fn record(id: u64) -> ImageRecord {
        ImageRecord::new(
            ImageId(id),
            ImageSource::Remote(format!("https://example.com/{id}.webp")),
            format!("{id}.webp"),
        )
    }

    fn thumb() -> Thumbnail {
        Thumbnail {
            width: 1,
            height: 1,
            pixels: vec![255, 0, 0, 255],
        }
    }

    fn loaded(ids: &[u64]) -> Gallery {
        let mut gallery = gallery();
        let _ = gallery.update(Message::ManifestLoaded(Ok(ids
            .iter()
            .map(|&id| record(id))
            .collect())));
        gallery
    }

    fn ids(gallery: &Gallery) -> Vec<u64> {
        gallery.collection.records().iter().map(|r| r.id.0).collect()
    }

    fn upload(label: &str) -> Upload {
        Upload {
            label: label.to_string(),
            source: ImageSource::Embedded(Arc::from(vec![0u8; 16])),
        }
    }

    #[test]
    fn test_delete_evicts_thumbnails() {
        let mut gallery = loaded(&[1, 2, 3]);
        for id in 1..=3 {
            let _ = gallery.update(Message::ThumbnailReady(ImageId(id), Ok(thumb())));
        }
        assert_eq!(gallery.thumbnails.len(), 3);

        let _ = gallery.update(Message::ToggleSelected(ImageId(2)));
        let _ = gallery.update(Message::DeleteSelected);

        assert_eq!(ids(&gallery), vec![1, 3]);
        assert!(!gallery.thumbnails.contains_key(&ImageId(2)));
        assert_eq!(gallery.thumbnails.len(), 2);
    }

    #[test]
    fn test_late_thumbnail_of_deleted_image_is_dropped() {
        let mut gallery = loaded(&[1, 2]);
        let _ = gallery.update(Message::ToggleSelected(ImageId(1)));
        let _ = gallery.update(Message::DeleteSelected);

        let _ = gallery.update(Message::ThumbnailReady(ImageId(1), Ok(thumb())));
        assert!(gallery.thumbnails.is_empty());

        let _ = gallery.update(Message::ThumbnailReady(ImageId(2), Ok(thumb())));
        assert!(gallery.thumbnails.contains_key(&ImageId(2)));
    }

    #[test]
    fn test_upload_gets_fresh_id_and_lands_last() {
        let mut gallery = loaded(&[5, 2]);
        let _ = gallery.update(Message::ToggleSelected(ImageId(5)));
        let _ = gallery.update(Message::DeleteSelected);

        let _ = gallery.update(Message::UploadRead(Ok(upload("new.png"))));

        assert_eq!(ids(&gallery), vec![2, 6]);
        let last = gallery.collection.records().last().unwrap();
        assert_eq!(last.label(), "new.png");
        assert!(!last.is_selected());
    }

    #[test]
    fn test_upload_without_free_ids_leaves_gallery() {
        let mut gallery = loaded(&[u64::MAX]);
        let _ = gallery.update(Message::UploadRead(Ok(upload("late.png"))));

        assert_eq!(ids(&gallery), vec![u64::MAX]);
        assert_eq!(gallery.status, CollectionError::IdsExhausted.to_string());
    }

    #[test]
    fn test_duplicate_manifest_keeps_collection_and_stops_loading() {
        let mut gallery = loaded(&[1, 2]);
        gallery.loading = true;

        let _ = gallery.update(Message::ManifestLoaded(Ok(vec![record(7), record(7)])));

        assert_eq!(ids(&gallery), vec![1, 2]);
        assert!(!gallery.loading);
        assert_eq!(
            gallery.status,
            CollectionError::DuplicateId(ImageId(7)).to_string()
        );
    }

    #[test]
    fn test_completed_drag_moves_image() {
        let mut gallery = loaded(&[1, 2, 3, 4]);
        let _ = gallery.update(Message::DragStarted(0));
        let _ = gallery.update(Message::DragLeft(0));
        let _ = gallery.update(Message::DragEntered(2));
        let _ = gallery.update(Message::DragReleased);

        assert_eq!(ids(&gallery), vec![2, 3, 1, 4]);
    }
}
