/// Device capability module
///
/// The screen never talks to the platform directly. Each capability it
/// needs sits behind a small trait:
/// - `PhotoPermissions` - may we write to the photo library?
/// - `Downloader` - fetch a URL into a local file
/// - `PhotoLibrary` - add a local file to the user's photos
/// - `ShareSheet` - hand a message to the platform's sharing surface
/// - `Notifier` - blocking, user-visible notice
///
/// `desktop.rs` implements all of them for a desktop session and
/// `workflow.rs` composes them into the save and share actions.

pub mod desktop;
pub mod workflow;

use std::future::Future;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use desktop::DesktopDevices;

/// Photo-library permission as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    /// Never asked in this session
    Undetermined,
}

/// Failures from a device collaborator
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Download failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Downloaded file is not an image: {0}")]
    InvalidImage(#[from] image::ImageError),

    #[error("No photo library directory on this system")]
    NoLibrary,

    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("Background task failed: {0}")]
    Join(String),
}

impl DeviceError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        DeviceError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub trait PhotoPermissions {
    /// Current status, without prompting
    fn status(&self) -> impl Future<Output = PermissionStatus> + Send;

    /// Prompt the user if needed and return the resulting status
    fn request(&self) -> impl Future<Output = PermissionStatus> + Send;
}

pub trait Downloader {
    /// Download `url` to `file_name` inside the downloader's own directory,
    /// returning the local path
    fn download(
        &self,
        url: &str,
        file_name: &str,
    ) -> impl Future<Output = Result<PathBuf, DeviceError>> + Send;
}

pub trait PhotoLibrary {
    /// Add a local image to the library, returning where it ended up
    fn append(&self, file: &Path) -> impl Future<Output = Result<PathBuf, DeviceError>> + Send;
}

pub trait ShareSheet {
    fn share(&self, message: &str) -> impl Future<Output = Result<(), DeviceError>> + Send;
}

pub trait Notifier {
    /// Show `message` and wait for the user to dismiss it
    fn notify(&self, message: &str) -> impl Future<Output = ()> + Send;
}
