/// Desktop implementations of the device capabilities
///
/// - permission: asked once per session through a native yes/no dialog
/// - download: plain HTTP GET into the download directory
/// - photo library: a dated copy in ~/Pictures/Wallpapers
/// - share sheet: the system clipboard
/// - notices: native message dialogs

use chrono::{DateTime, Local};
use reqwest::Client;
use rfd::{AsyncMessageDialog, MessageButtons, MessageDialogResult, MessageLevel};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{
    DeviceError, Downloader, Notifier, PermissionStatus, PhotoLibrary, PhotoPermissions,
    ShareSheet,
};
use crate::state::config::LibraryConfig;
use crate::APP_TITLE;

pub struct DesktopDevices {
    http: Client,
    download_dir: PathBuf,
    library_dir: Option<PathBuf>,
    permission: Mutex<PermissionStatus>,
}

impl DesktopDevices {
    pub fn new(http: Client, library: &LibraryConfig) -> Self {
        Self::with_dirs(
            http,
            library.download_dir(),
            library.library_dir(),
            library.ask_permission,
        )
    }

    pub fn with_dirs(
        http: Client,
        download_dir: PathBuf,
        library_dir: Option<PathBuf>,
        ask_permission: bool,
    ) -> Self {
        let permission = if ask_permission {
            PermissionStatus::Undetermined
        } else {
            PermissionStatus::Granted
        };

        Self {
            http,
            download_dir,
            library_dir,
            permission: Mutex::new(permission),
        }
    }

    pub fn library_dir(&self) -> Option<&Path> {
        self.library_dir.as_deref()
    }

    fn current_permission(&self) -> PermissionStatus {
        *self.permission.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_permission(&self, status: PermissionStatus) {
        *self.permission.lock().unwrap_or_else(|e| e.into_inner()) = status;
    }
}

/// Library file name: `<timestamp>_<stem>.<ext>`, so saving the same
/// wallpaper twice adds a second photo instead of overwriting the first
pub fn library_file_name(stem: &str, extension: &str, at: DateTime<Local>) -> String {
    format!("{}_{}.{}", at.format("%Y%m%d_%H%M%S"), stem, extension)
}

impl PhotoPermissions for DesktopDevices {
    async fn status(&self) -> PermissionStatus {
        self.current_permission()
    }

    async fn request(&self) -> PermissionStatus {
        let current = self.current_permission();
        if current == PermissionStatus::Granted {
            return current;
        }

        let Some(library) = self.library_dir.clone() else {
            tracing::warn!("⚠️  No photo library directory, cannot grant permission");
            self.set_permission(PermissionStatus::Denied);
            return PermissionStatus::Denied;
        };

        let answer = AsyncMessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(APP_TITLE)
            .set_description(format!(
                "Allow {} to save photos to {}?",
                APP_TITLE,
                library.display()
            ))
            .set_buttons(MessageButtons::YesNo)
            .show()
            .await;

        let status = if matches!(answer, MessageDialogResult::Yes) {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        };
        self.set_permission(status);
        status
    }
}

impl Downloader for DesktopDevices {
    async fn download(&self, url: &str, file_name: &str) -> Result<PathBuf, DeviceError> {
        let bytes = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        tokio::fs::create_dir_all(&self.download_dir)
            .await
            .map_err(|e| DeviceError::io(&self.download_dir, e))?;

        let path = self.download_dir.join(file_name);
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| DeviceError::io(&path, e))?;

        tracing::debug!("📥 Downloaded {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }
}

impl PhotoLibrary for DesktopDevices {
    async fn append(&self, file: &Path) -> Result<PathBuf, DeviceError> {
        let library = self.library_dir.as_ref().ok_or(DeviceError::NoLibrary)?;

        let bytes = tokio::fs::read(file)
            .await
            .map_err(|e| DeviceError::io(file, e))?;

        // Reject error pages and truncated downloads before they reach the library
        let format = image::guess_format(&bytes)?;
        let extension = format.extensions_str().first().copied().unwrap_or("jpg");

        let stem = file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "wallpaper".to_string());

        tokio::fs::create_dir_all(library)
            .await
            .map_err(|e| DeviceError::io(library, e))?;

        let destination = library.join(library_file_name(&stem, extension, Local::now()));
        tokio::fs::write(&destination, &bytes)
            .await
            .map_err(|e| DeviceError::io(&destination, e))?;

        Ok(destination)
    }
}

impl ShareSheet for DesktopDevices {
    async fn share(&self, message: &str) -> Result<(), DeviceError> {
        let text = message.to_string();

        // arboard talks to the display server synchronously
        tokio::task::spawn_blocking(move || {
            let mut clipboard =
                arboard::Clipboard::new().map_err(|e| DeviceError::Clipboard(e.to_string()))?;
            clipboard
                .set_text(text)
                .map_err(|e| DeviceError::Clipboard(e.to_string()))
        })
        .await
        .map_err(|e| DeviceError::Join(e.to_string()))??;

        self.notify(&format!("Copied to clipboard:\n\n{}", message))
            .await;
        Ok(())
    }
}

impl Notifier for DesktopDevices {
    async fn notify(&self, message: &str) {
        AsyncMessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(APP_TITLE)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show()
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use axum::Router;
    use chrono::TimeZone;

    const JPEG_HEADER: [u8; 12] = [
        0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01,
    ];

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn devices(download: &Path, library: Option<&Path>, ask: bool) -> DesktopDevices {
        DesktopDevices::with_dirs(
            Client::new(),
            download.to_path_buf(),
            library.map(Path::to_path_buf),
            ask,
        )
    }

    #[tokio::test]
    async fn test_permission_starts_undetermined_when_asking() {
        let dir = tempfile::tempdir().unwrap();

        let asking = devices(dir.path(), Some(dir.path()), true);
        assert_eq!(asking.status().await, PermissionStatus::Undetermined);

        let pre_granted = devices(dir.path(), Some(dir.path()), false);
        assert_eq!(pre_granted.status().await, PermissionStatus::Granted);
        assert_eq!(pre_granted.request().await, PermissionStatus::Granted);
    }

    #[tokio::test]
    async fn test_request_without_library_is_denied() {
        let dir = tempfile::tempdir().unwrap();
        let devices = devices(dir.path(), None, true);

        assert_eq!(devices.request().await, PermissionStatus::Denied);
        assert_eq!(devices.status().await, PermissionStatus::Denied);
    }

    #[tokio::test]
    async fn test_download_writes_into_download_dir() {
        let base_url = serve(Router::new().route("/photo", get(|| async { JPEG_HEADER.to_vec() }))).await;
        let dir = tempfile::tempdir().unwrap();
        let download_dir = dir.path().join("downloads");
        let devices = devices(&download_dir, None, false);

        let path = devices
            .download(&format!("{}/photo", base_url), "abc.jpg")
            .await
            .unwrap();

        assert_eq!(path, download_dir.join("abc.jpg"));
        assert_eq!(std::fs::read(&path).unwrap(), JPEG_HEADER.to_vec());
    }

    #[tokio::test]
    async fn test_download_http_error() {
        let base_url = serve(Router::new()).await;
        let dir = tempfile::tempdir().unwrap();
        let devices = devices(dir.path(), None, false);

        let err = devices
            .download(&format!("{}/missing", base_url), "x.jpg")
            .await
            .unwrap_err();

        assert!(matches!(err, DeviceError::Http(_)));
        assert!(!dir.path().join("x.jpg").exists());
    }

    #[tokio::test]
    async fn test_append_copies_into_library() {
        let dir = tempfile::tempdir().unwrap();
        let library = dir.path().join("Pictures").join("Wallpapers");
        let source = dir.path().join("abc.jpg");
        std::fs::write(&source, JPEG_HEADER).unwrap();
        let devices = devices(dir.path(), Some(&library), false);

        let saved = devices.append(&source).await.unwrap();

        assert!(saved.starts_with(&library));
        let name = saved.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.ends_with("_abc.jpg"), "unexpected name {}", name);
        assert_eq!(std::fs::read(&saved).unwrap(), JPEG_HEADER.to_vec());
    }

    #[tokio::test]
    async fn test_append_rejects_non_images() {
        let dir = tempfile::tempdir().unwrap();
        let library = dir.path().join("library");
        let source = dir.path().join("abc.jpg");
        std::fs::write(&source, b"<html>rate limited</html>").unwrap();
        let devices = devices(dir.path(), Some(&library), false);

        let err = devices.append(&source).await.unwrap_err();

        assert!(matches!(err, DeviceError::InvalidImage(_)));
        assert!(!library.exists());
    }

    #[tokio::test]
    async fn test_append_without_library() {
        let dir = tempfile::tempdir().unwrap();
        let devices = devices(dir.path(), None, false);

        let err = devices.append(&dir.path().join("a.jpg")).await.unwrap_err();
        assert!(matches!(err, DeviceError::NoLibrary));
    }

    #[test]
    fn test_library_file_name() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(library_file_name("abc", "jpg", at), "20240309_140507_abc.jpg");
    }
}
