/// Save and share actions
///
/// Both are fire-and-forget from the screen's point of view: failures are
/// logged here and never turned into screen state.

use std::path::PathBuf;

use super::{Downloader, Notifier, PermissionStatus, PhotoLibrary, PhotoPermissions, ShareSheet};
use crate::state::data::Wallpaper;

pub const SAVED_NOTICE: &str = "Saved to photos";
pub const PERMISSION_NOTICE: &str = "Requires camera and storage permission";

/// How a save attempt ended
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// Added to the library at this path
    Saved(PathBuf),
    PermissionDenied,
    /// Download or library append failed; already logged
    Failed(String),
}

/// Local file name used for a downloaded wallpaper
pub fn download_file_name(wallpaper: &Wallpaper) -> String {
    format!("{}.jpg", wallpaper.id)
}

/// Text handed to the share sheet
pub fn share_message(prefix: &str, wallpaper: &Wallpaper) -> String {
    format!("{}{}", prefix, wallpaper.urls.full)
}

/// Save the `regular` rendition of `wallpaper` to the photo library
///
/// Asks for permission only when it is not already granted. Without
/// permission nothing is downloaded and the user gets one notice.
pub async fn save_wallpaper<D>(devices: &D, wallpaper: &Wallpaper) -> SaveOutcome
where
    D: PhotoPermissions + Downloader + PhotoLibrary + Notifier + Sync,
{
    let mut status = devices.status().await;
    if status != PermissionStatus::Granted {
        status = devices.request().await;
    }

    if status != PermissionStatus::Granted {
        tracing::info!("🔒 Photo library permission {:?}", status);
        devices.notify(PERMISSION_NOTICE).await;
        return SaveOutcome::PermissionDenied;
    }

    let file_name = download_file_name(wallpaper);
    let saved = match devices.download(&wallpaper.urls.regular, &file_name).await {
        Ok(local) => devices.append(&local).await,
        Err(e) => Err(e),
    };

    match saved {
        Ok(path) => {
            tracing::info!("💾 Saved {} to {}", wallpaper.id, path.display());
            devices.notify(SAVED_NOTICE).await;
            SaveOutcome::Saved(path)
        }
        Err(e) => {
            tracing::error!("❌ Failed to save {}: {}", wallpaper.id, e);
            SaveOutcome::Failed(e.to_string())
        }
    }
}

/// Share the full-size URL of `wallpaper`
///
/// Returns whether the share sheet accepted the message.
pub async fn share_wallpaper<D>(devices: &D, prefix: &str, wallpaper: &Wallpaper) -> bool
where
    D: ShareSheet + Sync,
{
    let message = share_message(prefix, wallpaper);
    match devices.share(&message).await {
        Ok(()) => {
            tracing::info!("🔗 Shared {}", wallpaper.id);
            true
        }
        Err(e) => {
            tracing::error!("❌ Failed to share {}: {}", wallpaper.id, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceError;
    use crate::state::data::sample;
    use std::path::Path;
    use std::sync::Mutex;

    /// In-memory stand-in for every device capability
    struct FakeDevices {
        status: PermissionStatus,
        answer: PermissionStatus,
        fail_download: bool,
        fail_share: bool,
        log: Mutex<Vec<String>>,
    }

    impl FakeDevices {
        fn new(status: PermissionStatus, answer: PermissionStatus) -> Self {
            Self {
                status,
                answer,
                fail_download: false,
                fail_share: false,
                log: Mutex::new(Vec::new()),
            }
        }

        fn record(&self, entry: String) {
            self.log.lock().unwrap().push(entry);
        }

        fn calls(&self, prefix: &str) -> Vec<String> {
            self.log
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.starts_with(prefix))
                .cloned()
                .collect()
        }
    }

    impl PhotoPermissions for FakeDevices {
        async fn status(&self) -> PermissionStatus {
            self.record("status".to_string());
            self.status
        }

        async fn request(&self) -> PermissionStatus {
            self.record("request".to_string());
            self.answer
        }
    }

    impl Downloader for FakeDevices {
        async fn download(&self, url: &str, file_name: &str) -> Result<PathBuf, DeviceError> {
            self.record(format!("download {} {}", url, file_name));
            if self.fail_download {
                return Err(DeviceError::io(
                    Path::new(file_name),
                    std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
                ));
            }
            Ok(PathBuf::from("/downloads").join(file_name))
        }
    }

    impl PhotoLibrary for FakeDevices {
        async fn append(&self, file: &Path) -> Result<PathBuf, DeviceError> {
            self.record(format!("append {}", file.display()));
            Ok(PathBuf::from("/library").join(file.file_name().unwrap()))
        }
    }

    impl ShareSheet for FakeDevices {
        async fn share(&self, message: &str) -> Result<(), DeviceError> {
            self.record(format!("share {}", message));
            if self.fail_share {
                return Err(DeviceError::Clipboard("no display".to_string()));
            }
            Ok(())
        }
    }

    impl Notifier for FakeDevices {
        async fn notify(&self, message: &str) {
            self.record(format!("notify {}", message));
        }
    }

    #[tokio::test]
    async fn test_save_with_granted_permission() {
        let devices = FakeDevices::new(PermissionStatus::Granted, PermissionStatus::Denied);
        let wallpaper = sample("abc");

        let outcome = save_wallpaper(&devices, &wallpaper).await;

        assert_eq!(outcome, SaveOutcome::Saved(PathBuf::from("/library/abc.jpg")));
        assert!(devices.calls("request").is_empty());
        assert_eq!(
            devices.calls("download"),
            vec![format!("download {} abc.jpg", wallpaper.urls.regular)]
        );
        assert_eq!(devices.calls("append"), vec!["append /downloads/abc.jpg"]);
        assert_eq!(devices.calls("notify"), vec![format!("notify {}", SAVED_NOTICE)]);
    }

    #[tokio::test]
    async fn test_save_asks_when_undetermined() {
        let devices = FakeDevices::new(PermissionStatus::Undetermined, PermissionStatus::Granted);

        let outcome = save_wallpaper(&devices, &sample("1")).await;

        assert!(matches!(outcome, SaveOutcome::Saved(_)));
        assert_eq!(devices.calls("request").len(), 1);
        assert_eq!(devices.calls("download").len(), 1);
    }

    #[tokio::test]
    async fn test_denied_permission_never_downloads() {
        let devices = FakeDevices::new(PermissionStatus::Undetermined, PermissionStatus::Denied);

        let outcome = save_wallpaper(&devices, &sample("1")).await;

        assert_eq!(outcome, SaveOutcome::PermissionDenied);
        assert!(devices.calls("download").is_empty());
        assert!(devices.calls("append").is_empty());
        assert_eq!(
            devices.calls("notify"),
            vec![format!("notify {}", PERMISSION_NOTICE)]
        );
    }

    #[tokio::test]
    async fn test_download_failure_is_not_surfaced() {
        let mut devices = FakeDevices::new(PermissionStatus::Granted, PermissionStatus::Granted);
        devices.fail_download = true;

        let outcome = save_wallpaper(&devices, &sample("1")).await;

        assert!(matches!(outcome, SaveOutcome::Failed(_)));
        assert!(devices.calls("append").is_empty());
        assert!(devices.calls("notify").is_empty());
    }

    #[tokio::test]
    async fn test_share_embeds_full_url() {
        let devices = FakeDevices::new(PermissionStatus::Granted, PermissionStatus::Granted);
        let wallpaper = sample("xyz");

        assert!(share_wallpaper(&devices, "Checkout this wallpaper ", &wallpaper).await);
        assert_eq!(
            devices.calls("share"),
            vec!["share Checkout this wallpaper https://images.example/xyz"]
        );
    }

    #[tokio::test]
    async fn test_share_failure_is_logged_only() {
        let mut devices = FakeDevices::new(PermissionStatus::Granted, PermissionStatus::Granted);
        devices.fail_share = true;

        assert!(!share_wallpaper(&devices, "", &sample("1")).await);
        assert!(devices.calls("notify").is_empty());
    }
}
