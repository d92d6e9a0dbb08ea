/// Shared data structures for the application state
///
/// These structs mirror the records returned by the photo API.
/// Only `id` and the URL variants are interpreted; everything else
/// the API sends is ignored during deserialization.

use serde::Deserialize;

/// A single wallpaper as returned by `GET /photos/random`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Wallpaper {
    /// Opaque API identifier, also used as the page key
    pub id: String,
    /// Differently-sized renditions of the same photo
    pub urls: WallpaperUrls,
    /// Optional free-form description set by the author
    #[serde(default)]
    pub description: Option<String>,
    /// Optional machine-generated description
    #[serde(default)]
    pub alt_description: Option<String>,
    /// Photographer, when the API includes it
    #[serde(default)]
    pub user: Option<Author>,
}

/// URL variants of a photo
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WallpaperUrls {
    /// Display-sized rendition, used for previews and saving
    pub regular: String,
    /// Full-resolution rendition, used in the share message
    pub full: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Author {
    pub name: String,
}

impl Wallpaper {
    /// Short caption for the page overlay (description, then photographer)
    pub fn caption(&self) -> Option<String> {
        let description = self
            .description
            .as_deref()
            .or(self.alt_description.as_deref())
            .map(str::trim)
            .filter(|d| !d.is_empty());

        match (description, self.user.as_ref()) {
            (Some(d), Some(user)) => Some(format!("{} · {}", d, user.name)),
            (Some(d), None) => Some(d.to_string()),
            (None, Some(user)) => Some(format!("Photo by {}", user.name)),
            (None, None) => None,
        }
    }
}

#[cfg(test)]
pub(crate) fn sample(id: &str) -> Wallpaper {
    Wallpaper {
        id: id.to_string(),
        urls: WallpaperUrls {
            regular: format!("https://images.example/{}?w=1080", id),
            full: format!("https://images.example/{}", id),
        },
        description: None,
        alt_description: None,
        user: None,
    }
}
