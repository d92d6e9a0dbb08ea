/// Gallery screen state
///
/// All screen state lives here and is only changed through the named
/// transitions below. Reads go through accessors so the invariants
/// (no list while loading, page always in range) hold by construction.

use super::data::Wallpaper;

/// What the screen should show right now
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen<'a> {
    /// First batch not loaded yet: spinner only
    Loading,
    /// The API answered with an empty batch
    Empty,
    /// One wallpaper fills the window
    Page(&'a Wallpaper),
}

#[derive(Debug, Clone)]
pub struct GalleryState {
    loading: bool,
    images: Vec<Wallpaper>,
    focused: bool,
    page: usize,
    last_error: Option<String>,
}

impl Default for GalleryState {
    fn default() -> Self {
        Self {
            loading: true,
            images: Vec::new(),
            focused: false,
            page: 0,
            last_error: None,
        }
    }
}

impl GalleryState {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Reads ==========

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn images(&self) -> &[Wallpaper] {
        &self.images
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Index of the page currently in view
    pub fn page(&self) -> usize {
        self.page
    }

    /// Error from the most recent failed load, cleared by the next attempt
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The wallpaper in view, if any
    pub fn current(&self) -> Option<&Wallpaper> {
        self.images.get(self.page)
    }

    /// Identity keys of the pages, in display order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.images.iter().map(|image| image.id.as_str())
    }

    /// Whether `id` belongs to the batch on screen
    pub fn contains(&self, id: &str) -> bool {
        self.keys().any(|key| key == id)
    }

    /// Paging is locked while an image is focused
    pub fn paging_enabled(&self) -> bool {
        !self.focused
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.images.len()
    }

    /// Current page and its right-hand neighbour, the pages worth
    /// having a decoded preview for
    pub fn preview_candidates(&self) -> impl Iterator<Item = &Wallpaper> {
        self.images.iter().skip(self.page).take(2)
    }

    pub fn screen(&self) -> Screen<'_> {
        if self.loading {
            return Screen::Loading;
        }
        match self.current() {
            Some(wallpaper) => Screen::Page(wallpaper),
            None => Screen::Empty,
        }
    }

    // ========== Transitions ==========

    /// A load request is going out
    ///
    /// `loading` is deliberately left alone: a refresh keeps the current
    /// batch on screen until the new one lands.
    pub fn load_started(&mut self) {
        self.last_error = None;
    }

    /// A batch arrived; it replaces the previous one wholesale
    pub fn load_succeeded(&mut self, images: Vec<Wallpaper>) {
        self.images = images;
        self.loading = false;
        self.page = 0;
        self.last_error = None;
    }

    /// A load failed; everything but the error stays as it was
    pub fn load_failed(&mut self, error: impl Into<String>) {
        self.last_error = Some(error.into());
    }

    /// Flip focus, returning the new value. Without a page there is
    /// nothing to focus and the value stays as it is.
    pub fn toggle_focus(&mut self) -> bool {
        if self.current().is_some() {
            self.focused = !self.focused;
        }
        self.focused
    }

    /// Advance one page. Returns false when paging is locked or at the end.
    pub fn next_page(&mut self) -> bool {
        if !self.paging_enabled() || !self.has_next() {
            return false;
        }
        self.page += 1;
        true
    }

    /// Go back one page. Returns false when paging is locked or at the start.
    pub fn previous_page(&mut self) -> bool {
        if !self.paging_enabled() || !self.has_previous() {
            return false;
        }
        self.page -= 1;
        true
    }
}
