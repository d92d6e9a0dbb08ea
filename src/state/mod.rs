/// State management module
///
/// This module handles all application state, including:
/// - Screen state and its transitions (gallery.rs)
/// - Records returned by the photo API (data.rs)
/// - User configuration (config.rs)

pub mod config;
pub mod data;
pub mod gallery;
