/// Photo API module
///
/// This module handles:
/// - Fetching batches of random photos
/// - Fetching image bytes for page previews

pub mod client;
pub mod error;

pub use client::PhotoClient;
