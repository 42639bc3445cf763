/// State management module
///
/// This module handles all application state, including:
/// - Parsed image records (data.rs)
/// - The group index and its navigation (library.rs)
/// - Flagged images (selection.rs)
/// - The review session tying them together (session.rs)
/// - Settings read at startup (settings.rs)

pub mod data;
pub mod library;
pub mod selection;
pub mod session;
pub mod settings;
