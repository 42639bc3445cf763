/// Asset loading module
///
/// This module handles:
/// - Parsing the `bg<N>_...` filename convention
/// - Scanning an asset directory in the background
/// - Falling back to a placeholder when an image cannot be shown

pub mod display;
pub mod loader;
pub mod parser;
