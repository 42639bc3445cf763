/// Display fallback for images that cannot be shown
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// True if the image header can be read (format and dimensions)
pub fn probe(path: &Path) -> bool {
    image::image_dimensions(path).is_ok()
}

/// The path the UI should show for `image_path`
pub fn resolve(image_path: &str, broken: &HashSet<String>, fallback: &Path) -> PathBuf {
    if broken.contains(image_path) {
        fallback.to_path_buf()
    } else {
        PathBuf::from(image_path)
    }
}
