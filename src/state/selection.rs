/// Set of flagged ("needs changes") image paths
///
/// Independent of the displayed group; lives for the whole session.

use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    paths: HashSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy with `image_path` flipped: added if absent, removed if present
    pub fn toggled(&self, image_path: &str) -> Self {
        let mut next = self.clone();
        next.toggle(image_path);
        next
    }

    /// Flip `image_path` in place. Returns true if it is now flagged.
    pub fn toggle(&mut self, image_path: &str) -> bool {
        if self.paths.remove(image_path) {
            false
        } else {
            self.paths.insert(image_path.to_string());
            true
        }
    }

    pub fn contains(&self, image_path: &str) -> bool {
        self.paths.contains(image_path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
