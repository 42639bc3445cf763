/// UI building blocks
///
/// - `grid.rs` - cards for the images of the displayed group
/// - `controls.rs` - navigation bar (Previous / Next / Generate File / Jump To)

pub mod controls;
pub mod grid;
