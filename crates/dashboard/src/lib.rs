//! Text dashboard over the inventory store.
//!
//! A presentation collaborator only: it renders the store's read model. The
//! one operator action it takes is selecting a category (`SHELFWATCH_CATEGORY`).

pub mod format;
pub mod render;

pub use render::render_dashboard;
