//! egui rendering for the bourracho client.
//!
//! - `timeline`: grouped message list with follow/jump behaviour
//! - `format`: message body rendering (links)
//! - `toasts`: floating notifications
//! - `theme`: colors and styling helpers

pub mod format;
pub mod theme;
pub mod timeline;
pub mod toasts;

pub use theme::BourrachoTheme;
pub use timeline::{render_timeline, TimelineAction};
pub use toasts::render_status_toasts;
