//! Application module structure for BourrachoApp
//!
//! - `core`: BourrachoApp struct, initialization and engine commands
//! - `events`: Event processing from the engine
//! - `update`: Main update loop
//! - `ui::panels`: Header, home form and central panel rendering
//! - `ui::input`: Message composer with history

pub mod core;
pub mod events;
pub mod ui;
pub mod update;

pub use core::{BourrachoApp, HomeForm};
