//! Bourracho client library.
//!
//! The conversation sync engine (`sync`, `backend`) and its pure building
//! blocks (`store`, `grouping`, `scroll`) are usable without the egui shell.

pub mod app;
pub mod backend;
pub mod config;
pub mod events;
pub mod grouping;
pub mod input_state;
pub mod logging;
pub mod model;
pub mod notify;
pub mod protocol;
pub mod remote;
pub mod scroll;
pub mod state;
pub mod store;
pub mod sync;
pub mod ui;
pub mod validation;
