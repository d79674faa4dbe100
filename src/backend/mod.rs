/// Backend submodules for the conversation sync engine
///
/// This module breaks down the backend into focused components:
/// - `handlers`: UI action routing and I/O completion handling
/// - `main_loop`: Runtime setup and the engine event loop
mod handlers;
mod main_loop;

// Re-export the main backend entry points
pub use main_loop::{run_backend, run_engine};
