//! Application module - demo host around the engine
//!
//! Contains the event loop, configuration, tree fixtures and key replay.

mod config;
mod config_file;
mod event_loop;
mod fixture;
pub mod replay;
mod render;

pub use config::Config;
pub use config_file::ConfigFile;
pub use event_loop::run_app;
pub use fixture::{Fixture, FixtureItem};
pub use render::{apply_scroll, render_frame};

/// Process exit codes
pub mod exit_code {
    /// Normal exit
    pub const SUCCESS: i32 = 0;
    /// Runtime failure
    pub const ERROR: i32 = 2;
    /// Bad arguments or configuration
    pub const INVALID: i32 = 3;
}
