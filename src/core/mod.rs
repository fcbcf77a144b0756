//! Core module - Engine state, modes and navigation history

pub mod config;
pub mod jumplist;
pub mod marks;
pub mod mode;
pub mod selection;
pub mod state;
pub mod status;
pub mod timer;

pub use config::EngineConfig;
pub use jumplist::{JumpList, DEFAULT_JUMPLIST_SIZE};
pub use marks::{MarkChange, Marks};
pub use mode::{BrowseState, Mode};
pub use selection::{Direction, Selection};
pub use state::{Engine, ScrollAlign, ScrollRequest};
pub use status::StatusLine;
pub use timer::{CountBuffer, Deadline, DoublePress};
