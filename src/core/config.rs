//! Engine tunables consumed from the host configuration

use std::time::Duration;

use super::jumplist::DEFAULT_JUMPLIST_SIZE;

/// Timeouts and limits the engine runs with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Root mode gives up after this long without a sub-mode key
    pub root_timeout: Duration,
    /// Absolute jump executes this long after the last digit
    pub jump_timeout: Duration,
    /// Window for the browse "first" double press
    pub double_key_timeout: Duration,
    /// Browse distance jump executes this long after the last digit
    pub count_timeout: Duration,
    /// Maximum jump list length
    pub jumplist_max: usize,
    /// "First" lands on the first unpinned tab instead of index 0
    pub first_skips_pinned: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            root_timeout: Duration::from_millis(2000),
            jump_timeout: Duration::from_millis(1000),
            double_key_timeout: Duration::from_millis(400),
            count_timeout: Duration::from_millis(800),
            jumplist_max: DEFAULT_JUMPLIST_SIZE,
            first_skips_pinned: false,
        }
    }
}
