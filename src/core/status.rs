//! Status line projection

use std::fmt;

/// Read-only snapshot of what an overlay shows after each event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLine {
    /// Mode label, empty when inactive
    pub mode: &'static str,
    /// Digits typed so far
    pub pending: Option<String>,
    pub selected: usize,
    pub yanked: usize,
    /// Title under the highlight
    pub highlighted: Option<String>,
    pub message: Option<String>,
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if !self.mode.is_empty() {
            parts.push(format!("-- {} --", self.mode));
        }
        if let Some(pending) = &self.pending {
            parts.push(pending.clone());
        }
        if self.selected > 0 {
            parts.push(format!("{} selected", self.selected));
        }
        if self.yanked > 0 {
            parts.push(format!("{} yanked", self.yanked));
        }
        if let Some(title) = &self.highlighted {
            parts.push(format!("> {}", title));
        }
        if let Some(msg) = &self.message {
            parts.push(msg.clone());
        }
        write!(f, "{}", parts.join("  "))
    }
}
