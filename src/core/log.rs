//! Plain-text resolution log
//!
//! Every weapon-mode operation returns its log alongside the result
//! objects. Rendering for any particular display surface is the caller's
//! problem; this is just ordered lines of text.

/// Ordered lines describing one resolution, built up as it runs.
#[derive(Debug, Clone, Default)]
pub struct CombatLog {
    lines: Vec<String>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Render the whole log as one newline-joined string.
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

impl std::fmt::Display for CombatLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_renders_in_order() {
        let mut log = CombatLog::new();
        log.line("aimed 3 impulses");
        log.line("hit: chest");
        assert_eq!(log.render(), "aimed 3 impulses\nhit: chest");
    }

    #[test]
    fn test_empty_log() {
        let log = CombatLog::new();
        assert!(log.is_empty());
        assert_eq!(log.render(), "");
    }
}
