//! Composer state: the unsent message and the recall history.
//!
//! Non-empty input is what suspends polling, so the composer tracks the
//! emptiness it last reported to the engine.

/// Upper bound on remembered sent messages.
const MAX_HISTORY: usize = 100;

#[derive(Default)]
pub struct InputState {
    /// Current message being composed
    pub message_input: String,

    /// Sent messages (for up/down arrow navigation)
    pub history: Vec<String>,

    /// Current position in history (None = not navigating)
    pub history_pos: Option<usize>,

    /// Saved input when entering history mode
    pub history_saved_input: Option<String>,

    /// Composing flag as last sent to the engine
    reported_composing: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(history: Vec<String>) -> Self {
        let mut input = Self::new();
        input.history = history;
        input.trim_history();
        input
    }

    /// Whether the composer holds any text at all.
    pub fn is_composing(&self) -> bool {
        !self.message_input.is_empty()
    }

    /// Returns the new composing flag when it differs from the last one reported.
    pub fn take_composing_change(&mut self) -> Option<bool> {
        let composing = self.is_composing();
        if composing == self.reported_composing {
            return None;
        }
        self.reported_composing = composing;
        Some(composing)
    }

    /// Forget the reported flag, e.g. after the engine was rebound to a new conversation.
    pub fn reset_reported(&mut self) {
        self.reported_composing = false;
    }

    /// Clear the composer after a confirmed send and remember the text.
    pub fn commit_sent(&mut self) {
        let sent = std::mem::take(&mut self.message_input);
        let sent = sent.trim();
        if !sent.is_empty() && self.history.last().map(String::as_str) != Some(sent) {
            self.history.push(sent.to_string());
            self.trim_history();
        }
        self.history_pos = None;
        self.history_saved_input = None;
    }

    pub fn clear(&mut self) {
        self.message_input.clear();
        self.history_pos = None;
        self.history_saved_input = None;
    }

    pub fn history_up(&mut self) {
        if self.history.is_empty() {
            return;
        }

        match self.history_pos {
            None => {
                // Store current text to restore if user navigates back
                self.history_saved_input = Some(self.message_input.clone());
                self.history_pos = Some(self.history.len() - 1);
            }
            Some(pos) if pos > 0 => self.history_pos = Some(pos - 1),
            Some(_) => {}
        }

        if let Some(h) = self.history_pos.and_then(|pos| self.history.get(pos)) {
            self.message_input = h.clone();
        }
    }

    pub fn history_down(&mut self) {
        let Some(pos) = self.history_pos else {
            return;
        };
        if pos + 1 < self.history.len() {
            self.history_pos = Some(pos + 1);
            if let Some(h) = self.history.get(pos + 1) {
                self.message_input = h.clone();
            }
        } else {
            // Exit history navigation
            self.history_pos = None;
            self.message_input = self.history_saved_input.take().unwrap_or_default();
        }
    }

    fn trim_history(&mut self) {
        if self.history.len() > MAX_HISTORY {
            let excess = self.history.len() - MAX_HISTORY;
            self.history.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_state_new() {
        let input = InputState::new();
        assert!(input.message_input.is_empty());
        assert!(input.history.is_empty());
        assert!(input.history_pos.is_none());
        assert!(!input.is_composing());
    }

    #[test]
    fn test_history_navigation() {
        let mut input = InputState::with_history(vec!["first".into(), "second".into(), "third".into()]);
        input.message_input = "current".into();

        input.history_up();
        assert_eq!(input.message_input, "third");
        assert_eq!(input.history_saved_input, Some("current".into()));

        input.history_up();
        assert_eq!(input.message_input, "second");

        input.history_up();
        input.history_up();
        assert_eq!(input.message_input, "first");

        input.history_down();
        assert_eq!(input.message_input, "second");

        input.history_down();
        assert_eq!(input.message_input, "third");

        // Exit history mode
        input.history_down();
        assert_eq!(input.message_input, "current");
        assert!(input.history_pos.is_none());
    }

    #[test]
    fn test_whitespace_counts_as_composing() {
        let mut input = InputState::new();
        input.message_input = "  ".into();
        assert!(input.is_composing());
    }

    #[test]
    fn test_composing_changes_reported_once() {
        let mut input = InputState::new();
        assert_eq!(input.take_composing_change(), None);

        input.message_input = "b".into();
        assert_eq!(input.take_composing_change(), Some(true));
        input.message_input = "bo".into();
        assert_eq!(input.take_composing_change(), None);

        input.clear();
        assert_eq!(input.take_composing_change(), Some(false));
    }

    #[test]
    fn test_commit_sent_records_history() {
        let mut input = InputState::new();
        input.message_input = "  bonsoir  ".into();
        input.commit_sent();
        assert!(input.message_input.is_empty());
        assert_eq!(input.history, vec!["bonsoir".to_string()]);

        // Consecutive duplicates are kept once
        input.message_input = "bonsoir".into();
        input.commit_sent();
        assert_eq!(input.history.len(), 1);
    }

    #[test]
    fn test_history_is_bounded() {
        let history = (0..MAX_HISTORY + 5).map(|i| i.to_string()).collect();
        let input = InputState::with_history(history);
        assert_eq!(input.history.len(), MAX_HISTORY);
        assert_eq!(input.history.first().map(String::as_str), Some("5"));
    }
}
