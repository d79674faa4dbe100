//! Event processing from the engine

use super::BourrachoApp;
use crate::events;

impl BourrachoApp {
    /// Drain everything the engine sent since the last frame.
    ///
    /// Returns whether anything arrived, so the caller can repaint.
    pub fn process_events(&mut self) -> bool {
        let mut received = false;
        while let Ok(event) = self.event_rx.try_recv() {
            received = true;
            // The tracker already latched its decision; the timeline acts on it when drawn
            let _ = events::process_single_event(&mut self.state, &mut self.input, event);
        }
        if received {
            // A confirmed send clears the composer, which may lift the suspension
            self.sync_composing();
        }
        received
    }
}
