//! Backend main event loop driving the conversation sync engine.

use crossbeam_channel::Sender;
use tokio::runtime::Builder;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, warn};

use super::handlers::Engine;
use crate::protocol::{BackendAction, GuiEvent};
use crate::remote::ChatRemote;

/// Run the engine on a single-threaded tokio runtime (blocks the calling thread)
pub fn run_backend<R: ChatRemote>(
    remote: R,
    action_rx: UnboundedReceiver<BackendAction>,
    event_tx: Sender<GuiEvent>,
) {
    // One logical thread: ticks, actions and completions are handled one at a time
    let rt = match Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            let _ = event_tx.send(GuiEvent::Error(format!(
                "Failed to create Tokio runtime: {}",
                e
            )));
            return;
        }
    };

    rt.block_on(run_engine(remote, action_rx, event_tx));
}

/// The engine event loop. Returns when the UI hangs up or asks to shut down.
pub async fn run_engine<R: ChatRemote>(
    remote: R,
    mut action_rx: UnboundedReceiver<BackendAction>,
    event_tx: Sender<GuiEvent>,
) {
    let mut engine = Engine::new(remote, event_tx);
    info!("sync engine started");

    loop {
        tokio::select! {
            action = action_rx.recv() => match action {
                Some(BackendAction::Shutdown) | None => break,
                Some(action) => engine.handle_action(action),
            },
            Some(generation) = engine.ticks.recv() => engine.handle_tick(generation),
            Some(joined) = engine.tasks.join_next() => match joined {
                Ok(completion) => engine.handle_completion(completion),
                Err(e) if e.is_cancelled() => {}
                Err(e) => warn!(error = %e, "engine task panicked"),
            },
        }
    }

    engine.shutdown();
    info!("sync engine stopped");
}
