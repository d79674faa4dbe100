//! Core BourrachoApp struct definition and initialization

use std::thread;

use crossbeam_channel::{unbounded, Receiver};
use eframe::egui;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{info, warn};

use crate::backend::run_backend;
use crate::config::{save_settings, Settings};
use crate::input_state::InputState;
use crate::model::ConversationRef;
use crate::notify::Notification;
use crate::protocol::{BackendAction, GuiEvent};
use crate::remote::HttpRemote;
use crate::state::ClientState;
use crate::ui::{self, BourrachoTheme};
use crate::validation::{validate_identifier, validate_message};

/// Inputs of the home screen.
#[derive(Clone, Debug, Default)]
pub struct HomeForm {
    pub user_id: String,
    pub conversation_id: String,
    pub conversation_name: String,
}

pub struct BourrachoApp {
    // What the UI shows (chat view, users, toasts)
    pub state: ClientState,

    // Composer (message input, history)
    pub input: InputState,

    pub home: HomeForm,
    pub settings: Settings,
    pub theme: BourrachoTheme,

    // Channels for engine communication
    pub action_tx: UnboundedSender<BackendAction>,
    pub event_rx: Receiver<GuiEvent>,

    // Write settings back on exit
    persist_on_exit: bool,
}

impl BourrachoApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel::<BackendAction>();
        let (event_tx, event_rx) = unbounded::<GuiEvent>();

        let mut app = Self::with_channels(settings, action_tx, event_rx);
        app.persist_on_exit = true;
        ui::theme::apply_app_style(&cc.egui_ctx, &app.theme);

        match HttpRemote::new(&app.settings.api_base_url) {
            Ok(remote) => {
                info!(base_url = remote.base_url(), "starting sync engine");
                let spawned = thread::Builder::new()
                    .name("bourracho-engine".into())
                    .spawn(move || run_backend(remote, action_rx, event_tx));
                if let Err(e) = spawned {
                    app.report_engine_error(format!("Failed to start engine thread: {}", e));
                }
            }
            Err(e) => app.report_engine_error(e.to_string()),
        }
        app
    }

    /// Build the app around existing channels, without a window or engine thread.
    pub fn with_channels(
        settings: Settings,
        action_tx: UnboundedSender<BackendAction>,
        event_rx: Receiver<GuiEvent>,
    ) -> Self {
        let home = HomeForm {
            user_id: settings.user_id.clone(),
            conversation_id: settings.last_conversation_id.clone(),
            conversation_name: settings.last_conversation_name.clone(),
        };
        Self {
            state: ClientState::new(settings.user_id.clone()),
            input: InputState::with_history(settings.history.clone()),
            home,
            theme: BourrachoTheme::by_name(&settings.theme),
            settings,
            action_tx,
            event_rx,
            persist_on_exit: false,
        }
    }

    fn report_engine_error(&mut self, msg: String) {
        warn!(error = %msg, "sync engine unavailable");
        self.state
            .push_notification(Notification::error("Engine error").with_description(msg.clone()));
        self.state.engine_error = Some(msg);
    }

    pub(super) fn send(&self, action: BackendAction) {
        // Engine gone: the error was already reported
        let _ = self.action_tx.send(action);
    }

    /// Bind the chat view to the conversation entered on the home screen.
    pub fn open_conversation_from_home(&mut self) {
        let user_id = self.home.user_id.trim().to_string();
        let conversation_id = self.home.conversation_id.trim().to_string();
        if let Err(reason) = validate_identifier("User id", &user_id)
            .and_then(|_| validate_identifier("Conversation id", &conversation_id))
        {
            self.state
                .push_notification(Notification::warning("Cannot open conversation").with_description(reason));
            return;
        }
        let name = match self.home.conversation_name.trim() {
            "" => conversation_id.clone(),
            name => name.to_string(),
        };
        self.open_conversation(ConversationRef::new(conversation_id, name), &user_id);
    }

    pub fn open_conversation(&mut self, conversation: ConversationRef, user_id: &str) {
        self.state.current_user_id = user_id.to_string();
        self.settings.user_id = user_id.to_string();
        self.settings.last_conversation_id = conversation.id.clone();
        self.settings.last_conversation_name = conversation.name.clone();

        self.input.clear();
        self.input.reset_reported();
        self.send(BackendAction::SetComposing(false));

        self.state.open_chat(conversation.clone(), self.settings.auto_follow);
        self.send(BackendAction::OpenConversation {
            conversation,
            caller_id: user_id.to_string(),
        });
    }

    /// The chat view's only outward control: back to home.
    pub fn back_to_home(&mut self) {
        if self.state.chat.is_none() {
            return;
        }
        self.send(BackendAction::CloseConversation);
        self.state.close_chat();
        self.input.clear();
        self.sync_composing();
    }

    /// Tell the engine when the composer went from empty to non-empty or back.
    pub fn sync_composing(&mut self) {
        if let Some(composing) = self.input.take_composing_change() {
            self.send(BackendAction::SetComposing(composing));
        }
    }

    pub fn submit_message(&mut self) {
        let can_send = self.state.chat.as_ref().is_some_and(|chat| !chat.sending);
        if !can_send || self.input.message_input.trim().is_empty() {
            return;
        }
        if let Err(reason) = validate_message(&self.input.message_input) {
            self.state
                .push_notification(Notification::warning("Message not sent").with_description(reason));
            return;
        }
        if let Some(chat) = self.state.chat.as_mut() {
            chat.sending = true;
        }
        self.send(BackendAction::SendMessage {
            content: self.input.message_input.clone(),
        });
    }

    pub fn refresh(&mut self) {
        if let Some(chat) = self.state.chat.as_mut() {
            chat.loading = true;
            chat.load_failed = false;
            self.send(BackendAction::Refresh);
        }
    }

    pub fn set_auto_follow(&mut self, enabled: bool) {
        self.settings.auto_follow = enabled;
        if let Some(chat) = self.state.chat.as_mut() {
            chat.scroll.set_auto_follow(enabled);
        }
    }

    pub(super) fn copy_conversation_id(&mut self, ctx: &egui::Context) {
        let Some(id) = self.state.chat.as_ref().map(|c| c.conversation.id.clone()) else {
            return;
        };
        ctx.copy_text(id.clone());
        self.state
            .push_notification(Notification::success("Conversation id copied").with_description(id));
    }

    fn persist_settings(&mut self) {
        self.settings.history = self.input.history.clone();
        self.settings.theme = self.theme.name.to_string();
        if let Err(e) = save_settings(&self.settings) {
            warn!(error = %e, "failed to save settings");
        }
    }
}

impl Drop for BourrachoApp {
    fn drop(&mut self) {
        self.send(BackendAction::Shutdown);
        if self.persist_on_exit {
            self.persist_settings();
        }
    }
}
