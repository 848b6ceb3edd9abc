//! Inbox sync engine: the client-side state machine.
//!
//! ```text
//! Uninitialized → Loading → { NoAssistant | Ready | AuthRequired | Error }
//! Ready: Idle / Sending / Polling (sending and polling may overlap)
//! any state → Shutdown (terminal)
//! ```
//!
//! All state lives behind a `RefCell` and no borrow is ever held across an
//! `.await`, so a poll tick can run while a send is in flight. Every async
//! operation records the generation it started in; results that arrive
//! after a re-initialize, shutdown, or auth failure are dropped.

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use futures::future::{abortable, FutureExt};
use inbox_types::{
    InboxError, Result,
    api::{SendMessageRequest, UserData},
    config::InboxConfig,
    conversation::Conversation,
    event::{InboxEvent, NoticeKind},
    message::{Message, Role},
};

use crate::event_bus::EventBus;
use crate::poller::{poll_loop, PollTask};
use crate::ports::{InboxApiPort, SchedulerPort, StoragePort};
use crate::reconcile;
use crate::session::SessionStore;
use crate::state::{EngineStatus, InboxState};

/// Handle to the inbox engine: clone-cheap via Rc.
#[derive(Clone)]
pub struct InboxEngine {
    inner: Rc<EngineInner>,
}

pub(crate) struct EngineInner {
    config: InboxConfig,
    api: Rc<dyn InboxApiPort>,
    session: SessionStore,
    scheduler: Rc<dyn SchedulerPort>,
    event_bus: EventBus,
    state: RefCell<InboxState>,
    poll_task: RefCell<Option<PollTask>>,
    poll_in_flight: Cell<bool>,
    generation: Cell<u64>,
}

/// Clears the in-flight flag when a poll finishes, however it finishes.
struct InFlight<'a>(&'a Cell<bool>);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl InboxEngine {
    pub fn new(
        config: InboxConfig,
        api: Rc<dyn InboxApiPort>,
        storage: Rc<dyn StoragePort>,
        scheduler: Rc<dyn SchedulerPort>,
        event_bus: EventBus,
    ) -> Self {
        let session = SessionStore::new(storage, config.storage.token_key.clone());
        Self {
            inner: Rc::new(EngineInner {
                config,
                api,
                session,
                scheduler,
                event_bus,
                state: RefCell::new(InboxState::new()),
                poll_task: RefCell::new(None),
                poll_in_flight: Cell::new(false),
                generation: Cell::new(0),
            }),
        }
    }

    pub(crate) fn from_inner(inner: Rc<EngineInner>) -> Self {
        Self { inner }
    }

    /// Borrow the current state. Do not hold across an `.await`.
    pub fn state(&self) -> Ref<'_, InboxState> {
        self.inner.state.borrow()
    }

    pub fn status(&self) -> EngineStatus {
        self.inner.state.borrow().status.clone()
    }

    pub fn config(&self) -> &InboxConfig {
        &self.inner.config
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.inner.event_bus
    }

    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// A poll request is outstanding right now
    pub fn is_polling(&self) -> bool {
        self.inner.poll_in_flight.get()
    }

    // ─── initialize ─────────────────────────────────────────

    /// Load the user snapshot and set up the conversation list.
    /// Also serves as the "check again" action after `NoAssistant`.
    pub async fn initialize(&self) -> Result<()> {
        if self.is_shut_down() {
            return Err(InboxError::Shutdown);
        }

        self.stop_polling();
        let generation = self.next_generation();
        {
            let mut state = self.inner.state.borrow_mut();
            state.clear_session_data();
            state.status = EngineStatus::Loading;
        }
        log::info!("Initializing inbox");

        let result = async {
            let token = self.inner.session.require_token().await?;
            self.inner.api.fetch_user_data(&token).await
        }
        .await;

        if self.is_stale(generation) {
            log::debug!("Initialization superseded, dropping result");
            return Ok(());
        }

        match result {
            Ok(data) => {
                self.apply_user_data(data);
                Ok(())
            }
            Err(e) if e.is_auth() => {
                self.expire_session().await;
                Err(e)
            }
            Err(e) => {
                log::error!("Failed to load inbox: {}", e);
                self.inner.state.borrow_mut().status = EngineStatus::Error(e.to_string());
                self.inner
                    .event_bus
                    .notice(NoticeKind::FetchFailed, format!("Could not load your messages: {}", e));
                Err(e)
            }
        }
    }

    fn apply_user_data(&self, data: UserData) {
        let UserData {
            assistant,
            mut conversations,
        } = data;

        let Some(assistant) = assistant else {
            self.inner.state.borrow_mut().status = EngineStatus::NoAssistant;
            log::info!("No assistant assigned, polling disabled");
            self.inner.event_bus.emit(InboxEvent::Initialized {
                assistant: None,
                conversations: 0,
            });
            return;
        };

        for conv in conversations.iter_mut() {
            conv.decorate(&assistant);
        }
        let only_placeholder = conversations.is_empty();
        if only_placeholder {
            conversations.push(Conversation::placeholder(&assistant));
        }

        let selected = conversations.first().map(|c| c.id.clone());
        let count = conversations.len();
        let assistant_name = assistant.name.clone();
        {
            let mut state = self.inner.state.borrow_mut();
            state.conversations = conversations;
            state.selected_id = selected.clone();
            state.assistant = Some(assistant);
            state.status = EngineStatus::Ready;
        }
        log::info!(
            "Inbox ready: {} conversation(s) with {}",
            count,
            assistant_name
        );

        self.inner.event_bus.emit(InboxEvent::Initialized {
            assistant: Some(assistant_name),
            conversations: count,
        });
        if let Some(id) = selected {
            self.inner
                .event_bus
                .emit(InboxEvent::ConversationSelected { id });
        }

        // A placeholder has nothing on the server to poll for yet;
        // polling starts with the first successful send.
        if !only_placeholder {
            self.start_polling();
        }
    }

    // ─── poll ───────────────────────────────────────────────

    /// One refresh against the server. No-op while polling is suspended or
    /// another poll is still outstanding.
    pub async fn poll(&self) -> Result<()> {
        if !self.can_poll() {
            return Ok(());
        }
        if self.inner.poll_in_flight.replace(true) {
            log::debug!("Previous poll still outstanding, skipping tick");
            return Ok(());
        }
        let _in_flight = InFlight(&self.inner.poll_in_flight);
        let generation = self.inner.generation.get();

        let result = async {
            let token = self.inner.session.require_token().await?;
            self.inner.api.fetch_messages(&token).await
        }
        .await;

        if self.is_stale(generation) {
            return Ok(());
        }

        match result {
            Ok(mut conversations) => {
                let count = {
                    let mut state = self.inner.state.borrow_mut();
                    if let Some(assistant) = state.assistant.clone() {
                        for conv in conversations.iter_mut() {
                            conv.decorate(&assistant);
                        }
                    }
                    reconcile::apply_poll(&mut state, conversations);
                    state.conversations.len()
                };
                self.inner
                    .event_bus
                    .emit(InboxEvent::ConversationsRefreshed { conversations: count });
                Ok(())
            }
            Err(e) if e.is_auth() => {
                self.expire_session().await;
                Err(e)
            }
            Err(e) => {
                log::warn!("Poll failed, keeping current state: {}", e);
                Err(e)
            }
        }
    }

    fn can_poll(&self) -> bool {
        let state = self.inner.state.borrow();
        state.status == EngineStatus::Ready && state.has_assistant() && state.poll_active
    }

    // ─── sendMessage ────────────────────────────────────────

    /// Send a message to the assistant in the selected conversation.
    ///
    /// The message shows up locally before any request is made. On failure
    /// it is removed again and a notice is emitted.
    pub async fn send_message(&self, content: &str) -> Result<()> {
        if self.is_shut_down() {
            return Err(InboxError::Shutdown);
        }

        let content = content.trim();
        let (conversation_id, placeholder, assistant_id) = self.validate_send(content)?;

        let message = Message::pending_user(content);
        let temp_id = message.id.clone();
        let generation = self.inner.generation.get();
        {
            let mut state = self.inner.state.borrow_mut();
            reconcile::append_optimistic(&mut state, &conversation_id, message);
            state.pending_sends += 1;
        }
        self.inner.event_bus.emit(InboxEvent::MessageQueued {
            conversation_id: conversation_id.clone(),
            temp_id: temp_id.clone(),
        });

        let result = self
            .deliver(&conversation_id, placeholder, &assistant_id, content, generation)
            .await;

        if self.is_stale(generation) {
            // Session was reset meanwhile; the optimistic message went with it.
            return result.map(|_| ());
        }
        {
            let mut state = self.inner.state.borrow_mut();
            state.pending_sends = state.pending_sends.saturating_sub(1);
        }

        match result {
            Ok(target_id) => {
                reconcile::mark_sent(&mut self.inner.state.borrow_mut(), &temp_id);
                self.inner.event_bus.emit(InboxEvent::MessageSent {
                    conversation_id: target_id,
                    temp_id,
                });
                self.start_polling();
                // Reconcile right away instead of waiting for the next tick.
                let _ = self.poll().await;
                Ok(())
            }
            Err(e) => {
                let reverted = reconcile::revert(&mut self.inner.state.borrow_mut(), &temp_id);
                if let Some(conversation_id) = reverted {
                    self.inner.event_bus.emit(InboxEvent::MessageReverted {
                        conversation_id,
                        temp_id,
                    });
                }

                if e.is_auth() {
                    self.expire_session().await;
                    return Err(e);
                }
                log::warn!("Send failed, optimistic message reverted: {}", e);
                self.inner
                    .event_bus
                    .notice(NoticeKind::SendFailed, format!("Your message could not be sent: {}", e));
                Err(InboxError::SendFailed(e.to_string()))
            }
        }
    }

    /// Returns (conversation id, is placeholder, assistant id).
    fn validate_send(&self, content: &str) -> Result<(String, bool, String)> {
        let checked = {
            let state = self.inner.state.borrow();
            match state.assistant.as_ref() {
                _ if content.is_empty() => Err("Message is empty"),
                None => Err("No assistant assigned"),
                Some(_) if state.status != EngineStatus::Ready => Err("Inbox is not ready"),
                Some(assistant) => match state.selected() {
                    Some(conv) => Ok((conv.id.clone(), conv.placeholder, assistant.id.clone())),
                    None => Err("No conversation selected"),
                },
            }
        };

        checked.map_err(|reason| {
            self.inner.event_bus.notice(NoticeKind::Validation, reason);
            InboxError::Validation(reason.to_string())
        })
    }

    /// Network half of a send: create the conversation if needed, then post
    /// the message. Returns the id of the conversation the message went to.
    async fn deliver(
        &self,
        conversation_id: &str,
        placeholder: bool,
        assistant_id: &str,
        content: &str,
        generation: u64,
    ) -> Result<String> {
        let token = self.inner.session.require_token().await?;

        let mut target_id = conversation_id.to_string();
        if placeholder {
            let mut created = self
                .inner
                .api
                .create_conversation(&token, assistant_id)
                .await?;
            target_id = created.id.clone();

            if !self.is_stale(generation) {
                let promoted = {
                    let mut state = self.inner.state.borrow_mut();
                    if let Some(assistant) = state.assistant.clone() {
                        created.decorate(&assistant);
                    }
                    reconcile::promote_placeholder(&mut state, conversation_id, created)
                };
                if promoted {
                    log::info!("Placeholder {} promoted to {}", conversation_id, target_id);
                    self.inner.event_bus.emit(InboxEvent::ConversationPromoted {
                        temp_id: conversation_id.to_string(),
                        id: target_id.clone(),
                    });
                }
            }
        }

        let req = SendMessageRequest {
            conversation_id: target_id.clone(),
            role: Role::User,
            content: content.to_string(),
        };
        self.inner.api.send_message(&token, &req).await?;
        Ok(target_id)
    }

    // ─── selectConversation ─────────────────────────────────

    pub fn select_conversation(&self, id: &str) -> Result<()> {
        {
            let mut state = self.inner.state.borrow_mut();
            if state.conversation(id).is_none() {
                return Err(InboxError::Validation(format!("Unknown conversation {}", id)));
            }
            state.selected_id = Some(id.to_string());
        }
        self.inner
            .event_bus
            .emit(InboxEvent::ConversationSelected { id: id.to_string() });
        Ok(())
    }

    // ─── shutdown ───────────────────────────────────────────

    /// Cancel the poll loop. Terminal: the engine cannot be re-initialized.
    pub fn shutdown(&self) {
        self.next_generation();
        self.stop_polling();
        let mut state = self.inner.state.borrow_mut();
        state.pending_sends = 0;
        state.status = EngineStatus::Shutdown;
        log::info!("Inbox engine shut down");
    }

    // ─── polling lifecycle ──────────────────────────────────

    /// Spawn the poll loop unless it is already running or the engine is
    /// not in a state that allows polling.
    pub fn start_polling(&self) {
        if self.inner.poll_task.borrow().is_some() {
            return;
        }
        {
            let mut state = self.inner.state.borrow_mut();
            if state.status != EngineStatus::Ready || !state.has_assistant() {
                return;
            }
            state.poll_active = true;
        }

        let interval = self.inner.config.poll_interval_ms;
        let (task, handle) = abortable(poll_loop(
            Rc::downgrade(&self.inner),
            self.inner.scheduler.clone(),
            interval,
        ));
        *self.inner.poll_task.borrow_mut() = Some(PollTask::new(handle));
        self.inner.scheduler.spawn(
            async move {
                let _ = task.await;
            }
            .boxed_local(),
        );

        log::info!("Polling every {}ms", interval);
        self.inner.event_bus.emit(InboxEvent::PollingStarted);
    }

    fn stop_polling(&self) {
        self.inner.state.borrow_mut().poll_active = false;
        let task = self.inner.poll_task.borrow_mut().take();
        if let Some(task) = task {
            drop(task);
            log::info!("Polling stopped");
            self.inner.event_bus.emit(InboxEvent::PollingStopped);
        }
    }

    /// 401/403 or missing token: forget everything and wait for a re-login.
    async fn expire_session(&self) {
        self.next_generation();
        self.stop_polling();
        {
            let mut state = self.inner.state.borrow_mut();
            state.clear_session_data();
            state.status = EngineStatus::AuthRequired;
        }
        self.inner.session.clear().await;
        log::warn!("Session expired, re-authentication required");
        self.inner.event_bus.notice(
            NoticeKind::AuthExpired,
            "Your session has expired. Please log in again.",
        );
    }

    // ─── helpers ────────────────────────────────────────────

    fn next_generation(&self) -> u64 {
        let next = self.inner.generation.get() + 1;
        self.inner.generation.set(next);
        next
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.inner.generation.get() != generation
    }

    fn is_shut_down(&self) -> bool {
        self.inner.state.borrow().status == EngineStatus::Shutdown
    }
}
