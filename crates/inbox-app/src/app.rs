//! Main egui application: composes all panels and drives the inbox engine.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use egui::{self, CentralPanel, SidePanel};

use inbox_core::engine::InboxEngine;
use inbox_core::event_bus::EventBus;
use inbox_core::ports::StoragePort;
use inbox_core::state::EngineStatus;
use inbox_platform::{auto_detect_storage, open_storage, BrowserScheduler, RestInboxApi};
use inbox_types::config::{InboxConfig, StorageBackendType};
use inbox_ui::panels::{chat, conversations, no_assistant, notices, status};
use inbox_ui::state::UiState;
use inbox_ui::theme::{self, Palette, SIDEBAR_WIDTH};

const CONFIG_STORAGE_KEY: &str = "inbox:config";

/// The main application state
pub struct InboxApp {
    ui_state: UiState,
    palette: Palette,
    event_bus: EventBus,
    /// Filled once the config is restored and the engine is built
    engine: Rc<RefCell<Option<InboxEngine>>>,
    theme_applied: bool,
}

/// What the user asked for during this frame
enum UiAction {
    None,
    Select(String),
    Send(String),
    Reload,
}

impl InboxApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let event_bus = EventBus::new();
        let engine = Rc::new(RefCell::new(None));

        Self::boot(cc.egui_ctx.clone(), event_bus.clone(), engine.clone());

        Self {
            ui_state: UiState::default(),
            palette: Palette::default(),
            event_bus,
            engine,
            theme_applied: false,
        }
    }

    /// Restore config from storage, build the engine, and run the first
    /// initialize (async)
    fn boot(ctx: egui::Context, event_bus: EventBus, slot: Rc<RefCell<Option<InboxEngine>>>) {
        wasm_bindgen_futures::spawn_local(async move {
            let config_store = auto_detect_storage();
            let config = Self::restore_config(config_store.as_ref()).await;

            let storage = match config.storage.backend {
                StorageBackendType::Auto => config_store,
                backend => open_storage(backend),
            };
            let api = Rc::new(RestInboxApi::new(config.api.clone()));
            let scheduler = Rc::new(BrowserScheduler::new());
            let engine = InboxEngine::new(config, api, storage, scheduler, event_bus);

            *slot.borrow_mut() = Some(engine.clone());
            ctx.request_repaint();

            if let Err(e) = engine.initialize().await {
                log::warn!("Inbox initialization failed: {}", e);
            }
            ctx.request_repaint();
        });
    }

    async fn restore_config(storage: &dyn StoragePort) -> InboxConfig {
        match storage.get(CONFIG_STORAGE_KEY).await {
            Ok(Some(json)) => match serde_json::from_str::<InboxConfig>(&json) {
                Ok(config) => {
                    log::info!("Config restored from {}", storage.backend_name());
                    config
                }
                Err(e) => {
                    log::warn!("Stored config is invalid ({}), using defaults", e);
                    InboxConfig::default()
                }
            },
            Ok(None) => InboxConfig::default(),
            Err(e) => {
                log::warn!("Could not read config ({}), using defaults", e);
                InboxConfig::default()
            }
        }
    }

    fn engine(&self) -> Option<InboxEngine> {
        self.engine.borrow().clone()
    }

    /// Apply the configured theme once the engine (and its config) exists
    fn apply_config(&mut self, ctx: &egui::Context, config: &InboxConfig) {
        self.palette = Palette::from(&config.theme);
        theme::apply_theme(ctx, &self.palette);
        self.ui_state = UiState::new(config.notice_ttl_secs);
        self.theme_applied = true;
    }

    fn render(&mut self, ctx: &egui::Context, engine: &InboxEngine) -> UiAction {
        let inbox = engine.state();
        let palette = self.palette;
        let mut action = UiAction::None;

        match &inbox.status {
            EngineStatus::Ready => {
                SidePanel::left("conversations")
                    .exact_width(SIDEBAR_WIDTH)
                    .resizable(false)
                    .show(ctx, |ui| {
                        if let Some(id) = conversations::conversation_list(ui, &inbox, &palette) {
                            action = UiAction::Select(id);
                        }
                    });
                CentralPanel::default().show(ctx, |ui| {
                    if let Some(text) = chat::chat_panel(ui, &inbox, &mut self.ui_state, &palette) {
                        action = UiAction::Send(text);
                    }
                });
            }
            EngineStatus::NoAssistant => {
                CentralPanel::default().show(ctx, |ui| {
                    if no_assistant::no_assistant_panel(ui, &palette) {
                        action = UiAction::Reload;
                    }
                });
            }
            other => {
                CentralPanel::default().show(ctx, |ui| {
                    if status::status_panel(ui, other, &palette) {
                        action = UiAction::Reload;
                    }
                });
            }
        }

        action
    }

    fn dispatch(&self, action: UiAction, engine: &InboxEngine, ctx: &egui::Context) {
        match action {
            UiAction::None => {}
            UiAction::Select(id) => {
                if let Err(e) = engine.select_conversation(&id) {
                    log::warn!("{}", e);
                }
            }
            UiAction::Send(text) => {
                let engine = engine.clone();
                let ctx = ctx.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    // Failures already surface as notices
                    if let Err(e) = engine.send_message(&text).await {
                        log::debug!("Send finished with error: {}", e);
                    }
                    ctx.request_repaint();
                });
            }
            UiAction::Reload => {
                let engine = engine.clone();
                let ctx = ctx.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = engine.initialize().await {
                        log::warn!("Reload failed: {}", e);
                    }
                    ctx.request_repaint();
                });
            }
        }
    }
}

impl eframe::App for InboxApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let Some(engine) = self.engine() else {
            CentralPanel::default().show(ctx, |ui| {
                status::status_panel(ui, &EngineStatus::Loading, &self.palette);
            });
            return;
        };

        if !self.theme_applied {
            self.apply_config(ctx, engine.config());
        }

        // Drain events from the engine
        let now = ctx.input(|i| i.time);
        let events = self.event_bus.drain();
        if !events.is_empty() {
            self.ui_state.process_events(events, now);
            ctx.request_repaint();
        }
        if self.ui_state.prune_notices(now) {
            ctx.request_repaint_after(Duration::from_millis(250));
        }

        let action = self.render(ctx, &engine);
        notices::notices_overlay(ctx, &mut self.ui_state, &self.palette);
        self.dispatch(action, &engine, ctx);

        // Poll results land outside of input events
        if engine.state().poll_active {
            ctx.request_repaint_after(Duration::from_millis(engine.config().poll_interval_ms));
        }
    }
}

impl Drop for InboxApp {
    fn drop(&mut self) {
        if let Some(engine) = self.engine() {
            engine.shutdown();
        }
    }
}
