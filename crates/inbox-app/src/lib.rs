//! Inbox App: WASM entry point.
//!
//! This crate is the composition root (DI wiring layer).
//! It assembles the platform adapters, builds the engine, and hands both
//! to the egui UI.

mod app;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

const CANVAS_ID: &str = "inbox_canvas";

/// WASM entry point: called from index.html
#[wasm_bindgen(start)]
pub async fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Inbox WASM starting...");

    let web_options = eframe::WebOptions::default();

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::error!("No window/document, cannot start the inbox");
        return;
    };
    let canvas = match document
        .get_element_by_id(CANVAS_ID)
        .map(|el| el.dyn_into::<web_sys::HtmlCanvasElement>())
    {
        Some(Ok(canvas)) => canvas,
        _ => {
            log::error!("No canvas element with id '{}'", CANVAS_ID);
            return;
        }
    };

    wasm_bindgen_futures::spawn_local(async move {
        let started = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(app::InboxApp::new(cc)))),
            )
            .await;
        if let Err(e) = started {
            log::error!("Failed to start eframe: {:?}", e);
        }
    });
}
