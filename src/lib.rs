#![cfg(target_arch = "wasm32")]
use crate::constants::{control_ids, CANVAS_ID, VIDEO_LAYER_ID};
use crate::dom::Readouts;
use crate::events::Controls;
use lounge_core::{App, AppConfig, FrameClock, MediaSlot};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod dom;
mod events;
mod frame;

fn read_config(window: &web::Window) -> AppConfig {
    let query = window.location().search().unwrap_or_default();
    match AppConfig::from_query(&query) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("ignoring page parameters `{query}`: {e}");
            AppConfig::default()
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("lounge starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let config = read_config(&window);
    let variant = config.variant;
    let canvas: web::HtmlCanvasElement = dom::require_as(&document, CANVAS_ID)?;
    let readouts = Rc::new(Readouts::require(&document, variant)?);
    for id in control_ids(variant) {
        dom::require_element(&document, id)?;
    }

    let app = Rc::new(RefCell::new(App::new(config)?));
    let mut ui = Vec::new();
    app.borrow().initial_updates(&mut ui);
    readouts.apply(&mut ui);

    let controls = Controls {
        app: app.clone(),
        readouts: readouts.clone(),
        audio: Rc::new(RefCell::new(None)),
        media: Rc::new(RefCell::new(MediaSlot::default())),
        generation: Rc::new(Cell::new(0)),
        video_layer: document.get_element_by_id(VIDEO_LAYER_ID),
    };
    if variant.uses_signal() {
        events::wire_signal_controls(&document, &controls)?;
    } else {
        events::wire_query_controls(&document, &controls)?;
    }

    dom::sync_canvas_backing_size(&canvas);
    let resized = canvas.clone();
    dom::add_listener(&window, "resize", move |_| dom::sync_canvas_backing_size(&resized));
    let gpu = frame::init_gpu(&canvas).await;

    frame::start_loop(frame::FrameContext {
        app,
        gpu,
        canvas,
        readouts,
        clock: FrameClock::default(),
        ui,
    });
    Ok(())
}
