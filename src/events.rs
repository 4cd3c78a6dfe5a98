use crate::audio::{AudioGraph, WebMedia};
use crate::constants::{
    file_accept, DEMO_BUTTON_ID, EVOLVE_BUTTON_ID, FILE_INPUT_ID, QUERY_INPUT_ID,
};
use crate::dom::{self, Readouts};
use lounge_core::{App, MediaKind, MediaSlot, UiUpdate};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Shared handles the control callbacks work on.
#[derive(Clone)]
pub struct Controls {
    pub app: Rc<RefCell<App>>,
    pub readouts: Rc<Readouts>,
    pub audio: Rc<RefCell<Option<AudioGraph>>>,
    pub media: Rc<RefCell<MediaSlot<WebMedia>>>,
    /// Bumped on every selection so stale play results are ignored.
    pub generation: Rc<Cell<u32>>,
    pub video_layer: Option<web::Element>,
}

impl Controls {
    fn with_ui(&self, f: impl FnOnce(&mut App, &mut Vec<UiUpdate>)) {
        let mut ui = Vec::new();
        f(&mut self.app.borrow_mut(), &mut ui);
        self.readouts.apply(&mut ui);
    }

    fn graph(&self) -> anyhow::Result<AudioGraph> {
        let mut slot = self.audio.borrow_mut();
        if let Some(graph) = slot.as_ref() {
            return Ok(graph.clone());
        }
        let graph = AudioGraph::new(self.app.borrow().config().fft_size())?;
        Ok(slot.insert(graph).clone())
    }
}

pub fn wire_signal_controls(document: &web::Document, c: &Controls) -> anyhow::Result<()> {
    let input: web::HtmlInputElement = dom::require_as(document, FILE_INPUT_ID)?;
    let demo = dom::require_element(document, DEMO_BUTTON_ID)?;
    input.set_accept(file_accept(c.app.borrow().variant()));

    let controls = c.clone();
    let picker = input.clone();
    dom::add_listener(&input, "change", move |_| on_file_selected(&controls, &picker));

    let controls = c.clone();
    dom::add_listener(&demo, "click", move |_| {
        controls.generation.set(controls.generation.get().wrapping_add(1));
        controls.media.borrow_mut().teardown();
        controls.with_ui(|app, ui| app.enter_demo(ui));
    });
    Ok(())
}

pub fn wire_query_controls(document: &web::Document, c: &Controls) -> anyhow::Result<()> {
    let input: web::HtmlInputElement = dom::require_as(document, QUERY_INPUT_ID)?;
    let button = dom::require_element(document, EVOLVE_BUTTON_ID)?;

    let controls = c.clone();
    let query = input.clone();
    dom::add_listener(&button, "click", move |_| {
        let text = query.value();
        controls.with_ui(|app, ui| app.submit_query(&text, ui));
    });

    let controls = c.clone();
    let query = input.clone();
    dom::add_listener(&input, "keydown", move |ev| {
        let enter = ev
            .dyn_ref::<web::KeyboardEvent>()
            .is_some_and(|k| k.key() == "Enter");
        if enter {
            let text = query.value();
            controls.with_ui(|app, ui| app.submit_query(&text, ui));
        }
    });
    Ok(())
}

fn on_file_selected(c: &Controls, input: &web::HtmlInputElement) {
    let Some(file) = input.files().and_then(|list| list.get(0)) else {
        log::debug!("[media] selection cleared");
        return;
    };
    let name = file.name();
    let kind = match MediaKind::from_mime(&file.type_()) {
        Ok(kind) => kind,
        Err(e) => {
            log::debug!("[media] ignoring {name}: {e}");
            return;
        }
    };
    if let Err(e) = c.app.borrow().check_media(kind) {
        log::debug!("[media] ignoring {name}: {e}");
        return;
    }
    let graph = match c.graph() {
        Ok(g) => g,
        Err(e) => {
            log::error!("[media] audio unavailable: {e:?}");
            return;
        }
    };
    graph.resume();

    let generation = c.generation.get().wrapping_add(1);
    c.generation.set(generation);
    let play = {
        let mut slot = c.media.borrow_mut();
        slot.replace_with(|| WebMedia::from_file(&graph, &file, kind, c.video_layer.as_ref()))
            .and_then(|media| media.play())
    };
    let promise = match play {
        Ok(p) => p,
        Err(e) => {
            log::error!("[media] could not start {name}: {e:?}");
            c.media.borrow_mut().teardown();
            c.with_ui(|app, ui| app.media_failed(ui));
            return;
        }
    };

    let c = c.clone();
    spawn_local(async move {
        let started = JsFuture::from(promise).await;
        if c.generation.get() != generation {
            return;
        }
        match started {
            Ok(_) => c.with_ui(|app, ui| {
                if let Err(e) = app.go_live(Box::new(graph.analyser()), kind, &name, ui) {
                    log::error!("[media] {e}");
                }
            }),
            Err(e) => {
                log::error!("[media] playback of {name} failed: {e:?}");
                c.media.borrow_mut().teardown();
                c.with_ui(|app, ui| app.media_failed(ui));
            }
        }
    });
}
