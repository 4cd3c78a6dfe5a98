use crate::constants::{backing_size, field_id};
use lounge_core::{UiField, UiUpdate, Variant};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn require_element(document: &web::Document, id: &str) -> anyhow::Result<web::Element> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{id}"))
}

pub fn require_as<T: JsCast>(document: &web::Document, id: &str) -> anyhow::Result<T> {
    require_element(document, id)?
        .dyn_into::<T>()
        .map_err(|e| anyhow::anyhow!("#{id} has the wrong element type: {e:?}"))
}

pub fn add_listener(
    target: &web::EventTarget,
    event: &str,
    mut handler: impl FnMut(web::Event) + 'static,
) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| handler(ev)) as Box<dyn FnMut(_)>);
    _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let rect = canvas.get_bounding_client_rect();
        let (width, height) = backing_size(rect.width(), rect.height(), w.device_pixel_ratio());
        if canvas.width() != width || canvas.height() != height {
            canvas.set_width(width);
            canvas.set_height(height);
        }
    }
}

/// Text elements the frame pass writes into.
pub struct Readouts {
    elements: Vec<(UiField, web::Element)>,
}

impl Readouts {
    /// Look up every readout `variant` writes; a missing one fails start-up.
    pub fn require(document: &web::Document, variant: Variant) -> anyhow::Result<Self> {
        let elements = UiField::for_variant(variant)
            .iter()
            .map(|&field| Ok((field, require_element(document, field_id(field))?)))
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self { elements })
    }

    fn get(&self, field: UiField) -> Option<&web::Element> {
        self.elements
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, el)| el)
    }

    /// Write and drain `updates`.
    pub fn apply(&self, updates: &mut Vec<UiUpdate>) {
        for update in updates.drain(..) {
            let (field, text) = match update {
                UiUpdate::Text { field, text } => (field, text),
                UiUpdate::ClockTick => (UiField::Clock, local_time()),
            };
            match self.get(field) {
                Some(el) => el.set_text_content(Some(&text)),
                None => log::debug!("[ui] no element for {field:?}"),
            }
        }
    }
}

fn local_time() -> String {
    js_sys::Date::new_0()
        .to_locale_time_string("default")
        .into()
}
