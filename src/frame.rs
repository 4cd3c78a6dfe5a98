use crate::dom::{self, Readouts};
use instant::Instant;
use lounge_core::{App, FrameClock, Scheduler, UiUpdate};
use lounge_gfx::GpuState;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub app: Rc<RefCell<App>>,
    pub gpu: Option<GpuState<'static>>,
    pub canvas: web::HtmlCanvasElement,
    pub readouts: Rc<Readouts>,
    pub clock: FrameClock,
    pub ui: Vec<UiUpdate>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let dt = self.clock.tick(Instant::now());
        self.app.borrow_mut().frame(dt, &mut self.ui);
        self.readouts.apply(&mut self.ui);

        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        dom::sync_canvas_backing_size(&self.canvas);
        gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
        match gpu.render(self.app.borrow().scene()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("[gpu] out of memory; rendering stopped");
                self.gpu = None;
            }
            Err(e) => log::warn!("[gpu] frame skipped: {e:?}"),
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<GpuState<'static>> {
    let target = wgpu::SurfaceTarget::Canvas(canvas.clone());
    match GpuState::new(target, canvas.width(), canvas.height()).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Drives the frame pass from `requestAnimationFrame`.
pub struct RafScheduler;

impl Scheduler for RafScheduler {
    fn run(self, mut pass: Box<dyn FnMut()>) {
        let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let tick_clone = tick.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pass();
            request_frame(&tick_clone);
        }) as Box<dyn FnMut()>));
        request_frame(&tick);
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: FrameContext) {
    let frame_ctx = RefCell::new(frame_ctx);
    RafScheduler.run(Box::new(move || frame_ctx.borrow_mut().frame()));
}
