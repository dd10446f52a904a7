use crate::audio::AudioRig;
use crate::constants::MAX_FRAME_DT;
use crate::input::PointerState;
use crate::overlay;
use crate::render;
use festa_core::{Camera, FrameInput, FrequencySource, Scene, StageEvent};
use glam::Vec3;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub scene: Rc<RefCell<Scene>>,
    pub pointer: Rc<RefCell<PointerState>>,
    pub audio: Rc<RefCell<Option<AudioRig>>>,

    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub gpu: Option<render::GpuState>,

    pub last_instant: Instant,
    pub elapsed: f32,
    // last values pushed to the DOM, to skip redundant writes
    pub shown_label: Option<String>,
    pub shown_playing: Option<bool>,
}

impl FrameContext {
    pub fn new(
        scene: Rc<RefCell<Scene>>,
        pointer: Rc<RefCell<PointerState>>,
        audio: Rc<RefCell<Option<AudioRig>>>,
        canvas: web::HtmlCanvasElement,
        document: web::Document,
        gpu: Option<render::GpuState>,
    ) -> Self {
        Self {
            scene,
            pointer,
            audio,
            canvas,
            document,
            gpu,
            last_instant: Instant::now(),
            elapsed: 0.0,
            shown_label: None,
            shown_playing: None,
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT);
        self.last_instant = now;
        self.elapsed += dt;

        let (w, h) = (self.canvas.width().max(1), self.canvas.height().max(1));
        let scene_rc = self.scene.clone();
        let mut scene = scene_rc.borrow_mut();
        let camera = Camera::looking_at_origin(
            Vec3::new(0.0, 0.0, scene.stage.camera_z()),
            w as f32 / h as f32,
        );
        let ray = camera.ray_from_ndc(self.pointer.borrow().ndc);

        let event = {
            let mut audio = self.audio.borrow_mut();
            let (ring_source, frame_source): (
                Option<&mut dyn FrequencySource>,
                Option<&mut dyn FrequencySource>,
            ) = match audio.as_mut() {
                Some(rig) if rig.is_live() => (Some(&mut rig.ring), Some(&mut rig.frame)),
                _ => (None, None),
            };
            scene.step(FrameInput {
                dt,
                elapsed: self.elapsed,
                pointer_ray: Some(ray),
                ring_source,
                frame_source,
            })
        };
        if let Some(ev) = event {
            self.on_stage_event(ev);
        }

        if let Some(rig) = self.audio.borrow_mut().as_mut() {
            rig.apply(scene.audio);
        }
        self.sync_overlay(&scene);

        if let Some(gpu) = self.gpu.as_mut() {
            gpu.resize_if_needed(w, h);
            match gpu.render(&scene, &camera, self.elapsed) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
                Err(e) => log::error!("render error: {:?}", e),
            }
        }
    }

    fn on_stage_event(&mut self, event: StageEvent) {
        log::info!("[frame] {:?} at {:.2}s", event, self.elapsed);
        if event == StageEvent::CountdownFinished {
            overlay::show(&self.document);
        }
    }

    fn sync_overlay(&mut self, scene: &Scene) {
        let label = scene.stage.countdown_label();
        if label != self.shown_label {
            overlay::update_countdown(&self.document, label.as_deref());
            self.shown_label = label;
        }
        let playing = scene.audio.is_playing();
        if self.shown_playing != Some(playing) {
            overlay::update_play_button(&self.document, playing);
            self.shown_playing = Some(playing);
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement, scene: &Scene) -> Option<render::GpuState> {
    match render::GpuState::new(canvas, scene).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Cancels the animation-frame loop started by [`start_loop`].
#[derive(Clone)]
pub struct LoopHandle {
    running: Rc<Cell<bool>>,
    raf_id: Rc<Cell<Option<i32>>>,
}

impl LoopHandle {
    fn request(&self, cb: &Closure<dyn FnMut()>) {
        if let Some(w) = web::window() {
            self.raf_id
                .set(w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
        }
    }

    pub fn cancel(&self) {
        self.running.set(false);
        if let (Some(w), Some(id)) = (web::window(), self.raf_id.take()) {
            _ = w.cancel_animation_frame(id);
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> LoopHandle {
    let handle = LoopHandle {
        running: Rc::new(Cell::new(true)),
        raf_id: Rc::new(Cell::new(None)),
    };
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let h = handle.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !h.running.get() {
            return;
        }
        frame_ctx.borrow_mut().frame();
        if let Some(cb) = tick_clone.borrow().as_ref() {
            h.request(cb);
        }
    }) as Box<dyn FnMut()>));
    if let Some(cb) = tick.borrow().as_ref() {
        handle.request(cb);
    }
    handle
}
