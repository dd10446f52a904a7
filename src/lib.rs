#![cfg(target_arch = "wasm32")]
use festa_core::{FxError, Scene};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod keys;
mod overlay;
mod render;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// Handles kept alive for the exported page controls.
struct App {
    wiring: events::InputWiring,
    frame_loop: frame::LoopHandle,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

fn with_app<T>(f: impl FnOnce(&App) -> T) -> Option<T> {
    APP.with(|app| app.borrow().as_ref().map(f))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("festa-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or(FxError::MissingResource("window"))?;
    let document = window
        .document()
        .ok_or(FxError::MissingResource("document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or(FxError::MissingResource("#app-canvas"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    wire_canvas_resize(&canvas);

    let params = dom::scene_params_from_location();
    let scene = Scene::new(&params)?;
    let gpu = frame::init_gpu(&canvas, &scene).await;

    let wiring = events::InputWiring {
        canvas: canvas.clone(),
        scene: Rc::new(RefCell::new(scene)),
        pointer: Rc::new(RefCell::new(input::PointerState::default())),
        audio: Rc::new(RefCell::new(None)),
        params: Rc::new(params),
    };
    events::wire_input_handlers(&wiring);
    events::wire_global_keydown(&wiring);
    events::wire_buttons(&document, &wiring);
    overlay::show(&document);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        wiring.scene.clone(),
        wiring.pointer.clone(),
        wiring.audio.clone(),
        canvas,
        document,
        gpu,
    )));
    let frame_loop = frame::start_loop(frame_ctx);
    APP.with(|app| *app.borrow_mut() = Some(App { wiring, frame_loop }));
    Ok(())
}

/// Start the launch early (also bound to the launch button and Enter).
#[wasm_bindgen]
pub fn launch() {
    with_app(|app| events::launch(&app.wiring));
}

#[wasm_bindgen]
pub fn set_volume(volume: f32) {
    with_app(|app| app.wiring.scene.borrow_mut().audio.set_volume(volume));
}

/// Returns whether music is playing afterwards.
#[wasm_bindgen]
pub fn toggle_playback() -> bool {
    with_app(|app| events::toggle_playback(&app.wiring)).unwrap_or(false)
}

/// Tear the scene down: no new fireworks, audio paused, render loop stopped.
#[wasm_bindgen]
pub fn stop() {
    with_app(|app| {
        let mut scene = app.wiring.scene.borrow_mut();
        scene.teardown();
        if let Some(rig) = app.wiring.audio.borrow_mut().as_mut() {
            rig.apply(scene.audio);
        }
        app.frame_loop.cancel();
        log::info!("[app] stopped");
    });
}
