use crate::audio::AudioRig;
use crate::dom;
use crate::input::PointerState;
use crate::overlay;
use festa_core::{Scene, SceneParams};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

mod keyboard;
mod pointer;

pub use keyboard::wire_global_keydown;
pub use pointer::wire_input_handlers;

/// Shared handles every DOM listener needs.
#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub scene: Rc<RefCell<Scene>>,
    pub pointer: Rc<RefCell<PointerState>>,
    pub audio: Rc<RefCell<Option<AudioRig>>>,
    pub params: Rc<SceneParams>,
}

/// Build the audio graph on first use. Must be called from a user gesture.
/// On failure the scene carries on silent and the visualizers stay idle.
fn ensure_audio(w: &InputWiring) {
    let mut audio = w.audio.borrow_mut();
    if audio.is_some() {
        return;
    }
    match AudioRig::new(&w.params.audio_url, &w.params.ring, &w.params.frame) {
        Ok(rig) => *audio = Some(rig),
        Err(e) => log::error!("audio init error: {:?}", e),
    }
}

pub fn launch(w: &InputWiring) {
    ensure_audio(w);
    if w.scene.borrow_mut().launch().is_some() {
        if let Some(doc) = dom::window_document() {
            overlay::hide(&doc);
            overlay::update_countdown(&doc, None);
        }
    }
}

pub fn toggle_playback(w: &InputWiring) -> bool {
    ensure_audio(w);
    let playing = w.scene.borrow_mut().audio.toggle();
    log::info!("[audio] playing={}", playing);
    playing
}

pub fn wire_buttons(document: &web::Document, w: &InputWiring) {
    let wl = w.clone();
    dom::add_click_listener(document, crate::constants::LAUNCH_BUTTON_ID, move || {
        launch(&wl);
    });
    let wp = w.clone();
    dom::add_click_listener(document, crate::constants::PLAY_BUTTON_ID, move || {
        toggle_playback(&wp);
    });
}
