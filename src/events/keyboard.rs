use super::InputWiring;
use crate::keys::{key_action, stepped_volume, KeyAction};
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, w: &InputWiring) {
    let Some(action) = key_action(&ev.key()) else {
        return;
    };
    match action {
        KeyAction::Launch => super::launch(w),
        KeyAction::TogglePlayback => {
            super::toggle_playback(w);
        }
        KeyAction::VolumeUp | KeyAction::VolumeDown => {
            let mut scene = w.scene.borrow_mut();
            let v = stepped_volume(scene.audio.volume(), action == KeyAction::VolumeUp);
            scene.audio.set_volume(v);
            log::info!("[keys] volume={:.2}", v);
        }
        KeyAction::Stop => crate::stop(),
    }
    ev.prevent_default();
}

pub fn wire_global_keydown(w: &InputWiring) {
    if let Some(window) = web::window() {
        let w = w.clone();
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &w);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
