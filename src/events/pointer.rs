use super::InputWiring;
use crate::input;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_input_handlers(w: &InputWiring) {
    wire_pointermove(w);
    wire_pointerdown(w);
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let ndc = input::pointer_ndc(&ev, &w.canvas);
        if ndc.is_finite() {
            w.pointer.borrow_mut().ndc = ndc;
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Window-level, so a press anywhere on the page (overlay included) sends a
/// shockwave. Capture and default suppression only apply to the canvas.
fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let ndc = input::pointer_ndc(&ev, &w.canvas);
        if ndc.is_finite() {
            w.pointer.borrow_mut().ndc = ndc;
        }
        w.scene.borrow_mut().pointer_down();
        log::debug!("[pointer] shockwave at ({:.2},{:.2})", ndc.x, ndc.y);

        let canvas_target: &web::EventTarget = w.canvas.as_ref();
        if ev.target().as_ref() == Some(canvas_target) {
            _ = w.canvas.set_pointer_capture(ev.pointer_id());
            ev.prevent_default();
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
