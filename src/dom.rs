use festa_core::SceneParams;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::constants::PARAM_KEYS;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        log::warn!("#{} not found; click handler skipped", element_id);
    }
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

#[inline]
pub fn set_text(document: &web::Document, element_id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        el.set_text_content(Some(text));
    }
}

/// Scene parameters with overrides from the page's query string applied.
/// Bad values, including ones that parse but leave the scene unbuildable,
/// are logged and skipped.
pub fn scene_params_from_location() -> SceneParams {
    let mut params = SceneParams::default();
    let Some(search) = web::window().and_then(|w| w.location().search().ok()) else {
        return params;
    };
    let Ok(query) = web::UrlSearchParams::new_with_str(&search) else {
        return params;
    };
    for key in PARAM_KEYS {
        if let Some(value) = query.get(key) {
            if let Err(e) = params.apply_checked(key, &value) {
                log::warn!("{}", e);
            }
        }
    }
    params
}
