use crate::constants::{COUNTDOWN_ID, PLAY_BUTTON_ID, START_OVERLAY_ID};
use crate::dom;
use web_sys as web;

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(START_OVERLAY_ID) {
        _ = el.class_list().remove_1("hidden");
        // fallback for environments without CSS class
        _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(START_OVERLAY_ID) {
        _ = el.class_list().add_1("hidden");
        // fallback
        _ = el.set_attribute("style", "display:none");
    }
}

/// Countdown digits while counting, cleared afterwards.
pub fn update_countdown(document: &web::Document, label: Option<&str>) {
    dom::set_text(document, COUNTDOWN_ID, label.unwrap_or(""));
}

pub fn update_play_button(document: &web::Document, playing: bool) {
    dom::set_text(document, PLAY_BUTTON_ID, if playing { "Pause" } else { "Play" });
}
