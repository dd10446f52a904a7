use festa_core::pixel_to_ndc;
use glam::Vec2;
use web_sys as web;

/// Latest pointer position in normalized device coordinates. Starts at the
/// center so the dust field has a ray before the first move event.
#[derive(Default, Clone, Copy)]
pub struct PointerState {
    pub ndc: Vec2,
}

#[inline]
pub fn pointer_ndc(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    pixel_to_ndc(x_css, y_css, rect.width() as f32, rect.height() as f32)
}
