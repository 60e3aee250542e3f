//! DOM measurement and styling helpers

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, MouseEvent};

use super::button_style;
use crate::sim::{Layout, Rect};

#[inline]
pub fn window_document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

/// Typed element lookup
pub fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// Frame clock in ms, same origin as animation frame timestamps
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Window size in logical pixels
pub fn viewport() -> Vec2 {
    let Some(window) = web_sys::window() else {
        return Vec2::ZERO;
    };
    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Vec2::new(w as f32, h as f32)
}

pub fn device_pixel_ratio() -> f64 {
    web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0)
}

/// Playground size and the button's rendered bounds relative to it.
/// `None` while either element is detached.
pub fn measure_layout(playground: &Element, button: &Element) -> Option<Layout> {
    if !playground.is_connected() || !button.is_connected() {
        return None;
    }
    let area = playground.get_bounding_client_rect();
    let btn = button.get_bounding_client_rect();
    Layout::new(
        Rect::sized(area.width() as f32, area.height() as f32),
        Rect::new(
            (btn.left() - area.left()) as f32,
            (btn.top() - area.top()) as f32,
            btn.width() as f32,
            btn.height() as f32,
        ),
    )
}

/// Pointer position relative to an element's top-left corner
pub fn pointer_in(element: &Element, event: &MouseEvent) -> Vec2 {
    let rect = element.get_bounding_client_rect();
    Vec2::new(
        (event.client_x() as f64 - rect.left()) as f32,
        (event.client_y() as f64 - rect.top()) as f32,
    )
}

/// Move and/or scale a button through inline styles
pub fn style_button(button: &HtmlElement, pos: Option<Vec2>, scale: f32) {
    let style = button.style();
    for (prop, value) in button_style(pos, scale) {
        let _ = style.set_property(prop, &value);
    }
}

pub fn set_text(document: &Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}
