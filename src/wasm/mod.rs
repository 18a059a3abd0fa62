//! Browser host: wires the DOM, Web Audio and the canvas to the cores.
//!
//! Each page element is optional. The gloss player starts when the page has
//! an `aslVideo` element, the visualizer when it has the `c` canvas.

use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlVideoElement};

mod assets;
mod audio;
pub mod canvas;
mod controls;
mod dataset;
mod gloss;
mod render;
mod storage;

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();

    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    if let Some(video) = document.get_element_by_id("aslVideo") {
        gloss::start(&document, video.dyn_into::<HtmlVideoElement>()?)?;
    }

    if let Some(canvas) = document.get_element_by_id("c") {
        render::start(&document, canvas.dyn_into::<HtmlCanvasElement>()?)?;
    }

    Ok(())
}

/// `VizError` crosses into JS as a plain message.
pub(crate) fn js_error(err: crate::VizError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
