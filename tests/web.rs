#![cfg(target_arch = "wasm32")]

use glossviz_wasm::viz::{presets, Assets, Catalog, Surface, VisualizerSession};
use glossviz_wasm::wasm::canvas::CanvasSurface;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn canvas(width: u32, height: u32) -> web_sys::HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    canvas.set_width(width);
    canvas.set_height(height);
    canvas
}

#[wasm_bindgen_test]
fn surface_tracks_canvas_size() {
    let element = canvas(320, 200);
    let surface = CanvasSurface::new(element.clone()).unwrap();
    assert_eq!((surface.width(), surface.height()), (320.0, 200.0));

    element.set_width(64);
    assert_eq!(surface.width(), 64.0);
}

#[wasm_bindgen_test]
fn every_preset_draws_on_a_real_canvas() {
    let mut surface = CanvasSurface::new(canvas(320, 200)).unwrap();
    let mut session = VisualizerSession::new(Catalog::builtin(), Assets::new());
    let audio = [200u8; 300];

    for preset in presets::ALL {
        session.activate(preset.id).unwrap();
        session.render(&mut surface, &audio, 0.5);
    }
}
