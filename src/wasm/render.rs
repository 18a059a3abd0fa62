use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, Document, Event, HtmlCanvasElement};

use super::assets::load_all;
use super::audio::MicInput;
use super::canvas::CanvasSurface;
use super::{controls, js_error, storage};
use crate::viz::{Assets, Catalog, SpectrumAnalyzer, VisualizerSession, BUILTIN_ASSETS};

/// Everything the frame loop and the controls share.
pub(super) struct VizPage {
    pub session: VisualizerSession,
    pub analyzer: SpectrumAnalyzer,
    pub mic: Option<MicInput>,
    pub samples: Vec<f32>,
}

impl VizPage {
    /// Push the configured analyzer settings into the analyzer and the mic.
    pub fn retune(&mut self) {
        let applied = self.analyzer.reconfigure(self.session.config().analyzer());
        if let Some(mic) = &self.mic {
            mic.set_fft_size(applied.fft_size);
        }
    }
}

pub(super) type Shared = Rc<RefCell<VizPage>>;

fn fit_to_window(canvas: &HtmlCanvasElement) {
    let Some(window) = window() else {
        return;
    };
    let px = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as u32;
    canvas.set_width(px(window.inner_width()));
    canvas.set_height(px(window.inner_height()));
}

/// Start the visualizer: restore config, activate the first preset, load
/// assets and the microphone in the background and run the frame loop.
pub fn start(document: &Document, canvas: HtmlCanvasElement) -> Result<(), JsValue> {
    let window = window().ok_or("no window")?;
    fit_to_window(&canvas);
    let surface = Rc::new(RefCell::new(CanvasSurface::new(canvas.clone())?));

    let mut session = VisualizerSession::new(Catalog::builtin(), Assets::new());
    storage::restore(session.config_mut());
    let first = session.catalog().first().map(|p| p.id).ok_or("empty catalog")?;
    session.activate(first).map_err(js_error)?;

    let analyzer = SpectrumAnalyzer::new(session.config().analyzer());
    let page: Shared = Rc::new(RefCell::new(VizPage {
        session,
        analyzer,
        mic: None,
        samples: Vec::new(),
    }));

    controls::bind(document, &page)?;

    // Resize canvas to fit window
    let resize_closure = {
        let canvas = canvas.clone();
        Closure::wrap(Box::new(move || fit_to_window(&canvas)) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();

    {
        let page = Rc::clone(&page);
        let surface = Rc::clone(&surface);
        spawn_local(async move {
            let assets = load_all(BUILTIN_ASSETS, &surface).await;
            page.borrow_mut().session.set_assets(assets);
        });
    }

    {
        let page = Rc::clone(&page);
        spawn_local(async move {
            let fft_size = page.borrow().analyzer.settings().fft_size;
            match MicInput::open(fft_size).await {
                Ok(mic) => {
                    let mut p = page.borrow_mut();
                    p.mic = Some(mic);
                    // Settings may have changed while permission was pending.
                    p.retune();
                }
                Err(err) => log::warn!("no microphone, rendering silence: {err:?}"),
            }
        });
    }

    let click_page = Rc::clone(&page);
    let on_click = Closure::wrap(Box::new(move |_: Event| {
        if let Some(mic) = &click_page.borrow().mic {
            mic.resume();
        }
    }) as Box<dyn FnMut(_)>);
    document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();

    // Animation loop
    // `f` holds the animation-frame closure so that we can keep calling
    // `request_animation_frame` recursively. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    let performance = window.performance().ok_or("no performance")?;
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let time = performance.now() / 1000.0;
        {
            let mut guard = page.borrow_mut();
            let p = &mut *guard;
            if let Some(mic) = &p.mic {
                mic.read(&mut p.samples);
            }
            let audio = p.analyzer.process(&p.samples);
            p.session.render(&mut *surface.borrow_mut(), audio, time);
        }

        // schedule next
        let scheduled = web_sys::window().zip(f.borrow().as_ref()).map(|(window, next)| {
            window.request_animation_frame(next.as_ref().unchecked_ref())
        });
        if let Some(Err(err)) = scheduled {
            log::error!("frame loop stopped: {err:?}");
        }
    }) as Box<dyn FnMut()>));

    if let Some(first_frame) = g.borrow().as_ref() {
        window.request_animation_frame(first_frame.as_ref().unchecked_ref())?;
    }

    Ok(())
}
