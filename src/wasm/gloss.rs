//! Gloss page: text box, suggestion list and the `<video>` element.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    Document, Element, Event, HtmlInputElement, HtmlLinkElement, HtmlVideoElement, KeyboardEvent,
    PageTransitionEvent,
};

use super::dataset::{fetch_text, DATASET_URL};
use crate::gloss::{apply_suggestion, Attempt, ClipCommand, GlossSession, IndexOptions};

struct GlossPage {
    session: GlossSession,
    document: Document,
    video: HtmlVideoElement,
    input: Option<HtmlInputElement>,
    suggestions: Option<Element>,
    /// Attempt whose clip the video element was last pointed at.
    showing: Option<Attempt>,
}

type Shared = Rc<RefCell<GlossPage>>;

pub fn start(document: &Document, video: HtmlVideoElement) -> Result<(), JsValue> {
    let input = document
        .get_element_by_id("userText")
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
    let page: Shared = Rc::new(RefCell::new(GlossPage {
        session: GlossSession::new(IndexOptions::default()),
        document: document.clone(),
        video,
        input,
        suggestions: document.get_element_by_id("suggestions"),
        showing: None,
    }));

    bind_video(&page)?;
    bind_input(&page)?;
    bind_teardown(&page)?;

    spawn_local(load(Rc::clone(&page)));
    Ok(())
}

async fn load(page: Shared) {
    match fetch_text(DATASET_URL).await {
        Ok(body) => page.borrow_mut().session.load(&body),
        Err(err) => page.borrow_mut().session.load_failed(&format!("{err:?}")),
    }
}

fn submit(page: &Shared) {
    let commands = {
        let mut p = page.borrow_mut();
        let text = p.input.as_ref().map(|i| i.value()).unwrap_or_default();
        p.session.request(&text)
    };
    execute(page, commands);
}

/// Carry out player commands against the DOM.
fn execute(page: &Shared, commands: Vec<ClipCommand>) {
    for command in commands {
        match command {
            ClipCommand::Prefetch(url) => {
                if let Err(err) = prefetch(&page.borrow().document, &url) {
                    log::debug!("prefetch hint for {url} dropped: {err:?}");
                }
            }
            ClipCommand::Play { attempt, url } => play(page, attempt, &url),
            ClipCommand::Stop => {
                let mut p = page.borrow_mut();
                p.showing = None;
                if let Err(err) = p.video.pause() {
                    log::debug!("pause failed: {err:?}");
                }
            }
        }
    }
}

fn prefetch(document: &Document, url: &str) -> Result<(), JsValue> {
    let link: HtmlLinkElement = document.create_element("link")?.dyn_into()?;
    link.set_rel("prefetch");
    link.set_href(url);
    document.head().ok_or("no head")?.append_child(&link)?;
    Ok(())
}

fn play(page: &Shared, attempt: Attempt, url: &str) {
    let started = {
        let mut p = page.borrow_mut();
        p.showing = Some(attempt);
        p.video.set_src(url);
        p.video.play()
    };

    let page = Rc::clone(page);
    spawn_local(async move {
        let rejected = match started {
            Ok(promise) => JsFuture::from(promise).await.err(),
            Err(err) => Some(err),
        };
        if let Some(err) = rejected {
            log::debug!("play rejected: {err:?}");
            let commands = page.borrow_mut().session.play_rejected(attempt);
            execute(&page, commands);
        }
    });
}

fn bind_video(page: &Shared) -> Result<(), JsValue> {
    let ended_page = Rc::clone(page);
    let on_ended = Closure::wrap(Box::new(move |_: Event| {
        let commands = {
            let mut p = ended_page.borrow_mut();
            match p.showing.take() {
                Some(attempt) => p.session.clip_ended(attempt),
                None => Vec::new(),
            }
        };
        execute(&ended_page, commands);
    }) as Box<dyn FnMut(_)>);
    page.borrow()
        .video
        .add_event_listener_with_callback("ended", on_ended.as_ref().unchecked_ref())?;
    on_ended.forget();
    Ok(())
}

fn bind_input(page: &Shared) -> Result<(), JsValue> {
    let p = page.borrow();

    if let Some(input) = &p.input {
        let typing_page = Rc::clone(page);
        let on_input = Closure::wrap(Box::new(move |_: Event| {
            if let Err(err) = show_suggestions(&typing_page) {
                log::debug!("suggestions not shown: {err:?}");
            }
        }) as Box<dyn FnMut(_)>);
        input.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;
        on_input.forget();

        let enter_page = Rc::clone(page);
        let on_key = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            if event.key() == "Enter" {
                submit(&enter_page);
            }
        }) as Box<dyn FnMut(_)>);
        input.add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())?;
        on_key.forget();
    }

    if let Some(button) = p.document.get_element_by_id("translate") {
        let click_page = Rc::clone(page);
        let on_click = Closure::wrap(Box::new(move |_: Event| submit(&click_page)) as Box<dyn FnMut(_)>);
        button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }

    // One delegated listener for every suggestion item.
    if let Some(list) = &p.suggestions {
        let pick_page = Rc::clone(page);
        let on_pick = Closure::wrap(Box::new(move |event: Event| {
            let item = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest(".suggestion").ok().flatten());
            if let Some(choice) = item.and_then(|el| el.text_content()) {
                pick(&pick_page, &choice);
            }
        }) as Box<dyn FnMut(_)>);
        list.add_event_listener_with_callback("click", on_pick.as_ref().unchecked_ref())?;
        on_pick.forget();
    }

    Ok(())
}

fn show_suggestions(page: &Shared) -> Result<(), JsValue> {
    let p = page.borrow();
    let (Some(input), Some(list)) = (&p.input, &p.suggestions) else {
        return Ok(());
    };
    list.set_inner_html("");
    for word in p.session.suggest(&input.value()) {
        let item = p.document.create_element("div")?;
        item.set_class_name("suggestion");
        item.set_text_content(Some(word));
        list.append_child(&item)?;
    }
    Ok(())
}

fn pick(page: &Shared, choice: &str) {
    let p = page.borrow();
    if let Some(input) = &p.input {
        input.set_value(&apply_suggestion(&input.value(), choice));
        if let Err(err) = input.focus() {
            log::debug!("focus failed: {err:?}");
        }
    }
    if let Some(list) = &p.suggestions {
        list.set_inner_html("");
    }
}

fn bind_teardown(page: &Shared) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let hide_page = Rc::clone(page);
    // A persisted page goes into the back/forward cache and may be shown
    // again, so it keeps its index.
    let on_hide = Closure::wrap(Box::new(move |event: PageTransitionEvent| {
        let commands = {
            let mut p = hide_page.borrow_mut();
            if event.persisted() {
                p.session.suspend()
            } else {
                p.session.teardown()
            }
        };
        execute(&hide_page, commands);
    }) as Box<dyn FnMut(_)>);
    window.add_event_listener_with_callback("pagehide", on_hide.as_ref().unchecked_ref())?;
    on_hide.forget();
    Ok(())
}
