//! Preset picker and the generated settings panel.
//!
//! The panel is rebuilt from the active preset's [`SettingSpec`]s on every
//! switch. Inputs carry `data-setting`; a single delegated listener routes
//! edits through [`Config::set`](crate::viz::Config::set) and writes the
//! stored (clamped) value back into the control.

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Document, Element, Event, HtmlInputElement, HtmlOptionElement, HtmlSelectElement,
};

use super::render::Shared;
use super::storage;
use crate::viz::{
    fft_sizes, AssetKind, Control, PresetConfig, SettingSpec, SettingValue, ANALYZER_BARS,
    ANALYZER_FFT_SIZE, ANALYZER_SMOOTHING, BARS_MAX, BUILTIN_ASSETS, SENSITIVITY_MAX,
    SENSITIVITY_MIN, SMOOTHING_MAX,
};

const SENSITIVITY: &str = "master.sensitivity";
const ANALYZER_PREFIX: &str = "analyzer.";

#[derive(Clone)]
struct Dom {
    document: Document,
    select: Option<HtmlSelectElement>,
    panel: Option<Element>,
}

pub fn bind(document: &Document, page: &Shared) -> Result<(), JsValue> {
    let dom = Dom {
        document: document.clone(),
        select: document
            .get_element_by_id("presetSelect")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok()),
        panel: document.get_element_by_id("settingsPanel"),
    };

    if let Some(select) = &dom.select {
        fill_preset_select(select, page)?;

        let (change_dom, change_page) = (dom.clone(), page.clone());
        let on_change = Closure::wrap(Box::new(move |event: Event| {
            let Some(select) = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
            else {
                return;
            };
            if let Err(err) = change_page.borrow_mut().session.activate(&select.value()) {
                log::warn!("{err}");
                return;
            }
            if let Err(err) = build_panel(&change_dom, &change_page) {
                log::warn!("settings panel not rebuilt: {err:?}");
            }
        }) as Box<dyn FnMut(_)>);
        select.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())?;
        on_change.forget();
    }

    if let Some(panel) = &dom.panel {
        let input_page = page.clone();
        let on_input = Closure::wrap(Box::new(move |event: Event| {
            if let Some(el) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) {
                apply_edit(&input_page, &el);
            }
        }) as Box<dyn FnMut(_)>);
        panel.add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())?;
        on_input.forget();

        let (reset_dom, reset_page) = (dom.clone(), page.clone());
        let on_click = Closure::wrap(Box::new(move |event: Event| {
            let is_reset = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.get_attribute("data-action"))
                .is_some_and(|action| action == "reset");
            if is_reset {
                reset_active(&reset_dom, &reset_page);
            }
        }) as Box<dyn FnMut(_)>);
        panel.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }

    build_panel(&dom, page)
}

fn fill_preset_select(select: &HtmlSelectElement, page: &Shared) -> Result<(), JsValue> {
    let p = page.borrow();
    select.set_inner_html("");
    for preset in p.session.catalog().presets() {
        let option = HtmlOptionElement::new_with_text_and_value(preset.display_name, preset.id)?;
        select.append_child(&option)?;
    }
    if let Some(active) = p.session.active_id() {
        select.set_value(active);
    }
    Ok(())
}

fn build_panel(dom: &Dom, page: &Shared) -> Result<(), JsValue> {
    let Some(panel) = &dom.panel else {
        return Ok(());
    };
    let p = page.borrow();
    panel.set_inner_html("");

    let sensitivity = SettingValue::Number(p.session.config().sensitivity());
    let master = range_input(&dom.document, SENSITIVITY_MIN, SENSITIVITY_MAX, 0.1)?;
    show_value(&master, &sensitivity);
    append_row(dom, panel, SENSITIVITY, "Sensitivity", &master)?;

    let analyzer = p.session.config().analyzer();
    let sizes: Vec<String> = fft_sizes().map(|size| size.to_string()).collect();
    let fft = select_input(&dom.document, sizes.iter().map(String::as_str))?;
    show_value(&fft, &SettingValue::Number(analyzer.fft_size as f64));
    append_row(dom, panel, ANALYZER_FFT_SIZE, "FFT size", &fft)?;

    let bars = range_input(&dom.document, 1.0, BARS_MAX as f64, 1.0)?;
    show_value(&bars, &SettingValue::Number(analyzer.bars as f64));
    append_row(dom, panel, ANALYZER_BARS, "Bars", &bars)?;

    let smoothing = range_input(&dom.document, 0.0, SMOOTHING_MAX, 0.01)?;
    show_value(&smoothing, &SettingValue::Number(analyzer.smoothing));
    append_row(dom, panel, ANALYZER_SMOOTHING, "Smoothing", &smoothing)?;

    let Some(id) = p.session.active_id() else {
        return Ok(());
    };
    let Some(preset) = p.session.catalog().get(id) else {
        return Ok(());
    };
    let values = p.session.config().preset(id);

    for spec in preset.settings {
        let control = control_for(&dom.document, spec)?;
        show_value(&control, &current(&values, spec));
        append_row(dom, panel, spec.id, spec.label, &control)?;
    }

    let reset = dom.document.create_element("button")?;
    reset.set_attribute("data-action", "reset")?;
    reset.set_text_content(Some("Reset"));
    panel.append_child(&reset)?;
    Ok(())
}

fn append_row(
    dom: &Dom,
    panel: &Element,
    setting: &str,
    label: &str,
    control: &Element,
) -> Result<(), JsValue> {
    let row = dom.document.create_element("label")?;
    row.set_class_name("setting");
    row.set_text_content(Some(label));
    control.set_attribute("data-setting", setting)?;
    row.append_child(control)?;
    panel.append_child(&row)?;
    Ok(())
}

fn range_input(document: &Document, min: f64, max: f64, step: f64) -> Result<Element, JsValue> {
    let input: HtmlInputElement = document.create_element("input")?.dyn_into()?;
    input.set_type("range");
    input.set_min(&min.to_string());
    input.set_max(&max.to_string());
    input.set_step(&step.to_string());
    Ok(input.into())
}

fn select_input<'a>(
    document: &Document,
    options: impl IntoIterator<Item = &'a str>,
) -> Result<Element, JsValue> {
    let select = document.create_element("select")?;
    for value in options {
        let option = HtmlOptionElement::new_with_text_and_value(value, value)?;
        select.append_child(&option)?;
    }
    Ok(select)
}

fn control_for(document: &Document, spec: &SettingSpec) -> Result<Element, JsValue> {
    let typed = |kind: &str| -> Result<Element, JsValue> {
        let input: HtmlInputElement = document.create_element("input")?.dyn_into()?;
        input.set_type(kind);
        Ok(input.into())
    };
    match spec.control {
        Control::Range { min, max, step, .. } => range_input(document, min, max, step),
        Control::Color { .. } => typed("color"),
        Control::Checkbox { .. } => typed("checkbox"),
        Control::Text { .. } => typed("text"),
        Control::Select { options, .. } => select_input(document, options.iter().copied()),
        Control::File { kind, .. } => select_input(document, asset_ids(kind)),
    }
}

fn asset_ids(kind: AssetKind) -> impl Iterator<Item = &'static str> {
    BUILTIN_ASSETS
        .iter()
        .filter(move |decl| decl.kind == kind)
        .map(|decl| decl.id)
}

fn current(values: &PresetConfig<'_>, spec: &SettingSpec) -> SettingValue {
    match spec.control {
        Control::Range { .. } => SettingValue::Number(values.number(spec.id)),
        Control::Checkbox { .. } => SettingValue::Flag(values.flag(spec.id)),
        _ => SettingValue::Text(values.text(spec.id)),
    }
}

fn show_value(el: &Element, value: &SettingValue) {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        match value {
            SettingValue::Number(n) => input.set_value(&n.to_string()),
            SettingValue::Flag(b) => input.set_checked(*b),
            SettingValue::Text(s) => input.set_value(s),
        }
    } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        match value {
            SettingValue::Text(s) => select.set_value(s),
            SettingValue::Number(n) => select.set_value(&n.to_string()),
            SettingValue::Flag(_) => {}
        }
    }
}

fn read_value(el: &Element, spec: Option<&SettingSpec>) -> Option<SettingValue> {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        return Some(match spec.map(|s| s.control) {
            Some(Control::Checkbox { .. }) => SettingValue::Flag(input.checked()),
            Some(Control::Color { .. } | Control::Text { .. }) => SettingValue::Text(input.value()),
            _ => SettingValue::Number(input.value_as_number()),
        });
    }
    el.dyn_ref::<HtmlSelectElement>()
        .map(|select| SettingValue::Text(select.value()))
}

fn apply_edit(page: &Shared, el: &Element) {
    let Some(setting) = el.get_attribute("data-setting") else {
        return;
    };
    let mut p = page.borrow_mut();

    if setting == SENSITIVITY {
        let Some(SettingValue::Number(n)) = read_value(el, None) else {
            return;
        };
        match p.session.config_mut().set_sensitivity(n) {
            Ok(stored) => show_value(el, &SettingValue::Number(stored)),
            Err(err) => log::warn!("{err}"),
        }
    } else if setting.starts_with(ANALYZER_PREFIX) {
        let value = match read_value(el, None) {
            Some(SettingValue::Number(n)) => n,
            Some(SettingValue::Text(s)) => s.parse().unwrap_or(f64::NAN),
            _ => return,
        };
        match p.session.config_mut().set_analyzer_value(&setting, value) {
            Ok(stored) => {
                show_value(el, &SettingValue::Number(stored));
                p.retune();
            }
            Err(err) => log::warn!("{err}"),
        }
    } else {
        let Some(preset) = p.session.active_id() else {
            return;
        };
        let config = p.session.config_mut();
        let spec = match config.spec(preset, &setting) {
            Ok(spec) => spec,
            Err(err) => {
                log::warn!("{err}");
                return;
            }
        };
        let Some(value) = read_value(el, Some(spec)) else {
            return;
        };
        match config.set(preset, &setting, value) {
            Ok(stored) => show_value(el, &stored),
            Err(err) => log::warn!("{err}"),
        }
    }

    storage::save(p.session.config());
}

fn reset_active(dom: &Dom, page: &Shared) {
    {
        let mut p = page.borrow_mut();
        let Some(preset) = p.session.active_id() else {
            return;
        };
        if let Err(err) = p.session.config_mut().reset(preset) {
            log::warn!("{err}");
            return;
        }
        storage::save(p.session.config());
    }
    if let Err(err) = build_panel(dom, page) {
        log::warn!("settings panel not rebuilt: {err:?}");
    }
}
