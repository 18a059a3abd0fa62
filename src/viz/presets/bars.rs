use super::clear;
use crate::viz::assets::Assets;
use crate::viz::config::SettingSpec;
use crate::viz::preset::{Frame, FrameRenderer, Preset};
use crate::viz::store::PersistentStore;
use crate::viz::surface::{Gradient, Paint, Surface};

// ── waveform ────────────────────────────────────────────────────────────────

const WAVEFORM_SETTINGS: [SettingSpec; 2] = [
    SettingSpec::range("lineWidth", "Line Width", 1.0, 10.0, 2.0),
    SettingSpec::color("color", "Color", "#00ff9d"),
];

pub const WAVEFORM: Preset = Preset {
    id: "waveform",
    display_name: "Waveform",
    settings: &WAVEFORM_SETTINGS,
    setup: waveform_setup,
};

fn waveform_setup(_: &Assets, _: &mut PersistentStore) -> FrameRenderer {
    Box::new(draw_waveform)
}

fn draw_waveform(surface: &mut dyn Surface, frame: &Frame<'_>, _: &mut PersistentStore) {
    let cfg = frame.settings(WAVEFORM.id);
    let (w, h) = (surface.width(), surface.height());
    let gain = frame.sensitivity();
    clear(surface);

    surface.set_line_width(cfg.number("lineWidth"));
    surface.set_stroke(cfg.text("color").into());
    surface.begin_path();

    if !frame.audio.is_empty() {
        let slice_width = w / frame.audio.len() as f64;
        for (i, &value) in frame.audio.iter().enumerate() {
            // 128 sits on the centre line.
            let v = f64::from(value) / 128.0;
            let x = i as f64 * slice_width;
            let y = h / 2.0 + (v - 1.0) * gain * h / 2.0;
            if i == 0 {
                surface.move_to(x, y);
            } else {
                surface.line_to(x, y);
            }
        }
    }

    surface.line_to(w, h / 2.0);
    surface.stroke();
}

// ── gradientBars ────────────────────────────────────────────────────────────

const GRADIENT_BARS_SETTINGS: [SettingSpec; 4] = [
    SettingSpec::range("barCount", "Bar Count", 16.0, 256.0, 128.0),
    SettingSpec::color("gradStart", "Gradient Start", "#00ff9d"),
    SettingSpec::color("gradEnd", "Gradient End", "#ff00ff"),
    SettingSpec::select(
        "gradDirection",
        "Direction",
        &["vertical", "horizontal"],
        "vertical",
    ),
];

pub const GRADIENT_BARS: Preset = Preset {
    id: "gradientBars",
    display_name: "Gradient Bars",
    settings: &GRADIENT_BARS_SETTINGS,
    setup: gradient_bars_setup,
};

fn gradient_bars_setup(_: &Assets, _: &mut PersistentStore) -> FrameRenderer {
    Box::new(draw_gradient_bars)
}

fn draw_gradient_bars(surface: &mut dyn Surface, frame: &Frame<'_>, _: &mut PersistentStore) {
    let cfg = frame.settings(GRADIENT_BARS.id);
    let (w, h) = (surface.width(), surface.height());
    clear(surface);

    let count = cfg.count("barCount");
    let bar_width = w / count as f64;
    let gradient = if cfg.text("gradDirection") == "vertical" {
        Gradient::linear(0.0, 0.0, 0.0, h)
    } else {
        Gradient::linear(0.0, 0.0, w, 0.0)
    };
    surface.set_fill(
        gradient
            .stop(0.0, cfg.text("gradStart"))
            .stop(1.0, cfg.text("gradEnd"))
            .into(),
    );

    for i in 0..count {
        let bar_height = frame.level(i) * h * frame.sensitivity();
        surface.fill_rect(
            i as f64 * bar_width,
            h - bar_height,
            (bar_width - 2.0).max(1.0),
            bar_height,
        );
    }
}

// ── fireMatrix ──────────────────────────────────────────────────────────────

const FIRE_MATRIX_SETTINGS: [SettingSpec; 4] = [
    SettingSpec::range("cellSize", "Cell Size", 4.0, 20.0, 8.0),
    SettingSpec::range("fireHeight", "Fire Height", 10.0, 100.0, 50.0),
    SettingSpec::color("color1", "Base Color", "#ff9900"),
    SettingSpec::color("color2", "Tip Color", "#ffff00"),
];

pub const FIRE_MATRIX: Preset = Preset {
    id: "fireMatrix",
    display_name: "Fire Matrix",
    settings: &FIRE_MATRIX_SETTINGS,
    setup: fire_matrix_setup,
};

fn fire_matrix_setup(_: &Assets, _: &mut PersistentStore) -> FrameRenderer {
    Box::new(draw_fire_matrix)
}

fn draw_fire_matrix(surface: &mut dyn Surface, frame: &Frame<'_>, _: &mut PersistentStore) {
    let cfg = frame.settings(FIRE_MATRIX.id);
    let (w, h) = (surface.width(), surface.height());
    clear(surface);

    let cell = cfg.number("cellSize");
    let fire_height = cfg.number("fireHeight");
    let cols = (w / cell).ceil().max(0.0) as usize;
    let rows = fire_height.ceil() as usize;

    let hot: Paint = Gradient::linear(0.0, 0.0, 0.0, fire_height * cell)
        .stop(0.0, cfg.text("color1"))
        .stop(1.0, cfg.text("color2"))
        .into();
    let cold: Paint = "#000000".into();
    let mut current: Option<bool> = None;

    for x in 0..cols {
        let amplitude = frame.level_at(x, cols);
        let flame_height = rows as f64 * amplitude * frame.sensitivity();

        for y in 0..rows {
            let y = y as f64;
            if y >= flame_height {
                break;
            }
            let brightness = (1.0 - y / flame_height).max(0.0);
            let is_hot = brightness > 0.3;
            if current != Some(is_hot) {
                surface.set_fill(if is_hot { hot.clone() } else { cold.clone() });
                current = Some(is_hot);
            }
            surface.fill_rect(x as f64 * cell, h - y * cell, cell - 1.0, cell - 1.0);
        }
    }
}
