use super::{center, clear, hsl, min_side, TAU};
use crate::viz::assets::Assets;
use crate::viz::config::SettingSpec;
use crate::viz::preset::{spread_index, Frame, FrameRenderer, Preset};
use crate::viz::store::PersistentStore;
use crate::viz::surface::Surface;

// ── sphere ──────────────────────────────────────────────────────────────────

const SPHERE_BANDS: usize = 32;

const SPHERE_SETTINGS: [SettingSpec; 3] = [
    SettingSpec::range("sphereSize", "Size", 50.0, 300.0, 150.0),
    SettingSpec::stepped("rotSpeed", "Rotation", 0.0, 2.0, 0.1, 0.5),
    SettingSpec::color("color", "Color", "#00ff9d"),
];

pub const SPHERE: Preset = Preset {
    id: "sphere",
    display_name: "Sphere",
    settings: &SPHERE_SETTINGS,
    setup: sphere_setup,
};

/// Accumulated longitude rotation in radians.
struct SphereSpin(f64);

fn sphere_setup(_: &Assets, store: &mut PersistentStore) -> FrameRenderer {
    store.insert(SPHERE.id, SphereSpin(0.0));
    Box::new(draw_sphere)
}

fn draw_sphere(surface: &mut dyn Surface, frame: &Frame<'_>, store: &mut PersistentStore) {
    let cfg = frame.settings(SPHERE.id);
    let spin = store.get_or_insert_with(SPHERE.id, || SphereSpin(0.0));
    spin.0 = (spin.0 + cfg.number("rotSpeed") * 0.01) % TAU;
    let rotation = spin.0;

    let (cx, cy) = center(surface);
    let radius = cfg.number("sphereSize");
    clear(surface);

    surface.set_stroke(cfg.text("color").into());
    surface.begin_path();

    let band_step = std::f64::consts::PI / 16.0;
    for i in 0..SPHERE_BANDS {
        let depth = 1.0 + frame.level_at(i, SPHERE_BANDS) * frame.sensitivity();

        let lat = i as f64 * band_step - std::f64::consts::FRAC_PI_2;
        let y = cy + radius * lat.sin();
        let band_radius = lat.cos() * radius * depth;

        let lon = i as f64 * band_step + rotation;
        let x = cx + band_radius * lon.cos();
        let y2 = cy + band_radius * lon.sin();

        surface.line_to(x, y);
        surface.line_to(x, y2);
    }

    surface.close_path();
    surface.stroke();
}

// ── vectorField ─────────────────────────────────────────────────────────────

const VECTOR_FIELD_SETTINGS: [SettingSpec; 4] = [
    SettingSpec::range("gridSize", "Grid Density", 10.0, 50.0, 25.0),
    SettingSpec::stepped("lineLength", "Line Scale", 0.5, 3.0, 0.1, 1.5),
    SettingSpec::range("harmonicScale", "Harmonics", 1.0, 10.0, 3.0),
    SettingSpec::color("color", "Line Color", "#00ff9d"),
];

pub const VECTOR_FIELD: Preset = Preset {
    id: "vectorField",
    display_name: "Vector Field",
    settings: &VECTOR_FIELD_SETTINGS,
    setup: vector_field_setup,
};

fn vector_field_setup(_: &Assets, _: &mut PersistentStore) -> FrameRenderer {
    Box::new(draw_vector_field)
}

fn draw_vector_field(surface: &mut dyn Surface, frame: &Frame<'_>, _: &mut PersistentStore) {
    let cfg = frame.settings(VECTOR_FIELD.id);
    let grid = cfg.count("gridSize");
    let cell = surface.width() / grid as f64;
    let harmonics = cfg.number("harmonicScale");
    let line_length = cell * 0.4 * cfg.number("lineLength");
    let time = frame.time;
    clear(surface);

    surface.set_stroke(cfg.text("color").into());
    surface.set_line_width(1.0);

    for gx in 0..grid {
        for gy in 0..grid {
            let sx = gx as f64 * cell;
            let sy = gy as f64 * cell;
            let bin = spread_index(gx + gy * grid, grid * grid, frame.audio.len());

            let angle = (sx * 0.01 * harmonics + time).sin() * 1.5
                + (sy * 0.01 * harmonics + time).cos() * 1.5
                + frame.level(bin) * frame.sensitivity() * 3.0;

            surface.begin_path();
            surface.move_to(sx, sy);
            surface.line_to(sx + angle.cos() * line_length, sy + angle.sin() * line_length);
            surface.stroke();
        }
    }
}

// ── geometryPulse ───────────────────────────────────────────────────────────

const SHAPES: [&str; 4] = ["triangle", "square", "pentagon", "hexagon"];

const GEOMETRY_PULSE_SETTINGS: [SettingSpec; 5] = [
    SettingSpec::select("shape", "Shape", &SHAPES, "triangle"),
    SettingSpec::range("layers", "Layers", 3.0, 20.0, 8.0),
    SettingSpec::stepped("warpFactor", "Warp", 0.0, 2.0, 0.1, 1.0),
    SettingSpec::range("hueShift", "Hue Shift", 0.0, 360.0, 0.0),
    SettingSpec::range("hueShiftByAmplitude", "Reactive Hue", 0.0, 360.0, 0.0),
];

pub const GEOMETRY_PULSE: Preset = Preset {
    id: "geometryPulse",
    display_name: "Geometry Pulse",
    settings: &GEOMETRY_PULSE_SETTINGS,
    setup: geometry_pulse_setup,
};

/// Base hue carried across frames, in degrees.
struct PulseHue(f64);

fn geometry_pulse_setup(_: &Assets, store: &mut PersistentStore) -> FrameRenderer {
    store.insert(GEOMETRY_PULSE.id, PulseHue(0.0));
    Box::new(draw_geometry_pulse)
}

fn sides_of(shape: &str) -> usize {
    match shape {
        "square" => 4,
        "pentagon" => 5,
        "hexagon" => 6,
        _ => 3,
    }
}

fn draw_geometry_pulse(surface: &mut dyn Surface, frame: &Frame<'_>, store: &mut PersistentStore) {
    let cfg = frame.settings(GEOMETRY_PULSE.id);
    let hue = store.get_or_insert_with(GEOMETRY_PULSE.id, || PulseHue(0.0));
    hue.0 = (hue.0 + cfg.number("hueShift")) % 360.0;
    let base_hue = hue.0;

    let (cx, cy) = center(surface);
    let max_size = min_side(surface) * 0.4;
    let sides = sides_of(&cfg.text("shape"));
    let warp = cfg.number("warpFactor");
    let reactive_hue = cfg.number("hueShiftByAmplitude");
    clear(surface);

    surface.set_line_width(2.0);

    let layers = cfg.count("layers");
    for i in 0..layers {
        let intensity = frame.level_at(i, layers) * frame.sensitivity();
        let size = max_size * (i as f64 / layers as f64) * (1.0 + intensity);
        let pulse = (frame.time + i as f64 * 0.5).sin() * warp;

        surface.set_stroke(
            hsl(
                base_hue + i as f64 * 15.0 + intensity * reactive_hue,
                100.0,
                50.0 + intensity * 50.0,
            )
            .into(),
        );
        surface.begin_path();
        for j in 0..sides {
            let angle = j as f64 / sides as f64 * TAU + pulse;
            let (x, y) = (cx + angle.cos() * size, cy + angle.sin() * size);
            if j == 0 {
                surface.move_to(x, y);
            } else {
                surface.line_to(x, y);
            }
        }
        surface.close_path();
        surface.stroke();
    }
}
