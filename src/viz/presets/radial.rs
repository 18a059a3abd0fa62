//! Presets laid out around the centre of the surface.

use super::{center, clear, min_side, TAU};
use crate::viz::assets::Assets;
use crate::viz::config::SettingSpec;
use crate::viz::preset::{Frame, FrameRenderer, Preset};
use crate::viz::store::PersistentStore;
use crate::viz::surface::{Gradient, Surface};

// ── circular ────────────────────────────────────────────────────────────────

const CIRCULAR_SETTINGS: [SettingSpec; 2] = [
    SettingSpec::range("ringBarCount", "Bar Count", 16.0, 256.0, 128.0),
    SettingSpec::color("color", "Color", "#00ff9d"),
];

pub const CIRCULAR: Preset = Preset {
    id: "circular",
    display_name: "Circle",
    settings: &CIRCULAR_SETTINGS,
    setup: circular_setup,
};

fn circular_setup(_: &Assets, _: &mut PersistentStore) -> FrameRenderer {
    Box::new(draw_circular)
}

fn draw_circular(surface: &mut dyn Surface, frame: &Frame<'_>, _: &mut PersistentStore) {
    let cfg = frame.settings(CIRCULAR.id);
    let (cx, cy) = center(surface);
    let radius = min_side(surface) * 0.25;
    clear(surface);

    surface.set_stroke(cfg.text("color").into());
    surface.set_line_width(3.0);

    let count = cfg.count("ringBarCount");
    for i in 0..count {
        let length = frame.level(i) * radius * frame.sensitivity();
        let angle = i as f64 * TAU / count as f64;
        let (sin, cos) = angle.sin_cos();

        surface.begin_path();
        surface.move_to(cx + cos * radius, cy + sin * radius);
        surface.line_to(cx + cos * (radius + length), cy + sin * (radius + length));
        surface.stroke();
    }
}

// ── liquid ──────────────────────────────────────────────────────────────────

const LIQUID_POINTS: usize = 20;

const LIQUID_SETTINGS: [SettingSpec; 3] = [
    SettingSpec::stepped("smoothness", "Smoothness", 0.1, 1.0, 0.1, 0.5),
    SettingSpec::stepped("elasticity", "Elasticity", 0.5, 2.0, 0.1, 1.2),
    SettingSpec::color("color", "Color", "#00ff9d"),
];

pub const LIQUID: Preset = Preset {
    id: "liquid",
    display_name: "Liquid",
    settings: &LIQUID_SETTINGS,
    setup: liquid_setup,
};

/// Current radius of each blob point, eased toward its target.
#[derive(Debug, Default)]
struct LiquidBlob {
    radii: [f64; LIQUID_POINTS],
}

fn liquid_setup(_: &Assets, store: &mut PersistentStore) -> FrameRenderer {
    store.insert(LIQUID.id, LiquidBlob::default());
    Box::new(draw_liquid)
}

fn draw_liquid(surface: &mut dyn Surface, frame: &Frame<'_>, store: &mut PersistentStore) {
    let cfg = frame.settings(LIQUID.id);
    let blob = store.get_or_insert_with(LIQUID.id, LiquidBlob::default);
    let (cx, cy) = center(surface);
    let base_radius = min_side(surface) * 0.2;
    let smoothness = cfg.number("smoothness");
    let elasticity = cfg.number("elasticity");
    clear(surface);

    surface.set_fill(cfg.text("color").into());
    surface.begin_path();

    for (i, radius) in blob.radii.iter_mut().enumerate() {
        let audio = frame.level(i * 4) * frame.sensitivity();
        let target = base_radius * (1.0 + audio * elasticity);
        *radius += (target - *radius) * smoothness;

        let angle = i as f64 / LIQUID_POINTS as f64 * TAU;
        let x = cx + angle.cos() * *radius;
        let y = cy + angle.sin() * *radius;
        if i == 0 {
            surface.move_to(x, y);
        } else {
            surface.quadratic_curve_to(
                cx + (angle - 0.1).cos() * *radius * 0.9,
                cy + (angle - 0.1).sin() * *radius * 0.9,
                x,
                y,
            );
        }
    }

    surface.close_path();
    surface.fill();
}

// ── waveRings ───────────────────────────────────────────────────────────────

const WAVE_RINGS_SETTINGS: [SettingSpec; 3] = [
    SettingSpec::range("ringCount", "Ring Count", 3.0, 20.0, 8.0),
    SettingSpec::range("ringThickness", "Thickness", 1.0, 20.0, 3.0),
    SettingSpec::color("color", "Color", "#00ff9d"),
];

pub const WAVE_RINGS: Preset = Preset {
    id: "waveRings",
    display_name: "Wave Rings",
    settings: &WAVE_RINGS_SETTINGS,
    setup: wave_rings_setup,
};

fn wave_rings_setup(_: &Assets, _: &mut PersistentStore) -> FrameRenderer {
    Box::new(draw_wave_rings)
}

fn draw_wave_rings(surface: &mut dyn Surface, frame: &Frame<'_>, _: &mut PersistentStore) {
    let cfg = frame.settings(WAVE_RINGS.id);
    let (cx, cy) = center(surface);
    let max_radius = min_side(surface) * 0.4;
    clear(surface);

    surface.set_stroke(cfg.text("color").into());
    surface.set_line_width(cfg.number("ringThickness"));

    let count = cfg.count("ringCount");
    for i in 0..count {
        let amplitude = frame.level_at(i, count);
        let ring_radius =
            max_radius * (i as f64 / count as f64) * (1.0 + amplitude * frame.sensitivity());

        surface.begin_path();
        surface.arc(cx, cy, ring_radius, 0.0, TAU);
        surface.stroke();
    }
}

// ── starburst ───────────────────────────────────────────────────────────────

const STARBURST_SETTINGS: [SettingSpec; 4] = [
    SettingSpec::range("rayCount", "Ray Count", 32.0, 512.0, 128.0),
    SettingSpec::range("maxLength", "Max Length", 50.0, 300.0, 200.0),
    SettingSpec::color("baseColor", "Base Color", "#00ff9d"),
    SettingSpec::stepped("pulseResponse", "Pulse Response", 0.5, 3.0, 0.1, 1.5),
];

pub const STARBURST: Preset = Preset {
    id: "starburst",
    display_name: "Starburst",
    settings: &STARBURST_SETTINGS,
    setup: starburst_setup,
};

fn starburst_setup(_: &Assets, _: &mut PersistentStore) -> FrameRenderer {
    Box::new(draw_starburst)
}

fn draw_starburst(surface: &mut dyn Surface, frame: &Frame<'_>, _: &mut PersistentStore) {
    let cfg = frame.settings(STARBURST.id);
    let (cx, cy) = center(surface);
    let max_length = cfg.number("maxLength");
    let response = cfg.number("pulseResponse");
    clear(surface);

    surface.set_stroke(cfg.text("baseColor").into());

    let count = cfg.count("rayCount");
    for i in 0..count {
        let intensity = frame.level_at(i, count) * response * frame.sensitivity();
        let angle = i as f64 / count as f64 * TAU;

        surface.begin_path();
        surface.move_to(cx, cy);
        surface.line_to(
            cx + angle.cos() * max_length * intensity,
            cy + angle.sin() * max_length * intensity,
        );
        surface.stroke();
    }
}

// ── harmonicRings ───────────────────────────────────────────────────────────

const HARMONIC_STEP: f64 = 0.01;

const HARMONIC_RINGS_SETTINGS: [SettingSpec; 4] = [
    SettingSpec::range("ringCount", "Rings", 3.0, 20.0, 8.0),
    SettingSpec::range("maxRadius", "Max Size", 50.0, 400.0, 200.0),
    SettingSpec::range("waveCount", "Waves", 1.0, 10.0, 3.0),
    SettingSpec::color("color", "Color", "#00ff9d"),
];

pub const HARMONIC_RINGS: Preset = Preset {
    id: "harmonicRings",
    display_name: "Harmonic Rings",
    settings: &HARMONIC_RINGS_SETTINGS,
    setup: harmonic_rings_setup,
};

fn harmonic_rings_setup(_: &Assets, _: &mut PersistentStore) -> FrameRenderer {
    Box::new(draw_harmonic_rings)
}

fn draw_harmonic_rings(surface: &mut dyn Surface, frame: &Frame<'_>, _: &mut PersistentStore) {
    let cfg = frame.settings(HARMONIC_RINGS.id);
    let (cx, cy) = center(surface);
    let max_radius = cfg.number("maxRadius");
    let waves = cfg.number("waveCount");
    let steps = (TAU / HARMONIC_STEP).ceil() as usize;
    clear(surface);

    surface.set_stroke(cfg.text("color").into());

    let count = cfg.count("ringCount");
    for i in 0..count {
        let ring_size = max_radius * (i as f64 / count as f64);
        let amplitude = frame.level_at(i, count) * frame.sensitivity();

        surface.begin_path();
        for step in 0..steps {
            let a = step as f64 * HARMONIC_STEP;
            let ripple = (a * waves).sin() * ring_size * 0.2 * amplitude;
            surface.line_to(cx + a.cos() * (ring_size + ripple), cy + a.sin() * (ring_size + ripple));
        }
        surface.close_path();
        surface.stroke();
    }
}

// ── spectralFlower ──────────────────────────────────────────────────────────

const SPECTRAL_FLOWER_SETTINGS: [SettingSpec; 4] = [
    SettingSpec::range("petalCount", "Petals", 4.0, 32.0, 8.0),
    SettingSpec::stepped("bloomFactor", "Bloom", 0.5, 3.0, 0.1, 1.5),
    SettingSpec::color("innerColor", "Inner Color", "#ff00ff"),
    SettingSpec::color("outerColor", "Outer Color", "#00ff9d"),
];

pub const SPECTRAL_FLOWER: Preset = Preset {
    id: "spectralFlower",
    display_name: "Spectral Flower",
    settings: &SPECTRAL_FLOWER_SETTINGS,
    setup: spectral_flower_setup,
};

fn spectral_flower_setup(_: &Assets, _: &mut PersistentStore) -> FrameRenderer {
    Box::new(draw_spectral_flower)
}

fn draw_spectral_flower(surface: &mut dyn Surface, frame: &Frame<'_>, _: &mut PersistentStore) {
    let cfg = frame.settings(SPECTRAL_FLOWER.id);
    let (cx, cy) = center(surface);
    let max_radius = min_side(surface) * 0.4;
    let bloom = cfg.number("bloomFactor");
    clear(surface);

    surface.set_fill(
        Gradient::radial(cx, cy, 10.0, cx, cy, max_radius)
            .stop(0.0, cfg.text("innerColor"))
            .stop(1.0, cfg.text("outerColor"))
            .into(),
    );
    surface.begin_path();

    let count = cfg.count("petalCount");
    for i in 0..count {
        let reach = max_radius * frame.level_at(i, count) * frame.sensitivity() * bloom;
        let angle = i as f64 / count as f64 * TAU;
        let next = ((i + 1) % count) as f64 / count as f64 * TAU;

        if i == 0 {
            surface.move_to(cx + angle.cos() * reach, cy + angle.sin() * reach);
        }
        // Control points sit 30% further out than the petal tips.
        surface.bezier_curve_to(
            cx + angle.cos() * reach * 1.3,
            cy + angle.sin() * reach * 1.3,
            cx + next.cos() * reach * 1.3,
            cy + next.sin() * reach * 1.3,
            cx + next.cos() * reach,
            cy + next.sin() * reach,
        );
    }

    surface.close_path();
    surface.fill();
}
