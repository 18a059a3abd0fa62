use std::collections::VecDeque;

use fastrand::Rng;

use super::{center, clear, hsla, min_side, TAU};
use crate::viz::assets::Assets;
use crate::viz::config::SettingSpec;
use crate::viz::preset::{Frame, FrameRenderer, Preset};
use crate::viz::store::PersistentStore;
use crate::viz::surface::{Composite, Surface};

// ── gravityVortex ───────────────────────────────────────────────────────────

const GRAVITY_VORTEX_SETTINGS: [SettingSpec; 3] = [
    SettingSpec::range("particleCount", "Particles", 50.0, 5000.0, 1000.0),
    SettingSpec::stepped("rotationSpeed", "Rotation Speed", 0.1, 5.0, 0.1, 1.5),
    SettingSpec::color("color", "Color", "#00ffff"),
];

pub const GRAVITY_VORTEX: Preset = Preset {
    id: "gravityVortex",
    display_name: "Gravity Vortex",
    settings: &GRAVITY_VORTEX_SETTINGS,
    setup: gravity_vortex_setup,
};

#[derive(Debug, Clone, Copy)]
struct Particle {
    angle: f64,
    radius: f64,
    speed: f64,
}

struct Vortex {
    particles: Vec<Particle>,
    rotation: f64,
    rng: Rng,
}

impl Vortex {
    fn new() -> Self {
        Self {
            particles: Vec::new(),
            rotation: 0.0,
            rng: Rng::new(),
        }
    }

    /// Grow or shrink to `count` particles. New particles depend on the
    /// current surface size, so this runs at render time.
    fn resize(&mut self, count: usize, base_radius: f64) {
        if self.particles.len() > count {
            self.particles.truncate(count);
            return;
        }
        let rng = &mut self.rng;
        let missing = count - self.particles.len();
        self.particles.extend((0..missing).map(|_| Particle {
            angle: TAU * rng.f64(),
            radius: base_radius * rng.f64(),
            speed: 0.5 + rng.f64() * 2.0,
        }));
    }
}

fn gravity_vortex_setup(_: &Assets, store: &mut PersistentStore) -> FrameRenderer {
    store.insert(GRAVITY_VORTEX.id, Vortex::new());
    Box::new(draw_gravity_vortex)
}

fn draw_gravity_vortex(surface: &mut dyn Surface, frame: &Frame<'_>, store: &mut PersistentStore) {
    let cfg = frame.settings(GRAVITY_VORTEX.id);
    let vortex = store.get_or_insert_with(GRAVITY_VORTEX.id, Vortex::new);
    let (cx, cy) = center(surface);
    let base_radius = min_side(surface) * 0.3;
    let count = cfg.count("particleCount");
    let speed = cfg.number("rotationSpeed");
    clear(surface);

    vortex.resize(count, base_radius);
    vortex.rotation += speed * 0.01;
    let peak = frame.peak() * 3.0;
    let rotation = vortex.rotation;

    surface.set_fill(cfg.text("color").into());

    for (i, p) in vortex.particles.iter_mut().enumerate() {
        let influence = frame.level_at(i, count);
        p.radius = (base_radius * (1.0 - 0.5 * influence * frame.sensitivity())).max(10.0);
        p.angle = (p.angle + (0.01 * p.speed * peak * speed) % TAU) % TAU;

        let x = cx + (p.angle + rotation).cos() * p.radius;
        let y = cy + (p.angle + rotation).sin() * p.radius;

        surface.begin_path();
        surface.arc(x, y, 1.0 + influence * 3.0, 0.0, TAU);
        surface.fill();
    }
}

// ── neonTrails ──────────────────────────────────────────────────────────────

const NEON_TRAILS_SETTINGS: [SettingSpec; 4] = [
    SettingSpec::range("trailLength", "Trail Length", 10.0, 100.0, 30.0),
    SettingSpec::range("dotCount", "Dot Count", 10.0, 100.0, 40.0),
    SettingSpec::range("baseHue", "Base Hue", 0.0, 359.0, 120.0),
    SettingSpec::stepped("spread", "Spread", 0.5, 5.0, 0.1, 1.5),
];

pub const NEON_TRAILS: Preset = Preset {
    id: "neonTrails",
    display_name: "Neon Trails",
    settings: &NEON_TRAILS_SETTINGS,
    setup: neon_trails_setup,
};

/// Position history per dot, newest first.
#[derive(Default)]
struct Trails {
    dots: Vec<VecDeque<(f64, f64)>>,
}

fn neon_trails_setup(_: &Assets, store: &mut PersistentStore) -> FrameRenderer {
    store.insert(NEON_TRAILS.id, Trails::default());
    Box::new(draw_neon_trails)
}

fn draw_neon_trails(surface: &mut dyn Surface, frame: &Frame<'_>, store: &mut PersistentStore) {
    let cfg = frame.settings(NEON_TRAILS.id);
    let trails = store.get_or_insert_with(NEON_TRAILS.id, Trails::default);
    let (cx, cy) = center(surface);
    let base_radius = min_side(surface) * 0.4;
    let trail_length = cfg.count("trailLength");
    let dot_count = cfg.count("dotCount");
    let spread = cfg.number("spread");
    let base_hue = cfg.number("baseHue");
    clear(surface);

    trails.dots.resize_with(dot_count, VecDeque::new);

    for (i, history) in trails.dots.iter_mut().enumerate() {
        let angle = frame.time
            + i as f64 / dot_count as f64 * TAU
            + frame.level(i) * frame.sensitivity();
        let radius = base_radius * (1.0 + frame.level(i * 3 / 2) * spread);
        let head = (cx + angle.cos() * radius, cy + angle.sin() * radius);

        history.push_front(head);
        // Pad with the oldest point so a new or lengthened trail starts collapsed.
        let tail = history.back().copied().unwrap_or(head);
        history.resize(trail_length, tail);
    }

    surface.set_composite(Composite::Lighten);

    for (i, history) in trails.dots.iter().enumerate() {
        let hue = (base_hue + i as f64 * 5.0) % 360.0;
        for (j, (from, to)) in history.iter().zip(history.iter().skip(1)).enumerate() {
            let alpha = 1.0 - j as f64 / trail_length as f64;
            surface.set_stroke(hsla(hue, 100.0, 50.0, alpha * 0.7).into());
            surface.set_line_width(3.0 * alpha);
            surface.begin_path();
            surface.move_to(from.0, from.1);
            surface.line_to(to.0, to.1);
            surface.stroke();
        }
    }

    surface.set_composite(Composite::SourceOver);
}
