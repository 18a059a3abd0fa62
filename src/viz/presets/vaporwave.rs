//! Retro perspective road with lane bars, a scrolling grid and a striped sun.

use super::{clear, TAU};
use crate::viz::assets::Assets;
use crate::viz::config::SettingSpec;
use crate::viz::preset::{Frame, FrameRenderer, Preset};
use crate::viz::store::PersistentStore;
use crate::viz::surface::{Gradient, Surface};

const SETTINGS: [SettingSpec; 14] = [
    SettingSpec::color("gridColor", "Grid Color", "#a600ff"),
    SettingSpec::color("sunColorTop", "Sun Gradient Top", "#ffff00"),
    SettingSpec::color("sunColorBottom", "Sun Gradient Bottom", "#ff6600"),
    SettingSpec::color("barColor", "Bar Color", "#6400c8"),
    SettingSpec::color("bgTop", "BG Gradient Top", "#000000"),
    SettingSpec::color("bgBottom", "BG Gradient Bottom", "#00007a"),
    SettingSpec::range("horizontalLines", "Horizontal Bars", 0.0, 60.0, 2.0),
    SettingSpec::range("columns", "Columns", 1.0, 30.0, 9.0),
    SettingSpec::stepped("lineSpeed", "Horizontal Bar Speed", 0.1, 5.0, 0.1, 1.7),
    SettingSpec::select("realisticDepth", "Realistic Depth", &["on", "off"], "on"),
    SettingSpec::stepped(
        "speedMultiplier",
        "Realistic Depth Multiplier",
        1.0,
        6.0,
        0.05,
        3.0,
    ),
    SettingSpec::stepped("RoadWidth", "Road Width", 0.01, 1.0, 0.01, 1.0),
    SettingSpec::range("sunStripes", "Sun Stripes", 1.0, 50.0, 9.0),
    SettingSpec::range("sunStripeThickness", "Max Stripe Thickness", 1.0, 20.0, 8.0),
];

pub const VAPORWAVE_DRIVE: Preset = Preset {
    id: "vaporwaveDrive",
    display_name: "Vaporwave Drive",
    settings: &SETTINGS,
    setup: vaporwave_setup,
};

fn vaporwave_setup(_: &Assets, _: &mut PersistentStore) -> FrameRenderer {
    Box::new(draw_vaporwave)
}

fn draw_vaporwave(surface: &mut dyn Surface, frame: &Frame<'_>, _: &mut PersistentStore) {
    let cfg = frame.settings(VAPORWAVE_DRIVE.id);
    let (w, h) = (surface.width(), surface.height());
    clear(surface);
    if w <= 0.0 || h <= 0.0 {
        return;
    }

    let road_half = w / 2.0 * cfg.number("RoadWidth");
    let horizon = h / 2.0;
    let depth = h - horizon;
    let columns = cfg.count("columns");

    surface.set_fill(
        Gradient::linear(0.0, 0.0, 0.0, h)
            .stop(0.0, cfg.text("bgTop"))
            .stop(1.0, cfg.text("bgBottom"))
            .into(),
    );
    surface.fill_rect(0.0, 0.0, w, h);

    // Bars inside the road lanes, converging on the horizon centre.
    surface.set_fill(cfg.text("barColor").into());
    let lane_x = |i: usize| w / 2.0 - road_half + i as f64 / columns as f64 * (road_half * 2.0);
    for i in 0..columns {
        let bin = if frame.audio.is_empty() { 0 } else { i % frame.audio.len() };
        let bar_height = frame.level(bin) * depth * frame.sensitivity();

        let (bottom_left, bottom_right) = (lane_x(i), lane_x(i + 1));
        let y_top = h - bar_height;
        let t = (h - y_top) / depth;
        let left = bottom_left + t * (w / 2.0 - bottom_left);
        let right = bottom_right + t * (w / 2.0 - bottom_right);

        surface.begin_path();
        surface.move_to(bottom_left, h);
        surface.line_to(bottom_right, h);
        surface.line_to(right, y_top);
        surface.line_to(left, y_top);
        surface.close_path();
        surface.fill();
    }

    surface.set_stroke(cfg.text("gridColor").into());
    surface.set_line_width(2.0);

    surface.begin_path();
    for i in 0..=columns {
        surface.move_to(lane_x(i), h);
        surface.line_to(w / 2.0, horizon);
    }
    surface.stroke();

    // Horizontal lines scroll toward the viewer.
    let lines = cfg.number("horizontalLines").floor();
    let realistic = cfg.text("realisticDepth") == "on";
    let exponent = cfg.number("speedMultiplier");
    surface.begin_path();
    if lines >= 1.0 {
        let travel = frame.time * cfg.number("lineSpeed");
        for i in 0..lines as usize {
            let norm = ((i as f64 + travel) % lines) / lines;
            let y = if realistic {
                horizon + depth * norm.powf(exponent)
            } else {
                horizon + norm * depth
            };
            let t = (y - horizon) / depth;
            surface.move_to((1.0 - t) * (w / 2.0) + t * (w / 2.0 - road_half), y);
            surface.line_to((1.0 - t) * (w / 2.0) + t * (w / 2.0 + road_half), y);
        }
    }
    surface.stroke();

    let (sun_x, sun_y, sun_r) = (w / 2.0, h / 3.0, h / 6.0);
    surface.set_fill(
        Gradient::linear(0.0, sun_y - sun_r, 0.0, sun_y + sun_r)
            .stop(0.0, cfg.text("sunColorTop"))
            .stop(1.0, cfg.text("sunColorBottom"))
            .into(),
    );
    surface.begin_path();
    surface.arc(sun_x, sun_y, sun_r, 0.0, TAU);
    surface.fill();

    // Cut stripes out of the sun, thinning toward the top.
    surface.save();
    surface.begin_path();
    surface.arc(sun_x, sun_y, sun_r, 0.0, TAU);
    surface.clip();
    let thickness = cfg.number("sunStripeThickness");
    for i in 0..cfg.count("sunStripes") {
        let stripe = thickness - i as f64;
        if stripe <= 0.0 {
            break;
        }
        let y = sun_y + sun_r - i as f64 * thickness * 2.0;
        surface.clear_rect(sun_x - sun_r, y, sun_r * 2.0, stripe);
    }
    surface.restore();
}
