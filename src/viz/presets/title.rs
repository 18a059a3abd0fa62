//! A caption that swells with the low end, drawn with a loaded font over an
//! optional backdrop image.

use super::{center, clear};
use crate::viz::assets::{AssetKind, Assets};
use crate::viz::config::SettingSpec;
use crate::viz::preset::{Frame, FrameRenderer, Preset};
use crate::viz::store::PersistentStore;
use crate::viz::surface::{Surface, TextAlign};

/// Bins averaged into the bass envelope.
const BASS_BINS: usize = 8;
/// Per-frame decay of the envelope when the input drops.
const ENVELOPE_DECAY: f64 = 0.9;

const SETTINGS: [SettingSpec; 9] = [
    SettingSpec::text("label", "Label", "microviz"),
    SettingSpec::file("font", "Font", AssetKind::Font, "display"),
    SettingSpec::range("fontSize", "Font Size", 12.0, 200.0, 72.0),
    SettingSpec::stepped("pulse", "Pulse", 0.0, 2.0, 0.1, 0.6),
    SettingSpec::color("color", "Color", "#00ff9d"),
    SettingSpec::checkbox("glow", "Glow", true),
    SettingSpec::checkbox("showBackdrop", "Backdrop", false),
    SettingSpec::file("backdrop", "Backdrop Image", AssetKind::Image, "backdrop"),
    SettingSpec::stepped("backdropAlpha", "Backdrop Opacity", 0.0, 1.0, 0.05, 0.4),
];

pub const TITLE_CARD: Preset = Preset {
    id: "titleCard",
    display_name: "Title Card",
    settings: &SETTINGS,
    setup: title_setup,
};

struct Envelope(f64);

fn title_setup(assets: &Assets, store: &mut PersistentStore) -> FrameRenderer {
    log::debug!("title card font: {}", assets.font_family("display"));
    store.insert(TITLE_CARD.id, Envelope(0.0));
    Box::new(draw_title)
}

fn draw_title(surface: &mut dyn Surface, frame: &Frame<'_>, store: &mut PersistentStore) {
    let cfg = frame.settings(TITLE_CARD.id);
    let envelope = store.get_or_insert_with(TITLE_CARD.id, || Envelope(0.0));
    let (w, h) = (surface.width(), surface.height());
    let (cx, cy) = center(surface);
    clear(surface);

    let bass = (0..BASS_BINS).map(|i| frame.level(i)).sum::<f64>() / BASS_BINS as f64;
    envelope.0 = (bass * frame.sensitivity()).max(envelope.0 * ENVELOPE_DECAY);
    let level = envelope.0;

    if cfg.flag("showBackdrop") {
        if let Some(image) = frame.assets.image(&cfg.text("backdrop")) {
            surface.set_global_alpha(cfg.number("backdropAlpha"));
            surface.draw_image(image, 0.0, 0.0, w, h);
            surface.set_global_alpha(1.0);
        }
    }

    let size = cfg.number("fontSize") * (1.0 + level * cfg.number("pulse"));
    let family = frame.assets.font_family(&cfg.text("font"));
    let color = cfg.text("color");

    surface.set_font(&format!("bold {}px {}", size.round(), family));
    surface.set_text_align(TextAlign::Center);
    if cfg.flag("glow") {
        surface.set_shadow(4.0 + 20.0 * level, &color);
    }
    surface.set_fill(color.into());
    surface.fill_text(&cfg.text("label"), cx, cy + size / 3.0);
    surface.set_shadow(0.0, "transparent");
}
