//! Built-in presets.
//!
//! Each preset reads its settings from the frame's config on every call and
//! keeps any frame-to-frame state in the session's [`PersistentStore`].
//!
//! [`PersistentStore`]: super::store::PersistentStore

mod bars;
mod geometry;
mod particles;
mod radial;
mod title;
mod vaporwave;

use super::preset::Preset;
use super::surface::Surface;

pub use bars::{FIRE_MATRIX, GRADIENT_BARS, WAVEFORM};
pub use geometry::{GEOMETRY_PULSE, SPHERE, VECTOR_FIELD};
pub use particles::{GRAVITY_VORTEX, NEON_TRAILS};
pub use radial::{CIRCULAR, HARMONIC_RINGS, LIQUID, SPECTRAL_FLOWER, STARBURST, WAVE_RINGS};
pub use title::TITLE_CARD;
pub use vaporwave::VAPORWAVE_DRIVE;

/// Display order of the built-in catalog.
pub const ALL: &[Preset] = &[
    WAVEFORM,
    CIRCULAR,
    LIQUID,
    GRADIENT_BARS,
    WAVE_RINGS,
    SPHERE,
    STARBURST,
    FIRE_MATRIX,
    GRAVITY_VORTEX,
    HARMONIC_RINGS,
    SPECTRAL_FLOWER,
    VECTOR_FIELD,
    NEON_TRAILS,
    GEOMETRY_PULSE,
    VAPORWAVE_DRIVE,
    TITLE_CARD,
];

const TAU: f64 = std::f64::consts::TAU;

fn clear(surface: &mut dyn Surface) {
    let (w, h) = (surface.width(), surface.height());
    surface.clear_rect(0.0, 0.0, w, h);
}

fn center(surface: &dyn Surface) -> (f64, f64) {
    (surface.width() / 2.0, surface.height() / 2.0)
}

fn min_side(surface: &dyn Surface) -> f64 {
    surface.width().min(surface.height())
}

fn hsl(hue: f64, saturation: f64, lightness: f64) -> String {
    format!("hsl({hue}, {saturation}%, {lightness}%)")
}

fn hsla(hue: f64, saturation: f64, lightness: f64, alpha: f64) -> String {
    format!("hsla({hue}, {saturation}%, {lightness}%, {alpha})")
}
