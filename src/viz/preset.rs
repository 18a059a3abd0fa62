use super::assets::Assets;
use super::config::{Config, PresetConfig, SettingSpec};
use super::store::PersistentStore;
use super::surface::Surface;

/// Everything a renderer reads for one frame. Injected by the host; the
/// preset owns none of it.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Frequency magnitudes, one byte per bin.
    pub audio: &'a [u8],
    pub config: &'a Config,
    pub assets: &'a Assets,
    /// Wall-clock seconds.
    pub time: f64,
}

impl<'a> Frame<'a> {
    pub fn settings(&self, preset: &'a str) -> PresetConfig<'a> {
        self.config.preset(preset)
    }

    pub fn sensitivity(&self) -> f64 {
        self.config.sensitivity()
    }

    /// Byte at `index`, 0 past the end of the buffer.
    pub fn sample(&self, index: usize) -> f64 {
        self.audio.get(index).copied().map_or(0.0, f64::from)
    }

    /// Normalized amplitude in `[0, 1]` at `index`.
    pub fn level(&self, index: usize) -> f64 {
        self.sample(index) / 255.0
    }

    /// Normalized amplitude of the bin a share `i / of` into the buffer.
    pub fn level_at(&self, i: usize, of: usize) -> f64 {
        self.level(spread_index(i, of, self.audio.len()))
    }

    /// Loudest normalized bin.
    pub fn peak(&self) -> f64 {
        self.audio.iter().copied().max().map_or(0.0, |v| f64::from(v) / 255.0)
    }
}

/// `floor(i * len / of)`, the bin picked for the `i`-th of `of` items.
pub fn spread_index(i: usize, of: usize, len: usize) -> usize {
    if of == 0 {
        return 0;
    }
    (i as f64 * (len as f64 / of as f64)).floor() as usize
}

/// One per-frame draw of an active preset.
pub type FrameRenderer = Box<dyn FnMut(&mut dyn Surface, &Frame<'_>, &mut PersistentStore)>;

/// Setup phase: runs once per activation.
pub type Setup = fn(&Assets, &mut PersistentStore) -> FrameRenderer;

/// A named, independently configurable audio-reactive routine.
#[derive(Clone, Copy)]
pub struct Preset {
    pub id: &'static str,
    pub display_name: &'static str,
    pub settings: &'static [SettingSpec],
    pub setup: Setup,
}

impl std::fmt::Debug for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preset")
            .field("id", &self.id)
            .field("display_name", &self.display_name)
            .field("settings", &self.settings.len())
            .finish()
    }
}
