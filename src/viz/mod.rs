//! Preset-driven audio visualizer core. Nothing in here touches the browser;
//! the host supplies a [`Surface`], the audio bytes and the clock.

mod analyzer;
mod assets;
mod catalog;
mod config;
mod preset;
pub mod presets;
mod session;
mod store;
mod surface;

pub use analyzer::{
    fft_sizes, AnalyzerSettings, SpectrumAnalyzer, BARS_MAX, FFT_SIZE_MAX, FFT_SIZE_MIN,
    SMOOTHING_MAX,
};
pub use assets::{AssetDecl, AssetHandle, AssetKind, Assets, ImageHandle, BUILTIN_ASSETS, FALLBACK_FONT};
pub use catalog::Catalog;
pub use config::{
    Config, ConfigSnapshot, Control, Master, PresetConfig, SettingSpec, SettingValue,
    ANALYZER_BARS, ANALYZER_FFT_SIZE, ANALYZER_SMOOTHING, SENSITIVITY_DEFAULT, SENSITIVITY_MAX, SENSITIVITY_MIN,
};
pub use preset::{spread_index, Frame, FrameRenderer, Preset, Setup};
pub use session::VisualizerSession;
pub use store::PersistentStore;
pub use surface::{ColorStop, Composite, Gradient, Op, Paint, Recorder, Surface, TextAlign};
