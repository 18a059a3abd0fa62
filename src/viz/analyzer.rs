//! Turns raw audio samples into the byte spectrum presets consume.

use std::fmt;
use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use serde::{Deserialize, Serialize};

/// FFT sizes an `AnalyserNode` accepts: powers of two in this range.
pub const FFT_SIZE_MIN: usize = 32;
pub const FFT_SIZE_MAX: usize = 32768;
pub const BARS_MAX: usize = 1024;
pub const SMOOTHING_MAX: f64 = 0.99;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalyzerSettings {
    pub fft_size: usize,
    /// Output bins per frame.
    pub bars: usize,
    /// Weight of the previous frame in `[0, 1)`.
    pub smoothing: f64,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            fft_size: 1024,
            bars: 300,
            smoothing: 0.8,
        }
    }
}

impl AnalyzerSettings {
    /// Snap to the nearest usable settings. The FFT size is rounded up to a
    /// power of two; a non-finite smoothing becomes 0.
    pub fn sanitized(self) -> Self {
        Self {
            fft_size: self
                .fft_size
                .clamp(FFT_SIZE_MIN, FFT_SIZE_MAX)
                .next_power_of_two(),
            bars: self.bars.clamp(1, BARS_MAX),
            smoothing: if self.smoothing.is_finite() {
                self.smoothing.clamp(0.0, SMOOTHING_MAX)
            } else {
                0.0
            },
        }
    }
}

/// Every FFT size [`AnalyzerSettings::sanitized`] can produce, ascending.
pub fn fft_sizes() -> impl Iterator<Item = usize> {
    (FFT_SIZE_MIN.trailing_zeros()..=FFT_SIZE_MAX.trailing_zeros()).map(|shift| 1 << shift)
}

/// FFT magnitude spectrum, normalized per frame, resampled to a fixed number
/// of bars and exponentially smoothed between frames.
pub struct SpectrumAnalyzer {
    settings: AnalyzerSettings,
    fft: Arc<dyn Fft<f32>>,
    buffer: Vec<Complex<f32>>,
    smoothed: Vec<f64>,
    bytes: Vec<u8>,
}

impl fmt::Debug for SpectrumAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpectrumAnalyzer")
            .field("settings", &self.settings)
            .finish()
    }
}

impl Default for SpectrumAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerSettings::default())
    }
}

impl SpectrumAnalyzer {
    pub fn new(settings: AnalyzerSettings) -> Self {
        let settings = settings.sanitized();
        Self {
            settings,
            fft: plan(settings.fft_size),
            buffer: vec![Complex::new(0.0, 0.0); settings.fft_size],
            smoothed: vec![0.0; settings.bars],
            bytes: vec![0; settings.bars],
        }
    }

    /// Switch settings while running. A new FFT size re-plans the transform;
    /// a new bar count restarts smoothing from silence. Returns what was
    /// applied.
    pub fn reconfigure(&mut self, settings: AnalyzerSettings) -> AnalyzerSettings {
        let settings = settings.sanitized();
        if settings.fft_size != self.settings.fft_size {
            self.fft = plan(settings.fft_size);
            self.buffer = vec![Complex::new(0.0, 0.0); settings.fft_size];
        }
        if settings.bars != self.settings.bars {
            self.smoothed = vec![0.0; settings.bars];
            self.bytes = vec![0; settings.bars];
        }
        if settings != self.settings {
            log::debug!("analyzer reconfigured: {settings:?}");
        }
        self.settings = settings;
        settings
    }

    pub fn settings(&self) -> AnalyzerSettings {
        self.settings
    }

    /// Latest output without feeding new samples.
    pub fn spectrum(&self) -> &[u8] {
        &self.bytes
    }

    /// Feed one block of mono samples; shorter input is zero-padded and
    /// longer input truncated to the FFT size.
    pub fn process(&mut self, samples: &[f32]) -> &[u8] {
        for (i, slot) in self.buffer.iter_mut().enumerate() {
            let sample = samples.get(i).copied().unwrap_or(0.0);
            *slot = Complex::new(if sample.is_finite() { sample } else { 0.0 }, 0.0);
        }
        self.fft.process(&mut self.buffer);

        let half = self.settings.fft_size / 2;
        let magnitudes: Vec<f64> = self.buffer[..half]
            .iter()
            .map(|c| f64::from(c.norm()))
            .collect();
        let max = magnitudes.iter().copied().fold(0.0, f64::max);

        let k = self.settings.smoothing;
        let bars = self.settings.bars;
        for (bar, (smoothed, byte)) in self.smoothed.iter_mut().zip(&mut self.bytes).enumerate() {
            let raw = if max > 0.0 {
                magnitudes[linspace_index(bar, bars, half)] / max
            } else {
                0.0
            };
            let raw = if raw.is_finite() { raw } else { 0.0 };
            *smoothed = k * *smoothed + (1.0 - k) * raw;
            *byte = (*smoothed * 255.0).round().clamp(0.0, 255.0) as u8;
        }

        &self.bytes
    }

    pub fn reset(&mut self) {
        self.smoothed.iter_mut().for_each(|s| *s = 0.0);
        self.bytes.iter_mut().for_each(|b| *b = 0);
    }
}

fn plan(fft_size: usize) -> Arc<dyn Fft<f32>> {
    let mut planner = FftPlanner::new();
    planner.plan_fft_forward(fft_size)
}

/// Index of the `i`-th of `count` evenly spaced points over `0..len`,
/// endpoints included, truncated toward zero.
fn linspace_index(i: usize, count: usize, len: usize) -> usize {
    if count <= 1 || len == 0 {
        return 0;
    }
    let last = (len - 1) as f64;
    ((i as f64 * last / (count - 1) as f64) as usize).min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_hits_both_ends() {
        assert_eq!(linspace_index(0, 300, 512), 0);
        assert_eq!(linspace_index(299, 300, 512), 511);
        assert_eq!(linspace_index(0, 1, 512), 0);
    }

    #[test]
    fn bad_settings_are_tamed() {
        let analyzer = SpectrumAnalyzer::new(AnalyzerSettings {
            fft_size: 0,
            bars: 0,
            smoothing: f64::NAN,
        });
        let settings = analyzer.settings();
        assert_eq!(settings.fft_size, FFT_SIZE_MIN);
        assert_eq!(settings.bars, 1);
        assert_eq!(settings.smoothing, 0.0);
    }

    #[test]
    fn fft_sizes_cover_the_analyser_range() {
        let sizes: Vec<usize> = fft_sizes().collect();
        assert_eq!(sizes.first(), Some(&FFT_SIZE_MIN));
        assert_eq!(sizes.last(), Some(&FFT_SIZE_MAX));
        assert_eq!(sizes.len(), 11);
    }
}
