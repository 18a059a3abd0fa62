//! Preset settings declarations and the live configuration object.
//!
//! Every write into [`Config`] passes through [`Config::set`], which clamps
//! ranges and validates options, so a render call never sees a value outside
//! its declaration.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::analyzer::AnalyzerSettings;
use super::assets::AssetKind;
use crate::error::{Result, VizError};

/// Shared intensity multiplier bounds.
pub const SENSITIVITY_MIN: f64 = 0.1;
pub const SENSITIVITY_MAX: f64 = 5.0;
pub const SENSITIVITY_DEFAULT: f64 = 1.0;

/// Ids of the analyzer controls shown next to the sensitivity slider.
pub const ANALYZER_FFT_SIZE: &str = "analyzer.fftSize";
pub const ANALYZER_BARS: &str = "analyzer.bars";
pub const ANALYZER_SMOOTHING: &str = "analyzer.smoothing";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Control {
    Range {
        min: f64,
        max: f64,
        step: f64,
        default: f64,
    },
    Color {
        default: &'static str,
    },
    Select {
        options: &'static [&'static str],
        default: &'static str,
    },
    Checkbox {
        default: bool,
    },
    Text {
        default: &'static str,
    },
    /// Reference to an asset id of the given kind.
    File {
        kind: AssetKind,
        default: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettingSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub control: Control,
}

impl SettingSpec {
    pub const fn range(id: &'static str, label: &'static str, min: f64, max: f64, default: f64) -> Self {
        Self::stepped(id, label, min, max, 1.0, default)
    }

    pub const fn stepped(
        id: &'static str,
        label: &'static str,
        min: f64,
        max: f64,
        step: f64,
        default: f64,
    ) -> Self {
        Self {
            id,
            label,
            control: Control::Range {
                min,
                max,
                step,
                default,
            },
        }
    }

    pub const fn color(id: &'static str, label: &'static str, default: &'static str) -> Self {
        Self {
            id,
            label,
            control: Control::Color { default },
        }
    }

    pub const fn select(
        id: &'static str,
        label: &'static str,
        options: &'static [&'static str],
        default: &'static str,
    ) -> Self {
        Self {
            id,
            label,
            control: Control::Select { options, default },
        }
    }

    pub const fn checkbox(id: &'static str, label: &'static str, default: bool) -> Self {
        Self {
            id,
            label,
            control: Control::Checkbox { default },
        }
    }

    pub const fn text(id: &'static str, label: &'static str, default: &'static str) -> Self {
        Self {
            id,
            label,
            control: Control::Text { default },
        }
    }

    pub const fn file(
        id: &'static str,
        label: &'static str,
        kind: AssetKind,
        default: &'static str,
    ) -> Self {
        Self {
            id,
            label,
            control: Control::File { kind, default },
        }
    }

    pub fn default_value(&self) -> SettingValue {
        match self.control {
            Control::Range { default, .. } => SettingValue::Number(default),
            Control::Checkbox { default } => SettingValue::Flag(default),
            Control::Color { default }
            | Control::Select { default, .. }
            | Control::Text { default }
            | Control::File { default, .. } => SettingValue::Text(default.to_string()),
        }
    }

    /// Bring `value` inside this declaration or explain why it cannot be.
    pub fn coerce(&self, value: SettingValue) -> Result<SettingValue> {
        let out_of_range = |reason: &str| VizError::ConfigOutOfRange {
            setting: self.id.to_string(),
            reason: reason.to_string(),
        };

        match (self.control, value) {
            (Control::Range { min, max, .. }, SettingValue::Number(n)) => {
                if !n.is_finite() {
                    return Err(out_of_range("not a finite number"));
                }
                Ok(SettingValue::Number(n.clamp(min, max)))
            }
            (Control::Range { .. }, SettingValue::Text(s)) => {
                let n: f64 = s.trim().parse().map_err(|_| out_of_range("not a number"))?;
                self.coerce(SettingValue::Number(n))
            }
            (Control::Checkbox { .. }, SettingValue::Flag(b)) => Ok(SettingValue::Flag(b)),
            (Control::Color { .. }, SettingValue::Text(s)) => normalize_hex(&s)
                .map(SettingValue::Text)
                .ok_or_else(|| out_of_range("not a #rgb or #rrggbb color")),
            (Control::Select { options, .. }, SettingValue::Text(s)) => {
                if options.contains(&s.as_str()) {
                    Ok(SettingValue::Text(s))
                } else {
                    Err(VizError::InvalidOption {
                        setting: self.id.to_string(),
                        value: s,
                    })
                }
            }
            (Control::Text { .. } | Control::File { .. }, SettingValue::Text(s)) => {
                Ok(SettingValue::Text(s))
            }
            _ => Err(out_of_range("wrong value type")),
        }
    }
}

fn normalize_hex(css: &str) -> Option<String> {
    let digits = css.trim().strip_prefix('#')?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        6 => Some(format!("#{}", digits.to_ascii_lowercase())),
        3 => Some(
            digits
                .chars()
                .fold(String::from("#"), |mut acc, c| {
                    acc.push(c.to_ascii_lowercase());
                    acc.push(c.to_ascii_lowercase());
                    acc
                }),
        ),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Number(f64),
    Flag(bool),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Master {
    pub sensitivity: f64,
    pub analyzer: AnalyzerSettings,
}

impl Default for Master {
    fn default() -> Self {
        Self {
            sensitivity: SENSITIVITY_DEFAULT,
            analyzer: AnalyzerSettings::default(),
        }
    }
}

/// Serializable form of a [`Config`], used for persistence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    #[serde(default)]
    pub master: Master,
    #[serde(default)]
    pub settings: BTreeMap<String, BTreeMap<String, SettingValue>>,
}

/// Live configuration: the shared master sensitivity and one settings map
/// per preset.
#[derive(Debug, Clone)]
pub struct Config {
    master: Master,
    specs: HashMap<&'static str, &'static [SettingSpec]>,
    settings: HashMap<&'static str, HashMap<&'static str, SettingValue>>,
}

impl Config {
    /// Defaults for every declared preset.
    pub fn new(declarations: impl IntoIterator<Item = (&'static str, &'static [SettingSpec])>) -> Self {
        let mut specs = HashMap::new();
        let mut settings = HashMap::new();
        for (preset, declared) in declarations {
            let values = declared
                .iter()
                .map(|spec| (spec.id, spec.default_value()))
                .collect();
            specs.insert(preset, declared);
            settings.insert(preset, values);
        }
        Self {
            master: Master::default(),
            specs,
            settings,
        }
    }

    pub fn sensitivity(&self) -> f64 {
        self.master.sensitivity
    }

    pub fn set_sensitivity(&mut self, value: f64) -> Result<f64> {
        if !value.is_finite() {
            return Err(VizError::ConfigOutOfRange {
                setting: "master.sensitivity".to_string(),
                reason: "not a finite number".to_string(),
            });
        }
        self.master.sensitivity = value.clamp(SENSITIVITY_MIN, SENSITIVITY_MAX);
        Ok(self.master.sensitivity)
    }

    pub fn analyzer(&self) -> AnalyzerSettings {
        self.master.analyzer
    }

    /// Store analyzer settings snapped to usable values. Returns what was
    /// stored.
    pub fn set_analyzer(&mut self, settings: AnalyzerSettings) -> Result<AnalyzerSettings> {
        if !settings.smoothing.is_finite() {
            return Err(VizError::ConfigOutOfRange {
                setting: ANALYZER_SMOOTHING.to_string(),
                reason: "not a finite number".to_string(),
            });
        }
        self.master.analyzer = settings.sanitized();
        Ok(self.master.analyzer)
    }

    /// Change one analyzer field by its control id. Returns the stored
    /// value of that field.
    pub fn set_analyzer_value(&mut self, setting: &str, value: f64) -> Result<f64> {
        if !value.is_finite() {
            return Err(VizError::ConfigOutOfRange {
                setting: setting.to_string(),
                reason: "not a finite number".to_string(),
            });
        }
        let mut next = self.master.analyzer;
        match setting {
            ANALYZER_FFT_SIZE => next.fft_size = value.round().max(0.0) as usize,
            ANALYZER_BARS => next.bars = value.round().max(0.0) as usize,
            ANALYZER_SMOOTHING => next.smoothing = value,
            _ => {
                return Err(VizError::UnknownSetting {
                    preset: "analyzer".to_string(),
                    setting: setting.to_string(),
                })
            }
        }
        let stored = self.set_analyzer(next)?;
        Ok(match setting {
            ANALYZER_FFT_SIZE => stored.fft_size as f64,
            ANALYZER_BARS => stored.bars as f64,
            _ => stored.smoothing,
        })
    }

    pub fn spec(&self, preset: &str, setting: &str) -> Result<&'static SettingSpec> {
        let declared: &'static [SettingSpec] = self
            .specs
            .get(preset)
            .copied()
            .ok_or_else(|| VizError::UnknownPreset(preset.to_string()))?;
        declared
            .iter()
            .find(|spec| spec.id == setting)
            .ok_or_else(|| VizError::UnknownSetting {
                preset: preset.to_string(),
                setting: setting.to_string(),
            })
    }

    /// Store a value after clamping/validating it. Returns what was stored.
    pub fn set(&mut self, preset: &str, setting: &str, value: SettingValue) -> Result<SettingValue> {
        let spec = self.spec(preset, setting)?;
        let value = spec.coerce(value)?;
        if let Some(values) = self.settings.get_mut(preset) {
            values.insert(spec.id, value.clone());
        }
        Ok(value)
    }

    /// Put one preset back on its declared defaults.
    pub fn reset(&mut self, preset: &str) -> Result<()> {
        let declared = self
            .specs
            .get(preset)
            .copied()
            .ok_or_else(|| VizError::UnknownPreset(preset.to_string()))?;
        if let Some(values) = self.settings.get_mut(preset) {
            for spec in declared.iter() {
                values.insert(spec.id, spec.default_value());
            }
        }
        Ok(())
    }

    pub fn preset<'a>(&'a self, preset: &'a str) -> PresetConfig<'a> {
        PresetConfig {
            preset,
            specs: self.specs.get(preset).copied().unwrap_or(&[]),
            values: self.settings.get(preset),
        }
    }

    pub fn snapshot(&self) -> ConfigSnapshot {
        let settings = self
            .settings
            .iter()
            .map(|(preset, values)| {
                let values = values
                    .iter()
                    .map(|(id, value)| (id.to_string(), value.clone()))
                    .collect();
                (preset.to_string(), values)
            })
            .collect();
        ConfigSnapshot {
            master: self.master,
            settings,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    /// Apply a snapshot through the same boundary as UI edits. Entries that
    /// do not fit a declaration are skipped and logged.
    pub fn apply(&mut self, snapshot: ConfigSnapshot) {
        if let Err(err) = self.set_sensitivity(snapshot.master.sensitivity) {
            log::warn!("ignoring stored sensitivity: {err}");
        }
        if let Err(err) = self.set_analyzer(snapshot.master.analyzer) {
            log::warn!("ignoring stored analyzer settings: {err}");
        }
        for (preset, values) in snapshot.settings {
            for (setting, value) in values {
                if let Err(err) = self.set(&preset, &setting, value) {
                    log::warn!("ignoring stored setting: {err}");
                }
            }
        }
    }

    pub fn merge_json(&mut self, json: &str) -> Result<()> {
        let snapshot: ConfigSnapshot = serde_json::from_str(json)?;
        self.apply(snapshot);
        Ok(())
    }
}

/// Read-only view of one preset's settings.
#[derive(Debug, Clone, Copy)]
pub struct PresetConfig<'a> {
    preset: &'a str,
    specs: &'static [SettingSpec],
    values: Option<&'a HashMap<&'static str, SettingValue>>,
}

impl<'a> PresetConfig<'a> {
    pub fn preset_id(&self) -> &'a str {
        self.preset
    }

    fn value(&self, id: &str) -> Option<SettingValue> {
        self.values
            .and_then(|values| values.get(id).cloned())
            .or_else(|| {
                self.specs
                    .iter()
                    .find(|spec| spec.id == id)
                    .map(SettingSpec::default_value)
            })
    }

    pub fn number(&self, id: &str) -> f64 {
        match self.value(id) {
            Some(SettingValue::Number(n)) => n,
            _ => 0.0,
        }
    }

    /// A range setting used as a count; never below one.
    pub fn count(&self, id: &str) -> usize {
        (self.number(id).floor() as usize).max(1)
    }

    pub fn text(&self, id: &str) -> String {
        match self.value(id) {
            Some(SettingValue::Text(s)) => s,
            _ => String::new(),
        }
    }

    pub fn flag(&self, id: &str) -> bool {
        matches!(self.value(id), Some(SettingValue::Flag(true)))
    }
}
