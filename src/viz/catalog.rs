use super::config::Config;
use super::preset::Preset;
use super::presets;
use crate::error::{Result, VizError};

/// Static registry of presets, in display order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    presets: Vec<Preset>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every preset shipped with the crate.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for preset in presets::ALL {
            if let Err(err) = catalog.register(*preset) {
                log::error!("{err}");
            }
        }
        catalog
    }

    pub fn register(&mut self, preset: Preset) -> Result<()> {
        if self.get(preset.id).is_some() {
            return Err(VizError::DuplicatePreset(preset.id));
        }
        self.presets.push(preset);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.id == id)
    }

    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    pub fn first(&self) -> Option<&Preset> {
        self.presets.first()
    }

    /// A configuration holding every preset's defaults.
    pub fn default_config(&self) -> Config {
        Config::new(self.presets.iter().map(|p| (p.id, p.settings)))
    }
}
