use super::assets::Assets;
use super::catalog::Catalog;
use super::config::Config;
use super::preset::{Frame, FrameRenderer};
use super::store::PersistentStore;
use super::surface::Surface;
use crate::error::{Result, VizError};

struct ActivePreset {
    id: &'static str,
    store: PersistentStore,
    renderer: FrameRenderer,
}

/// Host-side owner of the visualizer: catalog, live config, loaded assets
/// and the single active preset.
pub struct VisualizerSession {
    catalog: Catalog,
    config: Config,
    assets: Assets,
    active: Option<ActivePreset>,
}

impl VisualizerSession {
    pub fn new(catalog: Catalog, assets: Assets) -> Self {
        let config = catalog.default_config();
        Self {
            catalog,
            config,
            assets,
            active: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Settings edits land here and are picked up on the next frame.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    /// Replace the asset cache. Renderers see it from the next frame; setup
    /// sees it at the next activation.
    pub fn set_assets(&mut self, assets: Assets) {
        self.assets = assets;
    }

    pub fn active_id(&self) -> Option<&'static str> {
        self.active.as_ref().map(|a| a.id)
    }

    /// Make `id` the active preset. The previous preset's store and renderer
    /// are dropped and setup runs again, also when `id` was already active.
    pub fn activate(&mut self, id: &str) -> Result<()> {
        let preset = *self
            .catalog
            .get(id)
            .ok_or_else(|| VizError::UnknownPreset(id.to_string()))?;

        self.active = None;
        let mut store = PersistentStore::new();
        let renderer = (preset.setup)(&self.assets, &mut store);
        log::info!("preset `{}` active", preset.id);
        self.active = Some(ActivePreset {
            id: preset.id,
            store,
            renderer,
        });
        Ok(())
    }

    pub fn deactivate(&mut self) {
        self.active = None;
    }

    /// Draw one frame of the active preset. No-op when none is active.
    pub fn render(&mut self, surface: &mut dyn Surface, audio: &[u8], time: f64) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let frame = Frame {
            audio,
            config: &self.config,
            assets: &self.assets,
            time,
        };
        (active.renderer)(surface, &frame, &mut active.store);
    }
}
