//! Fonts and images referenced by presets.
//!
//! The host loads every [`AssetDecl`] before a preset's setup runs and
//! records the outcome here. A failed load is stored as a fallback so
//! presets never wait on, or fail because of, an asset.

use std::collections::HashMap;

/// Family used when a font asset did not load.
pub const FALLBACK_FONT: &str = "sans-serif";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Font,
    Image,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDecl {
    pub id: &'static str,
    pub url: &'static str,
    pub kind: AssetKind,
}

/// Opaque reference to a decoded image owned by the host surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u32);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetHandle {
    /// CSS font family name usable in a `font` shorthand.
    Font(String),
    Image(ImageHandle),
    /// Load failed; readers substitute the documented fallback.
    Missing(AssetKind),
}

/// Fonts and images shipped with the built-in catalog.
pub const BUILTIN_ASSETS: &[AssetDecl] = &[
    AssetDecl {
        id: "display",
        url: "assets/fonts/display.woff2",
        kind: AssetKind::Font,
    },
    AssetDecl {
        id: "backdrop",
        url: "assets/img/backdrop.png",
        kind: AssetKind::Image,
    },
];

#[derive(Debug, Clone, Default)]
pub struct Assets {
    handles: HashMap<String, AssetHandle>,
}

impl Assets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, handle: AssetHandle) {
        self.handles.insert(id.into(), handle);
    }

    pub fn get(&self, id: &str) -> Option<&AssetHandle> {
        self.handles.get(id)
    }

    /// Font family for `id`, or [`FALLBACK_FONT`].
    pub fn font_family(&self, id: &str) -> &str {
        match self.handles.get(id) {
            Some(AssetHandle::Font(family)) => family,
            _ => FALLBACK_FONT,
        }
    }

    /// Decoded image for `id`. `None` when the id is unknown or failed.
    pub fn image(&self, id: &str) -> Option<ImageHandle> {
        match self.handles.get(id) {
            Some(AssetHandle::Image(handle)) => Some(*handle),
            _ => None,
        }
    }
}
