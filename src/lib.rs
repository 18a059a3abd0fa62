#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Sign-language gloss player and audio-reactive canvas presets.
//!
//! [`gloss`] and [`viz`] are platform neutral and tested on the host. The
//! browser side lives in the wasm-only `wasm` module.

pub mod error;
pub mod gloss;
pub mod viz;

pub use error::{Result, VizError};

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;
