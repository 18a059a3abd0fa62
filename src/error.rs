use thiserror::Error;

/// Errors surfaced by the gloss and visualizer cores.
///
/// None of these reach the user as a message; callers log them and fall back
/// (empty index, default value, skipped asset).
#[derive(Debug, Error)]
pub enum VizError {
    #[error("dataset could not be parsed: {0}")]
    Dataset(#[from] serde_json::Error),

    #[error("unknown preset `{0}`")]
    UnknownPreset(String),

    #[error("preset `{0}` registered twice")]
    DuplicatePreset(&'static str),

    #[error("preset `{preset}` has no setting `{setting}`")]
    UnknownSetting { preset: String, setting: String },

    #[error("value for `{setting}` is not usable: {reason}")]
    ConfigOutOfRange { setting: String, reason: String },

    #[error("`{value}` is not an option of `{setting}`")]
    InvalidOption { setting: String, value: String },

    #[error("asset `{id}` failed to load: {reason}")]
    Asset { id: String, reason: String },
}

pub type Result<T, E = VizError> = std::result::Result<T, E>;
