//! Text → clip pipeline: dataset index, tokenizer, suggestions and the
//! sequential clip player.

mod player;
mod session;
mod suggest;
mod tokenize;

pub use player::{Attempt, ClipCommand, PlayerState, SequencePlayer};
pub use session::GlossSession;
pub use suggest::{apply_suggestion, suggest, SUGGESTION_LIMIT};
pub use tokenize::{tokenize, STOP_WORDS};

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::Result;

/// One record of the WLASL dataset file.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetRecord {
    pub gloss: String,
    #[serde(default)]
    pub instances: Vec<DatasetInstance>,
}

/// A single recorded instance of a gloss. Only the URL is used.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetInstance {
    pub url: String,
}

/// How many clips to keep per gloss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexMode {
    /// Every accepted URL, in dataset order. Used for fallback playback.
    #[default]
    AllClips,
    /// Only the first accepted URL.
    FirstClip,
}

#[derive(Debug, Clone)]
pub struct IndexOptions {
    pub mode: IndexMode,
    /// File extensions (with leading dot) a clip URL must end with.
    pub extensions: Vec<String>,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            mode: IndexMode::AllClips,
            extensions: vec![".mp4".to_string()],
        }
    }
}

impl IndexOptions {
    fn accepts(&self, url: &str) -> bool {
        self.extensions.iter().any(|ext| url.ends_with(ext.as_str()))
    }
}

/// A word with at least one playable clip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlossEntry {
    pub word: String,
    pub clip_urls: Vec<String>,
}

/// A token of user input resolved against the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlossMatch {
    pub word: String,
    pub urls: Vec<String>,
}

/// Lowercased gloss → clips, plus the vocabulary used for suggestions.
#[derive(Debug, Clone, Default)]
pub struct GlossIndex {
    entries: HashMap<String, GlossEntry>,
    vocabulary: Vec<String>,
}

impl GlossIndex {
    pub fn build(records: &[DatasetRecord], options: &IndexOptions) -> Self {
        let mut entries = HashMap::new();
        let mut vocabulary = Vec::with_capacity(records.len());

        for record in records {
            let word = record.gloss.to_lowercase();
            vocabulary.push(word.clone());

            let accepted = record
                .instances
                .iter()
                .map(|inst| inst.url.as_str())
                .filter(|url| options.accepts(url));
            let clip_urls: Vec<String> = match options.mode {
                IndexMode::AllClips => accepted.map(str::to_string).collect(),
                IndexMode::FirstClip => accepted.take(1).map(str::to_string).collect(),
            };

            if !clip_urls.is_empty() {
                // Duplicate glosses: last write wins.
                entries.insert(word.clone(), GlossEntry { word, clip_urls });
            }
        }

        log::debug!(
            "gloss index: {} playable of {} records",
            entries.len(),
            records.len()
        );
        Self { entries, vocabulary }
    }

    pub fn from_json(json: &str, options: &IndexOptions) -> Result<Self> {
        let records: Vec<DatasetRecord> = serde_json::from_str(json)?;
        Ok(Self::build(&records, options))
    }

    pub fn get(&self, word: &str) -> Option<&GlossEntry> {
        self.entries.get(word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Resolve free text to the matched glosses, in input order. Stop-words
    /// and words without clips are dropped.
    pub fn lookup(&self, text: &str) -> Vec<GlossMatch> {
        tokenize(text)
            .into_iter()
            .filter_map(|token| {
                self.entries.get(&token).map(|entry| GlossMatch {
                    word: token,
                    urls: entry.clip_urls.clone(),
                })
            })
            .collect()
    }
}
