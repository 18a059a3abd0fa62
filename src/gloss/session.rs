use super::{
    suggest, Attempt, ClipCommand, GlossIndex, IndexOptions, PlayerState, SequencePlayer,
    SUGGESTION_LIMIT,
};

/// Owned state of the gloss page: the index built from the dataset and the
/// player working through the current request.
#[derive(Debug, Default)]
pub struct GlossSession {
    options: IndexOptions,
    index: GlossIndex,
    player: SequencePlayer,
}

impl GlossSession {
    pub fn new(options: IndexOptions) -> Self {
        Self {
            options,
            index: GlossIndex::default(),
            player: SequencePlayer::new(),
        }
    }

    /// Build the index from the dataset body. A body that does not parse
    /// leaves the index empty so every lookup misses.
    pub fn load(&mut self, json: &str) {
        match GlossIndex::from_json(json, &self.options) {
            Ok(index) => {
                log::info!(
                    "loaded {} glosses ({} playable)",
                    index.vocabulary().len(),
                    index.len()
                );
                self.index = index;
            }
            Err(err) => {
                log::warn!("dataset unusable, lookups will miss: {err}");
                self.index = GlossIndex::default();
            }
        }
    }

    /// The dataset could not be fetched at all.
    pub fn load_failed(&mut self, reason: &str) {
        log::warn!("dataset fetch failed, lookups will miss: {reason}");
        self.index = GlossIndex::default();
    }

    /// Stop playback but keep the index, for a page that may come back.
    pub fn suspend(&mut self) -> Vec<ClipCommand> {
        self.player.stop()
    }

    /// Stop playback and drop the index.
    pub fn teardown(&mut self) -> Vec<ClipCommand> {
        self.index = GlossIndex::default();
        self.player.stop()
    }

    pub fn index(&self) -> &GlossIndex {
        &self.index
    }

    pub fn player_state(&self) -> PlayerState {
        self.player.state()
    }

    /// Look up `text` and start playing whatever matched.
    pub fn request(&mut self, text: &str) -> Vec<ClipCommand> {
        let matches = self.index.lookup(text);
        self.player.start(matches)
    }

    pub fn play_rejected(&mut self, attempt: Attempt) -> Vec<ClipCommand> {
        self.player.play_rejected(attempt)
    }

    pub fn clip_ended(&mut self, attempt: Attempt) -> Vec<ClipCommand> {
        self.player.clip_ended(attempt)
    }

    pub fn suggest(&self, text: &str) -> Vec<&str> {
        suggest(text, self.index.vocabulary(), SUGGESTION_LIMIT)
    }
}
