//! Sequential clip player.
//!
//! The player never touches a media element. It emits [`ClipCommand`]s for
//! the host to execute and is driven by the host reporting back whether a
//! play attempt was rejected or ran to its end. Every attempt carries an
//! [`Attempt`] identity; reports for anything but the current attempt are
//! dropped, which is how a restarted queue cancels the old one.

use std::collections::HashSet;

use super::GlossMatch;

/// Identity of one play attempt: queue run, entry index and URL index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Attempt {
    pub generation: u64,
    pub entry: usize,
    pub url: usize,
}

/// Side effects requested from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipCommand {
    /// Low-priority fetch hint. Fire and forget.
    Prefetch(String),
    /// Point the media element at `url` and start playing it.
    Play { attempt: Attempt, url: String },
    /// Halt the media element.
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    Playing { entry: usize, url: usize },
    Finished,
}

#[derive(Debug)]
pub struct SequencePlayer {
    queue: Vec<GlossMatch>,
    state: PlayerState,
    generation: u64,
}

impl Default for SequencePlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl SequencePlayer {
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            state: PlayerState::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn queue(&self) -> &[GlossMatch] {
        &self.queue
    }

    /// The attempt currently in flight, if any.
    pub fn current(&self) -> Option<Attempt> {
        match self.state {
            PlayerState::Playing { entry, url } => Some(Attempt {
                generation: self.generation,
                entry,
                url,
            }),
            _ => None,
        }
    }

    /// Replace whatever is playing with `queue`.
    pub fn start(&mut self, queue: Vec<GlossMatch>) -> Vec<ClipCommand> {
        self.generation += 1;
        self.queue = queue;

        let mut seen = HashSet::new();
        let mut commands: Vec<ClipCommand> = self
            .queue
            .iter()
            .flat_map(|entry| entry.urls.iter())
            .filter(|url| seen.insert(url.as_str()))
            .map(|url| ClipCommand::Prefetch(url.clone()))
            .collect();

        log::debug!(
            "player: run {} with {} entries",
            self.generation,
            self.queue.len()
        );
        commands.extend(self.enter(0, 0));
        commands
    }

    /// The host could not start the attempt. Try the entry's next URL, or
    /// the next entry once this one is out of candidates.
    pub fn play_rejected(&mut self, attempt: Attempt) -> Vec<ClipCommand> {
        if self.current() != Some(attempt) {
            return Vec::new();
        }
        log::debug!("player: rejected entry {} url {}", attempt.entry, attempt.url);
        self.enter(attempt.entry, attempt.url + 1)
    }

    /// The clip of `attempt` played to its end.
    pub fn clip_ended(&mut self, attempt: Attempt) -> Vec<ClipCommand> {
        if self.current() != Some(attempt) {
            return Vec::new();
        }
        self.enter(attempt.entry + 1, 0)
    }

    /// Abandon the queue and go back to idle.
    pub fn stop(&mut self) -> Vec<ClipCommand> {
        self.generation += 1;
        self.queue.clear();
        self.state = PlayerState::Idle;
        vec![ClipCommand::Stop]
    }

    /// Move to the first playable (entry, url) at or after the given
    /// position, skipping exhausted entries.
    fn enter(&mut self, mut entry: usize, mut url: usize) -> Vec<ClipCommand> {
        while let Some(item) = self.queue.get(entry) {
            if let Some(candidate) = item.urls.get(url) {
                self.state = PlayerState::Playing { entry, url };
                return vec![ClipCommand::Play {
                    attempt: Attempt {
                        generation: self.generation,
                        entry,
                        url,
                    },
                    url: candidate.clone(),
                }];
            }
            if url > 0 {
                log::warn!("player: no playable clip for `{}`", item.word);
            }
            entry += 1;
            url = 0;
        }

        self.state = PlayerState::Finished;
        Vec::new()
    }
}
