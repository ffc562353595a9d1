//! Engine configuration.
//!
//! Rules documents describe *what* a game looks like. `EngineOptions`
//! describes *how* the engine treats a round:
//! - `ShufflePolicy`: whether and how decks flagged `shuffle` are shuffled
//! - `ReplayPolicy`: whether conflicting moves are skipped or fatal
//!
//! Options are plain serde data so hosts can keep them next to the rules.

use serde::{Deserialize, Serialize};

/// How decks with `shuffle: true` are shuffled during expansion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShufflePolicy {
    /// Keep deck order.
    #[default]
    Disabled,
    /// Fisher-Yates using the round generator.
    ///
    /// Consumes draws from the id stream, so ids issued after the first
    /// shuffled collection differ from an unshuffled expansion.
    Seeded,
    /// Fisher-Yates using a ChaCha8 stream derived from the seed.
    ///
    /// Ids are identical to an unshuffled expansion; only placement changes.
    Independent,
}

/// What replay does when an action cannot be applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReplayPolicy {
    /// Skip the action and emit a warning.
    #[default]
    Tolerant,
    /// Abort on an item found on a third surface; other skips stay skips.
    Strict,
}

/// Runtime options for expansion and replay.
///
/// ```
/// use rust_tabletop::core::{EngineOptions, ReplayPolicy, ShufflePolicy};
///
/// let options = EngineOptions::default().with_shuffle(ShufflePolicy::Independent);
/// assert_eq!(options.replay, ReplayPolicy::Tolerant);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    pub shuffle: ShufflePolicy,
    pub replay: ReplayPolicy,
}

impl EngineOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_shuffle(mut self, shuffle: ShufflePolicy) -> Self {
        self.shuffle = shuffle;
        self
    }

    #[must_use]
    pub fn with_replay(mut self, replay: ReplayPolicy) -> Self {
        self.replay = replay;
        self
    }

    /// Shorthand for `with_replay(ReplayPolicy::Strict)`.
    #[must_use]
    pub fn strict(self) -> Self {
        self.with_replay(ReplayPolicy::Strict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = EngineOptions::default();
        assert_eq!(options.shuffle, ShufflePolicy::Disabled);
        assert_eq!(options.replay, ReplayPolicy::Tolerant);
    }

    #[test]
    fn test_builder() {
        let options = EngineOptions::new()
            .with_shuffle(ShufflePolicy::Seeded)
            .strict();

        assert_eq!(options.shuffle, ShufflePolicy::Seeded);
        assert_eq!(options.replay, ReplayPolicy::Strict);
    }

    #[test]
    fn test_partial_json() {
        let options: EngineOptions = serde_json::from_str(r#"{"replay":"strict"}"#).unwrap();
        assert_eq!(options.shuffle, ShufflePolicy::Disabled);
        assert_eq!(options.replay, ReplayPolicy::Strict);

        let options: EngineOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, EngineOptions::default());
    }
}
