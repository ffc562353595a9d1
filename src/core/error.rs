//! Error types for expansion, replay and projection.
//!
//! Every failure is a pure function of the inputs, so nothing here is
//! retryable. Callers treat any `EngineError` as "cannot render state".

use thiserror::Error;

use super::gid::Gid;
use super::player::PlayerId;

/// Result type alias using [`EngineError`].
pub type Result<T> = std::result::Result<T, EngineError>;

/// No config of the ruleset accepts the roster size.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("no matching config for {players} players")]
    NoMatchingConfig { players: usize },
}

/// The distribution instructions do not fit the surfaces or the deck.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DistributionError {
    #[error("no surface matching '{class}'")]
    UnknownSurfaceClass { class: String },

    #[error("missing item distributions: {remaining} items of collection {collection} left over")]
    Undistributed { collection: usize, remaining: usize },
}

/// An item view that cannot be rendered.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ViewResolutionError {
    #[error("missing view implementation for class '{view}'")]
    MissingViewImplementation { view: String },

    #[error("item {item} defines no variants")]
    NoVariants { item: Gid },
}

/// Projection found no surface owned by the viewer.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("can't find local surface for viewer '{viewer}'")]
pub struct ViewerNotFoundError {
    pub viewer: PlayerId,
}

/// A transaction that must not enter the log.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("item cannot move from surface {surface} onto itself")]
    SameSurface { surface: Gid },
}

/// Replay aborted under the strict policy.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error("action #{index} conflicts: item {item} expected on {expected}, found on {found_on}")]
    Conflict {
        index: usize,
        item: Gid,
        expected: Gid,
        found_on: Gid,
    },

    #[error("cached placement does not match the expanded round")]
    StalePlacement,
}

/// Loading or looking up a rules document failed.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("unknown ruleset '{0}'")]
    UnknownRuleset(String),

    #[error("ruleset '{0}' is already registered")]
    DuplicateRuleset(String),

    #[error("failed to parse rules document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Top-level error for all engine entry points.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Distribution(#[from] DistributionError),

    #[error(transparent)]
    ViewResolution(#[from] ViewResolutionError),

    #[error(transparent)]
    ViewerNotFound(#[from] ViewerNotFoundError),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Replay(#[from] ReplayError),

    #[error(transparent)]
    Rules(#[from] RulesError),

    #[error("snapshot encoding failed: {0}")]
    Encoding(#[from] bincode::Error),
}
