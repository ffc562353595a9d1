//! # rust-tabletop
//!
//! A rules-driven state engine for shared tabletop card games.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: No hardcoded surfaces, cards, or dealing logic.
//!    Games describe themselves as `Rules` documents.
//!
//! 2. **Recompute, Don't Patch**: A round is stored as rules + roster +
//!    seed + action log. Every read expands, replays and projects from
//!    scratch, so the result never depends on earlier reads.
//!
//! 3. **Deterministic**: The same inputs always produce the same ids and
//!    the same placement.
//!
//! ## Architecture
//!
//! - **Expansion**: Templates with repetition directives become concrete
//!   surfaces and items, then decks are dealt onto surfaces.
//!
//! - **Replay**: The move log is folded over the expanded snapshot. Moves
//!   that no longer apply are skipped and classified, never fatal unless
//!   the strict policy is on.
//!
//! - **Projection**: Each viewer gets a read model where every surface
//!   resolves to the single item view that viewer may see.
//!
//! - **Persistent Data Structures**: O(1) snapshot cloning via `im-rs`.
//!
//! ## Modules
//!
//! - `core`: Ids, players, RNG, action log, options, errors
//! - `rules`: Declarative rules schema and the ruleset registry
//! - `surfaces`: Concrete surfaces, items and the round snapshot
//! - `engine`: Expansion, replay, projection, decoration, selection
//! - `games`: Built-in rulesets

pub mod core;
pub mod rules;
pub mod surfaces;
pub mod engine;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    Gid, PlayerId, Roster, Random,
    EngineOptions, ShufflePolicy, ReplayPolicy,
    Action, ActionLog, RoundAction, Transaction, Notification,
    EngineError, Result,
};

pub use crate::rules::{
    Rules, Config, ConfigCondition, Collection, Deck, Distribution,
    ItemTemplate, ItemView, Variant, RenderKind,
    SurfaceTemplate, SurfaceType, Exposure,
    Repeat, Repetition, Repeated, RepeatValue,
    RulesRegistry,
};

pub use crate::surfaces::{Item, Surface, Snapshot, SkipReason, Placement};

pub use crate::engine::{
    expand_round, replay, replay_prefix, project, decorate_transaction,
    Round, ReplayReport, Timeline,
    LocalSurface, LocalView, ResolvedItem,
    DecoratedTransaction, Selection, SelectionOutcome,
};
