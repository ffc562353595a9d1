//! Core engine types: ids, players, RNG, actions, options, errors.
//!
//! This module contains the fundamental building blocks that are game-agnostic.
//! Games describe themselves through `rules` rather than modifying the core.

pub mod gid;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;

pub use gid::{Gid, ParseGidError};
pub use player::{PlayerId, Roster};
pub use rng::{Random, MAX_SAFE_SEED};
pub use config::{EngineOptions, ReplayPolicy, ShufflePolicy};
pub use action::{Action, ActionLog, Notification, RoundAction, Transaction};
pub use error::{
    ActionError, ConfigurationError, DistributionError, EngineError, ReplayError, Result,
    RulesError, ViewResolutionError, ViewerNotFoundError,
};
