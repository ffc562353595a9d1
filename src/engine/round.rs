//! A persisted round and the state derived from it.
//!
//! A `Round` is what the store keeps: the seed chosen at round start and
//! the raw log of moves and notifications. Everything else is recomputed
//! from it on demand.
//!
//! ## Example
//!
//! ```
//! use rust_tabletop::core::{EngineOptions, PlayerId, Roster};
//! use rust_tabletop::engine::Round;
//! use rust_tabletop::games::love_letter;
//!
//! let rules = love_letter::rules();
//! let roster = Roster::new(["adam", "eve"]);
//! let round = Round::new(1234, 0);
//!
//! let view = round
//!     .local_view(&rules, &roster, &PlayerId::new("eve"), &EngineOptions::default())
//!     .unwrap();
//! assert_eq!(view.local.len(), 2); // hand and discard
//! ```

use serde::{Deserialize, Serialize};

use super::expansion::expand_round;
use super::projection::{project, LocalView};
use super::replay::{replay, ReplayReport};
use crate::core::action::{ActionLog, Notification, RoundAction, Transaction};
use crate::core::config::EngineOptions;
use crate::core::error::{ActionError, Result};
use crate::core::player::{PlayerId, Roster};
use crate::rules::Rules;
use crate::surfaces::Snapshot;

/// Message appended to the log by a soft reset.
pub const RESET_MESSAGE: &str = "game reset";

/// One round of a game, as stored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub seed: u64,

    /// Milliseconds since the epoch.
    pub start_time: u64,

    #[serde(default)]
    pub actions: Vec<RoundAction>,
}

impl Round {
    /// An empty round.
    #[must_use]
    pub fn new(seed: u64, start_time: u64) -> Self {
        Self {
            seed,
            start_time,
            actions: Vec::new(),
        }
    }

    /// Moves of this round, ordered by time.
    #[must_use]
    pub fn action_log(&self) -> ActionLog {
        ActionLog::from_round_actions(&self.actions)
    }

    /// Append a move. A move onto its own source surface is rejected.
    pub fn record(&mut self, transaction: Transaction, time: u64) -> std::result::Result<(), ActionError> {
        if transaction.is_self_move() {
            return Err(ActionError::SameSurface {
                surface: transaction.from,
            });
        }
        self.actions.push(RoundAction {
            time,
            transaction: Some(transaction),
            notification: None,
        });
        Ok(())
    }

    /// Append a chat or system message.
    pub fn notify(&mut self, notification: Notification, time: u64) {
        self.actions.push(RoundAction {
            time,
            transaction: None,
            notification: Some(notification),
        });
    }

    /// Undo every move but keep the conversation, noting who reset.
    pub fn soft_reset(&mut self, by: &PlayerId, time: u64) {
        self.actions.retain(|action| action.transaction.is_none());
        self.notify(
            Notification {
                author: by.clone(),
                message: Some(RESET_MESSAGE.to_string()),
                visible_for: None,
            },
            time,
        );
    }

    /// Drop the whole log.
    pub fn hard_reset(&mut self) {
        self.actions.clear();
    }

    /// Expand the round and replay its moves.
    pub fn snapshot(
        &self,
        rules: &Rules,
        roster: &Roster,
        options: &EngineOptions,
    ) -> Result<(Snapshot, ReplayReport)> {
        let initial = expand_round(rules, roster, self.seed, options)?;
        replay(&initial, self.action_log().as_slice(), options)
    }

    /// Current state of the round as `viewer` sees it.
    pub fn local_view(
        &self,
        rules: &Rules,
        roster: &Roster,
        viewer: &PlayerId,
        options: &EngineOptions,
    ) -> Result<LocalView> {
        let (snapshot, _) = self.snapshot(rules, roster, options)?;
        Ok(project(&snapshot, viewer)?)
    }
}
