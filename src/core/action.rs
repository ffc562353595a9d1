//! Action log: timestamped item moves between surfaces.
//!
//! A round's persisted log interleaves moves with chat notifications.
//! `ActionLog` keeps only the moves, ordered by time, which is the exact
//! input the replay engine folds over.

use serde::{Deserialize, Serialize};

use super::error::ActionError;
use super::gid::Gid;
use super::player::PlayerId;

/// A single item move, attributed to a player.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    /// The player who moved the item.
    pub userid: PlayerId,

    /// The moved item.
    pub item: Gid,

    /// Surface the item is taken from.
    pub from: Gid,

    /// Surface the item is appended to.
    pub to: Gid,
}

impl Transaction {
    #[must_use]
    pub fn new(userid: impl Into<PlayerId>, item: Gid, from: Gid, to: Gid) -> Self {
        Self {
            userid: userid.into(),
            item,
            from,
            to,
        }
    }

    /// A move onto the surface it came from.
    #[must_use]
    pub fn is_self_move(&self) -> bool {
        self.from == self.to
    }
}

/// A message attached to the round log (chat, system notes).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub author: PlayerId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Restrict delivery to these players. `None` means everyone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_for: Option<Vec<PlayerId>>,
}

/// Raw entry of a persisted round log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundAction {
    /// Milliseconds since the epoch.
    pub time: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction: Option<Transaction>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

/// A timestamped move, as replayed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub time: u64,
    pub transaction: Transaction,
}

/// Time-ordered list of moves.
///
/// Deserializing sorts by time, keeping the stored order of equal
/// timestamps.
///
/// ## Example
///
/// ```
/// use rust_tabletop::core::{ActionLog, Gid, Transaction};
///
/// let a = Gid::from_bytes([1; 8]);
/// let b = Gid::from_bytes([2; 8]);
/// let card = Gid::from_bytes([3; 8]);
///
/// let mut log = ActionLog::new();
/// log.record(Transaction::new("adam", card, a, b), 10).unwrap();
/// assert!(log.record(Transaction::new("adam", card, b, b), 11).is_err());
/// assert_eq!(log.len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Action>", into = "Vec<Action>")]
pub struct ActionLog {
    actions: Vec<Action>,
}

impl From<Vec<Action>> for ActionLog {
    fn from(mut actions: Vec<Action>) -> Self {
        actions.sort_by_key(|action| action.time);
        Self { actions }
    }
}

impl From<ActionLog> for Vec<Action> {
    fn from(log: ActionLog) -> Self {
        log.actions
    }
}

impl ActionLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract the moves from a persisted round log, ordered by time.
    ///
    /// Notifications are dropped. Entries with equal timestamps keep their
    /// stored order.
    pub fn from_round_actions<'a>(entries: impl IntoIterator<Item = &'a RoundAction>) -> Self {
        entries
            .into_iter()
            .filter_map(|entry| {
                entry.transaction.as_ref().map(|transaction| Action {
                    time: entry.time,
                    transaction: transaction.clone(),
                })
            })
            .collect::<Vec<_>>()
            .into()
    }

    /// Record a move at `time`.
    ///
    /// Self moves are rejected. A move older than the newest entry is
    /// inserted after every entry with the same or an earlier time.
    pub fn record(&mut self, transaction: Transaction, time: u64) -> Result<(), ActionError> {
        if transaction.is_self_move() {
            return Err(ActionError::SameSurface {
                surface: transaction.from,
            });
        }

        let at = self.actions.partition_point(|a| a.time <= time);
        self.actions.insert(at, Action { time, transaction });
        Ok(())
    }

    /// Drop every recorded move (soft round reset).
    pub fn clear(&mut self) {
        self.actions.clear();
    }

    /// The first `n` moves, for point-in-time reconstruction.
    #[must_use]
    pub fn prefix(&self, n: usize) -> &[Action] {
        &self.actions[..n.min(self.actions.len())]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Action] {
        &self.actions
    }
}
