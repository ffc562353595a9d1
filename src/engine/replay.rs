//! Action replay: a left fold of the move log over an expanded snapshot.
//!
//! Replay always starts from a snapshot the caller hands in by reference
//! and works on an O(1) clone of it, so the freshly expanded state is never
//! mutated and replaying the same log twice gives the same result.
//!
//! Moves that cannot be applied are skipped and classified (see
//! [`SkipReason`]). Under [`ReplayPolicy::Strict`] a move that finds its
//! item on a third surface aborts the replay instead.

use serde::Serialize;

use crate::core::action::{Action, ActionLog};
use crate::core::config::{EngineOptions, ReplayPolicy};
use crate::core::error::{ReplayError, Result};
use crate::core::gid::Gid;
use crate::surfaces::{SkipReason, Snapshot};

/// A move that replay did not apply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkippedAction {
    /// Position in the replayed log.
    pub index: usize,
    pub item: Gid,
    pub reason: SkipReason,
}

/// Outcome counts of one replay.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    pub applied: usize,
    pub skipped: Vec<SkippedAction>,
}

impl ReplayReport {
    /// Total moves looked at.
    #[must_use]
    pub fn total(&self) -> usize {
        self.applied + self.skipped.len()
    }

    /// True if every move was applied.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Skips where two moves raced for the same item.
    pub fn conflicts(&self) -> impl Iterator<Item = &SkippedAction> {
        self.skipped
            .iter()
            .filter(|s| matches!(s.reason, SkipReason::Conflict { .. }))
    }
}

/// Replay `actions` in order on a copy of `initial`.
///
/// ## Example
///
/// ```
/// use rust_tabletop::core::{ActionLog, EngineOptions, Roster, Transaction};
/// use rust_tabletop::engine::{expand_round, replay};
/// use rust_tabletop::games::love_letter;
///
/// let options = EngineOptions::default();
/// let roster = Roster::new(["adam", "eve"]);
/// let initial = expand_round(&love_letter::rules(), &roster, 3, &options).unwrap();
///
/// let pile = initial.surfaces_of_class("pile").next().unwrap();
/// let hand = initial.surfaces_of_class("hand").next().unwrap();
/// let mut log = ActionLog::new();
/// log.record(Transaction::new("adam", pile.top().unwrap(), pile.id, hand.id), 1).unwrap();
///
/// let (state, report) = replay(&initial, log.as_slice(), &options).unwrap();
/// assert_eq!(report.applied, 1);
/// assert_eq!(state.surface(hand.id).unwrap().len(), 2);
/// ```
pub fn replay(
    initial: &Snapshot,
    actions: &[Action],
    options: &EngineOptions,
) -> Result<(Snapshot, ReplayReport)> {
    let mut state = initial.clone();
    let mut report = ReplayReport::default();

    for (index, action) in actions.iter().enumerate() {
        apply(&mut state, &mut report, index, action, options.replay)?;
    }
    Ok((state, report))
}

/// Replay only the first `n` moves of `log`: the state "as of action n".
pub fn replay_prefix(
    initial: &Snapshot,
    log: &ActionLog,
    n: usize,
    options: &EngineOptions,
) -> Result<(Snapshot, ReplayReport)> {
    replay(initial, log.prefix(n), options)
}

fn apply(
    state: &mut Snapshot,
    report: &mut ReplayReport,
    index: usize,
    action: &Action,
    policy: ReplayPolicy,
) -> std::result::Result<(), ReplayError> {
    let tx = &action.transaction;
    let reason = match state.move_item(tx.item, tx.from, tx.to) {
        Ok(()) => {
            report.applied += 1;
            return Ok(());
        }
        Err(reason) => reason,
    };

    if let (ReplayPolicy::Strict, SkipReason::Conflict { found_on }) = (policy, reason) {
        return Err(ReplayError::Conflict {
            index,
            item: tx.item,
            expected: tx.from,
            found_on,
        });
    }

    tracing::warn!(
        index,
        item = %tx.item,
        from = %tx.from,
        to = %tx.to,
        user = %tx.userid,
        reason = ?reason,
        "skipped replay action"
    );
    report.skipped.push(SkippedAction {
        index,
        item: tx.item,
        reason,
    });
    Ok(())
}

/// Every intermediate state of a replay.
///
/// `at(0)` is the initial snapshot, `at(n)` the state after the first `n`
/// moves. Snapshots share structure, so holding all of them is cheap.
#[derive(Clone, Debug)]
pub struct Timeline {
    states: Vec<Snapshot>,
    report: ReplayReport,
}

impl Timeline {
    /// Replay `actions` on `initial`, keeping the state after each move.
    pub fn build(initial: &Snapshot, actions: &[Action], options: &EngineOptions) -> Result<Self> {
        let mut states = Vec::with_capacity(actions.len() + 1);
        let mut report = ReplayReport::default();
        let mut state = initial.clone();
        states.push(state.clone());

        for (index, action) in actions.iter().enumerate() {
            apply(&mut state, &mut report, index, action, options.replay)?;
            states.push(state.clone());
        }
        Ok(Self { states, report })
    }

    /// State after the first `n` moves.
    #[must_use]
    pub fn at(&self, n: usize) -> Option<&Snapshot> {
        self.states.get(n)
    }

    /// State after every move.
    #[must_use]
    pub fn latest(&self) -> &Snapshot {
        // build() always pushes the initial state
        &self.states[self.states.len() - 1]
    }

    /// Number of moves covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len() - 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn report(&self) -> &ReplayReport {
        &self.report
    }
}
