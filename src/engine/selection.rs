//! Click-to-move selection as an explicit value.
//!
//! A player picks an item on one surface, then picks another surface to
//! move it there. The host keeps the current [`Selection`] and feeds each
//! click through [`Selection::select`], which says what to do next.

use serde::{Deserialize, Serialize};

use crate::core::action::Transaction;
use crate::core::gid::Gid;
use crate::core::player::PlayerId;

/// What the player currently has picked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<Gid>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<Gid>,
}

/// Result of one click.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The selection changed. Nothing to record.
    Selected(Selection),
    /// The picked item was clicked again.
    Cleared,
    /// An item was picked and another surface clicked: record this move.
    /// The selection is cleared.
    Move(Transaction),
}

impl Selection {
    /// Nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.surface.is_none() && self.item.is_none()
    }

    /// Handle a click by `user` on `surface`, optionally on one of its items.
    #[must_use]
    pub fn select(&self, user: &PlayerId, surface: Gid, item: Option<Gid>) -> SelectionOutcome {
        if let (Some(from), Some(picked)) = (self.surface, self.item) {
            if from != surface {
                return SelectionOutcome::Move(Transaction::new(user.clone(), picked, from, surface));
            }
        }

        if item == self.item {
            SelectionOutcome::Cleared
        } else {
            SelectionOutcome::Selected(Selection {
                surface: Some(surface),
                item,
            })
        }
    }

    /// The selection to keep after `outcome`.
    #[must_use]
    pub fn after(outcome: &SelectionOutcome) -> Selection {
        match outcome {
            SelectionOutcome::Selected(selection) => *selection,
            SelectionOutcome::Cleared | SelectionOutcome::Move(_) => Selection::new(),
        }
    }
}
