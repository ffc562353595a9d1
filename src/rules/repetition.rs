//! Repetition: expanding one template into several concrete instances.
//!
//! A template may carry a `repeat` directive:
//! - `{ "times": N }` produces N copies, copy `i` repeated as `{index: i, value: i}`
//! - `{ "forEach": "PLAYER" }` produces one copy per roster seat,
//!   repeated as `{index: seat, value: player id}`; an optional `times`
//!   walks the roster that many rounds
//! - no directive produces one copy with no repetition context

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::core::player::{PlayerId, Roster};

/// What a `forEach` repetition iterates over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ForEach {
    Player,
}

fn one() -> u32 {
    1
}

/// A repetition directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Repetition {
    /// One copy per target, `times` rounds over the targets.
    ForEach {
        #[serde(rename = "forEach")]
        for_each: ForEach,
        #[serde(default = "one")]
        times: u32,
    },
    /// A fixed number of copies.
    Times { times: u32 },
}

impl Repetition {
    #[must_use]
    pub const fn times(n: u32) -> Self {
        Repetition::Times { times: n }
    }

    #[must_use]
    pub const fn for_each_player() -> Self {
        Repetition::ForEach {
            for_each: ForEach::Player,
            times: 1,
        }
    }
}

/// The value a repeated copy is bound to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RepeatValue {
    Index(usize),
    Player(PlayerId),
}

impl RepeatValue {
    /// The owning player, for per-player copies.
    #[must_use]
    pub fn player(&self) -> Option<&PlayerId> {
        match self {
            RepeatValue::Player(player) => Some(player),
            RepeatValue::Index(_) => None,
        }
    }
}

impl std::fmt::Display for RepeatValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepeatValue::Index(i) => write!(f, "{}", i),
            RepeatValue::Player(player) => write!(f, "{}", player),
        }
    }
}

/// Repetition context of a concrete surface or item.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Repeated {
    pub index: usize,
    pub value: RepeatValue,
}

impl Repeated {
    /// Whether this copy belongs to `player`.
    #[must_use]
    pub fn is_owned_by(&self, player: &PlayerId) -> bool {
        self.value.player() == Some(player)
    }
}

/// Repetition contexts for a directive against the current roster.
///
/// `None` entries stand for the single unrepeated copy.
#[must_use]
pub fn expand_repeat(
    repeat: Option<&Repetition>,
    roster: &Roster,
) -> SmallVec<[Option<Repeated>; 4]> {
    match repeat {
        None => smallvec![None],
        Some(Repetition::Times { times }) => (0..*times as usize)
            .map(|i| {
                Some(Repeated {
                    index: i,
                    value: RepeatValue::Index(i),
                })
            })
            .collect(),
        Some(Repetition::ForEach {
            for_each: ForEach::Player,
            times,
        }) => (0..*times)
            .flat_map(|_| roster.iter())
            .map(|(index, player)| {
                Some(Repeated {
                    index,
                    value: RepeatValue::Player(player.clone()),
                })
            })
            .collect(),
    }
}

/// A template with an optional repetition directive.
///
/// Serialized flat: `{ "repeat": {...}, ...template fields }`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Repeat<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<Repetition>,

    #[serde(flatten)]
    pub template: T,
}

impl<T> Repeat<T> {
    /// A template that expands to exactly one instance.
    #[must_use]
    pub fn once(template: T) -> Self {
        Self {
            repeat: None,
            template,
        }
    }

    #[must_use]
    pub fn repeated(template: T, repeat: Repetition) -> Self {
        Self {
            repeat: Some(repeat),
            template,
        }
    }
}

/// Expand a template list in declaration order.
pub fn expand<'a, T>(
    list: &'a [Repeat<T>],
    roster: &'a Roster,
) -> impl Iterator<Item = (Option<Repeated>, &'a T)> + 'a
where
    T: 'a,
{
    list.iter().flat_map(move |entry| {
        expand_repeat(entry.repeat.as_ref(), roster)
            .into_iter()
            .map(move |repeated| (repeated, &entry.template))
    })
}
