//! Player identification and round rosters.
//!
//! ## PlayerId
//!
//! Opaque user id string, as stored by the document database.
//!
//! ## Roster
//!
//! Ordered, duplicate-free list of the players taking part in a round.
//! Roster order decides `repeated.index` for per-player surfaces and items,
//! so it must be stable for a round to replay identically.

use serde::{Deserialize, Serialize};

/// Player identifier (the user id of a participant).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Ordered set of players in a round.
///
/// ```
/// use rust_tabletop::core::{PlayerId, Roster};
///
/// let roster = Roster::new(["adam", "eve", "adam"]);
/// assert_eq!(roster.len(), 2);
/// assert_eq!(roster.position(&PlayerId::new("eve")), Some(1));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<PlayerId>", into = "Vec<PlayerId>")]
pub struct Roster {
    players: Vec<PlayerId>,
}

impl Roster {
    /// Build a roster, keeping the first occurrence of each player.
    pub fn new<I, P>(players: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PlayerId>,
    {
        let mut roster = Self::default();
        for player in players {
            roster.push(player.into());
        }
        roster
    }

    /// Append a player. Returns `false` if already present.
    pub fn push(&mut self, player: PlayerId) -> bool {
        if self.players.contains(&player) {
            return false;
        }
        self.players.push(player);
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    #[must_use]
    pub fn contains(&self, player: &PlayerId) -> bool {
        self.players.contains(player)
    }

    /// Seat index of a player.
    #[must_use]
    pub fn position(&self, player: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p == player)
    }

    /// Iterate over (seat index, player) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &PlayerId)> {
        self.players.iter().enumerate()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[PlayerId] {
        &self.players
    }
}

impl From<Vec<PlayerId>> for Roster {
    fn from(players: Vec<PlayerId>) -> Self {
        Self::new(players)
    }
}

impl From<Roster> for Vec<PlayerId> {
    fn from(roster: Roster) -> Self {
        roster.players
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a PlayerId;
    type IntoIter = std::slice::Iter<'a, PlayerId>;

    fn into_iter(self) -> Self::IntoIter {
        self.players.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let adam = PlayerId::new("adam");
        assert_eq!(adam.as_str(), "adam");
        assert_eq!(format!("{}", adam), "adam");
        assert_eq!(PlayerId::from("adam"), adam);
    }

    #[test]
    fn test_roster_keeps_first_occurrence() {
        let roster = Roster::new(["eve", "adam", "eve", "cain"]);

        let ids: Vec<_> = roster.iter().map(|(i, p)| (i, p.as_str())).collect();
        assert_eq!(ids, vec![(0, "eve"), (1, "adam"), (2, "cain")]);
    }

    #[test]
    fn test_roster_push() {
        let mut roster = Roster::default();
        assert!(roster.is_empty());
        assert!(roster.push(PlayerId::new("adam")));
        assert!(!roster.push(PlayerId::new("adam")));
        assert_eq!(roster.len(), 1);
        assert!(roster.contains(&PlayerId::new("adam")));
        assert_eq!(roster.position(&PlayerId::new("abel")), None);
    }

    #[test]
    fn test_roster_serialization() {
        let roster = Roster::new(["adam", "eve"]);
        let json = serde_json::to_string(&roster).unwrap();
        assert_eq!(json, r#"["adam","eve"]"#);

        let back: Roster = serde_json::from_str(&json).unwrap();
        assert_eq!(back, roster);

        let deduped: Roster = serde_json::from_str(r#"["adam","adam"]"#).unwrap();
        assert_eq!(deduped.len(), 1);
    }
}
