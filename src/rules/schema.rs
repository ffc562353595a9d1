//! Rules documents: configs, collections, distributions, surfaces.
//!
//! A `Rules` value is pure configuration. It names a game and lists the
//! `Config` variants it supports, each gated by a player-count range.
//! The engine never mutates it.
//!
//! Field names follow the stored document shape (`camelCase`), so rules can
//! be kept as JSON next to the game data.

use serde::{Deserialize, Serialize};

use super::item::{ItemTemplate, ItemView};
use super::repetition::Repeat;
use crate::core::error::ConfigurationError;
use crate::core::gid::Gid;

/// How a surface presents its items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SurfaceType {
    /// Only the top item, plus the pile size.
    ShowTop,
    /// All items, stacked.
    ShowAll,
    /// All items, spread out.
    ShowAllExpanded,
    /// Nothing at all.
    ShowNone,
    /// Only the item count.
    ShowNum,
}

/// What a renderer may show of a surface's items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Exposure {
    Top { top: Option<Gid>, count: usize },
    All(Vec<Gid>),
    AllExpanded(Vec<Gid>),
    Count(usize),
    Nothing,
}

impl SurfaceType {
    /// Narrow an ordered item list (bottom first) to what this type exposes.
    #[must_use]
    pub fn expose(self, items: &im::Vector<Gid>) -> Exposure {
        match self {
            SurfaceType::ShowTop => Exposure::Top {
                top: items.last().copied(),
                count: items.len(),
            },
            SurfaceType::ShowAll => Exposure::All(items.iter().copied().collect()),
            SurfaceType::ShowAllExpanded => {
                Exposure::AllExpanded(items.iter().copied().collect())
            }
            SurfaceType::ShowNum => Exposure::Count(items.len()),
            SurfaceType::ShowNone => Exposure::Nothing,
        }
    }
}

/// Item view selection per viewing context.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemViews {
    /// View for the surface owner. Makes the surface private when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local: Option<ItemView>,

    /// View used to name items moved off this surface in the action log.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<ItemView>,

    /// View for everyone else.
    pub default: ItemView,
}

impl ItemViews {
    #[must_use]
    pub fn new(default: ItemView) -> Self {
        Self {
            local: None,
            log: None,
            default,
        }
    }
}

/// Static description of a placement zone.
///
/// ```
/// use rust_tabletop::rules::{ItemView, SurfaceTemplate, SurfaceType};
///
/// let hand = SurfaceTemplate::new("hand", SurfaceType::ShowAll, ItemView::Back)
///     .with_local(ItemView::Front);
///
/// assert_eq!(hand.item_views.local, Some(ItemView::Front));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceTemplate {
    /// Surface class, matched by distributions ("hand", "pile", ...).
    pub class: String,

    #[serde(rename = "type")]
    pub surface_type: SurfaceType,

    pub item_views: ItemViews,
}

impl SurfaceTemplate {
    pub fn new(class: impl Into<String>, surface_type: SurfaceType, default: ItemView) -> Self {
        Self {
            class: class.into(),
            surface_type,
            item_views: ItemViews::new(default),
        }
    }

    /// Set the owner-only view.
    #[must_use]
    pub fn with_local(mut self, view: ItemView) -> Self {
        self.item_views.local = Some(view);
        self
    }

    /// Set the action-log view.
    #[must_use]
    pub fn with_log(mut self, view: ItemView) -> Self {
        self.item_views.log = Some(view);
        self
    }
}

/// Deal instruction: move items from the deck onto surfaces of a class.
///
/// A repeated distribution deals one item per repetition; an unrepeated one
/// deals everything that is left.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Distribution {
    pub surface_class: String,
}

impl Distribution {
    pub fn to(surface_class: impl Into<String>) -> Self {
        Self {
            surface_class: surface_class.into(),
        }
    }
}

/// An ordered list of item templates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Deck {
    pub items: Vec<Repeat<ItemTemplate>>,
}

/// A deck plus the instructions for dealing it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Collection {
    pub deck: Deck,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub distributions: Vec<Repeat<Distribution>>,

    /// Shuffle before dealing, subject to the engine's `ShufflePolicy`.
    #[serde(default)]
    pub shuffle: bool,
}

/// Player-count range a config applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigCondition {
    pub min_players: usize,

    /// Inclusive upper bound. `None` is unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_players: Option<usize>,
}

impl ConfigCondition {
    #[must_use]
    pub const fn between(min_players: usize, max_players: usize) -> Self {
        Self {
            min_players,
            max_players: Some(max_players),
        }
    }

    #[must_use]
    pub const fn at_least(min_players: usize) -> Self {
        Self {
            min_players,
            max_players: None,
        }
    }

    #[must_use]
    pub fn matches(&self, players: usize) -> bool {
        players >= self.min_players && self.max_players.map_or(true, |max| players <= max)
    }
}

/// One playable shape of a game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Config {
    pub when: ConfigCondition,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub collections: Vec<Collection>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub surfaces: Vec<Repeat<SurfaceTemplate>>,
}

impl Config {
    #[must_use]
    pub fn new(when: ConfigCondition) -> Self {
        Self {
            when,
            collections: Vec::new(),
            surfaces: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_surface(mut self, surface: Repeat<SurfaceTemplate>) -> Self {
        self.surfaces.push(surface);
        self
    }

    #[must_use]
    pub fn with_collection(mut self, collection: Collection) -> Self {
        self.collections.push(collection);
        self
    }
}

/// A named ruleset.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rules {
    pub name: String,
    pub configs: Vec<Config>,
}

impl Rules {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            configs: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.configs.push(config);
        self
    }

    /// First config, in declaration order, that accepts `players`.
    pub fn find_config(&self, players: usize) -> Result<&Config, ConfigurationError> {
        self.configs
            .iter()
            .find(|config| config.when.matches(players))
            .ok_or(ConfigurationError::NoMatchingConfig { players })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::repetition::Repetition;

    #[test]
    fn test_condition_matches() {
        let two = ConfigCondition::between(2, 2);
        assert!(!two.matches(1));
        assert!(two.matches(2));
        assert!(!two.matches(3));

        let open = ConfigCondition::at_least(3);
        assert!(!open.matches(2));
        assert!(open.matches(3));
        assert!(open.matches(100));
    }

    #[test]
    fn test_find_config_first_match_wins() {
        let rules = Rules::new("test")
            .with_config(Config::new(ConfigCondition::between(2, 4)))
            .with_config(
                Config::new(ConfigCondition::at_least(2))
                    .with_surface(Repeat::once(SurfaceTemplate::new(
                        "pile",
                        SurfaceType::ShowTop,
                        ItemView::Back,
                    ))),
            );

        assert!(rules.find_config(3).unwrap().surfaces.is_empty());
        assert_eq!(rules.find_config(5).unwrap().surfaces.len(), 1);
        assert_eq!(
            rules.find_config(1),
            Err(ConfigurationError::NoMatchingConfig { players: 1 })
        );
    }

    #[test]
    fn test_expose() {
        let items: im::Vector<Gid> = (1..=3u8).map(|n| Gid::from_bytes([n; 8])).collect();

        assert_eq!(
            SurfaceType::ShowTop.expose(&items),
            Exposure::Top {
                top: Some(Gid::from_bytes([3; 8])),
                count: 3
            }
        );
        assert_eq!(SurfaceType::ShowNum.expose(&items), Exposure::Count(3));
        assert_eq!(SurfaceType::ShowNone.expose(&items), Exposure::Nothing);
        assert!(matches!(SurfaceType::ShowAll.expose(&items), Exposure::All(v) if v.len() == 3));
        assert_eq!(
            SurfaceType::ShowTop.expose(&im::Vector::new()),
            Exposure::Top { top: None, count: 0 }
        );
    }

    #[test]
    fn test_surface_json_shape() {
        let json = r#"{
            "repeat": {"forEach": "PLAYER"},
            "class": "hand",
            "type": "SHOW_ALL",
            "itemViews": {"local": "front", "default": "back"}
        }"#;
        let surface: Repeat<SurfaceTemplate> = serde_json::from_str(json).unwrap();

        assert_eq!(surface.repeat, Some(Repetition::for_each_player()));
        assert_eq!(surface.template.class, "hand");
        assert_eq!(surface.template.surface_type, SurfaceType::ShowAll);
        assert_eq!(surface.template.item_views.local, Some(ItemView::Front));
        assert_eq!(surface.template.item_views.log, None);
    }
}
