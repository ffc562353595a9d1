//! Concrete (expanded) surfaces and items.
//!
//! Expansion turns each template into one or more instances with a fresh
//! `Gid` and the repetition context that produced them. Items never change
//! after expansion; surfaces only change which item ids they hold.

use serde::Serialize;

use crate::core::gid::Gid;
use crate::core::player::PlayerId;
use crate::rules::{ItemTemplate, ItemView, ItemViews, Repeated, SurfaceTemplate, SurfaceType, Variant};

/// A concrete item instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: Gid,

    /// Which copy this is (numbered copy, or the player it was made for).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeated: Option<Repeated>,

    #[serde(flatten)]
    pub template: ItemTemplate,
}

impl Item {
    #[must_use]
    pub fn new(id: Gid, repeated: Option<Repeated>, template: ItemTemplate) -> Self {
        Self {
            id,
            repeated,
            template,
        }
    }

    #[must_use]
    pub fn variant(&self, view: &ItemView) -> Option<&Variant> {
        self.template.variants.get(view)
    }

    /// Item-level display name, independent of any view.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.template.metadata.name.as_deref()
    }
}

/// A concrete placement zone.
///
/// `items` is ordered bottom first: the last entry is the top of a pile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Surface {
    pub id: Gid,

    /// Which copy this is; per-player surfaces carry their owner here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeated: Option<Repeated>,

    #[serde(flatten)]
    pub template: SurfaceTemplate,

    pub items: im::Vector<Gid>,
}

impl Surface {
    /// An empty surface.
    #[must_use]
    pub fn new(id: Gid, repeated: Option<Repeated>, template: SurfaceTemplate) -> Self {
        Self {
            id,
            repeated,
            template,
            items: im::Vector::new(),
        }
    }

    #[must_use]
    pub fn class(&self) -> &str {
        &self.template.class
    }

    #[must_use]
    pub fn surface_type(&self) -> SurfaceType {
        self.template.surface_type
    }

    #[must_use]
    pub fn item_views(&self) -> &ItemViews {
        &self.template.item_views
    }

    /// Player this surface was repeated for, if any.
    #[must_use]
    pub fn owner(&self) -> Option<&PlayerId> {
        self.repeated.as_ref().and_then(|r| r.value.player())
    }

    #[must_use]
    pub fn is_owned_by(&self, player: &PlayerId) -> bool {
        self.repeated.as_ref().is_some_and(|r| r.is_owned_by(player))
    }

    #[must_use]
    pub fn contains(&self, item: Gid) -> bool {
        self.items.contains(&item)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Top item (last placed).
    #[must_use]
    pub fn top(&self) -> Option<Gid> {
        self.items.last().copied()
    }

    /// Human label: owner (or copy number) followed by class.
    #[must_use]
    pub fn label(&self) -> String {
        match &self.repeated {
            Some(repeated) => format!("{} {}", repeated.value, self.class()),
            None => self.class().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RepeatValue;

    fn hand_of(player: &str) -> Surface {
        Surface::new(
            Gid::from_bytes([1; 8]),
            Some(Repeated {
                index: 0,
                value: RepeatValue::Player(PlayerId::new(player)),
            }),
            SurfaceTemplate::new("hand", SurfaceType::ShowAll, ItemView::Back)
                .with_local(ItemView::Front),
        )
    }

    #[test]
    fn test_surface_ownership() {
        let hand = hand_of("adam");
        assert_eq!(hand.owner(), Some(&PlayerId::new("adam")));
        assert!(hand.is_owned_by(&PlayerId::new("adam")));
        assert!(!hand.is_owned_by(&PlayerId::new("eve")));

        let pile = Surface::new(
            Gid::from_bytes([2; 8]),
            None,
            SurfaceTemplate::new("pile", SurfaceType::ShowTop, ItemView::Back),
        );
        assert_eq!(pile.owner(), None);
        assert_eq!(pile.label(), "pile");
    }

    #[test]
    fn test_surface_items() {
        let mut hand = hand_of("eve");
        assert!(hand.is_empty());
        assert_eq!(hand.top(), None);

        hand.items.push_back(Gid::from_bytes([10; 8]));
        hand.items.push_back(Gid::from_bytes([11; 8]));

        assert_eq!(hand.len(), 2);
        assert_eq!(hand.top(), Some(Gid::from_bytes([11; 8])));
        assert!(hand.contains(Gid::from_bytes([10; 8])));
        assert_eq!(hand.label(), "eve hand");
    }

    #[test]
    fn test_surface_json_is_flat() {
        let json = serde_json::to_value(hand_of("adam")).unwrap();
        assert_eq!(json["class"], "hand");
        assert_eq!(json["type"], "SHOW_ALL");
        assert_eq!(json["itemViews"]["local"], "front");
        assert_eq!(json["repeated"]["value"], "adam");
        assert!(json["items"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_item_lookup() {
        let item = Item::new(
            Gid::from_bytes([3; 8]),
            None,
            ItemTemplate::named("Card")
                .with_variant(ItemView::Front, Variant::new().with_name("Guard")),
        );

        assert_eq!(item.name(), Some("Card"));
        assert_eq!(item.variant(&ItemView::Front).unwrap().name(), Some("Guard"));
        assert!(item.variant(&ItemView::Back).is_none());
    }
}
