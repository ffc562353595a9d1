//! Item templates: the pieces a deck is made of.
//!
//! An item has one or more *variants*, each keyed by an [`ItemView`]
//! ("front", "back", ...). Surfaces decide which view a viewer gets; the
//! variant map decides what that view shows.
//!
//! Static data only. Where an item sits is tracked by the surfaces.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;

use crate::core::error::ViewResolutionError;

/// Name of an item rendering.
///
/// The known kinds have renderers. Anything else is kept verbatim so that
/// documents round-trip, and fails when asked for a renderer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemView {
    /// Face-up card.
    Front,
    /// Face-down card.
    Back,
    /// Turn indicator.
    Turn,
    /// Numeric counter.
    Num,
    /// A view name with no renderer.
    Other(String),
}

/// How a renderer draws an item under a given view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderKind {
    Card,
    TurnMarker,
    Counter,
}

impl ItemView {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            ItemView::Front => "front",
            ItemView::Back => "back",
            ItemView::Turn => "turn",
            ItemView::Num => "num",
            ItemView::Other(name) => name,
        }
    }

    /// The renderer for this view.
    pub fn render_kind(&self) -> Result<RenderKind, ViewResolutionError> {
        match self {
            ItemView::Front | ItemView::Back => Ok(RenderKind::Card),
            ItemView::Turn => Ok(RenderKind::TurnMarker),
            ItemView::Num => Ok(RenderKind::Counter),
            ItemView::Other(name) => Err(ViewResolutionError::MissingViewImplementation {
                view: name.clone(),
            }),
        }
    }
}

impl From<&str> for ItemView {
    fn from(name: &str) -> Self {
        match name {
            "front" => ItemView::Front,
            "back" => ItemView::Back,
            "turn" => ItemView::Turn,
            "num" => ItemView::Num,
            other => ItemView::Other(other.to_string()),
        }
    }
}

impl From<String> for ItemView {
    fn from(name: String) -> Self {
        match ItemView::from(name.as_str()) {
            ItemView::Other(_) => ItemView::Other(name),
            known => known,
        }
    }
}

impl From<ItemView> for String {
    fn from(view: ItemView) -> Self {
        match view {
            ItemView::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ItemView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scalar carried by a variant (a card's rank, a counter's value).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(i64),
    Text(String),
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

/// Display metadata shared by items and variants.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Metadata {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.image.is_none()
    }
}

/// One rendering of an item.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,
}

impl Variant {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.metadata.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.metadata.image = Some(image.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.metadata.name.as_deref()
    }
}

/// Ordered view-to-variant table.
///
/// Declaration order is kept: the first entry is the fallback when a
/// surface asks for a view the item does not define.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Variants {
    entries: SmallVec<[(ItemView, Variant); 2]>,
}

impl Variants {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the variant for `view`.
    pub fn insert(&mut self, view: ItemView, variant: Variant) {
        match self.entries.iter_mut().find(|(v, _)| *v == view) {
            Some((_, slot)) => *slot = variant,
            None => self.entries.push((view, variant)),
        }
    }

    #[must_use]
    pub fn get(&self, view: &ItemView) -> Option<&Variant> {
        self.entries.iter().find(|(v, _)| v == view).map(|(_, variant)| variant)
    }

    #[must_use]
    pub fn contains(&self, view: &ItemView) -> bool {
        self.get(view).is_some()
    }

    /// First declared variant.
    #[must_use]
    pub fn first(&self) -> Option<(&ItemView, &Variant)> {
        self.entries.first().map(|(view, variant)| (view, variant))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemView, &Variant)> {
        self.entries.iter().map(|(view, variant)| (view, variant))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Variants {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (view, variant) in &self.entries {
            map.serialize_entry(view.as_str(), variant)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Variants {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct VariantsVisitor;

        impl<'de> Visitor<'de> for VariantsVisitor {
            type Value = Variants;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from item view to variant")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Variants, A::Error> {
                let mut variants = Variants::new();
                while let Some((view, variant)) = access.next_entry::<String, Variant>()? {
                    variants.insert(ItemView::from(view), variant);
                }
                Ok(variants)
            }
        }

        deserializer.deserialize_map(VariantsVisitor)
    }
}

/// Static description of one kind of game piece.
///
/// ## Example
///
/// ```
/// use rust_tabletop::rules::{ItemTemplate, ItemView, Variant};
///
/// let guard = ItemTemplate::named("Card")
///     .with_variant(ItemView::Front, Variant::new().with_value(1).with_name("Guard"))
///     .with_variant(ItemView::Back, Variant::new().with_image("/back.jpg"));
///
/// assert_eq!(guard.variants.get(&ItemView::Front).unwrap().name(), Some("Guard"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemTemplate {
    #[serde(default, skip_serializing_if = "Metadata::is_empty")]
    pub metadata: Metadata,

    pub variants: Variants,
}

impl ItemTemplate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Template with an item-level display name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        let mut template = Self::default();
        template.metadata.name = Some(name.into());
        template
    }

    /// Add a variant (builder pattern).
    #[must_use]
    pub fn with_variant(mut self, view: ItemView, variant: Variant) -> Self {
        self.variants.insert(view, variant);
        self
    }
}
