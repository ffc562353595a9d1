//! Canonical round snapshot: every surface, every item, and where each
//! item currently sits.
//!
//! The `Snapshot` tracks:
//! - Surfaces in expansion order, each with its ordered item list
//! - The item catalog (static item data by id)
//! - Item locations: item id -> surface id
//!
//! Every collection is an `im` persistent structure, so `clone()` is O(1)
//! and point-in-time copies are cheap.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::surface::{Item, Surface};
use crate::core::error::{EngineError, ReplayError};
use crate::core::gid::Gid;

/// Why a move was not applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum SkipReason {
    /// `from` and `to` are the same surface.
    SelfMove,
    /// `from` or `to` is not a surface of this round.
    UnknownSurface { surface: Gid },
    /// The item is not on any surface of this round.
    UnknownItem,
    /// The item already sits on `to`: a duplicate delivery.
    AlreadyApplied,
    /// The item sits on a third surface: two moves raced.
    Conflict { found_on: Gid },
}

/// Surfaces and items of one round at one point in its action log.
///
/// ## Usage
///
/// ```
/// use rust_tabletop::core::Gid;
/// use rust_tabletop::rules::{ItemTemplate, ItemView, SurfaceTemplate, SurfaceType};
/// use rust_tabletop::surfaces::{Item, Snapshot, Surface};
///
/// let pile = Gid::from_bytes([1; 8]);
/// let card = Gid::from_bytes([2; 8]);
///
/// let mut snapshot = Snapshot::new();
/// snapshot.add_surface(Surface::new(
///     pile,
///     None,
///     SurfaceTemplate::new("pile", SurfaceType::ShowTop, ItemView::Back),
/// ));
/// snapshot.place_item(Item::new(card, None, ItemTemplate::new()), pile);
///
/// assert_eq!(snapshot.location_of(card), Some(pile));
/// ```
#[derive(Clone, Debug, Default, Serialize)]
pub struct Snapshot {
    surfaces: im::Vector<Surface>,

    items: im::OrdMap<Gid, Item>,

    /// surface id -> position in `surfaces`
    #[serde(skip)]
    surface_index: im::HashMap<Gid, usize>,

    /// item id -> surface id
    #[serde(skip)]
    locations: im::HashMap<Gid, Gid>,
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        // index and locations are derived from these two
        self.surfaces == other.surfaces && self.items == other.items
    }
}

impl Eq for Snapshot {}

impl Snapshot {
    /// Create an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a surface. Its item list is indexed as-is.
    ///
    /// Panics if a surface with the same id already exists.
    pub fn add_surface(&mut self, surface: Surface) {
        if self.surface_index.contains_key(&surface.id) {
            panic!("Surface {} already exists in snapshot", surface.id);
        }
        for &item in &surface.items {
            self.locations.insert(item, surface.id);
        }
        self.surface_index.insert(surface.id, self.surfaces.len());
        self.surfaces.push_back(surface);
    }

    /// Register an item and put it on top of `surface`.
    ///
    /// Panics if the item already exists or the surface is unknown.
    pub fn place_item(&mut self, item: Item, surface: Gid) {
        if self.items.contains_key(&item.id) {
            panic!("Item {} already exists in snapshot", item.id);
        }
        let index = match self.surface_index.get(&surface) {
            Some(&index) => index,
            None => panic!("Surface {} not found in snapshot", surface),
        };

        self.locations.insert(item.id, surface);
        self.surfaces[index].items.push_back(item.id);
        self.items.insert(item.id, item);
    }

    /// Move `item` from the surface `from` to the top of `to`.
    ///
    /// Nothing changes unless the item currently sits on `from`.
    pub fn move_item(&mut self, item: Gid, from: Gid, to: Gid) -> Result<(), SkipReason> {
        if from == to {
            return Err(SkipReason::SelfMove);
        }
        let from_index = *self
            .surface_index
            .get(&from)
            .ok_or(SkipReason::UnknownSurface { surface: from })?;
        let to_index = *self
            .surface_index
            .get(&to)
            .ok_or(SkipReason::UnknownSurface { surface: to })?;

        match self.locations.get(&item) {
            None => return Err(SkipReason::UnknownItem),
            Some(&at) if at == to => return Err(SkipReason::AlreadyApplied),
            Some(&at) if at != from => return Err(SkipReason::Conflict { found_on: at }),
            Some(_) => {}
        }

        let source = &mut self.surfaces[from_index].items;
        let position = source.index_of(&item).ok_or(SkipReason::UnknownItem)?;
        source.remove(position);

        self.surfaces[to_index].items.push_back(item);
        self.locations.insert(item, to);
        Ok(())
    }

    /// Surfaces in expansion order.
    pub fn surfaces(&self) -> impl Iterator<Item = &Surface> {
        self.surfaces.iter()
    }

    /// Get a surface by id.
    #[must_use]
    pub fn surface(&self, id: Gid) -> Option<&Surface> {
        self.surface_index.get(&id).map(|&index| &self.surfaces[index])
    }

    /// Surfaces of a class, in expansion order.
    pub fn surfaces_of_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Surface> {
        self.surfaces.iter().filter(move |s| s.class() == class)
    }

    /// Ids of the surfaces of a class, in expansion order.
    #[must_use]
    pub fn surface_ids_of_class(&self, class: &str) -> Vec<Gid> {
        self.surfaces_of_class(class).map(|s| s.id).collect()
    }

    /// Item catalog, by id.
    #[must_use]
    pub fn items(&self) -> &im::OrdMap<Gid, Item> {
        &self.items
    }

    /// Get an item by id.
    #[must_use]
    pub fn item(&self, id: Gid) -> Option<&Item> {
        self.items.get(&id)
    }

    /// Surface currently holding `item`.
    #[must_use]
    pub fn location_of(&self, item: Gid) -> Option<Gid> {
        self.locations.get(&item).copied()
    }

    #[must_use]
    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    /// Number of items across all surfaces.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.surfaces.iter().map(Surface::len).sum()
    }

    /// Current placement, detached from the static data.
    #[must_use]
    pub fn placement(&self) -> Placement {
        Placement {
            surfaces: self
                .surfaces
                .iter()
                .map(|s| SurfacePlacement {
                    surface: s.id,
                    items: s.items.iter().copied().collect(),
                })
                .collect(),
        }
    }

    /// Copy of this snapshot with `placement` laid over it.
    ///
    /// The placement must name exactly this snapshot's surfaces and items.
    pub fn with_placement(&self, placement: &Placement) -> Result<Snapshot, ReplayError> {
        if placement.surfaces.len() != self.surfaces.len() {
            return Err(ReplayError::StalePlacement);
        }

        let mut next = self.clone();
        let mut seen = FxHashSet::default();
        let mut seen_surfaces = FxHashSet::default();
        for entry in &placement.surfaces {
            let index = *self
                .surface_index
                .get(&entry.surface)
                .ok_or(ReplayError::StalePlacement)?;
            if !seen_surfaces.insert(entry.surface) {
                return Err(ReplayError::StalePlacement);
            }

            let mut items = im::Vector::new();
            for &item in &entry.items {
                if !self.items.contains_key(&item) || !seen.insert(item) {
                    return Err(ReplayError::StalePlacement);
                }
                next.locations.insert(item, entry.surface);
                items.push_back(item);
            }
            next.surfaces[index].items = items;
        }

        // every item placed exactly once
        if seen.len() != self.items.len() {
            return Err(ReplayError::StalePlacement);
        }
        Ok(next)
    }
}

/// Item ids per surface, for caching a replayed state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub surfaces: Vec<SurfacePlacement>,
}

/// Item ids on one surface, bottom first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfacePlacement {
    pub surface: Gid,
    pub items: Vec<Gid>,
}

impl Placement {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, EngineError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode bytes produced by [`Placement::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EngineError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{ItemTemplate, ItemView, SurfaceTemplate, SurfaceType};

    fn gid(n: u8) -> Gid {
        Gid::from_bytes([n; 8])
    }

    /// Two surfaces (1, 2), three items (10, 11, 12) on surface 1.
    fn fixture() -> Snapshot {
        let mut snapshot = Snapshot::new();
        for n in [1, 2] {
            snapshot.add_surface(Surface::new(
                gid(n),
                None,
                SurfaceTemplate::new(format!("s{n}"), SurfaceType::ShowAll, ItemView::Front),
            ));
        }
        for n in [10, 11, 12] {
            snapshot.place_item(Item::new(gid(n), None, ItemTemplate::new()), gid(1));
        }
        snapshot
    }

    #[test]
    fn test_place_and_lookup() {
        let snapshot = fixture();

        assert_eq!(snapshot.surface_count(), 2);
        assert_eq!(snapshot.total_items(), 3);
        assert_eq!(snapshot.location_of(gid(11)), Some(gid(1)));
        assert_eq!(snapshot.location_of(gid(99)), None);
        assert_eq!(snapshot.surface(gid(1)).unwrap().top(), Some(gid(12)));
        assert!(snapshot.item(gid(10)).is_some());
        assert_eq!(snapshot.surface_ids_of_class("s2"), vec![gid(2)]);
    }

    #[test]
    fn test_move_item() {
        let mut snapshot = fixture();

        snapshot.move_item(gid(10), gid(1), gid(2)).unwrap();

        let from: Vec<_> = snapshot.surface(gid(1)).unwrap().items.iter().copied().collect();
        assert_eq!(from, vec![gid(11), gid(12)]);
        assert_eq!(snapshot.surface(gid(2)).unwrap().top(), Some(gid(10)));
        assert_eq!(snapshot.location_of(gid(10)), Some(gid(2)));
    }

    #[test]
    fn test_move_item_rejections() {
        let mut snapshot = fixture();

        assert_eq!(
            snapshot.move_item(gid(10), gid(1), gid(1)),
            Err(SkipReason::SelfMove)
        );
        assert_eq!(
            snapshot.move_item(gid(10), gid(7), gid(2)),
            Err(SkipReason::UnknownSurface { surface: gid(7) })
        );
        assert_eq!(
            snapshot.move_item(gid(99), gid(1), gid(2)),
            Err(SkipReason::UnknownItem)
        );

        snapshot.move_item(gid(10), gid(1), gid(2)).unwrap();
        assert_eq!(
            snapshot.move_item(gid(10), gid(1), gid(2)),
            Err(SkipReason::AlreadyApplied)
        );
        assert_eq!(
            snapshot.move_item(gid(11), gid(2), gid(1)),
            Err(SkipReason::Conflict { found_on: gid(1) })
        );
        assert_eq!(snapshot.total_items(), 3);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = fixture();
        let mut moved = original.clone();
        moved.move_item(gid(12), gid(1), gid(2)).unwrap();

        assert_eq!(original.location_of(gid(12)), Some(gid(1)));
        assert_eq!(moved.location_of(gid(12)), Some(gid(2)));
        assert_ne!(original, moved);
    }

    #[test]
    fn test_placement_roundtrip() {
        let fresh = fixture();
        let mut played = fresh.clone();
        played.move_item(gid(11), gid(1), gid(2)).unwrap();

        let bytes = played.placement().to_bytes().unwrap();
        let placement = Placement::from_bytes(&bytes).unwrap();
        let restored = fresh.with_placement(&placement).unwrap();

        assert_eq!(restored, played);
        assert_eq!(restored.location_of(gid(11)), Some(gid(2)));
    }

    #[test]
    fn test_stale_placement() {
        let fresh = fixture();
        let mut placement = fresh.placement();
        placement.surfaces[0].items.pop();

        assert_eq!(
            fresh.with_placement(&placement),
            Err(ReplayError::StalePlacement)
        );

        let mut placement = fresh.placement();
        placement.surfaces[1].items.push(gid(10));
        assert_eq!(
            fresh.with_placement(&placement),
            Err(ReplayError::StalePlacement)
        );
    }

    #[test]
    fn test_placement_repeated_surface() {
        let fresh = fixture();
        let mut placement = fresh.placement();
        // second entry reuses the first surface with an empty list
        placement.surfaces[1].surface = gid(1);
        placement.surfaces[1].items.clear();

        assert_eq!(
            fresh.with_placement(&placement),
            Err(ReplayError::StalePlacement)
        );
    }

    #[test]
    #[should_panic(expected = "already exists")]
    fn test_duplicate_item_panics() {
        let mut snapshot = fixture();
        snapshot.place_item(Item::new(gid(10), None, ItemTemplate::new()), gid(2));
    }
}
