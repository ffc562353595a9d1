//! Per-viewer projection of a snapshot.
//!
//! A projection never changes the snapshot. For each surface it records
//! whether the viewer owns it and which item views apply, so a renderer
//! only sees the one view it is entitled to (a remote hand resolves to
//! `back`, never `front`).
//!
//! ## Key Types
//!
//! - `LocalSurface`: A surface annotated for one viewer
//! - `LocalView`: All surfaces of a snapshot, split into local and remote
//! - `ResolvedItem`: An item narrowed to a single variant and render kind

use serde::Serialize;
use smallvec::{smallvec, SmallVec};

use crate::core::error::{ViewResolutionError, ViewerNotFoundError};
use crate::core::gid::Gid;
use crate::core::player::PlayerId;
use crate::rules::{Exposure, ItemView, RenderKind, Repeated, SurfaceType, Variant};
use crate::surfaces::{Item, Snapshot, Surface};

/// A surface as one viewer sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalSurface {
    pub id: Gid,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeated: Option<Repeated>,

    pub class: String,

    #[serde(rename = "type")]
    pub surface_type: SurfaceType,

    /// The viewer owns this surface.
    pub is_local: bool,

    /// The viewer owns it and it has a view only the owner gets.
    pub is_private: bool,

    /// Candidate views, most specific first. Never empty.
    pub item_views: SmallVec<[ItemView; 2]>,

    pub items: im::Vector<Gid>,
}

impl LocalSurface {
    /// Annotate `surface` for `viewer`.
    #[must_use]
    pub fn new(surface: &Surface, viewer: &PlayerId) -> Self {
        let views = surface.item_views();
        let is_local = surface.is_owned_by(viewer);
        let is_private = is_local && views.local.is_some();

        let item_views = match (&views.local, is_local) {
            (Some(local), true) if *local != views.default => {
                smallvec![local.clone(), views.default.clone()]
            }
            (Some(local), true) => smallvec![local.clone()],
            _ => smallvec![views.default.clone()],
        };

        Self {
            id: surface.id,
            repeated: surface.repeated.clone(),
            class: surface.class().to_string(),
            surface_type: surface.surface_type(),
            is_local,
            is_private,
            item_views,
            items: surface.items.clone(),
        }
    }

    /// The view that applies to items on this surface.
    #[must_use]
    pub fn item_view(&self) -> &ItemView {
        &self.item_views[0]
    }

    /// What the surface type lets a renderer show.
    #[must_use]
    pub fn exposed(&self) -> Exposure {
        self.surface_type.expose(&self.items)
    }

    /// Pick the variant of `item` to show on this surface.
    ///
    /// Tries each candidate view in order, then the item's first variant.
    pub fn view_for_item<'a>(
        &self,
        item: &'a Item,
    ) -> Result<(&'a ItemView, &'a Variant), ViewResolutionError> {
        let variants = &item.template.variants;
        self.item_views
            .iter()
            .find_map(|view| variants.iter().find(|(v, _)| *v == view))
            .or_else(|| variants.first())
            .ok_or(ViewResolutionError::NoVariants { item: item.id })
    }

    /// Narrow `item` to one variant and check it can be rendered.
    pub fn resolve<'a>(&self, item: &'a Item) -> Result<ResolvedItem<'a>, ViewResolutionError> {
        let (view, variant) = self.view_for_item(item)?;
        Ok(ResolvedItem {
            id: item.id,
            view,
            kind: view.render_kind()?,
            variant,
        })
    }
}

/// An item narrowed to what one viewer may see.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedItem<'a> {
    pub id: Gid,
    pub view: &'a ItemView,
    pub kind: RenderKind,
    pub variant: &'a Variant,
}

/// Every surface of a snapshot, projected for one viewer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LocalView {
    pub viewer: PlayerId,
    pub local: Vec<LocalSurface>,
    pub remote: Vec<LocalSurface>,
}

impl LocalView {
    /// All surfaces, local first, each bucket in snapshot order.
    pub fn surfaces(&self) -> impl Iterator<Item = &LocalSurface> {
        self.local.iter().chain(self.remote.iter())
    }

    #[must_use]
    pub fn surface(&self, id: Gid) -> Option<&LocalSurface> {
        self.surfaces().find(|s| s.id == id)
    }

    /// Surfaces of a class, local first.
    pub fn surfaces_of_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a LocalSurface> {
        self.surfaces().filter(move |s| s.class == class)
    }
}

/// Project `snapshot` for `viewer`.
///
/// Fails if the viewer owns no surface, which means the viewer is not part
/// of the round.
pub fn project(snapshot: &Snapshot, viewer: &PlayerId) -> Result<LocalView, ViewerNotFoundError> {
    let (local, remote): (Vec<_>, Vec<_>) = snapshot
        .surfaces()
        .map(|surface| LocalSurface::new(surface, viewer))
        .partition(|s| s.is_local);

    if local.is_empty() {
        return Err(ViewerNotFoundError {
            viewer: viewer.clone(),
        });
    }

    Ok(LocalView {
        viewer: viewer.clone(),
        local,
        remote,
    })
}
