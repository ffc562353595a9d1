//! Concrete surfaces and the round snapshot.
//!
//! Surfaces are **rules-configured**, not hardcoded. A rules document names
//! its surface classes (hand, pile, discard, ...) and expansion turns them
//! into concrete surfaces with stable ids.
//!
//! ## Key Types
//!
//! - `Item`: An expanded item with its id and repetition context
//! - `Surface`: An expanded surface holding an ordered list of item ids
//! - `Snapshot`: All surfaces and items of a round, with item locations
//! - `SkipReason`: Why a move could not be applied
//! - `Placement`: Item ids per surface, detached for caching

pub mod surface;
pub mod snapshot;

pub use surface::{Item, Surface};
pub use snapshot::{Placement, SkipReason, Snapshot, SurfacePlacement};
