//! Round engine: expansion, replay, projection.
//!
//! All state is derived. A round is stored as rules id + roster + seed +
//! action log, and every read recomputes from those:
//!
//! ```text
//! Rules + Roster + seed --expand_round--> Snapshot
//! Snapshot + actions    --replay-------> Snapshot
//! Snapshot + viewer     --project------> LocalView
//! ```
//!
//! ## Key Types
//!
//! - `Round`: Stored round (seed + raw log) with helpers for the whole pipeline
//! - `ReplayReport`: Applied and skipped moves of one replay
//! - `Timeline`: Every intermediate state of a replay
//! - `LocalView` / `LocalSurface`: A snapshot as one viewer sees it
//! - `DecoratedTransaction`: A move with its ids looked up, for the chat log
//! - `Selection`: Click-to-move state held by the host

pub mod expansion;
pub mod replay;
pub mod projection;
pub mod decorate;
pub mod selection;
pub mod round;

pub use expansion::expand_round;
pub use replay::{replay, replay_prefix, ReplayReport, SkippedAction, Timeline};
pub use projection::{project, LocalSurface, LocalView, ResolvedItem};
pub use decorate::{decorate_transaction, DecoratedTransaction};
pub use selection::{Selection, SelectionOutcome};
pub use round::{Round, RESET_MESSAGE};
