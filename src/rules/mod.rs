//! Declarative rules schema.
//!
//! Games describe their shape as data:
//! - Items and their variants (`item`)
//! - Repetition directives that fan templates out (`repetition`)
//! - Configs, collections, distributions and surfaces (`schema`)
//! - A registry resolving stored ruleset ids (`registry`)
//!
//! The engine interprets these documents but never hardcodes a game.

pub mod item;
pub mod repetition;
pub mod schema;
pub mod registry;

pub use item::{ItemTemplate, ItemView, Metadata, RenderKind, Value, Variant, Variants};
pub use repetition::{expand, expand_repeat, ForEach, Repeat, RepeatValue, Repeated, Repetition};
pub use schema::{
    Collection, Config, ConfigCondition, Deck, Distribution, Exposure, ItemViews, Rules,
    SurfaceTemplate, SurfaceType,
};
pub use registry::RulesRegistry;
