//! Built-in rulesets.
//!
//! Each game is plain data built from the `rules` schema. Nothing in the
//! engine knows about any of them.
//!
//! - `love_letter`: Love Letter for two players

pub mod love_letter;
