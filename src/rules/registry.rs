//! Rules registry for ruleset lookup by id.
//!
//! Games are stored with a ruleset id (`"loveletter"`), not the rules
//! themselves. The `RulesRegistry` maps those ids to fully populated
//! `Rules` values, either built in or loaded from JSON documents.

use rustc_hash::FxHashMap;

use super::schema::Rules;
use crate::core::error::RulesError;
use crate::games::love_letter;

/// Registry of rulesets keyed by id.
///
/// ## Example
///
/// ```
/// use rust_tabletop::rules::RulesRegistry;
///
/// let registry = RulesRegistry::with_builtin();
/// let rules = registry.get("loveletter").unwrap();
/// assert_eq!(rules.name, "Love Letter");
/// ```
#[derive(Clone, Debug, Default)]
pub struct RulesRegistry {
    rules: FxHashMap<String, Rules>,
}

impl RulesRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the rulesets shipped in `games`.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(love_letter::RULES_ID, love_letter::rules());
        registry
    }

    /// Register a ruleset.
    ///
    /// Panics if a ruleset with the same id already exists.
    pub fn register(&mut self, id: impl Into<String>, rules: Rules) {
        let id = id.into();
        if self.rules.contains_key(&id) {
            panic!("Ruleset '{}' already registered", id);
        }
        self.rules.insert(id, rules);
    }

    /// Parse a JSON rules document and register it under `id`.
    ///
    /// Unlike [`register`](Self::register), an id that is already taken is
    /// an error rather than a panic.
    pub fn load_json(&mut self, id: impl Into<String>, json: &str) -> Result<&Rules, RulesError> {
        let id = id.into();
        if self.rules.contains_key(&id) {
            return Err(RulesError::DuplicateRuleset(id));
        }
        let rules: Rules = serde_json::from_str(json)?;
        Ok(self.rules.entry(id).or_insert(rules))
    }

    /// Get a ruleset by id.
    pub fn get(&self, id: &str) -> Result<&Rules, RulesError> {
        self.rules
            .get(id)
            .ok_or_else(|| RulesError::UnknownRuleset(id.to_string()))
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.rules.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over registered ids.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }
}
