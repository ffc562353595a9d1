//! Round expansion: rules + roster + seed -> initial snapshot.
//!
//! Steps, in order:
//! 1. Select the first config whose player range contains the roster size
//! 2. Create one surface per expanded surface template, each with a fresh id
//! 3. Per collection: expand the deck into items (fresh ids), optionally
//!    shuffle, then run its distributions front to back
//!
//! Every id comes from one [`Random`] seeded with the round seed, in the
//! order above. The same inputs always produce the same snapshot.

use std::collections::VecDeque;

use rand::seq::SliceRandom;

use crate::core::config::{EngineOptions, ShufflePolicy};
use crate::core::error::{DistributionError, Result};
use crate::core::player::Roster;
use crate::core::rng::Random;
use crate::rules::{expand, Collection, Rules};
use crate::surfaces::{Item, Snapshot, Surface};

/// Expand a ruleset for `roster` into the round's initial snapshot.
///
/// ## Example
///
/// ```
/// use rust_tabletop::core::{EngineOptions, Roster};
/// use rust_tabletop::engine::expand_round;
/// use rust_tabletop::games::love_letter;
///
/// let roster = Roster::new(["adam", "eve"]);
/// let snapshot = expand_round(&love_letter::rules(), &roster, 7, &EngineOptions::default()).unwrap();
/// assert_eq!(snapshot.total_items(), 16);
/// ```
pub fn expand_round(
    rules: &Rules,
    roster: &Roster,
    seed: u64,
    options: &EngineOptions,
) -> Result<Snapshot> {
    let config = rules.find_config(roster.len())?;
    tracing::debug!(
        rules = %rules.name,
        players = roster.len(),
        seed,
        "selected config"
    );

    let mut rng = Random::new(seed);
    let mut snapshot = Snapshot::new();

    for (repeated, template) in expand(&config.surfaces, roster) {
        snapshot.add_surface(Surface::new(rng.next_gid(), repeated, template.clone()));
    }

    for (index, collection) in config.collections.iter().enumerate() {
        distribute_collection(&mut snapshot, &mut rng, index, collection, roster, options)?;
    }

    tracing::debug!(
        surfaces = snapshot.surface_count(),
        items = snapshot.total_items(),
        seed = rng.seed(),
        "expanded round"
    );
    Ok(snapshot)
}

fn distribute_collection(
    snapshot: &mut Snapshot,
    rng: &mut Random,
    index: usize,
    collection: &Collection,
    roster: &Roster,
    options: &EngineOptions,
) -> Result<()> {
    let mut items: Vec<Item> = expand(&collection.deck.items, roster)
        .map(|(repeated, template)| Item::new(rng.next_gid(), repeated, template.clone()))
        .collect();

    if collection.shuffle {
        match options.shuffle {
            ShufflePolicy::Disabled => {}
            ShufflePolicy::Seeded => rng.shuffle(&mut items),
            ShufflePolicy::Independent => {
                let mut stream = rng.independent_stream(&format!("collection-{index}"));
                items.shuffle(&mut stream);
            }
        }
    }

    let mut deck: VecDeque<Item> = items.into();
    for (repeated, distribution) in expand(&collection.distributions, roster) {
        let targets = snapshot.surface_ids_of_class(&distribution.surface_class);
        if targets.is_empty() {
            return Err(DistributionError::UnknownSurfaceClass {
                class: distribution.surface_class.clone(),
            }
            .into());
        }

        let slot = repeated.as_ref().map_or(0, |r| r.index) % targets.len();
        let target = targets[slot];

        if repeated.is_some() {
            match deck.pop_front() {
                Some(item) => {
                    tracing::trace!(item = %item.id, surface = %target, class = %distribution.surface_class, "dealt item");
                    snapshot.place_item(item, target);
                }
                None => {
                    tracing::trace!(class = %distribution.surface_class, "deck exhausted, nothing dealt");
                }
            }
        } else {
            tracing::trace!(
                count = deck.len(),
                surface = %target,
                class = %distribution.surface_class,
                "dealt remaining items"
            );
            for item in deck.drain(..) {
                snapshot.place_item(item, target);
            }
        }
    }

    if !deck.is_empty() {
        return Err(DistributionError::Undistributed {
            collection: index,
            remaining: deck.len(),
        }
        .into());
    }
    Ok(())
}
