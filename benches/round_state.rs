//! Benchmarks for the full recompute path: expand, replay, project.
//!
//! Run with: `cargo bench --bench round_state`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_tabletop::core::{Action, EngineOptions, PlayerId, Roster, Transaction};
use rust_tabletop::engine::{expand_round, project, replay};
use rust_tabletop::games::love_letter;

/// Forty moves shuffling cards between the pile and the hands.
fn actions(snapshot: &rust_tabletop::surfaces::Snapshot) -> Vec<Action> {
    let pile = snapshot.surface_ids_of_class("pile")[0];
    let hands = snapshot.surface_ids_of_class("hand");
    let mut state = snapshot.clone();
    let mut actions = Vec::new();

    for time in 0..40u64 {
        let hand = hands[time as usize % hands.len()];
        let (from, to) = if time % 3 == 2 { (hand, pile) } else { (pile, hand) };
        let Some(item) = state.surface(from).and_then(|s| s.top()) else {
            continue;
        };
        let transaction = Transaction::new("adam", item, from, to);
        state.move_item(item, from, to).ok();
        actions.push(Action { time, transaction });
    }
    actions
}

pub fn round_state_benchmark(c: &mut Criterion) {
    let rules = love_letter::rules();
    let roster = Roster::new(["adam", "eve"]);
    let options = EngineOptions::default();
    let initial = expand_round(&rules, &roster, 42, &options).unwrap();
    let log = actions(&initial);
    let viewer = PlayerId::new("eve");

    c.bench_function("expand_round", |b| {
        b.iter(|| expand_round(black_box(&rules), &roster, black_box(42), &options).unwrap())
    });

    c.bench_function("replay_40", |b| {
        b.iter(|| replay(black_box(&initial), black_box(&log), &options).unwrap())
    });

    c.bench_function("expand_replay_project", |b| {
        b.iter(|| {
            let initial = expand_round(&rules, &roster, 42, &options).unwrap();
            let (state, _) = replay(&initial, &log, &options).unwrap();
            project(&state, black_box(&viewer)).unwrap()
        })
    });
}

criterion_group!(benches, round_state_benchmark);
criterion_main!(benches);
