//! Love Letter, two players.
//!
//! Sixteen cards. One goes face down aside (`init-1`), three face up aside
//! (`init-3`), one to each hand, the rest form the draw pile. Each player
//! also has a face-up discard.

use crate::rules::{
    Collection, Config, ConfigCondition, Deck, Distribution, ItemTemplate, ItemView, Repeat,
    Repetition, Rules, SurfaceTemplate, SurfaceType, Variant,
};

/// Registry id of this ruleset.
pub const RULES_ID: &str = "loveletter";

/// Display name of this ruleset.
pub const RULES_NAME: &str = "Love Letter";

/// `(name, value, copies)` for every card kind, lowest first.
pub const CARDS: [(&str, i64, u32); 8] = [
    ("Guard", 1, 5),
    ("Priest", 2, 2),
    ("Baron", 3, 2),
    ("Handmaid", 4, 2),
    ("Prince", 5, 2),
    ("King", 6, 1),
    ("Countess", 7, 1),
    ("Princess", 8, 1),
];

/// Total cards in the deck.
pub const DECK_SIZE: usize = 16;

fn card(name: &str, value: i64, copies: u32) -> Repeat<ItemTemplate> {
    let template = ItemTemplate::named("Card")
        .with_variant(
            ItemView::Front,
            Variant::new()
                .with_value(value)
                .with_name(name)
                .with_image(format!("/cards/{}.jpg", name.to_lowercase())),
        )
        .with_variant(ItemView::Back, Variant::new().with_image("/back.jpg"));

    if copies == 1 {
        Repeat::once(template)
    } else {
        Repeat::repeated(template, Repetition::times(copies))
    }
}

/// The full deck, in printed order.
#[must_use]
pub fn deck() -> Deck {
    Deck {
        items: CARDS
            .iter()
            .map(|&(name, value, copies)| card(name, value, copies))
            .collect(),
    }
}

/// The Love Letter ruleset.
#[must_use]
pub fn rules() -> Rules {
    let collection = Collection {
        deck: deck(),
        distributions: vec![
            Repeat::repeated(Distribution::to("init-1"), Repetition::times(1)),
            Repeat::repeated(Distribution::to("init-3"), Repetition::times(3)),
            Repeat::repeated(Distribution::to("hand"), Repetition::for_each_player()),
            Repeat::once(Distribution::to("pile")),
        ],
        shuffle: true,
    };

    let config = Config::new(ConfigCondition::between(2, 2))
        .with_collection(collection)
        .with_surface(Repeat::once(SurfaceTemplate::new(
            "init-1",
            SurfaceType::ShowAllExpanded,
            ItemView::Back,
        )))
        .with_surface(Repeat::once(SurfaceTemplate::new(
            "init-3",
            SurfaceType::ShowAllExpanded,
            ItemView::Front,
        )))
        .with_surface(Repeat::once(SurfaceTemplate::new(
            "pile",
            SurfaceType::ShowTop,
            ItemView::Back,
        )))
        .with_surface(Repeat::repeated(
            SurfaceTemplate::new("hand", SurfaceType::ShowAll, ItemView::Back)
                .with_local(ItemView::Front),
            Repetition::for_each_player(),
        ))
        .with_surface(Repeat::repeated(
            SurfaceTemplate::new("discard", SurfaceType::ShowAll, ItemView::Front),
            Repetition::for_each_player(),
        ));

    Rules::new(RULES_NAME).with_config(config)
}
