//! Resolve a transaction's ids against a snapshot for display.

use std::fmt;

use crate::core::action::Transaction;
use crate::surfaces::{Item, Snapshot, Surface};

/// A transaction with its surfaces and item looked up.
///
/// Any of the three may be missing when the transaction refers to ids the
/// snapshot does not know (a log from before a reset). Such a transaction
/// can still be shown, with placeholders.
#[derive(Clone, Copy, Debug)]
pub struct DecoratedTransaction<'a> {
    pub transaction: &'a Transaction,
    pub from: Option<&'a Surface>,
    pub to: Option<&'a Surface>,
    pub item: Option<&'a Item>,
}

/// Look up the surfaces and item `transaction` refers to.
#[must_use]
pub fn decorate_transaction<'a>(
    snapshot: &'a Snapshot,
    transaction: &'a Transaction,
) -> DecoratedTransaction<'a> {
    DecoratedTransaction {
        transaction,
        from: snapshot.surface(transaction.from),
        to: snapshot.surface(transaction.to),
        item: snapshot.item(transaction.item),
    }
}

impl<'a> DecoratedTransaction<'a> {
    /// All three ids resolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.from.is_some() && self.to.is_some() && self.item.is_some()
    }

    /// Name to show for the moved item.
    ///
    /// Looks at the variant for the source's log view, the source's default
    /// view, the destination's default view, then the item's own name.
    #[must_use]
    pub fn item_name(&self) -> Option<&'a str> {
        let item = self.item?;
        let from_views = self.from.map(Surface::item_views);
        let to_views = self.to.map(Surface::item_views);

        let candidates = [
            from_views.and_then(|v| v.log.as_ref()),
            from_views.map(|v| &v.default),
            to_views.map(|v| &v.default),
        ];

        candidates
            .into_iter()
            .flatten()
            .find_map(|view| item.variant(view).and_then(|variant| variant.name()))
            .or_else(|| item.name())
    }
}

impl fmt::Display for DecoratedTransaction<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = |surface: Option<&Surface>| {
            surface.map_or_else(|| "unknown surface".to_string(), Surface::label)
        };
        write!(
            f,
            "{} moved {} from {} to {}",
            self.transaction.userid,
            self.item_name().unwrap_or("an item"),
            label(self.from),
            label(self.to),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gid::Gid;
    use crate::core::player::PlayerId;
    use crate::rules::{ItemTemplate, ItemView, RepeatValue, Repeated, SurfaceTemplate, SurfaceType, Variant};

    fn gid(n: u8) -> Gid {
        Gid::from_bytes([n; 8])
    }

    fn snapshot(hand_log: Option<ItemView>) -> Snapshot {
        let mut hand = SurfaceTemplate::new("hand", SurfaceType::ShowAll, ItemView::Back)
            .with_local(ItemView::Front);
        if let Some(view) = hand_log {
            hand = hand.with_log(view);
        }

        let mut snapshot = Snapshot::new();
        snapshot.add_surface(Surface::new(
            gid(1),
            Some(Repeated {
                index: 0,
                value: RepeatValue::Player(PlayerId::new("adam")),
            }),
            hand,
        ));
        snapshot.add_surface(Surface::new(
            gid(2),
            Some(Repeated {
                index: 0,
                value: RepeatValue::Player(PlayerId::new("adam")),
            }),
            SurfaceTemplate::new("discard", SurfaceType::ShowAll, ItemView::Front),
        ));
        snapshot.place_item(
            Item::new(
                gid(10),
                None,
                ItemTemplate::named("Card")
                    .with_variant(ItemView::Front, Variant::new().with_name("Guard"))
                    .with_variant(ItemView::Back, Variant::new()),
            ),
            gid(1),
        );
        snapshot
    }

    #[test]
    fn test_name_from_destination_default() {
        let snapshot = snapshot(None);
        let tx = Transaction::new("adam", gid(10), gid(1), gid(2));
        let decorated = decorate_transaction(&snapshot, &tx);

        assert!(decorated.is_complete());
        // back has no name, discard's default (front) does
        assert_eq!(decorated.item_name(), Some("Guard"));
        assert_eq!(
            decorated.to_string(),
            "adam moved Guard from adam hand to adam discard"
        );
    }

    #[test]
    fn test_name_prefers_source_log_view() {
        let snapshot = snapshot(Some(ItemView::Front));
        let tx = Transaction::new("adam", gid(10), gid(1), gid(9));
        let decorated = decorate_transaction(&snapshot, &tx);

        assert_eq!(decorated.item_name(), Some("Guard"));
    }

    #[test]
    fn test_name_falls_back_to_item_name() {
        let snapshot = snapshot(None);
        // to: unknown surface, so only the hand's back view is tried
        let tx = Transaction::new("adam", gid(10), gid(1), gid(9));
        let decorated = decorate_transaction(&snapshot, &tx);

        assert!(!decorated.is_complete());
        assert_eq!(decorated.item_name(), Some("Card"));
        assert_eq!(
            decorated.to_string(),
            "adam moved Card from adam hand to unknown surface"
        );
    }

    #[test]
    fn test_unknown_ids() {
        let snapshot = snapshot(None);
        let tx = Transaction::new("eve", gid(50), gid(51), gid(52));
        let decorated = decorate_transaction(&snapshot, &tx);

        assert!(decorated.from.is_none());
        assert!(decorated.item.is_none());
        assert_eq!(
            decorated.to_string(),
            "eve moved an item from unknown surface to unknown surface"
        );
    }
}
