use crate::models::Item;

/// Gap between consecutive position values. A stride (rather than 1) leaves
/// room for future insertions between existing rows without renumbering the
/// whole list.
pub(crate) const POSITION_STRIDE: i64 = 1000;

/// True when at least one row still lacks a position (legacy data). Such a
/// list must be backfilled before it is shown.
pub(crate) fn needs_backfill(items: &[Item]) -> bool {
    items.iter().any(|it| it.position.is_none())
}

/// Assign `index * POSITION_STRIDE` to every item in the current order.
///
/// Used both for backfill (fetch order) and after a reorder (new display
/// order). Renumbering the entire sequence keeps spacing uniform instead of
/// accumulating shrinking gaps over repeated drags.
pub(crate) fn assign_positions(items: &mut [Item]) {
    for (idx, it) in items.iter_mut().enumerate() {
        it.position = Some(idx as i64 * POSITION_STRIDE);
    }
}

/// Standard single-element list move: remove from `from`, reinsert at `to`.
/// Items between the two indices shift by one slot; everything else is
/// untouched. Returns false (list unchanged) when the move is a no-op or an
/// index is out of range.
pub(crate) fn move_to_index(items: &mut Vec<Item>, from: usize, to: usize) -> bool {
    if from == to || from >= items.len() || to >= items.len() {
        return false;
    }
    let it = items.remove(from);
    items.insert(to, it);
    true
}

/// Move the item with `moved_id` to `target_index` and renumber the whole
/// sequence. Returns false when nothing changed: unknown id (e.g. row was
/// deleted concurrently), dropping an item onto itself, or an out-of-range
/// target.
pub(crate) fn reorder_by_id(items: &mut Vec<Item>, moved_id: &str, target_index: usize) -> bool {
    let Some(from) = items.iter().position(|it| it.id == moved_id) else {
        return false;
    };

    if !move_to_index(items, from, target_index) {
        return false;
    }

    assign_positions(items);
    true
}

/// Ascending by position; rows without one sort first, keeping their relative
/// order. Only relevant transiently on legacy data before backfill runs.
pub(crate) fn sort_by_position(items: &mut [Item]) {
    items.sort_by_key(|it| it.position.unwrap_or(i64::MIN));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, position: Option<i64>) -> Item {
        Item {
            id: id.to_string(),
            owner_id: "acc-1".to_string(),
            name: format!("item {id}"),
            description: None,
            created_at: String::new(),
            position,
        }
    }

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(|it| it.id.as_str()).collect()
    }

    fn positions(items: &[Item]) -> Vec<Option<i64>> {
        items.iter().map(|it| it.position).collect()
    }

    #[test]
    fn test_backfill_assigns_stride_positions_in_fetch_order() {
        let mut items = vec![item("a", None), item("b", Some(7)), item("c", None)];
        assert!(needs_backfill(&items));

        assign_positions(&mut items);

        assert!(!needs_backfill(&items));
        assert_eq!(positions(&items), vec![Some(0), Some(1000), Some(2000)]);
        // Fetch order is preserved.
        assert_eq!(ids(&items), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_fully_positioned_list_needs_no_backfill() {
        let items = vec![item("a", Some(0)), item("b", Some(1000))];
        assert!(!needs_backfill(&items));
    }

    #[test]
    fn test_move_third_item_to_front() {
        // [A,B,C,D], move index 2 -> 0 gives [C,A,B,D] with fresh positions.
        let mut items = vec![
            item("a", Some(0)),
            item("b", Some(1000)),
            item("c", Some(2000)),
            item("d", Some(3000)),
        ];

        assert!(reorder_by_id(&mut items, "c", 0));

        assert_eq!(ids(&items), vec!["c", "a", "b", "d"]);
        assert_eq!(
            positions(&items),
            vec![Some(0), Some(1000), Some(2000), Some(3000)]
        );
    }

    #[test]
    fn test_move_renumbers_entire_sequence() {
        // Uneven legacy spacing collapses back to uniform stride.
        let mut items = vec![item("a", Some(3)), item("b", Some(90)), item("c", Some(91))];

        assert!(reorder_by_id(&mut items, "a", 2));

        assert_eq!(ids(&items), vec!["b", "c", "a"]);
        assert_eq!(positions(&items), vec![Some(0), Some(1000), Some(2000)]);
    }

    #[test]
    fn test_drop_onto_self_is_noop() {
        let mut items = vec![item("a", Some(0)), item("b", Some(1000))];
        let before = items.clone();

        assert!(!reorder_by_id(&mut items, "b", 1));
        assert_eq!(items, before);
    }

    #[test]
    fn test_unknown_id_is_noop() {
        // Dragged row deleted concurrently: nothing moves, nothing renumbers.
        let mut items = vec![item("a", Some(0)), item("b", Some(1000))];
        let before = items.clone();

        assert!(!reorder_by_id(&mut items, "gone", 0));
        assert_eq!(items, before);
    }

    #[test]
    fn test_out_of_range_target_is_noop() {
        let mut items = vec![item("a", Some(0)), item("b", Some(1000))];
        let before = items.clone();

        assert!(!reorder_by_id(&mut items, "a", 5));
        assert_eq!(items, before);
    }

    #[test]
    fn test_items_between_old_and_new_slot_shift_by_one() {
        let mut items = vec![
            item("a", Some(0)),
            item("b", Some(1000)),
            item("c", Some(2000)),
            item("d", Some(3000)),
            item("e", Some(4000)),
        ];

        // Move B down to index 3: C and D shift up, A and E stay put.
        assert!(reorder_by_id(&mut items, "b", 3));
        assert_eq!(ids(&items), vec!["a", "c", "d", "b", "e"]);
    }

    #[test]
    fn test_sort_by_position_puts_unpositioned_rows_first() {
        let mut items = vec![item("a", Some(1000)), item("b", None), item("c", Some(0))];
        sort_by_position(&mut items);
        assert_eq!(ids(&items), vec!["b", "c", "a"]);
    }
}
