mod common;

use common::{assert_window_consistent, attached_items, list, Recorder};
use virtlist::{ListError, ListMode};

/// Twenty variable-height items (heights 7..=16, twice) in a 73-row viewport.
fn twenty_variable_items() -> common::List {
    let mut list = list(Recorder::variable(), ListMode::ViewportVariableItems, 73);
    list.replace_all_items([0, 1, 2]);
    list.replace_items_in_range(3, 3, 3..20);
    list
}

// ============================================================================
// Render window
// ============================================================================

#[test]
fn test_initial_window_covers_two_viewports_below() {
    let mut list = twenty_variable_items();

    // Offsets: ..., o14 = 149, o15 = 160, o20 = 230.
    assert_eq!(list.total_height(), 230);
    assert_eq!(list.render_window(), 0..15);
    assert_eq!(list.spacer_heights(), (0, 70));
    assert_window_consistent(&mut list);
}

#[test]
fn test_append_then_scroll_last_item_into_view() {
    let mut list = twenty_variable_items();

    list.scroll_item_at_index_into_view(19);

    assert_eq!(list.element().scroll_top(), 230 - 73);
    assert_eq!(list.render_window(), 8..20);
    // Bottom spacer is empty, top spacer is the height of items 0..8.
    assert_eq!(list.spacer_heights(), (84, 0));
    assert_eq!(attached_items(&list), (8..20).collect::<Vec<_>>());
    assert_window_consistent(&mut list);
}

#[test]
fn test_scroll_into_view_is_noop_when_visible() {
    let mut list = twenty_variable_items();
    let created = list.delegate().created.len();

    list.scroll_item_at_index_into_view(2);

    assert_eq!(list.element().scroll_top(), 0);
    assert_eq!(list.render_window(), 0..15);
    assert_eq!(list.delegate().created.len(), created);
}

#[test]
fn test_scroll_into_view_aligns_top_when_above() {
    let mut list = twenty_variable_items();
    list.scroll_item_at_index_into_view(19);

    list.scroll_item_at_index_into_view(10);

    assert_eq!(list.element().scroll_top(), 115);
    assert_window_consistent(&mut list);
}

#[test]
fn test_scroll_event_moves_window() {
    let mut list = twenty_variable_items();

    assert!(list.handle_event(&virtdom::Event::Scroll { delta: 100 }));

    assert_eq!(list.element().scroll_top(), 100);
    // First index is at offset 100 - 73 = 27, lower bound lands on o4 = 34.
    assert_eq!(list.render_window(), 4..20);
    assert_eq!(list.spacer_heights(), (34, 0));
    assert_window_consistent(&mut list);
}

#[test]
fn test_scroll_clamped_to_content() {
    let mut list = twenty_variable_items();

    list.handle_event(&virtdom::Event::Scroll { delta: 10_000 });

    assert_eq!(list.element().scroll_top(), 157);
    assert_window_consistent(&mut list);
}

#[test]
fn test_viewport_resized_is_idempotent() {
    let mut list = twenty_variable_items();
    list.handle_event(&virtdom::Event::Scroll { delta: 60 });

    list.element_mut().set_viewport_height(30);
    list.viewport_resized();
    let window = list.render_window();
    let spacers = list.spacer_heights();
    let attached = attached_items(&list);

    list.viewport_resized();

    assert_eq!(list.render_window(), window);
    assert_eq!(list.spacer_heights(), spacers);
    assert_eq!(attached_items(&list), attached);
    assert_window_consistent(&mut list);
}

#[test]
fn test_viewport_resized_reuses_cached_nodes() {
    let mut list = twenty_variable_items();
    let created = list.delegate().created.clone();

    list.viewport_resized();

    assert_eq!(list.delegate().created, created);
}

#[test]
fn test_empty_list_renders_nothing() {
    let mut list = common::list(Recorder::variable(), ListMode::ViewportVariableItems, 73);
    list.viewport_resized();

    assert_eq!(list.total_height(), 0);
    assert_eq!(list.render_window(), 0..0);
    assert_eq!(list.spacer_heights(), (0, 0));
    assert!(attached_items(&list).is_empty());
}

#[test]
fn test_removing_everything_clears_window() {
    let mut list = twenty_variable_items();

    let removed = list.replace_all_items([]);

    assert_eq!(removed, (0..20).collect::<Vec<_>>());
    assert_eq!(list.render_window(), 0..0);
    assert!(attached_items(&list).is_empty());
    // Only root and the two spacers remain alive.
    assert_eq!(list.element().len(), 3);
}

// ============================================================================
// Invalidation fast paths
// ============================================================================

#[test]
fn test_mutation_before_window_shifts_indices() {
    let mut list = twenty_variable_items();
    list.scroll_item_at_index_into_view(19);
    let created = list.delegate().created.len();
    let attached_before: Vec<_> = {
        let dom = list.element();
        dom.children(dom.root()).to_vec()
    };

    // Item 0 is 7 rows tall.
    assert_eq!(list.remove_item_at_index(0), Some(0));

    assert_eq!(list.render_window(), 7..19);
    assert_eq!(list.spacer_heights(), (77, 0));
    assert_eq!(list.element().scroll_top(), 150);
    assert_eq!(list.delegate().created.len(), created);
    let dom = list.element();
    assert_eq!(dom.children(dom.root()), attached_before.as_slice());
    assert_window_consistent(&mut list);
}

#[test]
fn test_fixed_mode_mutation_before_window_shifts_indices() {
    let mut list = common::list(Recorder::new(|_| 3), ListMode::ViewportFixedItems, 10);
    list.replace_all_items(0..100);
    list.scroll_item_at_index_into_view(50);
    let window = list.render_window();
    let (top, bottom) = list.spacer_heights();
    let scroll_top = list.element().scroll_top();
    let created = list.delegate().created.len();
    assert!(window.start > 0, "window {window:?} starts past the first item");

    assert_eq!(list.remove_item_at_index(0), Some(0));

    assert_eq!(list.render_window(), window.start - 1..window.end - 1);
    assert_eq!(list.spacer_heights(), (top - 3, bottom));
    assert_eq!(list.element().scroll_top(), scroll_top - 3);
    assert_eq!(list.delegate().created.len(), created);
    assert_window_consistent(&mut list);
}

#[test]
fn test_mutation_after_window_grows_bottom_spacer() {
    let mut list = twenty_variable_items();
    let created = list.delegate().created.len();

    list.push_item(20);

    assert_eq!(list.render_window(), 0..15);
    assert_eq!(list.spacer_heights(), (0, 77));
    assert_eq!(list.delegate().created.len(), created);
    assert_window_consistent(&mut list);
}

#[test]
fn test_mutation_inside_window_rebuilds() {
    let mut list = twenty_variable_items();

    list.replace_items_in_range(2, 3, [99, 98]);

    assert_eq!(list.item_at_index(2), Some(&99));
    assert_eq!(list.item_at_index(3), Some(&98));
    assert_eq!(list.length(), 21);
    assert_window_consistent(&mut list);
}

#[test]
fn test_invalidate_range_keeps_nodes_and_selection() {
    let mut list = twenty_variable_items();
    list.select_item_at_index(Some(3), false).unwrap();
    let element = list.element_for_index(3);
    let created = list.delegate().created.len();

    list.invalidate_range(2, 5);

    assert_eq!(list.selected_index(), Some(3));
    assert_eq!(list.element_for_index(3), element);
    assert_eq!(list.delegate().created.len(), created);
    assert_window_consistent(&mut list);
}

#[test]
fn test_duplicate_items_render_as_distinct_rows() {
    let mut list = common::list(Recorder::variable(), ListMode::ViewportVariableItems, 73);

    list.push_item(5);
    list.push_item(5);

    assert_eq!(attached_items(&list), vec![5, 5]);
    let first = list.element_for_index(0).unwrap();
    let second = list.element_for_index(1).unwrap();
    assert_ne!(first, second);
    assert_eq!(list.total_height(), 24);
}

/// Random replace/insert/remove/scroll/resize steps, checking the window
/// after each one.
fn run_mutation_sequence(mut list: common::List) {
    let mut next_item = 0u32;
    let mut seed = 0x2545_f491_u32;
    let mut random = move |bound: usize| {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        seed as usize % bound.max(1)
    };

    for step in 0..300 {
        let len = list.length();
        match random(6) {
            0 | 1 => {
                let from = random(len + 1);
                let to = from + random(len - from + 1).min(4);
                let count = random(6);
                let items: Vec<u32> = (next_item..next_item + count as u32).collect();
                next_item += count as u32;
                list.replace_items_in_range(from, to, items);
            }
            2 => {
                let at = random(len + 1);
                list.insert_item_at_index(at, next_item);
                next_item += 1;
            }
            3 => {
                list.remove_item_at_index(random(len));
            }
            4 => {
                let delta = random(200) as i32 - 100;
                list.handle_event(&virtdom::Event::Scroll { delta });
            }
            _ => {
                let height = 1 + random(80) as u32;
                list.element_mut().set_viewport_height(height);
                list.viewport_resized();
            }
        }
        assert_window_consistent(&mut list);
        assert!(list.element().scroll_top() <= list.element().max_scroll_top(), "step {step}");
    }

    // Items are never re-inserted, so every item was realized at most once.
    let created = &list.delegate().created;
    let unique: std::collections::HashSet<_> = created.iter().collect();
    assert_eq!(unique.len(), created.len());
}

#[test]
fn test_mutation_sequence_variable_items() {
    run_mutation_sequence(common::list(Recorder::variable(), ListMode::ViewportVariableItems, 40));
}

#[test]
fn test_mutation_sequence_fixed_items() {
    run_mutation_sequence(common::list(Recorder::new(|_| 3), ListMode::ViewportFixedItems, 40));
}

#[test]
fn test_mutation_sequence_measured_items() {
    run_mutation_sequence(common::list(
        Recorder::new(|_| 3),
        ListMode::ViewportFixedItemsMeasured,
        40,
    ));
}

// ============================================================================
// Fixed height modes
// ============================================================================

#[test]
fn test_fixed_mode_asks_delegate_once() {
    let mut list = common::list(Recorder::new(|_| 2), ListMode::ViewportFixedItems, 10);

    list.replace_all_items(0..100);
    list.handle_event(&virtdom::Event::Scroll { delta: 50 });
    list.push_item(100);

    assert_eq!(list.delegate().height_calls.get(), 1);
    assert_eq!(list.total_height(), 202);
    assert_window_consistent(&mut list);
}

#[test]
fn test_measured_mode_measures_first_node() {
    let mut list = common::list(Recorder::new(|_| 3), ListMode::ViewportFixedItemsMeasured, 10);

    list.replace_all_items(0..100);

    assert_eq!(list.delegate().height_calls.get(), 0);
    assert_eq!(list.total_height(), 300);
    // index_at_offset(20) = 6, so items 0..7 are attached.
    assert_eq!(list.render_window(), 0..7);
    assert_eq!(list.spacer_heights(), (0, 279));
    assert_window_consistent(&mut list);
}

#[test]
fn test_default_mode_is_measured() {
    assert_eq!(ListMode::default(), ListMode::ViewportFixedItemsMeasured);
}

#[test]
fn test_fixed_height_changed_remeasures() {
    let mut list = common::list(Recorder::new(|_| 3), ListMode::ViewportFixedItemsMeasured, 10);
    list.replace_all_items(0..100);
    let nodes_before = list.element().len();

    list.delegate_mut().height = |_| 2;
    list.fixed_height_changed().unwrap();

    assert_eq!(list.total_height(), 200);
    assert_window_consistent(&mut list);
    // Old nodes were released, not leaked.
    assert!(list.element().len() <= nodes_before + 1);
}

#[test]
fn test_fixed_height_changed_rejected_outside_fixed_modes() {
    let mut variable = common::list(Recorder::variable(), ListMode::ViewportVariableItems, 10);
    assert_eq!(
        variable.fixed_height_changed(),
        Err(ListError::FixedHeightOnly {
            mode: ListMode::ViewportVariableItems
        })
    );

    let mut grow = common::list(Recorder::unit(), ListMode::Grow, 10);
    assert_eq!(
        grow.fixed_height_changed(),
        Err(ListError::FixedHeightOnly { mode: ListMode::Grow })
    );
}

#[test]
fn test_error_messages() {
    let err = ListError::FixedHeightOnly {
        mode: ListMode::ViewportVariableItems,
    };
    assert!(err.to_string().contains("variable"));
    let err = ListError::NotSelectable { index: 4 };
    assert!(err.to_string().contains('4'));
}
