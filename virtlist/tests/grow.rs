mod common;

use common::{attached_items, list, Recorder};
use virtdom::{Event, Key};
use virtlist::ListMode;

fn grow_list(items: impl IntoIterator<Item = u32>) -> common::List {
    let mut list = list(Recorder::unit(), ListMode::Grow, 5);
    list.replace_all_items(items);
    list
}

#[test]
fn test_grow_attaches_every_item() {
    let mut list = grow_list(0..50);

    assert_eq!(attached_items(&list), (0..50).collect::<Vec<_>>());
    assert_eq!(list.total_height(), 50);
    assert_eq!(list.spacer_heights(), (0, 0));
}

#[test]
fn test_grow_splices_in_place() {
    let mut list = grow_list(0..5);
    let e0 = list.element_for_index(0).unwrap();
    let e3 = list.element_for_index(3).unwrap();
    let e4 = list.element_for_index(4).unwrap();
    let created = list.delegate().created.len();

    let removed = list.replace_items_in_range(1, 3, [10, 11]);

    assert_eq!(removed, vec![1, 2]);
    assert_eq!(attached_items(&list), vec![0, 10, 11, 3, 4]);
    let x = list.element_for_index(1).unwrap();
    let y = list.element_for_index(2).unwrap();
    let dom = list.element();
    let children = dom.children(dom.root());
    assert_eq!(&children[1..6], &[e0, x, y, e3, e4]);
    // Only the two new items were realized.
    assert_eq!(list.delegate().created.len(), created + 2);
}

#[test]
fn test_grow_insert_at_ends() {
    let mut list = grow_list([1, 2]);

    list.insert_item_at_index(0, 0);
    list.insert_item_at_index(3, 3);

    assert_eq!(attached_items(&list), vec![0, 1, 2, 3]);
    let dom = list.element();
    let children = dom.children(dom.root());
    assert_eq!(
        dom.get(children[0]).and_then(|n| n.get_data("role")).map(String::as_str),
        Some("top-spacer")
    );
    assert_eq!(
        dom.get(children[5]).and_then(|n| n.get_data("role")).map(String::as_str),
        Some("bottom-spacer")
    );
}

#[test]
fn test_grow_duplicates_are_distinct_rows() {
    let mut list = grow_list([]);

    list.push_item(7);
    list.push_item(7);

    assert_eq!(attached_items(&list), vec![7, 7]);
    assert_ne!(list.element_for_index(0), list.element_for_index(1));

    // Removing one copy leaves the other attached.
    assert_eq!(list.remove_item_at_index(0), Some(7));
    assert_eq!(attached_items(&list), vec![7]);
}

#[test]
fn test_grow_pop_releases_node() {
    let mut list = grow_list(0..3);
    let element = list.element_for_index(2).unwrap();

    assert_eq!(list.pop_item(), Some(2));

    assert!(!list.element().contains(element));
    assert_eq!(attached_items(&list), vec![0, 1]);
}

#[test]
fn test_pop_and_remove_on_empty() {
    let mut list = grow_list([]);

    assert_eq!(list.pop_item(), None);
    assert_eq!(list.remove_item_at_index(0), None);
    assert!(list.is_empty());
}

#[test]
fn test_grow_scroll_into_view() {
    let mut list = grow_list(0..10);

    list.scroll_item_at_index_into_view(7);
    assert_eq!(list.element().scroll_top(), 3);

    list.scroll_item_at_index_into_view(1);
    assert_eq!(list.element().scroll_top(), 1);

    // Out of range is ignored.
    list.scroll_item_at_index_into_view(10);
    assert_eq!(list.element().scroll_top(), 1);
}

#[test]
fn test_grow_ignores_viewport_updates() {
    let mut list = grow_list(0..10);
    let before = {
        let dom = list.element();
        dom.children(dom.root()).to_vec()
    };

    list.element_mut().set_viewport_height(3);
    list.viewport_resized();
    list.handle_event(&Event::Scroll { delta: 4 });

    let dom = list.element();
    assert_eq!(dom.children(dom.root()), before.as_slice());
    assert_eq!(dom.scroll_top(), 4);
    assert_eq!(list.render_window(), 0..0);
}

#[test]
fn test_grow_arrow_keys() {
    let mut list = grow_list(0..10);
    list.set_handle_input(true);

    assert!(list.handle_event(&Event::key(Key::Up)));

    assert_eq!(list.selected_index(), Some(9));
    assert_eq!(list.element().scroll_top(), 5);
}

#[test]
fn test_grow_selection_survives_splice() {
    let mut list = grow_list(0..10);
    list.select_item_at_index(Some(6), false).unwrap();

    list.replace_items_in_range(2, 4, []);

    assert_eq!(list.selected_index(), Some(4));
    assert_eq!(list.selected_item(), Some(&6));
}
