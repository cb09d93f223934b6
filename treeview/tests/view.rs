//! Tests for the tree view widget: lifecycle, input dispatch and activation.

use std::cell::RefCell;
use std::rc::Rc;

use treeview::{
    DataNode, Document, Error, Event, EventResult, InputHost, Key, Modifiers, NodeId, Rect, TreeItem, TreeView,
    TreeViewConfig, WidgetState,
};

fn sample() -> Vec<DataNode> {
    vec![
        DataNode::new("folder1")
            .with_label("Folder 1")
            .child(DataNode::new("leaf1").with_label("Leaf 1"))
            .child(DataNode::new("leaf2").with_label("Leaf 2")),
        DataNode::new("leaf3").with_label("Leaf 3"),
    ]
}

fn mounted(items: Vec<DataNode>) -> (TreeView<DataNode>, Document) {
    let mut doc = Document::new();
    let mut view = TreeView::with_data(TreeViewConfig::new("tree"), items);
    view.mount(&mut doc).unwrap();
    view.layout(Rect::new(0, 0, 40, 10));
    (view, doc)
}

fn id(view: &TreeView<DataNode>, item: &str) -> NodeId {
    view.tree().find_by_item_id(item).unwrap()
}

fn visible_ids(view: &TreeView<DataNode>) -> Vec<String> {
    view.visible_items()
        .into_iter()
        .map(|node| view.tree().item(node).unwrap().id())
        .collect()
}

fn record_selected(view: &mut TreeView<DataNode>) -> Rc<RefCell<Vec<String>>> {
    let selected = Rc::new(RefCell::new(Vec::new()));
    let sink = selected.clone();
    view.on_selected(move |event| sink.borrow_mut().push(event.item.id()));
    selected
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn test_mount_registers_two_listeners() {
    let (view, doc) = mounted(sample());
    assert!(view.is_mounted());
    assert_eq!(doc.listener_count_for("tree"), 2);
}

#[test]
fn test_unmount_removes_exactly_its_listeners() {
    let mut doc = Document::new();
    let mut other = TreeView::with_data(TreeViewConfig::new("other"), sample());
    other.mount(&mut doc).unwrap();

    let mut view = TreeView::with_data(TreeViewConfig::new("tree"), sample());
    view.mount(&mut doc).unwrap();
    assert_eq!(doc.listener_count(), 4);

    view.unmount(&mut doc).unwrap();
    assert!(!view.is_mounted());
    assert_eq!(doc.listener_count_for("tree"), 0);
    assert_eq!(doc.listener_count_for("other"), 2);
}

#[test]
fn test_mount_twice_is_an_error() {
    let (mut view, mut doc) = mounted(sample());
    assert!(matches!(view.mount(&mut doc), Err(Error::AlreadyMounted(id)) if id == "tree"));
    assert_eq!(doc.listener_count(), 2);
}

#[test]
fn test_unmount_without_mount_is_an_error() {
    let mut doc = Document::new();
    let mut view = TreeView::with_data(TreeViewConfig::new("tree"), sample());
    assert!(matches!(view.unmount(&mut doc), Err(Error::NotMounted(_))));
}

#[test]
fn test_remount_after_unmount() {
    let (mut view, mut doc) = mounted(sample());
    view.unmount(&mut doc).unwrap();
    view.mount(&mut doc).unwrap();
    assert_eq!(doc.listener_count(), 2);
}

#[test]
fn test_mount_assigns_next_tab_index() {
    let mut doc = Document::new();
    doc.set_tab_index("search", 5);

    let mut view = TreeView::with_data(TreeViewConfig::new("tree"), sample());
    view.mount(&mut doc).unwrap();
    assert_eq!(doc.tab_index("tree"), Some(6));
    assert_eq!(view.config().tab_index, Some(6));
}

#[test]
fn test_mount_on_empty_document_takes_tab_index_one() {
    let mut doc = Document::new();
    let mut view = TreeView::with_data(TreeViewConfig::new("tree"), sample());
    view.mount(&mut doc).unwrap();
    assert_eq!(doc.tab_index("tree"), Some(1));
}

#[test]
fn test_mount_keeps_configured_tab_index() {
    let mut doc = Document::new();
    doc.set_tab_index("search", 5);

    let mut view = TreeView::with_data(TreeViewConfig::new("tree").tab_index(3), sample());
    view.mount(&mut doc).unwrap();
    assert_eq!(doc.tab_index("tree"), Some(3));
}

#[test]
fn test_item_rendered_fires_per_node() {
    let rendered = Rc::new(RefCell::new(Vec::new()));
    let sink = rendered.clone();

    let mut view = TreeView::new(TreeViewConfig::new("tree"));
    view.on_item_rendered(move |_, item: &DataNode| sink.borrow_mut().push(item.id()));
    view.set_data(sample());

    assert_eq!(*rendered.borrow(), vec!["folder1", "leaf1", "leaf2", "leaf3"]);
}

#[test]
fn test_set_data_replaces_nodes() {
    let (mut view, _doc) = mounted(sample());
    let old = id(&view, "leaf3");
    view.set_focus(Some(old));

    view.set_data(vec![DataNode::new("x"), DataNode::new("y")]);
    assert!(view.tree().get(old).is_none());
    assert_eq!(view.current_focus(), None);
    assert_eq!(visible_ids(&view), vec!["x", "y"]);
}

// =============================================================================
// Pointer input
// =============================================================================

#[test]
fn test_leaf_activation_scenario() {
    let (mut view, mut doc) = mounted(sample());
    let selected = record_selected(&mut view);

    assert_eq!(view.handle_event(&mut doc, &Event::click(2, 0)), EventResult::Consumed);
    assert!(view.tree().get(id(&view, "folder1")).unwrap().is_expanded());
    assert_eq!(visible_ids(&view), vec!["folder1", "leaf1", "leaf2", "leaf3"]);
    assert!(selected.borrow().is_empty());

    assert_eq!(view.handle_event(&mut doc, &Event::click(6, 1)), EventResult::Consumed);
    assert_eq!(*selected.borrow(), vec!["leaf1"]);
    assert_eq!(visible_ids(&view), vec!["folder1", "leaf3"]);
    assert_eq!(view.current_focus(), Some(id(&view, "leaf1")));
}

#[test]
fn test_click_focuses_widget() {
    let (mut view, mut doc) = mounted(sample());
    assert!(!doc.has_focus("tree"));

    view.handle_event(&mut doc, &Event::click(0, 1));
    assert!(doc.has_focus("tree"));
    assert_eq!(view.current_focus(), Some(id(&view, "leaf3")));
}

#[test]
fn test_click_outside_widget_is_ignored() {
    let (mut view, mut doc) = mounted(sample());
    view.layout(Rect::new(0, 0, 40, 3));

    assert_eq!(view.handle_event(&mut doc, &Event::click(0, 5)), EventResult::Ignored);
    assert!(!doc.has_focus("tree"));
    assert_eq!(view.current_focus(), None);
}

#[test]
fn test_click_below_items_only_focuses_widget() {
    let (mut view, mut doc) = mounted(sample());

    assert_eq!(view.handle_event(&mut doc, &Event::click(0, 7)), EventResult::Consumed);
    assert!(doc.has_focus("tree"));
    assert_eq!(view.current_focus(), None);
}

#[test]
fn test_click_ignored_when_unmounted() {
    let (mut view, mut doc) = mounted(sample());
    view.unmount(&mut doc).unwrap();

    assert_eq!(view.handle_event(&mut doc, &Event::click(0, 0)), EventResult::Ignored);
    assert_eq!(view.current_focus(), None);
}

// =============================================================================
// Keyboard input
// =============================================================================

#[test]
fn test_keys_ignored_without_widget_focus() {
    let (mut view, mut doc) = mounted(sample());

    assert_eq!(view.handle_event(&mut doc, &Event::key(Key::Down)), EventResult::Ignored);
    assert_eq!(view.current_focus(), None);
}

#[test]
fn test_keys_ignored_after_unmount() {
    let (mut view, mut doc) = mounted(sample());
    doc.focus_widget("tree");
    view.unmount(&mut doc).unwrap();

    assert_eq!(view.handle_event(&mut doc, &Event::key(Key::Down)), EventResult::Ignored);
    assert_eq!(view.current_focus(), None);
}

#[test]
fn test_arrow_keys_wrap() {
    let (mut view, mut doc) = mounted(sample());
    doc.focus_widget("tree");
    let folder1 = id(&view, "folder1");
    let leaf3 = id(&view, "leaf3");

    assert_eq!(view.handle_event(&mut doc, &Event::key(Key::Down)), EventResult::Consumed);
    assert_eq!(view.current_focus(), Some(folder1));

    view.handle_event(&mut doc, &Event::key(Key::Up));
    assert_eq!(view.current_focus(), Some(leaf3));

    view.handle_event(&mut doc, &Event::key(Key::Down));
    assert_eq!(view.current_focus(), Some(folder1));
}

#[test]
fn test_arrow_up_without_focus_goes_to_last() {
    let (mut view, mut doc) = mounted(sample());
    doc.focus_widget("tree");

    view.handle_event(&mut doc, &Event::key(Key::Up));
    assert_eq!(view.current_focus(), Some(id(&view, "leaf3")));
}

#[test]
fn test_arrow_keys_skip_hidden_items() {
    let (mut view, mut doc) = mounted(sample());
    doc.focus_widget("tree");
    view.set_focus(Some(id(&view, "folder1")));

    view.handle_event(&mut doc, &Event::key(Key::Down));
    assert_eq!(view.current_focus(), Some(id(&view, "leaf3")));
}

#[test]
fn test_modified_keys_are_ignored() {
    let (mut view, mut doc) = mounted(sample());
    doc.focus_widget("tree");

    let event = Event::Key {
        key: Key::Down,
        modifiers: Modifiers {
            ctrl: true,
            ..Modifiers::new()
        },
    };
    assert_eq!(view.handle_event(&mut doc, &event), EventResult::Ignored);
    assert_eq!(view.current_focus(), None);
}

#[test]
fn test_enter_without_focus_is_ignored() {
    let (mut view, mut doc) = mounted(sample());
    doc.focus_widget("tree");
    let selected = record_selected(&mut view);

    assert_eq!(view.handle_event(&mut doc, &Event::key(Key::Enter)), EventResult::Ignored);
    assert!(selected.borrow().is_empty());
    assert!(!view.tree().get(id(&view, "folder1")).unwrap().is_expanded());
}

#[test]
fn test_space_toggles_focused_container() {
    let (mut view, mut doc) = mounted(sample());
    doc.focus_widget("tree");
    view.handle_event(&mut doc, &Event::key(Key::Down));
    assert_eq!(view.state(), WidgetState::FocusedCollapsed);

    assert_eq!(view.handle_event(&mut doc, &Event::key(Key::SPACE)), EventResult::Consumed);
    assert_eq!(view.state(), WidgetState::FocusedExpanded);

    view.handle_event(&mut doc, &Event::key(Key::Char(' ')));
    assert_eq!(view.state(), WidgetState::FocusedCollapsed);
}

#[test]
fn test_enter_on_leaf_selects_and_collapses() {
    let (mut view, mut doc) = mounted(sample());
    doc.focus_widget("tree");
    let selected = record_selected(&mut view);

    view.open_to_item(Some(id(&view, "folder1")), Some(true));
    view.handle_event(&mut doc, &Event::key(Key::Down));
    view.handle_event(&mut doc, &Event::key(Key::Down));
    assert_eq!(view.current_focus(), Some(id(&view, "leaf1")));
    assert_eq!(view.state(), WidgetState::FocusedLeaf);

    assert_eq!(view.handle_event(&mut doc, &Event::key(Key::Enter)), EventResult::Consumed);
    assert_eq!(*selected.borrow(), vec!["leaf1"]);
    assert_eq!(visible_ids(&view), vec!["folder1", "leaf3"]);
}

#[test]
fn test_other_keys_are_ignored() {
    let (mut view, mut doc) = mounted(sample());
    doc.focus_widget("tree");

    assert_eq!(view.handle_event(&mut doc, &Event::key(Key::Left)), EventResult::Ignored);
    assert_eq!(view.handle_event(&mut doc, &Event::key(Key::Char('j'))), EventResult::Ignored);
}

#[test]
fn test_resize_is_ignored() {
    let (mut view, mut doc) = mounted(sample());
    let event = Event::Resize {
        width: 80,
        height: 24,
    };
    assert_eq!(view.handle_event(&mut doc, &event), EventResult::Ignored);
}

// =============================================================================
// Activation and state
// =============================================================================

#[test]
fn test_state_idle_without_focus() {
    let (view, _doc) = mounted(sample());
    assert_eq!(view.state(), WidgetState::Idle);
}

#[test]
fn test_activate_stale_item_is_noop() {
    let (mut view, _doc) = mounted(sample());
    let selected = record_selected(&mut view);
    let leaf3 = id(&view, "leaf3");
    assert!(view.remove_item(leaf3));

    view.activate_item(leaf3);
    assert!(selected.borrow().is_empty());
    assert_eq!(view.current_focus(), None);
}

#[test]
fn test_removed_focus_restarts_navigation() {
    let (mut view, mut doc) = mounted(sample());
    doc.focus_widget("tree");
    view.open_to_item(Some(id(&view, "folder1")), Some(true));
    view.set_focus(Some(id(&view, "leaf2")));

    view.remove_item(id(&view, "folder1"));
    assert_eq!(view.current_focus(), None);

    view.handle_event(&mut doc, &Event::key(Key::Down));
    assert_eq!(view.current_focus(), Some(id(&view, "leaf3")));
}

#[test]
fn test_removing_focused_item_clears_focus_markers() {
    let (mut view, _doc) = mounted(sample());
    view.open_to_item(Some(id(&view, "folder1")), Some(true));
    view.set_focus(Some(id(&view, "leaf2")));
    assert_eq!(view.tree().marked_focused().len(), 2);

    assert!(view.remove_item(id(&view, "leaf2")));
    assert_eq!(view.current_focus(), None);
    assert!(view.tree().marked_focused().is_empty());
    assert_eq!(view.state(), WidgetState::Idle);
}

#[test]
fn test_replacing_children_clears_focus_markers() {
    let (mut view, _doc) = mounted(sample());
    let folder1 = id(&view, "folder1");
    view.set_focus(Some(id(&view, "leaf1")));

    view.set_item_children(folder1, &[DataNode::new("fresh")]);
    assert_eq!(view.current_focus(), None);
    assert!(view.tree().marked_focused().is_empty());
}

#[test]
fn test_set_focus_none_keeps_focus() {
    let (mut view, _doc) = mounted(sample());
    let leaf3 = id(&view, "leaf3");
    view.set_focus(Some(leaf3));

    assert!(!view.set_focus(None));
    assert_eq!(view.current_focus(), Some(leaf3));
}

#[test]
fn test_top_level_and_expandable_queries() {
    let (view, _doc) = mounted(sample());
    let folder1 = id(&view, "folder1");
    let leaf1 = id(&view, "leaf1");

    assert!(view.is_top_level_item(folder1));
    assert!(!view.is_top_level_item(leaf1));
    assert!(view.is_expandable_item(folder1));
    assert!(!view.is_expandable_item(leaf1));
}

#[test]
fn test_lazily_loaded_children() {
    let (mut view, _doc) = mounted(sample());
    let leaf3 = id(&view, "leaf3");
    assert!(!view.is_expandable_item(leaf3));

    let created = view.set_item_children(leaf3, &[DataNode::new("late")]);
    assert_eq!(created.len(), 1);
    assert!(view.is_expandable_item(leaf3));

    view.activate_item(leaf3);
    assert_eq!(visible_ids(&view), vec!["folder1", "leaf3", "late"]);
}

// =============================================================================
// Scrolling
// =============================================================================

fn long_list(doc: &mut Document) -> TreeView<DataNode> {
    let items = (0..6).map(|i| DataNode::new(format!("item{}", i))).collect();
    let mut view = TreeView::with_data(TreeViewConfig::new("tree"), items);
    view.mount(doc).unwrap();
    doc.focus_widget("tree");
    view.layout(Rect::new(0, 0, 20, 3));
    view
}

#[test]
fn test_focus_below_area_scrolls_into_view() {
    let mut doc = Document::new();
    let mut view = long_list(&mut doc);

    for _ in 0..5 {
        view.handle_event(&mut doc, &Event::key(Key::Down));
    }
    let item4 = id(&view, "item4");
    assert_eq!(view.current_focus(), Some(item4));
    assert_eq!(view.scroll_offset(), 2);
    assert_eq!(view.item_at(0, 2), Some(item4));
}

#[test]
fn test_wrapping_to_first_scrolls_back_to_top() {
    let mut doc = Document::new();
    let mut view = long_list(&mut doc);

    view.handle_event(&mut doc, &Event::key(Key::Up));
    assert_eq!(view.scroll_offset(), 3);
    assert_eq!(view.item_at(0, 2), Some(id(&view, "item5")));

    view.handle_event(&mut doc, &Event::key(Key::Down));
    assert_eq!(view.scroll_offset(), 0);
    assert_eq!(view.item_at(0, 0), Some(id(&view, "item0")));
}

#[test]
fn test_click_on_scrolled_row_activates_that_item() {
    let mut doc = Document::new();
    let mut view = long_list(&mut doc);
    let selected = record_selected(&mut view);

    view.handle_event(&mut doc, &Event::key(Key::Up));
    view.handle_event(&mut doc, &Event::click(0, 0));
    assert_eq!(*selected.borrow(), vec!["item3"]);
}
