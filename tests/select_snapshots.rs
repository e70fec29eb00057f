//! Snapshot tests for the text drawing of a selection.
//!
//! Any visual change requires explicit approval with `cargo insta review`.

use doc_browser::selection::{format_tree, FormatOptions, NodeDescriptor, NodeId, SelectionTree};
use insta::assert_snapshot;

fn worked_example() -> SelectionTree {
    SelectionTree::from_descriptors(vec![
        NodeDescriptor::root("Project"),
        NodeDescriptor::folder(1, "Chapter 1", 0),
        NodeDescriptor::document(2, "intro.md", 1),
        NodeDescriptor::document(3, "body.md", 1),
        NodeDescriptor::document(4, "notes.md", 0),
    ])
    .unwrap()
}

#[test]
fn test_partial_selection_snapshot() {
    let mut tree = worked_example();
    tree.on_selection(NodeId(2), true, false);

    assert_snapshot!(format_tree(&tree, &FormatOptions::new()), @r"
[-] Project/ #0
├── [-] Chapter 1/ #1
│   ├── [x] intro.md #2
│   └── [ ] body.md #3
└── [ ] notes.md #4
");
}

#[test]
fn test_exclusive_selection_snapshot() {
    let mut tree = worked_example();
    tree.select_all();
    tree.on_selection(NodeId(1), true, true);

    assert_snapshot!(format_tree(&tree, &FormatOptions::new().with_ids(false)), @r"
[-] Project/
├── [x] Chapter 1/
│   ├── [x] intro.md
│   └── [x] body.md
└── [ ] notes.md
");
}

#[test]
fn test_depth_limited_snapshot() {
    let mut tree = worked_example();
    tree.select_all();

    assert_snapshot!(format_tree(&tree, &FormatOptions::new().with_max_depth(1)), @r"
[x] Project/ #0
├── [x] Chapter 1/ #1
└── [x] notes.md #4
");
}
