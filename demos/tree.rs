// Example: an expandable tree flattened into the same recycled window.
use recycler::{FlatNode, FlatTree, ListOptions, TreeItem, TreeList};

fn main() {
    let roots = vec![
        TreeItem::new(1, "src").with_children([
            TreeItem::new(2, "lib.rs"),
            TreeItem::new(3, "tree").with_children([TreeItem::new(4, "mod.rs")]),
        ]),
        TreeItem::new(5, "Cargo.toml"),
    ];

    let options = ListOptions::for_tree()
        .with_make_row(String::new)
        .with_bind_row(|row: &mut String, _index: usize, node: &FlatNode<&'static str>| {
            *row = format!("{}{}", "  ".repeat(node.depth()), node.data());
        });

    let mut tree = TreeList::new(options, FlatTree::new(roots));
    tree.list_mut().set_viewport_size(200.0, 200.0);

    tree.expand(&1).ok();
    tree.expand(&3).ok();
    tree.list().for_each_row(|row| println!("{}", row.row));

    tree.collapse(&1).ok();
    println!("after collapse: {} visible node(s)", tree.list().count());
}
