// Example: a recycled list over a million items, driven by scroll offsets and keys.
use recycler::{Key, ListOptions, Modifiers, RecyclingList, RowState, SelectionType};

#[derive(Debug, Default)]
struct Label {
    text: String,
    highlighted: bool,
}

fn main() {
    let items: Vec<String> = (0..1_000_000).map(|i| format!("item {i}")).collect();

    let options = ListOptions::new()
        .with_row_height(18.0)
        .with_selection_type(SelectionType::Multiple)
        .with_make_row(Label::default)
        .with_bind_row(|row: &mut Label, _index: usize, item: &String| {
            row.text.clone_from(item);
        })
        .with_style_row(Some(|row: &mut Label, state: RowState| {
            row.highlighted = state.selected;
        }))
        .with_on_selection_changed(Some(|items: &[&String]| {
            println!("selection: {} item(s), first={:?}", items.len(), items.first());
        }));

    let mut list = RecyclingList::with_source(options, items);
    list.set_viewport_size(320.0, 240.0);
    list.set_scroll_offset(123_456.0);
    println!("pool_len={}", list.pool_len());
    println!("bound_range={:?}", list.bound_range());

    list.handle_key(Key::ArrowDown, Modifiers::NONE);
    list.handle_key(Key::ArrowDown, Modifiers::SHIFT);
    list.handle_key(Key::End, Modifiers::NONE);
    println!("after End: offset={}", list.scroll_offset());

    list.for_each_row(|row| {
        if row.row.highlighted {
            println!("selected row at top={} shows {:?}", row.top, row.row.text);
        }
    });
}
