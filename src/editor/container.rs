//! Edits on comma-separated items: array elements, object entries and the
//! declarators of a single declaration statement.
//!
//! Inserted items copy the spacing already used between existing items, and
//! a trailing comma stays where it was.

use crate::edit::Edit;
use std::borrow::Cow;
use std::ops::Range;
use tree_sitter::Node;

/// An `array` or `object` literal and its items in document order.
pub(crate) struct Container<'t> {
    node: Node<'t>,
    items: Vec<Node<'t>>,
}

impl<'t> Container<'t> {
    pub(crate) fn new(node: Node<'t>) -> Self {
        let mut cursor = node.walk();
        let items = node
            .named_children(&mut cursor)
            .filter(|item| !item.is_extra())
            .collect();
        Self { node, items }
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Everything between the brackets.
    fn interior(&self) -> Range<usize> {
        self.node.start_byte() + 1..self.node.end_byte() - 1
    }

    /// Separator text to put after a comma when adding an item.
    fn gap<'s>(&self, source: &'s str) -> &'s str {
        if let [first, second, ..] = self.items.as_slice() {
            if let Some(comma) = comma_after(*first) {
                let between = &source[comma.end_byte()..second.start_byte()];
                if is_blank(between) {
                    return between;
                }
            }
        }
        if let Some(first) = self.items.first() {
            let leading = &source[self.interior().start..first.start_byte()];
            if is_blank(leading) && leading.contains('\n') {
                return leading;
            }
        }
        " "
    }

    /// Insert `text` so it becomes item `index`. Callers check
    /// `index <= len()`; an empty container ignores `index`.
    pub(crate) fn insert(&self, source: &str, index: usize, text: &str) -> Edit {
        let gap = self.gap(source);

        if self.items.is_empty() {
            let interior = self.interior();
            return if is_blank(&source[interior.clone()]) {
                Edit::replace(source, interior, text)
            } else {
                Edit::insert(interior.start, text)
            };
        }

        if let Some(item) = self.items.get(index) {
            return Edit::insert(item.start_byte(), format!("{text},{gap}"));
        }

        let last = self.items[self.items.len() - 1];
        match comma_after(last) {
            Some(comma) => Edit::insert(comma.end_byte(), format!("{gap}{text},")),
            None => Edit::insert(last.end_byte(), format!(",{gap}{text}")),
        }
    }

    /// Remove item `index`; callers check `index < len()`. Removing the only
    /// item empties the brackets.
    pub(crate) fn remove(&self, source: &str, index: usize) -> Vec<Edit> {
        if self.items.len() == 1 {
            return vec![Edit::delete(source, self.interior())];
        }
        remove_from_list(source, &self.items, index)
    }

    /// Index of the first entry whose key equals `key`.
    pub(crate) fn position_of_key(&self, source: &str, key: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|entry| property_key(*entry, source).as_deref() == Some(key))
    }

    pub(crate) fn item(&self, index: usize) -> Option<Node<'t>> {
        self.items.get(index).copied()
    }
}

/// Remove `items[index]` together with one adjoining comma, from a list of
/// at least two items. Comments on the line the item ends on go with it.
pub(crate) fn remove_from_list(source: &str, items: &[Node<'_>], index: usize) -> Vec<Edit> {
    let item = items[index];
    if index + 1 < items.len() {
        return vec![Edit::delete(
            source,
            item.start_byte()..items[index + 1].start_byte(),
        )];
    }

    let prev = items[index - 1];
    let end = trailing_end(item);
    if comma_after(item).is_some() {
        return vec![Edit::delete(source, trailing_end(prev)..end)];
    }
    match comma_after(prev) {
        // keep the previous item's own line comment where it is
        Some(comma) if trailing_end(prev) > comma.end_byte() => vec![
            Edit::delete(source, comma.byte_range()),
            Edit::delete(source, trailing_end(prev)..end),
        ],
        _ => vec![Edit::delete(source, prev.end_byte()..end)],
    }
}

/// End of `item`, its comma, and any comments after them on the same line.
fn trailing_end(item: Node<'_>) -> usize {
    last_on_line(comma_after(item).unwrap_or(item)).end_byte()
}

/// `node`, or the last comment following it on the line `node` ends on.
pub(crate) fn last_on_line(node: Node<'_>) -> Node<'_> {
    let row = node.end_position().row;
    let mut last = node;
    while let Some(next) = last.next_sibling() {
        if next.kind() != "comment" || next.start_position().row != row {
            break;
        }
        last = next;
    }
    last
}

/// Replace the value of an object entry, turning shorthand and method
/// entries into `key: value` pairs.
pub(crate) fn replace_entry_value(source: &str, entry: Node<'_>, key: &str, value: &str) -> Edit {
    match entry.child_by_field_name("value") {
        Some(old) if entry.kind() == "pair" => Edit::replace(source, old.byte_range(), value),
        _ => Edit::replace(source, entry.byte_range(), format!("{key}: {value}")),
    }
}

fn comma_after<'t>(item: Node<'t>) -> Option<Node<'t>> {
    let mut next = item.next_sibling();
    while let Some(node) = next {
        if !node.is_extra() {
            return (node.kind() == ",").then_some(node);
        }
        next = node.next_sibling();
    }
    None
}

pub(crate) fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

/// Canonical key of an object entry: identifiers and numbers as written,
/// string keys with their quotes stripped. Computed keys and spreads have
/// no static key.
pub(crate) fn property_key<'s>(entry: Node<'_>, source: &'s str) -> Option<Cow<'s, str>> {
    let key = match entry.kind() {
        "shorthand_property_identifier" => entry,
        "pair" | "method_definition" => entry
            .child_by_field_name("key")
            .or_else(|| entry.child_by_field_name("name"))?,
        _ => return None,
    };

    let text = &source[key.byte_range()];
    match key.kind() {
        "string" => Some(unquote(text)),
        "property_identifier" | "shorthand_property_identifier" | "number"
        | "private_property_identifier" => Some(Cow::Borrowed(text)),
        _ => None,
    }
}

fn unquote(raw: &str) -> Cow<'_, str> {
    let inner = raw
        .strip_prefix(['"', '\''])
        .and_then(|rest| rest.strip_suffix(['"', '\'']))
        .unwrap_or(raw);
    if !inner.contains('\\') {
        return Cow::Borrowed(inner);
    }

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    Cow::Owned(out)
}
