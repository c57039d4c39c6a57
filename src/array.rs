//! In-place vector reordering helpers.

/// Resolve a possibly negative index against `len`, counting from the end.
fn resolve(index: isize, len: usize) -> usize {
    if index >= 0 {
        return index as usize;
    }
    if len == 0 {
        return 0;
    }
    let len = len as isize;
    index.rem_euclid(len) as usize
}

/// Move the element at `from` to position `to`.
///
/// Negative indices count from the end. Moving past the end pads the vector
/// with `T::default()` first. An out-of-range `from` leaves the vector as is.
pub fn arr_move<T: Default>(items: &mut Vec<T>, from: isize, to: isize) -> &mut Vec<T> {
    let from = resolve(from, items.len());
    let to = resolve(to, items.len());
    if from >= items.len() {
        return items;
    }
    if to >= items.len() {
        items.resize_with(to + 1, T::default);
    }
    let item = items.remove(from);
    items.insert(to.min(items.len()), item);
    items
}

/// Insert `item` at `at`, clamped to the end of the vector.
pub fn arr_insert<T>(items: &mut Vec<T>, item: T, at: usize) -> &mut Vec<T> {
    items.insert(at.min(items.len()), item);
    items
}

/// Remove and return the element at `index`, if any.
pub fn arr_remove<T>(items: &mut Vec<T>, index: usize) -> Option<T> {
    (index < items.len()).then(|| items.remove(index))
}
