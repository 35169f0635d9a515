//! Pure index operations over ordered id sequences.
//!
//! A move is always `remove_at` followed by `insert_at`, with the insertion
//! index interpreted against the already-shortened sequence.

/// Return a copy of `seq` with the element at `index` removed, plus the removed element.
///
/// Returns `None` if `index` is out of bounds.
pub fn remove_at<T: Clone>(seq: &[T], index: usize) -> Option<(Vec<T>, T)> {
    if index >= seq.len() {
        return None;
    }
    let mut out = seq.to_vec();
    let removed = out.remove(index);
    Some((out, removed))
}

/// Return a copy of `seq` with `value` inserted at `index`.
///
/// `index == seq.len()` appends. Returns `None` if `index` is past the end.
pub fn insert_at<T: Clone>(seq: &[T], index: usize, value: T) -> Option<Vec<T>> {
    if index > seq.len() {
        return None;
    }
    let mut out = Vec::with_capacity(seq.len() + 1);
    out.extend_from_slice(&seq[..index]);
    out.push(value);
    out.extend_from_slice(&seq[index..]);
    Some(out)
}

/// Move the element at `from` to `to` within one sequence (remove, then insert).
pub fn reorder<T: Clone>(seq: &[T], from: usize, to: usize) -> Option<Vec<T>> {
    let (shortened, moved) = remove_at(seq, from)?;
    insert_at(&shortened, to, moved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_at() {
        let (rest, removed) = remove_at(&["a", "b", "c"], 1).unwrap();
        assert_eq!(rest, vec!["a", "c"]);
        assert_eq!(removed, "b");
    }

    #[test]
    fn test_remove_at_out_of_bounds() {
        assert!(remove_at(&["a"], 1).is_none());
        assert!(remove_at::<&str>(&[], 0).is_none());
    }

    #[test]
    fn test_insert_at_front_middle_end() {
        assert_eq!(insert_at(&["b", "c"], 0, "a").unwrap(), vec!["a", "b", "c"]);
        assert_eq!(insert_at(&["a", "c"], 1, "b").unwrap(), vec!["a", "b", "c"]);
        assert_eq!(insert_at(&["a", "b"], 2, "c").unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_insert_at_past_end() {
        assert!(insert_at(&["a"], 2, "b").is_none());
    }

    #[test]
    fn test_reorder_later_uses_shortened_sequence() {
        // Index 2 is resolved after removal, so t1 lands last rather than in the middle.
        assert_eq!(reorder(&["t1", "t2", "t3"], 0, 2).unwrap(), vec!["t2", "t3", "t1"]);
    }

    #[test]
    fn test_reorder_earlier() {
        assert_eq!(reorder(&["t1", "t2", "t3"], 2, 0).unwrap(), vec!["t3", "t1", "t2"]);
    }

    #[test]
    fn test_reorder_destination_out_of_bounds() {
        // After removal only indices 0..=2 are valid.
        assert!(reorder(&["t1", "t2", "t3"], 0, 3).is_none());
    }
}
