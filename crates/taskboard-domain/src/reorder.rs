//! Positional reordering of board lists.

/// Move the element at `from` to index `to`, shifting the elements between.
///
/// Remove-then-insert semantics. Returns a new vector and leaves `items`
/// untouched; an out-of-range index yields an unchanged copy.
pub fn array_move<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut moved = items.to_vec();
    if from >= moved.len() || to >= moved.len() || from == to {
        return moved;
    }
    let item = moved.remove(from);
    moved.insert(to, item);
    moved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_forward() {
        assert_eq!(array_move(&[1, 2, 3, 4], 0, 2), vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_move_backward() {
        assert_eq!(array_move(&[1, 2, 3, 4], 3, 1), vec![1, 4, 2, 3]);
    }

    #[test]
    fn test_move_and_back_restores_order() {
        let original = vec!['a', 'b', 'c', 'd', 'e'];
        for from in 0..original.len() {
            for to in 0..original.len() {
                let moved = array_move(&original, from, to);
                assert_eq!(array_move(&moved, to, from), original);
            }
        }
    }

    #[test]
    fn test_out_of_range_is_unchanged() {
        assert_eq!(array_move(&[1, 2, 3], 5, 0), vec![1, 2, 3]);
        assert_eq!(array_move(&[1, 2, 3], 0, 3), vec![1, 2, 3]);
        assert!(array_move::<u8>(&[], 0, 0).is_empty());
    }
}
