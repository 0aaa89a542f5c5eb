//! Nearest-value lookup in an ascending sequence.

/// Index of the value in `sorted` closest to `target`.
///
/// `sorted` must be ascending; this is not checked. Targets at or below the
/// first element map to index 0, targets at or above the last element map to
/// the last value. Between the ends, the two values straddling the lower-bound
/// insertion point are compared and the nearer one wins; on an exact tie the
/// smaller one wins. The returned index is the first occurrence of the chosen
/// value.
///
/// Returns `None` for an empty slice, a NaN target, or NaN end values.
pub fn closest_index(sorted: &[f64], target: f64) -> Option<usize> {
    let (&first, &last) = (sorted.first()?, sorted.last()?);
    if target.is_nan() || first.is_nan() || last.is_nan() {
        return None;
    }
    if target <= first {
        return Some(0);
    }
    if target >= last {
        return Some(first_occurrence(sorted, last));
    }

    // first < target < last, so 1 <= pos <= len - 1 for ordered input.
    // NaN inside the slice breaks the ordering; keep both neighbors in bounds.
    let pos = sorted
        .partition_point(|&v| v < target)
        .clamp(1, sorted.len() - 1);
    let before = sorted[pos - 1];
    let after = sorted[pos];
    let chosen = if after - target < target - before {
        after
    } else {
        before
    };
    Some(first_occurrence(sorted, chosen))
}

/// Value in `sorted` closest to `target`. See [`closest_index`].
pub fn closest(sorted: &[f64], target: f64) -> Option<f64> {
    closest_index(sorted, target).map(|i| sorted[i])
}

fn first_occurrence(sorted: &[f64], value: f64) -> usize {
    sorted.partition_point(|&v| v < value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEQ: [f64; 4] = [1.0, 3.0, 5.0, 7.0];

    #[test]
    fn below_first_returns_first() {
        assert_eq!(closest(&SEQ, 0.0), Some(1.0));
        assert_eq!(closest(&SEQ, 1.0), Some(1.0));
        assert_eq!(closest(&SEQ, f64::NEG_INFINITY), Some(1.0));
    }

    #[test]
    fn above_last_returns_last() {
        assert_eq!(closest(&SEQ, 10.0), Some(7.0));
        assert_eq!(closest(&SEQ, 7.0), Some(7.0));
        assert_eq!(closest_index(&SEQ, 10.0), Some(3));
    }

    #[test]
    fn ties_go_to_the_smaller_value() {
        assert_eq!(closest(&SEQ, 4.0), Some(3.0));
        assert_eq!(closest(&SEQ, 6.0), Some(5.0));
        assert_eq!(closest(&[2.0, 8.0], 5.0), Some(2.0));
    }

    #[test]
    fn nearer_neighbor_wins() {
        assert_eq!(closest(&SEQ, 4.9), Some(5.0));
        assert_eq!(closest(&SEQ, 3.1), Some(3.0));
        assert_eq!(closest(&[2.0, 8.0], 5.5), Some(8.0));
        assert_eq!(closest_index(&SEQ, 4.9), Some(2));
    }

    #[test]
    fn exact_hit() {
        assert_eq!(closest_index(&SEQ, 5.0), Some(2));
    }

    #[test]
    fn duplicates_report_first_occurrence() {
        let seq = [1.0, 2.0, 2.0, 2.0, 9.0];
        assert_eq!(closest_index(&seq, 2.4), Some(1));
        assert_eq!(closest_index(&[1.0, 4.0, 4.0], 8.0), Some(1));
    }

    #[test]
    fn empty_and_nan() {
        assert_eq!(closest(&[], 1.0), None);
        assert_eq!(closest(&SEQ, f64::NAN), None);
    }

    #[test]
    fn nan_ends_have_no_answer() {
        assert_eq!(closest(&[f64::NAN, 5.0], 1.0), None);
        assert_eq!(closest(&[1.0, 5.0, f64::NAN], 3.0), None);
        assert_eq!(closest(&[f64::NAN], 1.0), None);
    }

    #[test]
    fn nan_inside_stays_in_bounds() {
        let seq = [1.0, f64::NAN, f64::NAN, f64::NAN, 9.0];
        for target in [1.5, 4.0, 5.0, 8.5] {
            let idx = closest_index(&seq, target).unwrap();
            assert!(idx < seq.len());
        }
    }

    #[test]
    fn single_element() {
        assert_eq!(closest(&[4.2], -100.0), Some(4.2));
        assert_eq!(closest(&[4.2], 100.0), Some(4.2));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn no_element_is_strictly_closer(
            mut values in prop::collection::vec(-1e3_f64..1e3, 1..40),
            target in -2e3_f64..2e3,
        ) {
            values.sort_by(f64::total_cmp);
            let idx = closest_index(&values, target).unwrap();
            let best = (values[idx] - target).abs();
            for &v in &values {
                prop_assert!((v - target).abs() >= best);
                // Equally close and smaller would have won the tie.
                if (v - target).abs() == best {
                    prop_assert!(v >= values[idx]);
                }
            }
            prop_assert_eq!(idx, values.partition_point(|&v| v < values[idx]));
        }
    }
}
