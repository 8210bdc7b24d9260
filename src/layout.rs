//! Port positioning along a node edge.
//!
//! Offsets are fractions of the node height, strictly inside (0, 1) so a
//! port never coincides with the top or bottom edge.

/// Evenly spaced offsets for `n` ports: `(i + 1) / (n + 1)`.
///
/// This is the layout rule for dynamic ports and for static ports without
/// an explicit hint. The whole set is recomputed whenever the count
/// changes; no per-port identity survives a cardinality change.
pub fn even_offsets(count: usize) -> Vec<f32> {
    (0..count)
        .map(|i| (i + 1) as f32 / (count + 1) as f32)
        .collect()
}

/// Offset for one static port: the schema hint if present, else its slot
/// in the even spacing of all `count` ports on that edge.
pub fn static_offset(hint: Option<f32>, index: usize, count: usize) -> f32 {
    match hint {
        Some(h) => h,
        None => (index + 1) as f32 / (count + 1) as f32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_port_sits_at_the_middle() {
        assert_eq!(even_offsets(1), vec![0.5]);
        assert_eq!(static_offset(None, 0, 1), 0.5);
    }

    #[test]
    fn three_ports_split_into_quarters() {
        assert_eq!(even_offsets(3), vec![0.25, 0.5, 0.75]);
    }

    #[test]
    fn offsets_stay_strictly_inside_the_node_body() {
        for n in 1..20 {
            for offset in even_offsets(n) {
                assert!(offset > 0.0 && offset < 1.0, "n={n} offset={offset}");
            }
        }
    }

    #[test]
    fn offsets_increase_in_input_order() {
        let offsets = even_offsets(7);
        for pair in offsets.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn explicit_hint_wins_over_even_spacing() {
        assert_eq!(static_offset(Some(0.4), 0, 3), 0.4);
        assert_eq!(static_offset(Some(0.6), 1, 3), 0.6);
    }

    #[test]
    fn no_ports_means_no_offsets() {
        assert!(even_offsets(0).is_empty());
    }
}
