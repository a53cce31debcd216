//! Property-based tests for the candidate space.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use primeseek_core::{Term, TermVocabulary};

    use crate::{CombinationSpace, Odometer};

    fn small_shape() -> impl Strategy<Value = (usize, usize)> {
        (1usize..=4, 1usize..=3)
    }

    proptest! {
        #[test]
        fn operator_assignments_count(node_count in 1usize..=5) {
            let space = CombinationSpace::with_shape(node_count, 1);
            let expected = 6u128.pow(node_count as u32 - 1);
            prop_assert_eq!(space.operator_assignments().count() as u128, expected);
            prop_assert_eq!(space.sizes().unwrap().operators, expected);
        }

        #[test]
        fn node_assignments_count_and_contain_variable(node_count in 1usize..=4) {
            let space = CombinationSpace::with_shape(node_count, 1);
            let mut seen = 0u128;
            for assignment in space.node_assignments() {
                prop_assert_eq!(assignment.len(), node_count);
                prop_assert!(assignment.contains(&Term::Index));
                seen += 1;
            }
            prop_assert_eq!(seen, space.sizes().unwrap().nodes);
        }

        #[test]
        fn wrap_and_position_lengths((node_count, nesting) in small_shape(), skip in 0u128..5000) {
            let space = CombinationSpace::with_shape(node_count, nesting);
            let total = space.total_candidates().unwrap();
            let start = skip % total;
            for (_, candidate) in space.candidates_from(start).unwrap().take(50) {
                prop_assert_eq!(candidate.nodes.len(), node_count);
                prop_assert_eq!(candidate.operators.len(), node_count - 1);
                prop_assert_eq!(candidate.wrap_templates.len(), node_count * nesting);
                prop_assert_eq!(candidate.positions.len(), node_count * nesting);
                prop_assert!(candidate.contains_variable());
            }
        }

        #[test]
        fn ordinals_are_consecutive((node_count, nesting) in small_shape(), start in 0u128..100_000) {
            let space = CombinationSpace::with_shape(node_count, nesting);
            let total = space.total_candidates().unwrap();
            let start = start % total;
            let stream = space.candidates_from(start).unwrap();
            prop_assert_eq!(stream.position(), start);
            for (offset, (ordinal, _)) in stream.take(20).enumerate() {
                prop_assert_eq!(ordinal, start + offset as u128);
            }
        }

        #[test]
        fn odometer_roundtrip(radix in 1usize..=13, len in 0usize..=5, seed in any::<u64>()) {
            let count = Odometer::count(radix, len).unwrap();
            let ordinal = u128::from(seed) % count;
            let odometer = Odometer::at(radix, len, ordinal).unwrap();
            prop_assert_eq!(odometer.ordinal(), ordinal);
        }
    }

    #[test]
    fn vocabulary_sizes_feed_the_closed_form() {
        let space = CombinationSpace::with_shape(2, 2);
        let sizes = space.sizes().unwrap();
        let wraps = TermVocabulary::wrap_templates().len() as u128;
        assert_eq!(sizes.wrap_templates, wraps.pow(4));
        assert_eq!(sizes.positions, 4u128.pow(4));
    }
}
