//! Property-based tests for expression assembly.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use primeseek_space::CombinationSpace;

    use crate::ExpressionBuilder;

    fn shape_and_start() -> impl Strategy<Value = (usize, usize, u64)> {
        (1usize..=4, 1usize..=2, any::<u64>())
    }

    proptest! {
        #[test]
        fn generated_candidates_always_balance((nodes, nesting, seed) in shape_and_start()) {
            let space = CombinationSpace::with_shape(nodes, nesting);
            let total = space.total_candidates().unwrap();
            let start = u128::from(seed) % total;
            let builder = ExpressionBuilder::new();

            for (_, candidate) in space.candidates_from(start).unwrap().take(64) {
                let expr = builder.build(&candidate);
                prop_assert!(expr.is_ok(), "{:?} failed: {:?}", candidate, expr);
                let expr = expr.unwrap();

                let text = expr.text();
                let opens = text.matches('(').count();
                let closes = text.matches(')').count();
                prop_assert_eq!(opens, closes);

                let mut depth = 0i64;
                for c in text.chars() {
                    match c {
                        '(' => depth += 1,
                        ')' => depth -= 1,
                        _ => {}
                    }
                    prop_assert!(depth >= 0, "closing before opening in {}", text);
                }

                prop_assert!(!expr.variable_slots().is_empty());
                prop_assert!(expr.arena().mentions_index(expr.root()));
            }
        }

        #[test]
        fn building_is_deterministic((nodes, nesting, seed) in shape_and_start()) {
            let space = CombinationSpace::with_shape(nodes, nesting);
            let total = space.total_candidates().unwrap();
            let start = u128::from(seed) % total;
            let builder = ExpressionBuilder::new();

            for (_, candidate) in space.candidates_from(start).unwrap().take(16) {
                let first = builder.build(&candidate).unwrap();
                let second = builder.build(&candidate).unwrap();
                prop_assert_eq!(first.text(), second.text());
                prop_assert_eq!(first.arena().len(), second.arena().len());
            }
        }
    }
}
